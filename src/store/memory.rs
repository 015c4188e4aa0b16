extern crate alloc;

use core::sync::atomic::{AtomicU64, Ordering};

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;
use crate::game::{GameId, GameSession, PlayerId};
use crate::sync::Mutex;

use super::{Account, Commit, GameRecord, GameStore};

#[derive(Default)]
struct Tables {
    games: HashMap<GameId, GameSession>,
    /// Ids of the games in `games` that are still active.
    active: BTreeSet<GameId>,
    accounts: HashMap<PlayerId, Account>,
    records: Vec<GameRecord>,
}

/// In-process [`GameStore`] for tests, single-node deployments and as a
/// reference for durable backends.
///
/// Every read and commit takes one lock for its own duration only, which is
/// what makes [`commit`](GameStore::commit) atomic.
pub struct MemoryStore {
    next_id: AtomicU64,
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            tables: Mutex::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore for MemoryStore {
    fn next_game_id(&self) -> Result<GameId, StoreError> {
        Ok(GameId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn load_game(&self, id: GameId) -> Result<Option<GameSession>, StoreError> {
        Ok(self.tables.with(|tables| tables.games.get(&id).cloned()))
    }

    fn load_account(&self, player: PlayerId) -> Result<Option<Account>, StoreError> {
        Ok(self
            .tables
            .with(|tables| tables.accounts.get(&player).copied()))
    }

    fn create_account(&self, account: Account) -> Result<(), StoreError> {
        self.tables.with(|tables| {
            if tables.accounts.contains_key(&account.player) {
                return Err(StoreError::AlreadyExists);
            }
            tables.accounts.insert(account.player, account);
            Ok(())
        })
    }

    fn commit(&self, commit: Commit) -> Result<(), StoreError> {
        self.tables.with(|tables| {
            let game_id = commit.game.id();
            let stored_version = tables.games.get(&game_id).map(GameSession::version);
            if stored_version != commit.expected_version {
                return Err(StoreError::Conflict);
            }

            let player = commit.account.player;
            let account_version = tables.accounts.get(&player).map(|account| account.version);
            if account_version != Some(commit.expected_account_version) {
                return Err(StoreError::Conflict);
            }

            if commit.game.is_active() {
                tables.active.insert(game_id);
            } else {
                tables.active.remove(&game_id);
            }
            tables.games.insert(game_id, commit.game);
            tables.accounts.insert(player, commit.account);
            if let Some(record) = commit.record {
                tables.records.push(record);
            }

            Ok(())
        })
    }

    fn active_games(&self) -> Result<Vec<GameId>, StoreError> {
        Ok(self
            .tables
            .with(|tables| tables.active.iter().copied().collect()))
    }

    fn records(&self, player: PlayerId) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self.tables.with(|tables| {
            tables
                .records
                .iter()
                .filter(|record| record.player == player)
                .cloned()
                .collect()
        }))
    }
}

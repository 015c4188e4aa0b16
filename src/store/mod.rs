//! Storage boundary for game sessions and player accounts.
//!
//! The engine never assumes the sessions live in its own process. A
//! [`GameStore`] only has to offer keyed reads and one atomic
//! compare-and-set [`commit`](GameStore::commit) that writes a session, its
//! owner's balance and, for finished games, the archive record together.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::StoreError;
use crate::game::{GameId, GameSession, PlayerId};
use crate::hand::Owner;
use crate::result::Settlement;

mod memory;

pub use memory::MemoryStore;

/// A player's balance with its commit sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account owner.
    pub player: PlayerId,
    /// Available balance.
    pub balance: u64,
    /// Grows by one on every commit that touches the account.
    pub version: u64,
}

impl Account {
    /// Creates a fresh account at version 0.
    #[must_use]
    pub const fn open(player: PlayerId, balance: u64) -> Self {
        Self {
            player,
            balance,
            version: 0,
        }
    }

    /// Returns the next revision of this account holding `balance`.
    #[must_use]
    pub const fn with_balance(self, balance: u64) -> Self {
        Self {
            player: self.player,
            balance,
            version: self.version + 1,
        }
    }
}

/// One card on the table, as kept for audit and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtCard {
    /// Whose hand the card is in.
    pub owner: Owner,
    /// Player hand index (0 or 1); always 0 for the dealer.
    pub hand_index: u8,
    /// Position within the hand.
    pub order: u8,
    /// The card.
    pub card: Card,
}

/// Archive entry written when a game finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// The game.
    pub game_id: GameId,
    /// The player.
    pub player: PlayerId,
    /// Total wagered, doubles and splits included.
    pub bet: u64,
    /// Per-hand results.
    pub settlement: Settlement,
    /// Sum of the per-hand payouts.
    pub net_payout: i64,
    /// When the game finished (unix seconds).
    pub finished_at: u64,
    /// Every card dealt in the game.
    pub cards: Vec<DealtCard>,
}

impl GameRecord {
    /// Builds the archive entry of a finished session, or `None` if it is
    /// still active.
    #[must_use]
    pub fn from_session(session: &GameSession) -> Option<Self> {
        let settlement = *session.settlement()?;
        Some(Self {
            game_id: session.id(),
            player: session.owner(),
            bet: session.committed(),
            settlement,
            net_payout: settlement.net_payout(),
            finished_at: session.updated_at(),
            cards: session.dealt_cards(),
        })
    }
}

/// A compare-and-set write of one game transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The session after the transition.
    pub game: GameSession,
    /// Version the session had when read; `None` when creating it.
    pub expected_version: Option<u64>,
    /// The owner's account after the transition.
    pub account: Account,
    /// Version the account had when read.
    pub expected_account_version: u64,
    /// Archive entry, present when the transition finished the game.
    pub record: Option<GameRecord>,
}

/// Keyed, durable home for sessions, accounts and finished-game records.
///
/// Implementations must apply [`commit`](Self::commit) atomically: either
/// both versions match and every part is written, or nothing is.
pub trait GameStore: Send + Sync {
    /// Allocates a fresh game id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn next_game_id(&self) -> Result<GameId, StoreError>;

    /// Loads a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn load_game(&self, id: GameId) -> Result<Option<GameSession>, StoreError>;

    /// Loads an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn load_account(&self, player: PlayerId) -> Result<Option<Account>, StoreError>;

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the player already has one.
    fn create_account(&self, account: Account) -> Result<(), StoreError>;

    /// Writes a transition if neither the session nor the account changed
    /// since they were read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] on any version mismatch, writing nothing.
    fn commit(&self, commit: Commit) -> Result<(), StoreError>;

    /// Lists the ids of sessions that are still active.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn active_games(&self) -> Result<Vec<GameId>, StoreError>;

    /// Lists the finished-game records of one player.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn records(&self, player: PlayerId) -> Result<Vec<GameRecord>, StoreError>;
}

impl<S: GameStore + ?Sized> GameStore for Arc<S> {
    fn next_game_id(&self) -> Result<GameId, StoreError> {
        (**self).next_game_id()
    }

    fn load_game(&self, id: GameId) -> Result<Option<GameSession>, StoreError> {
        (**self).load_game(id)
    }

    fn load_account(&self, player: PlayerId) -> Result<Option<Account>, StoreError> {
        (**self).load_account(player)
    }

    fn create_account(&self, account: Account) -> Result<(), StoreError> {
        (**self).create_account(account)
    }

    fn commit(&self, commit: Commit) -> Result<(), StoreError> {
        (**self).commit(commit)
    }

    fn active_games(&self) -> Result<Vec<GameId>, StoreError> {
        (**self).active_games()
    }

    fn records(&self, player: PlayerId) -> Result<Vec<GameRecord>, StoreError> {
        (**self).records(player)
    }
}

//! The service layer players talk to.
//!
//! A [`Table`] runs every operation as read, transition, compare-and-set
//! commit against a [`GameStore`]. It keeps no game state of its own, so any
//! number of tables (in one process or many) can serve the same store.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::error::{ActionError, StoreError, TableError};
use crate::game::{GameId, GameSession, PlayerId};
use crate::options::GameOptions;
use crate::shoe::{SeededShoes, ShoeSource};
use crate::stats::PlayerStats;
use crate::store::{Account, Commit, GameRecord, GameStore};
use crate::sync::Mutex;
use crate::view::GameView;

/// A player action applied to a loaded session.
type Action<'a> = &'a dyn Fn(&mut GameSession, &mut u64, &GameOptions) -> Result<(), ActionError>;

/// Blackjack tables backed by a [`GameStore`].
pub struct Table<S> {
    store: S,
    options: GameOptions,
    shoes: Mutex<Box<dyn ShoeSource>>,
    clock: Box<dyn Clock>,
}

impl<S: GameStore> Table<S> {
    /// Creates a table over `store`, shuffling shoes from `seed`.
    ///
    /// Tables built from the same seed deal identical shoes; use
    /// [`Table::with_entropy`] when several instances serve one store.
    #[must_use]
    pub fn new(store: S, options: GameOptions, seed: u64) -> Self {
        Self::with_source(store, options, SeededShoes::new(seed))
    }

    /// Creates a table over `store` whose shoes are shuffled from an
    /// operating-system seed.
    ///
    /// # Panics
    ///
    /// Panics if the operating system cannot provide randomness.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[must_use]
    pub fn with_entropy(store: S, options: GameOptions) -> Self {
        Self::with_source(store, options, SeededShoes::from_entropy())
    }

    fn with_source(store: S, options: GameOptions, shoes: SeededShoes) -> Self {
        Self {
            store,
            options,
            shoes: Mutex::new(Box::new(shoes)),
            clock: default_clock(),
        }
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the shoe source.
    #[must_use]
    pub fn with_shoes(mut self, shoes: impl ShoeSource + 'static) -> Self {
        self.shoes = Mutex::new(Box::new(shoes));
        self
    }

    /// Returns the game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Opens an account holding [`GameOptions::initial_balance`] and returns
    /// that balance.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::AccountExists`] if the player already has one.
    pub fn open_account(&self, player: PlayerId) -> Result<u64, TableError> {
        let balance = self.options.initial_balance;
        match self.store.create_account(Account::open(player, balance)) {
            Ok(()) => {
                info!(%player, balance, "account opened");
                Ok(balance)
            }
            Err(StoreError::AlreadyExists) => Err(TableError::AccountExists(player)),
            Err(error) => Err(error.into()),
        }
    }

    /// Returns the player's available balance.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::AccountNotFound`] for unknown players.
    pub fn balance(&self, player: PlayerId) -> Result<u64, TableError> {
        Ok(self.account(player)?.balance)
    }

    /// Debits `bet` and deals a new game.
    ///
    /// The returned view may already be finished when the player was dealt a
    /// natural.
    ///
    /// # Errors
    ///
    /// Returns an error if the player has no account, the bet is zero or
    /// exceeds the balance, or the account kept changing for longer than the
    /// retry budget.
    pub fn start(&self, player: PlayerId, bet: u64) -> Result<GameView, TableError> {
        let mut account = self.account(player)?;
        let id = self.store.next_game_id()?;
        let shoe = self.shoes.with(|shoes| shoes.next_shoe());

        for attempt in 0..=self.options.max_retries {
            let mut bankroll = account.balance;
            let game = GameSession::deal(
                id,
                player,
                bet,
                shoe.clone(),
                &mut bankroll,
                &self.options,
                self.clock.now(),
            )?;

            match self.write(game, None, account, bankroll) {
                Ok(view) => {
                    info!(game = %id, %player, bet, "game started");
                    return Ok(view);
                }
                Err(StoreError::Conflict) => {
                    warn!(game = %id, %player, attempt, "account changed while starting, retrying");
                    account = self.account(player)?;
                }
                Err(error) => return Err(error.into()),
            }
        }

        warn!(game = %id, %player, "gave up starting game");
        Err(TableError::Contention(id))
    }

    /// Draws a card into the current hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is unknown, the action is not legal, or a
    /// concurrent request changed the game first.
    pub fn hit(&self, player: PlayerId, game_id: GameId) -> Result<GameView, TableError> {
        self.act(player, game_id, "hit", &|game, bankroll, options| {
            game.hit(bankroll, options).map(drop)
        })
    }

    /// Stands on the current hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is unknown or finished, or a concurrent
    /// request changed the game first.
    pub fn stand(&self, player: PlayerId, game_id: GameId) -> Result<GameView, TableError> {
        self.act(player, game_id, "stand", &GameSession::stand)
    }

    /// Doubles the bet on the current hand and draws its last card.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is unknown, the hand cannot double, the
    /// balance cannot cover the extra bet, or a concurrent request changed
    /// the game first.
    pub fn double_down(&self, player: PlayerId, game_id: GameId) -> Result<GameView, TableError> {
        self.act(player, game_id, "double down", &|game, bankroll, options| {
            game.double_down(bankroll, options).map(drop)
        })
    }

    /// Splits the current pair into two hands.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is unknown, the hand cannot split, the
    /// balance cannot cover the second bet, or a concurrent request changed
    /// the game first.
    pub fn split(&self, player: PlayerId, game_id: GameId) -> Result<GameView, TableError> {
        self.act(player, game_id, "split", &|game, bankroll, options| {
            game.split(bankroll, options).map(drop)
        })
    }

    /// Returns the current view of a game.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::GameNotFound`] unless the game exists and
    /// belongs to `player`.
    pub fn get(&self, player: PlayerId, game_id: GameId) -> Result<GameView, TableError> {
        let game = self.owned_game(player, game_id)?;
        let account = self.account(player)?;
        Ok(GameView::new(&game, account.balance))
    }

    /// Returns the player's statistics over finished games.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::AccountNotFound`] for unknown players.
    pub fn stats(&self, player: PlayerId) -> Result<PlayerStats, TableError> {
        let account = self.account(player)?;
        let records = self.store.records(player)?;
        Ok(PlayerStats::from_records(&records, account.balance))
    }

    /// Settles every active game left untouched for at least
    /// [`GameOptions::abandon_after`] seconds, standing all remaining hands.
    ///
    /// Games the player touches while the sweep runs are skipped. Returns the
    /// ids of the games settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn reap_abandoned(&self) -> Result<Vec<GameId>, TableError> {
        let Some(idle) = self.options.abandon_after else {
            return Ok(Vec::new());
        };

        let now = self.clock.now();
        let mut reaped = Vec::new();

        for id in self.store.active_games()? {
            let Some(game) = self.store.load_game(id)? else {
                continue;
            };
            if !game.is_active() || now.saturating_sub(game.updated_at()) < idle {
                continue;
            }

            let player = game.owner();
            match self.apply(&game, "abandon", &GameSession::abandon) {
                Ok(_) => {
                    warn!(game = %id, %player, "settled abandoned game");
                    reaped.push(id);
                }
                Err(TableError::Conflict(_) | TableError::Action(ActionError::GameNotActive)) => {}
                Err(error) => return Err(error),
            }
        }

        Ok(reaped)
    }

    fn account(&self, player: PlayerId) -> Result<Account, TableError> {
        self.store
            .load_account(player)?
            .ok_or(TableError::AccountNotFound(player))
    }

    fn owned_game(&self, player: PlayerId, game_id: GameId) -> Result<GameSession, TableError> {
        self.store
            .load_game(game_id)?
            .filter(|game| game.owner() == player)
            .ok_or(TableError::GameNotFound(game_id))
    }

    fn act(
        &self,
        player: PlayerId,
        game_id: GameId,
        name: &'static str,
        action: Action<'_>,
    ) -> Result<GameView, TableError> {
        let game = self.owned_game(player, game_id)?;
        self.apply(&game, name, action)
    }

    /// Applies `action` to `game` as read and commits the result.
    ///
    /// A conflict on the game itself means another request already used this
    /// decision point, so it is reported rather than retried. A conflict on
    /// the account alone re-applies the action against the fresh balance.
    fn apply(
        &self,
        game: &GameSession,
        name: &'static str,
        action: Action<'_>,
    ) -> Result<GameView, TableError> {
        let id = game.id();
        let player = game.owner();
        let read_version = game.version();

        for attempt in 0..=self.options.max_retries {
            let account = self.account(player)?;
            let mut next = game.clone();
            let mut bankroll = account.balance;

            if let Err(reason) = action(&mut next, &mut bankroll, &self.options) {
                if reason == ActionError::ShoeExhausted {
                    error!(game = %id, %player, action = name, "shoe exhausted mid-round");
                } else {
                    debug!(game = %id, %player, action = name, %reason, "action rejected");
                }
                return Err(reason.into());
            }

            match self.write(next, Some(read_version), account, bankroll) {
                Ok(view) => {
                    debug!(game = %id, %player, action = name, "action applied");
                    return Ok(view);
                }
                Err(StoreError::Conflict) => {
                    let current = self.store.load_game(id)?;
                    if current.map(|game| game.version()) != Some(read_version) {
                        warn!(game = %id, %player, action = name, "game changed by a concurrent request");
                        return Err(TableError::Conflict(id));
                    }
                    warn!(game = %id, %player, action = name, attempt, "account changed, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        warn!(game = %id, %player, action = name, "gave up after repeated conflicts");
        Err(TableError::Contention(id))
    }

    /// Stamps `game` and commits it together with the new balance.
    fn write(
        &self,
        mut game: GameSession,
        expected_version: Option<u64>,
        account: Account,
        bankroll: u64,
    ) -> Result<GameView, StoreError> {
        game.mark_committed(self.clock.now());

        let record = GameRecord::from_session(&game);
        let view = GameView::new(&game, bankroll);
        let finished = record
            .as_ref()
            .map(|record| (record.game_id, record.player, record.bet, record.net_payout));

        self.store.commit(Commit {
            game,
            expected_version,
            account: account.with_balance(bankroll),
            expected_account_version: account.version,
            record,
        })?;

        if let Some((game, player, bet, net_payout)) = finished {
            info!(%game, %player, bet, net_payout, balance = bankroll, "game finished");
        }

        Ok(view)
    }
}

#[cfg(feature = "std")]
fn default_clock() -> Box<dyn Clock> {
    Box::new(crate::clock::SystemClock)
}

#[cfg(not(feature = "std"))]
fn default_clock() -> Box<dyn Clock> {
    Box::new(crate::clock::ManualClock::new(0))
}

//! Error types for game operations.

use thiserror::Error;

use crate::card::Card;
use crate::game::{GameId, PlayerId};

/// Errors raised by the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    Exhausted,
    /// A stacked shoe repeats a card.
    #[error("card {0} appears twice in the shoe")]
    DuplicateCard(Card),
    /// A restored shoe's cursor points past its last card.
    #[error("cursor {cursor} is past the {len} cards in the shoe")]
    CursorOutOfRange {
        /// Stored cursor.
        cursor: usize,
        /// Number of cards in the shoe.
        len: usize,
    },
}

/// Errors that can occur when placing the wager and dealing a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// The bet exceeds the available balance.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Not enough cards in the shoe.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
    /// A natural on this bet would not pay a whole unit.
    #[error("a blackjack on this bet would not pay a whole amount")]
    InexactPayout,
}

impl From<ShoeError> for DealError {
    fn from(_: ShoeError) -> Self {
        Self::NotEnoughCards
    }
}

/// Why an action is not legal for the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAction {
    /// The current hand index does not exist.
    #[error("hand not found")]
    HandNotFound,
    /// The hand already stood, busted or doubled.
    #[error("hand is not active")]
    HandNotActive,
    /// Double down needs an unsplit hand of exactly two cards.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Split needs exactly two cards of the same rank.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Only one split is allowed per game.
    #[error("hand was already split")]
    AlreadySplit,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game has already finished.
    #[error("game is not active")]
    GameNotActive,
    /// The action is not legal right now.
    #[error("invalid action: {0}")]
    InvalidAction(InvalidAction),
    /// The extra wager for a double or split exceeds the balance.
    #[error("insufficient balance for this action")]
    InsufficientBalance,
    /// The shoe ran out mid-round. Single-deck play never reaches this.
    #[error("no cards left in the shoe")]
    ShoeExhausted,
}

impl From<InvalidAction> for ActionError {
    fn from(reason: InvalidAction) -> Self {
        Self::InvalidAction(reason)
    }
}

impl From<ShoeError> for ActionError {
    fn from(_: ShoeError) -> Self {
        Self::ShoeExhausted
    }
}

/// Errors reported by a [`GameStore`](crate::store::GameStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A stored version no longer matches the expected one.
    #[error("version conflict")]
    Conflict,
    /// The record being created already exists.
    #[error("record already exists")]
    AlreadyExists,
    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(&'static str),
}

/// Errors returned by [`Table`](crate::table::Table) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// No game with this id belongs to the player.
    #[error("game {0} not found")]
    GameNotFound(GameId),
    /// The player has no account.
    #[error("account {0} not found")]
    AccountNotFound(PlayerId),
    /// The player already has an account.
    #[error("account {0} already exists")]
    AccountExists(PlayerId),
    /// The opening wager was rejected.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// The action was rejected by the game.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// Another request changed the game first; fetch it again.
    #[error("game {0} was changed by a concurrent request")]
    Conflict(GameId),
    /// Retries were exhausted while the account kept changing.
    #[error("game {0} could not be committed, try again")]
    Contention(GameId),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! What callers get to see of a game.
//!
//! [`GameView`] is tagged by status. Dealer cards are copied from
//! [`DealerHand::visible_cards`], so the hole card of an active game never
//! reaches a serialized response. The finished variant adds the settlement.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::game::{GameId, GameSession, GameStatus, PerHand, Phase};
use crate::hand::{DealerHand, Hand, HandStatus};
use crate::result::Settlement;

/// A player hand as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    /// Cards in the hand.
    pub cards: Vec<Card>,
    /// Best total.
    pub value: u8,
    /// Whether an ace is counted as 11.
    pub soft: bool,
    /// Hand status.
    pub status: HandStatus,
    /// Bet riding on the hand.
    pub bet: u64,
}

impl From<&Hand> for HandView {
    fn from(hand: &Hand) -> Self {
        Self {
            cards: hand.cards().to_vec(),
            value: hand.value(),
            soft: hand.is_soft(),
            status: hand.status(),
            bet: hand.bet(),
        }
    }
}

/// The dealer hand as far as the caller may see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerView {
    /// Visible cards.
    pub cards: Vec<Card>,
    /// Value of the visible cards.
    pub value: u8,
}

impl From<&DealerHand> for DealerView {
    fn from(dealer: &DealerHand) -> Self {
        Self {
            cards: dealer.visible_cards().to_vec(),
            value: dealer.visible_value(),
        }
    }
}

/// A game still waiting for player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveView {
    /// The game.
    pub game_id: GameId,
    /// Commit sequence number of the state shown.
    pub version: u64,
    /// Total wagered so far.
    pub bet_amount: u64,
    /// Whether the hand was split.
    pub is_split: bool,
    /// Player hands.
    pub hands: PerHand<HandView>,
    /// Dealer up card only.
    pub dealer: DealerView,
    /// Whether double down is currently legal.
    pub can_double_down: bool,
    /// Whether split is currently legal.
    pub can_split: bool,
    /// Hand awaiting an action, reported for split games.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hand_index: Option<usize>,
}

/// A settled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedView {
    /// The game.
    pub game_id: GameId,
    /// Commit sequence number of the state shown.
    pub version: u64,
    /// Total wagered.
    pub bet_amount: u64,
    /// Whether the hand was split.
    pub is_split: bool,
    /// Player hands.
    pub hands: PerHand<HandView>,
    /// Full dealer hand.
    pub dealer: DealerView,
    /// Per-hand results.
    pub settlement: Settlement,
    /// Sum of the per-hand payouts.
    pub net_payout: i64,
    /// Player balance after settlement.
    pub balance: u64,
}

/// Caller-facing snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameView {
    /// Game in progress.
    Active(ActiveView),
    /// Game settled.
    Finished(FinishedView),
}

impl GameView {
    /// Builds the view of `session` for a player whose balance is `balance`.
    #[must_use]
    pub fn new(session: &GameSession, balance: u64) -> Self {
        let hands = session.hands().map(|hand| HandView::from(hand));
        let is_split = session.hands().is_split();

        match session.phase() {
            Phase::PlayerTurn { hand_index } => Self::Active(ActiveView {
                game_id: session.id(),
                version: session.version(),
                bet_amount: session.committed(),
                is_split,
                hands,
                dealer: DealerView::from(session.dealer()),
                can_double_down: session.can_double_down(),
                can_split: session.can_split(),
                current_hand_index: is_split.then_some(*hand_index),
            }),
            Phase::Finished(settlement) => Self::Finished(FinishedView {
                game_id: session.id(),
                version: session.version(),
                bet_amount: session.committed(),
                is_split,
                hands,
                dealer: DealerView::from(session.dealer()),
                settlement: *settlement,
                net_payout: settlement.net_payout(),
                balance,
            }),
        }
    }

    /// Returns the game id.
    #[must_use]
    pub const fn game_id(&self) -> GameId {
        match self {
            Self::Active(view) => view.game_id,
            Self::Finished(view) => view.game_id,
        }
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        match self {
            Self::Active(_) => GameStatus::Active,
            Self::Finished(_) => GameStatus::Finished,
        }
    }

    /// Returns the version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        match self {
            Self::Active(view) => view.version,
            Self::Finished(view) => view.version,
        }
    }

    /// Returns the active view, if the game is in progress.
    #[must_use]
    pub const fn as_active(&self) -> Option<&ActiveView> {
        match self {
            Self::Active(view) => Some(view),
            Self::Finished(_) => None,
        }
    }

    /// Returns the finished view, if the game is settled.
    #[must_use]
    pub const fn as_finished(&self) -> Option<&FinishedView> {
        match self {
            Self::Active(_) => None,
            Self::Finished(view) => Some(view),
        }
    }
}

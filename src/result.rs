//! Settlement types produced when a game finishes.

use serde::{Deserialize, Serialize};

use crate::game::PerHand;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack.
    Blackjack,
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet riding on the hand, doubles included.
    pub bet: u64,
    /// Net payout: positive is profit, negative is the lost stake.
    pub payout: i64,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

impl HandResult {
    /// Amount credited back to the bankroll: the stake plus the net payout.
    #[must_use]
    pub const fn returned(&self) -> u64 {
        self.bet.saturating_add_signed(self.payout)
    }
}

/// Per-hand results of a finished game: one for a plain game, two after a split.
pub type Settlement = PerHand<HandResult>;

impl Settlement {
    /// Sum of the per-hand net payouts.
    #[must_use]
    pub fn net_payout(&self) -> i64 {
        self.iter().map(|result| result.payout).sum()
    }

    /// Total credited back to the bankroll.
    #[must_use]
    pub fn returned(&self) -> u64 {
        self.iter().map(HandResult::returned).sum()
    }
}

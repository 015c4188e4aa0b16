//! Payout calculation for a single settled hand.

use crate::hand::{DealerHand, Hand};
use crate::options::{GameOptions, RoundingMode};
use crate::result::{HandOutcome, HandResult};

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Settles one terminal player hand against the dealer's final hand.
///
/// Rules, first match wins:
/// 1. player bust loses the bet, whatever the dealer holds;
/// 2. a natural against a non-natural dealer pays [`GameOptions::blackjack_pays`];
/// 3. two naturals push;
/// 4. a dealer bust pays even money;
/// 5. otherwise the higher total wins even money and equal totals push.
#[must_use]
pub fn settle_hand(hand: &Hand, dealer: &DealerHand, options: &GameOptions) -> HandResult {
    let bet = hand.bet();
    let stake = signed(bet);
    let player_value = hand.value();
    let dealer_value = dealer.value();

    let (outcome, payout) = if hand.is_bust() {
        (HandOutcome::Lose, -stake)
    } else if hand.is_natural() && !dealer.is_blackjack() {
        let bonus = options
            .blackjack_pays
            .apply(bet, options.rounding_blackjack.unwrap_or(RoundingMode::Down));
        (HandOutcome::Blackjack, signed(bonus))
    } else if hand.is_natural() {
        (HandOutcome::Push, 0)
    } else if dealer.is_bust() || player_value > dealer_value {
        (HandOutcome::Win, stake)
    } else if player_value < dealer_value {
        (HandOutcome::Lose, -stake)
    } else {
        (HandOutcome::Push, 0)
    };

    HandResult {
        outcome,
        bet,
        payout,
        player_value,
        dealer_value,
    }
}

//! Dealer auto-play and round settlement.

extern crate alloc;

use alloc::vec::Vec;

use tracing::debug;

use crate::card::Card;
use crate::error::ShoeError;
use crate::hand::{DealerHand, HandStatus};
use crate::options::GameOptions;
use crate::payout::settle_hand;
use crate::shoe::Shoe;

use super::{GameSession, Phase};

/// The dealer draws below this value and stands at or above it, soft hands included.
pub const DEALER_STANDS_ON: u8 = 17;

/// Plays the dealer hand out: draw while the value is below 17, then stand.
///
/// Returns the cards drawn.
///
/// # Errors
///
/// Returns [`ShoeError::Exhausted`] if the shoe runs out while the dealer
/// must still draw.
pub fn play_dealer(dealer: &mut DealerHand, shoe: &mut Shoe) -> Result<Vec<Card>, ShoeError> {
    let mut drawn = Vec::new();

    while dealer.value() < DEALER_STANDS_ON {
        let card = shoe.draw()?;
        dealer.add_card(card);
        drawn.push(card);
        debug!(%card, value = dealer.value(), "dealer draws");
    }

    Ok(drawn)
}

impl GameSession {
    /// Settles the round once every player hand is terminal.
    ///
    /// The dealer only draws if some hand still depends on the dealer total.
    /// Each hand's stake plus net payout is credited to `bankroll`.
    pub(super) fn resolve(
        &mut self,
        bankroll: &mut u64,
        options: &GameOptions,
    ) -> Result<(), ShoeError> {
        self.dealer.reveal_hole();

        let dealer_needed = self
            .hands
            .iter()
            .any(|hand| !hand.is_bust() && hand.status() != HandStatus::Blackjack);
        if dealer_needed {
            play_dealer(&mut self.dealer, &mut self.shoe)?;
        }

        let settlement = self
            .hands
            .map(|hand| settle_hand(hand, &self.dealer, options));
        *bankroll = bankroll.saturating_add(settlement.returned());

        debug!(
            game_id = %self.id,
            dealer_value = self.dealer.value(),
            net_payout = settlement.net_payout(),
            "round settled"
        );
        self.phase = Phase::Finished(settlement);

        Ok(())
    }
}

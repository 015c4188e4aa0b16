use crate::error::DealError;
use crate::hand::{DealerHand, Hand};
use crate::options::GameOptions;
use crate::shoe::Shoe;

use super::{GameId, GameSession, Phase, PerHand, PlayerId};

/// Cards needed for the opening deal: two for the player, two for the dealer.
const OPENING_CARDS: usize = 4;

impl GameSession {
    /// Accepts a wager and deals a new game from `shoe`.
    ///
    /// Cards go player, dealer, player, dealer; the dealer's second card is
    /// the hole card. The bet is debited from `bankroll`. A player natural
    /// settles the game on the spot, so the returned session may already be
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the bet is zero, its natural payout would not be a
    /// whole unit (unless [`GameOptions::rounding_blackjack`] is set), it
    /// exceeds `bankroll`, or the shoe holds fewer than four cards.
    pub fn deal(
        id: GameId,
        owner: PlayerId,
        bet: u64,
        mut shoe: Shoe,
        bankroll: &mut u64,
        options: &GameOptions,
        now: u64,
    ) -> Result<Self, DealError> {
        if bet == 0 {
            return Err(DealError::ZeroBet);
        }

        if options.rounding_blackjack.is_none() && !options.blackjack_pays.is_exact_for(bet) {
            return Err(DealError::InexactPayout);
        }

        if *bankroll < bet {
            return Err(DealError::InsufficientFunds);
        }

        if shoe.remaining() < OPENING_CARDS {
            return Err(DealError::NotEnoughCards);
        }

        let mut hand = Hand::new(bet);
        let mut dealer = DealerHand::new();

        hand.add_card(shoe.draw()?);
        dealer.add_card(shoe.draw()?);
        hand.add_card(shoe.draw()?);
        dealer.add_card(shoe.draw()?);

        *bankroll -= bet;

        let mut session = Self {
            id,
            owner,
            phase: Phase::PlayerTurn { hand_index: 0 },
            shoe,
            dealer,
            hands: PerHand::Single(hand),
            committed: bet,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        // A natural needs no decisions; the dealer only reveals.
        if session.hands.iter().all(Hand::is_natural) {
            session.resolve(bankroll, options)?;
        }

        Ok(session)
    }
}

//! The per-game state machine.
//!
//! A [`GameSession`] owns the shoe, the dealer hand and the player hands of one
//! round. Every handler takes the player's bankroll as `&mut u64`, so the
//! wager debits and settlement credits come out of the same call as the state
//! transition and can be committed together.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{ActionError, InvalidAction};
use crate::hand::{DealerHand, Hand, HandStatus, Owner};
use crate::options::GameOptions;
use crate::result::Settlement;
use crate::shoe::Shoe;
use crate::store::DealtCard;

mod actions;
mod deal;
pub mod dealer;
pub mod state;

pub use state::{GameId, GameStatus, PerHand, Phase, PlayerId};

/// The player's hands: one, or exactly two after a split.
pub type PlayerHands = PerHand<Hand>;

/// One round of blackjack between a player and the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    id: GameId,
    owner: PlayerId,
    phase: Phase,
    shoe: Shoe,
    dealer: DealerHand,
    hands: PlayerHands,
    committed: u64,
    version: u64,
    created_at: u64,
    updated_at: u64,
}

impl GameSession {
    /// Returns the game id.
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// Returns the player who owns the game.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Returns the coarse status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        match self.phase {
            Phase::PlayerTurn { .. } => GameStatus::Active,
            Phase::Finished(_) => GameStatus::Finished,
        }
    }

    /// Returns whether actions are still accepted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, Phase::PlayerTurn { .. })
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the per-hand results once the game has finished.
    #[must_use]
    pub const fn settlement(&self) -> Option<&Settlement> {
        match &self.phase {
            Phase::Finished(settlement) => Some(settlement),
            Phase::PlayerTurn { .. } => None,
        }
    }

    /// Returns the index of the hand awaiting an action.
    #[must_use]
    pub const fn current_hand_index(&self) -> Option<usize> {
        match self.phase {
            Phase::PlayerTurn { hand_index } => Some(hand_index),
            Phase::Finished(_) => None,
        }
    }

    /// Returns the player hands.
    #[must_use]
    pub const fn hands(&self) -> &PlayerHands {
        &self.hands
    }

    /// Returns the dealer hand, hole card included.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the total wagered on this game, doubles and splits included.
    #[must_use]
    pub const fn committed(&self) -> u64 {
        self.committed
    }

    /// Returns the commit sequence number. Starts at 0 and grows by one per
    /// committed transition.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the game was created (unix seconds).
    #[must_use]
    pub const fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Returns when the game last changed (unix seconds).
    #[must_use]
    pub const fn updated_at(&self) -> u64 {
        self.updated_at
    }

    /// Returns whether the current hand may double down.
    #[must_use]
    pub fn can_double_down(&self) -> bool {
        !self.hands.is_split()
            && self
                .current_hand()
                .is_some_and(|hand| hand.status() == HandStatus::Active && hand.len() == 2)
    }

    /// Returns whether the current hand may split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        !self.hands.is_split()
            && self
                .current_hand()
                .is_some_and(|hand| hand.status() == HandStatus::Active && hand.is_pair())
    }

    /// Lists every card on the table for the audit trail.
    #[must_use]
    pub fn dealt_cards(&self) -> Vec<DealtCard> {
        let mut rows = Vec::new();

        for (hand_index, hand) in self.hands.iter().enumerate() {
            for (order, &card) in hand.cards().iter().enumerate() {
                rows.push(DealtCard {
                    owner: Owner::Player,
                    hand_index: hand_index as u8,
                    order: order as u8,
                    card,
                });
            }
        }

        for (order, &card) in self.dealer.cards().iter().enumerate() {
            rows.push(DealtCard {
                owner: Owner::Dealer,
                hand_index: 0,
                order: order as u8,
                card,
            });
        }

        rows
    }

    /// Bumps the version and touch time. Called once per committed transition.
    pub(crate) const fn mark_committed(&mut self, now: u64) {
        self.version += 1;
        self.updated_at = now;
    }

    fn current_hand(&self) -> Option<&Hand> {
        self.current_hand_index()
            .and_then(|index| self.hands.get(index))
    }

    /// Returns the index of the hand to act on, failing on finished games.
    fn turn(&self) -> Result<usize, ActionError> {
        self.current_hand_index().ok_or(ActionError::GameNotActive)
    }

    fn playable(&self, index: usize) -> Result<&Hand, ActionError> {
        let hand = self.hands.get(index).ok_or(InvalidAction::HandNotFound)?;
        if hand.status() != HandStatus::Active {
            return Err(InvalidAction::HandNotActive.into());
        }
        Ok(hand)
    }

    fn hand_mut(&mut self, index: usize) -> Result<&mut Hand, ActionError> {
        Ok(self
            .hands
            .get_mut(index)
            .ok_or(InvalidAction::HandNotFound)?)
    }

    /// Moves play to the first active hand at or after `from`, or settles
    /// the round when none is left.
    fn next_turn(
        &mut self,
        from: usize,
        bankroll: &mut u64,
        options: &GameOptions,
    ) -> Result<(), ActionError> {
        let next = self
            .hands
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, hand)| hand.status() == HandStatus::Active)
            .map(|(index, _)| index);

        match next {
            Some(hand_index) => {
                self.phase = Phase::PlayerTurn { hand_index };
                Ok(())
            }
            None => Ok(self.resolve(bankroll, options)?),
        }
    }
}

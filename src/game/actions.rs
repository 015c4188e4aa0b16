use crate::card::Card;
use crate::error::{ActionError, InvalidAction};
use crate::hand::Hand;
use crate::options::GameOptions;

use super::{GameSession, PerHand};

impl GameSession {
    /// Player action: Hit (draw a card into the current hand).
    ///
    /// A bust ends the hand and moves play on, settling the game after the
    /// last hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is finished, the current hand cannot take
    /// cards, or the shoe is empty.
    pub fn hit(&mut self, bankroll: &mut u64, options: &GameOptions) -> Result<Card, ActionError> {
        let index = self.turn()?;
        self.playable(index)?;

        let card = self.shoe.draw()?;
        let hand = self.hand_mut(index)?;
        hand.add_card(card);

        if hand.status().is_terminal() {
            self.next_turn(index + 1, bankroll, options)?;
        }

        Ok(card)
    }

    /// Player action: Stand (keep the current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is finished, the current hand is not
    /// active, or the dealer runs the shoe dry while settling.
    pub fn stand(&mut self, bankroll: &mut u64, options: &GameOptions) -> Result<(), ActionError> {
        let index = self.turn()?;
        self.playable(index)?;

        self.hand_mut(index)?.stand();
        self.next_turn(index + 1, bankroll, options)
    }

    /// Player action: Double down (double the bet, take exactly one card, stop).
    ///
    /// Only the unsplit opening hand may double, and only before any other
    /// action on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is finished, the hand is not eligible,
    /// the bankroll cannot cover the extra bet, or the shoe is empty.
    pub fn double_down(
        &mut self,
        bankroll: &mut u64,
        options: &GameOptions,
    ) -> Result<Card, ActionError> {
        let index = self.turn()?;
        let hand = self.playable(index)?;

        if self.hands.is_split() || hand.len() != 2 {
            return Err(InvalidAction::CannotDouble.into());
        }

        let bet = hand.bet();
        if *bankroll < bet {
            return Err(ActionError::InsufficientBalance);
        }

        let card = self.shoe.draw()?;

        *bankroll -= bet;
        self.committed += bet;
        self.hand_mut(index)?.double_down(card);

        self.next_turn(index + 1, bankroll, options)?;

        Ok(card)
    }

    /// Player action: Split (separate a pair into two hands).
    ///
    /// Commits a second bet equal to the first, deals one card to each new
    /// hand and returns those two cards. Play resumes on the first hand.
    /// Split aces stand after their one card when
    /// [`GameOptions::split_aces_receive_one_card`] is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is finished or already split, the hand is
    /// not a pair, the bankroll cannot cover the second bet, or the shoe
    /// cannot supply two cards.
    pub fn split(
        &mut self,
        bankroll: &mut u64,
        options: &GameOptions,
    ) -> Result<[Card; 2], ActionError> {
        let index = self.turn()?;

        let PerHand::Single(original) = &self.hands else {
            return Err(InvalidAction::AlreadySplit.into());
        };

        self.playable(index)?;
        if !original.is_pair() {
            return Err(InvalidAction::CannotSplit.into());
        }

        let bet = original.bet();
        if *bankroll < bet {
            return Err(ActionError::InsufficientBalance);
        }

        if self.shoe.remaining() < 2 {
            return Err(ActionError::ShoeExhausted);
        }

        let mut first = original.clone();
        let split_card = first
            .take_split_card()
            .ok_or(InvalidAction::CannotSplit)?;
        let mut second = Hand::from_split(split_card, bet);

        let first_card = self.shoe.draw()?;
        let second_card = self.shoe.draw()?;
        first.add_card(first_card);
        second.add_card(second_card);

        if split_card.rank.is_ace() && options.split_aces_receive_one_card {
            first.stand();
            second.stand();
        }

        *bankroll -= bet;
        self.committed += bet;
        self.hands = PerHand::Split([first, second]);

        self.next_turn(0, bankroll, options)?;

        Ok([first_card, second_card])
    }

    /// Stands every hand still in play and settles the game.
    ///
    /// Used to close out games the player walked away from.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is already finished or the dealer runs the
    /// shoe dry.
    pub fn abandon(&mut self, bankroll: &mut u64, options: &GameOptions) -> Result<(), ActionError> {
        self.turn()?;

        for hand in self.hands.iter_mut() {
            hand.stand();
        }

        Ok(self.resolve(bankroll, options)?)
    }
}

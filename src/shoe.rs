//! The shoe a single game draws from, and the sources that supply fresh ones.

extern crate alloc;

use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ShoeError;

const fn deck_index(card: Card) -> usize {
    card.suit as usize * Rank::ALL.len() + card.rank as usize
}

fn ordered_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

fn check_unique(cards: &[Card]) -> Result<(), ShoeError> {
    let mut seen = [false; DECK_SIZE];
    for &card in cards {
        let slot = &mut seen[deck_index(card)];
        if *slot {
            return Err(ShoeError::DuplicateCard(card));
        }
        *slot = true;
    }
    Ok(())
}

/// An ordered single-deck source of cards with a draw cursor.
///
/// Cards are drawn front to back and never repeat; drawing past the last
/// card fails instead of rebuilding the deck. Deserializing checks the same
/// invariants as [`Shoe::stacked`] and rejects a cursor past the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawShoe")]
pub struct Shoe {
    cards: Vec<Card>,
    cursor: usize,
}

/// Unchecked serialized form of [`Shoe`].
#[derive(Deserialize)]
struct RawShoe {
    cards: Vec<Card>,
    cursor: usize,
}

impl TryFrom<RawShoe> for Shoe {
    type Error = ShoeError;

    fn try_from(raw: RawShoe) -> Result<Self, Self::Error> {
        let RawShoe { cards, cursor } = raw;
        if cursor > cards.len() {
            return Err(ShoeError::CursorOutOfRange {
                cursor,
                len: cards.len(),
            });
        }
        check_unique(&cards)?;
        Ok(Self { cards, cursor })
    }
}

impl Shoe {
    /// Builds a fresh 52-card deck and shuffles it uniformly with `rng`.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = ordered_deck();
        cards.shuffle(rng);
        Self { cards, cursor: 0 }
    }

    /// Builds a shoe that yields `cards` in the given order.
    ///
    /// The shoe may hold fewer than 52 cards.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::DuplicateCard`] if a card appears twice.
    pub fn stacked(cards: Vec<Card>) -> Result<Self, ShoeError> {
        check_unique(&cards)?;
        Ok(Self { cards, cursor: 0 })
    }

    /// Builds a full deck whose first draws are `top`, followed by the rest of
    /// the deck shuffled from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::DuplicateCard`] if `top` repeats a card.
    pub fn seeded_with_top(seed: u64, top: &[Card]) -> Result<Self, ShoeError> {
        check_unique(top)?;

        let mut rest: Vec<Card> = ordered_deck()
            .into_iter()
            .filter(|card| !top.contains(card))
            .collect();
        rest.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend_from_slice(top);
        cards.extend(rest);
        Ok(Self { cards, cursor: 0 })
    }

    /// Draws the next card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Exhausted`] when no cards remain.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        let card = *self.cards.get(self.cursor).ok_or(ShoeError::Exhausted)?;
        self.cursor += 1;
        Ok(card)
    }

    /// Returns the number of cards not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Returns the cards already drawn, in draw order.
    #[must_use]
    pub fn drawn(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }
}

/// Supplies a fresh shoe for every new game.
pub trait ShoeSource: Send {
    /// Returns a newly built shoe.
    fn next_shoe(&mut self) -> Shoe;
}

/// Default [`ShoeSource`]: shuffles each shoe from one seeded `ChaCha8` stream.
#[derive(Debug, Clone)]
pub struct SeededShoes {
    rng: ChaCha8Rng,
}

impl SeededShoes {
    /// Creates a source seeded with `seed`.
    ///
    /// Two sources with the same seed deal the same shoes in the same order,
    /// which suits tests and replays. Services should use
    /// [`SeededShoes::from_entropy`].
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system's random source.
    ///
    /// # Panics
    ///
    /// Panics if the operating system cannot provide randomness.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }
}

impl ShoeSource for SeededShoes {
    fn next_shoe(&mut self) -> Shoe {
        Shoe::build(&mut self.rng)
    }
}

//! Game state types.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::result::Settlement;

/// Identifier of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse game status. Only ever moves from `Active` to `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Waiting for player actions.
    Active,
    /// Settled; no further actions are accepted.
    Finished,
}

/// Where the round stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for an action on the hand at `hand_index`.
    PlayerTurn {
        /// Index of the hand being played.
        hand_index: usize,
    },
    /// Round settled.
    Finished(Settlement),
}

/// One value per player hand: a plain game has one, a split game exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerHand<T> {
    /// Game was never split.
    Single(T),
    /// Game was split into two hands.
    Split([T; 2]),
}

impl<T> PerHand<T> {
    /// Returns whether the game was split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Returns the number of hands.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Split(_) => 2,
        }
    }

    /// Always false; there is at least one hand.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Self::Single(value) => (index == 0).then_some(value),
            Self::Split(values) => values.get(index),
        }
    }

    /// Returns the value at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self {
            Self::Single(value) => (index == 0).then_some(value),
            Self::Split(values) => values.get_mut(index),
        }
    }

    /// Iterates over the values in hand order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        match self {
            Self::Single(value) => core::slice::from_ref(value).iter(),
            Self::Split(values) => values.iter(),
        }
    }

    /// Iterates mutably over the values in hand order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        match self {
            Self::Single(value) => core::slice::from_mut(value).iter_mut(),
            Self::Split(values) => values.iter_mut(),
        }
    }

    /// Maps every value, keeping the single/split shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> PerHand<U> {
        match self {
            Self::Single(value) => PerHand::Single(f(value)),
            Self::Split([first, second]) => PerHand::Split([f(first), f(second)]),
        }
    }
}

//! A blackjack session engine with versioned game storage and optional
//! `no_std` support.
//!
//! [`GameSession`] is the per-game state machine (deal, hit, stand, double
//! down, split, dealer play and settlement). [`Table`] serves players on top
//! of any [`GameStore`], committing each transition together with the
//! player's balance through a compare-and-set, so several tables can share
//! one store safely.
//!
//! # Example
//!
//! ```
//! use bjsession::{GameOptions, MemoryStore, PlayerId, Table};
//!
//! let table = Table::with_entropy(MemoryStore::new(), GameOptions::default());
//! let player = PlayerId(1);
//! table.open_account(player).unwrap();
//!
//! let view = table.start(player, 10).unwrap();
//! if view.as_active().is_some() {
//!     let view = table.stand(player, view.game_id()).unwrap();
//!     assert!(view.as_finished().is_some());
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod clock;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod payout;
pub mod result;
pub mod shoe;
pub mod stats;
pub mod store;
mod sync;
pub mod table;
pub mod view;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use error::{ActionError, DealError, InvalidAction, ShoeError, StoreError, TableError};
pub use game::{GameId, GameSession, GameStatus, PerHand, Phase, PlayerHands, PlayerId};
pub use hand::{BLACKJACK, DealerHand, Hand, HandStatus, Owner};
pub use options::{GameOptions, PayoutRatio, RoundingMode};
pub use result::{HandOutcome, HandResult, Settlement};
pub use shoe::{SeededShoes, Shoe, ShoeSource};
pub use stats::PlayerStats;
pub use store::{Account, Commit, DealtCard, GameRecord, GameStore, MemoryStore};
pub use table::Table;
pub use view::{ActiveView, DealerView, FinishedView, GameView, HandView};

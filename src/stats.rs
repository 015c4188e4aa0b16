//! Per-player statistics over finished games.

use serde::{Deserialize, Serialize};

use crate::result::HandOutcome;
use crate::store::GameRecord;

/// Aggregated results of a player's finished games.
///
/// Split games count once in `total_games` but contribute one outcome per
/// hand. Blackjacks are counted in `wins` as well as `blackjacks`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Finished games.
    pub total_games: u64,
    /// Hands won, blackjacks included.
    pub wins: u64,
    /// Hands lost.
    pub losses: u64,
    /// Hands pushed.
    pub pushes: u64,
    /// Natural blackjacks.
    pub blackjacks: u64,
    /// Current balance.
    pub balance: u64,
    /// Share of resolved hands won, as a percentage rounded to two decimals.
    /// Zero before any hand.
    pub win_rate: f64,
}

impl PlayerStats {
    /// Tallies `records` for a player whose balance is `balance`.
    #[must_use]
    pub fn from_records(records: &[GameRecord], balance: u64) -> Self {
        let mut stats = Self {
            total_games: records.len() as u64,
            balance,
            ..Self::default()
        };

        for result in records.iter().flat_map(|record| record.settlement.iter()) {
            match result.outcome {
                HandOutcome::Blackjack => {
                    stats.blackjacks += 1;
                    stats.wins += 1;
                }
                HandOutcome::Win => stats.wins += 1,
                HandOutcome::Lose => stats.losses += 1,
                HandOutcome::Push => stats.pushes += 1,
            }
        }

        stats.win_rate = percentage(stats.wins, stats.wins + stats.losses + stats.pushes);
        stats
    }
}

/// `wins / resolved` as a percentage, rounded half up to two decimals.
fn percentage(wins: u64, resolved: u64) -> f64 {
    if resolved == 0 {
        return 0.0;
    }

    let resolved = u128::from(resolved);
    let hundredths = (u128::from(wins) * 20_000 + resolved) / (2 * resolved);
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for hand counts"
    )]
    let rate = hundredths as f64 / 100.0;
    rate
}

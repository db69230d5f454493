//! Matchup statistics over many simulated battles.
//!
//! Used to balance the catalog: how often does one deck beat another?

use serde::{Deserialize, Serialize};

use super::resolver::BattleResolver;
use super::result::BattleOutcome;
use crate::core::{BattleRng, Result};
use crate::deck::Deck;

/// Aggregate results of repeated battles between two decks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupStats {
    /// Battles simulated.
    pub iterations: u32,

    /// Player wins.
    pub wins: u32,

    /// Player losses.
    pub losses: u32,

    pub draws: u32,

    /// Sum of player hits across all battles.
    pub total_player_hits: u64,

    /// Sum of opponent hits across all battles.
    pub total_opponent_hits: u64,
}

impl MatchupStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one battle.
    pub fn record(&mut self, outcome: BattleOutcome, player_hits: u32, opponent_hits: u32) {
        self.iterations += 1;
        match outcome {
            BattleOutcome::Win => self.wins += 1,
            BattleOutcome::Loss => self.losses += 1,
            BattleOutcome::Draw => self.draws += 1,
        }
        self.total_player_hits += u64::from(player_hits);
        self.total_opponent_hits += u64::from(opponent_hits);
    }

    /// Fraction of battles the player won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    #[must_use]
    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    #[must_use]
    pub fn avg_player_hits(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.total_player_hits as f64 / self.iterations as f64
        }
    }

    #[must_use]
    pub fn avg_opponent_hits(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.total_opponent_hits as f64 / self.iterations as f64
        }
    }

    fn rate(&self, count: u32) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            count as f64 / self.iterations as f64
        }
    }
}

/// Run `iterations` battles between the same decks.
///
/// Each battle gets its own stream forked from `seed`, so the whole run is
/// reproducible.
pub fn simulate_matchup(
    resolver: &BattleResolver<'_>,
    player: &Deck,
    opponent: &Deck,
    iterations: u32,
    seed: u64,
) -> Result<MatchupStats> {
    let mut rng = BattleRng::new(seed);
    let mut stats = MatchupStats::new();

    for _ in 0..iterations {
        let mut battle_rng = rng.fork();
        let result = resolver.resolve(player, opponent, &mut battle_rng)?;
        stats.record(result.outcome, result.player_hits, result.opponent_hits);
    }

    tracing::info!(
        iterations,
        win_rate = stats.win_rate(),
        draw_rate = stats.draw_rate(),
        "matchup simulated"
    );
    Ok(stats)
}

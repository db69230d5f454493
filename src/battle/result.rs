//! Battle results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::event::{AttackDirection, AttackEvent};
use crate::core::Side;

/// Result of a completed battle, from one side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Win,
    Loss,
    Draw,
}

impl BattleOutcome {
    /// Compare hit counts: more hits wins, equal hits draw.
    #[must_use]
    pub fn from_hits(own_hits: u32, other_hits: u32) -> Self {
        match own_hits.cmp(&other_hits) {
            Ordering::Greater => BattleOutcome::Win,
            Ordering::Less => BattleOutcome::Loss,
            Ordering::Equal => BattleOutcome::Draw,
        }
    }

    /// The same result seen from the other side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            BattleOutcome::Win => BattleOutcome::Loss,
            BattleOutcome::Loss => BattleOutcome::Win,
            BattleOutcome::Draw => BattleOutcome::Draw,
        }
    }
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleOutcome::Win => write!(f, "win"),
            BattleOutcome::Loss => write!(f, "loss"),
            BattleOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Everything a battle produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    /// Outcome for the player (deck A).
    pub outcome: BattleOutcome,

    pub player_hits: u32,

    pub opponent_hits: u32,

    /// Events in resolution order.
    pub events: Vec<AttackEvent>,
}

impl BattleResult {
    /// Build a result from events, counting hits per attacking side.
    #[must_use]
    pub fn from_events(events: Vec<AttackEvent>) -> Self {
        let player_hits = count_hits(&events, Side::Player);
        let opponent_hits = count_hits(&events, Side::Opponent);
        Self {
            outcome: BattleOutcome::from_hits(player_hits, opponent_hits),
            player_hits,
            opponent_hits,
            events,
        }
    }

    /// Outcome from `side`'s point of view.
    #[must_use]
    pub fn outcome_for(&self, side: Side) -> BattleOutcome {
        match side {
            Side::Player => self.outcome,
            Side::Opponent => self.outcome.flipped(),
        }
    }

    /// Hits scored by `side`.
    #[must_use]
    pub fn hits(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_hits,
            Side::Opponent => self.opponent_hits,
        }
    }

    /// Attacks made by `side`.
    #[must_use]
    pub fn attacks(&self, side: Side) -> u32 {
        self.events.iter().filter(|e| e.attacker_side() == side).count() as u32
    }

    /// Attacks by `side` that missed.
    #[must_use]
    pub fn misses(&self, side: Side) -> u32 {
        self.attacks(side).saturating_sub(self.hits(side))
    }

    /// Highest round number that produced an event.
    ///
    /// Rounds whose cards were all skipped still count when a later round
    /// played.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.events.iter().map(|e| e.round).max().unwrap_or(0)
    }

    /// Events going one way, in order.
    pub fn events_in(&self, direction: AttackDirection) -> impl Iterator<Item = &AttackEvent> {
        self.events.iter().filter(move |e| e.direction == direction)
    }
}

fn count_hits(events: &[AttackEvent], side: Side) -> u32 {
    events
        .iter()
        .filter(|e| e.attacker_side() == side && e.outcome.is_hit())
        .count() as u32
}

//! Notices sent to the defending player after a PvP battle.
//!
//! The notification/storage collaborator sits behind [`NoticeSink`]; this
//! crate only builds the payload and hands it over.

use serde::{Deserialize, Serialize};

use super::result::{BattleOutcome, BattleResult};
use crate::core::{Result, Side};

/// What the defending player is told about a battle they were pulled into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleNotice {
    /// User id of the player who started the battle.
    pub challenger: String,

    /// User id of the player being notified.
    pub opponent: String,

    /// Outcome from the notified player's point of view.
    pub outcome: BattleOutcome,

    pub challenger_hits: u32,

    pub opponent_hits: u32,

    pub rounds: u32,

    /// Seed the battle was resolved with, for replays.
    pub seed: u64,
}

impl BattleNotice {
    /// Build the notice for the opponent side of `result`.
    #[must_use]
    pub fn new(
        challenger: impl Into<String>,
        opponent: impl Into<String>,
        result: &BattleResult,
        seed: u64,
    ) -> Self {
        Self {
            challenger: challenger.into(),
            opponent: opponent.into(),
            outcome: result.outcome_for(Side::Opponent),
            challenger_hits: result.hits(Side::Player),
            opponent_hits: result.hits(Side::Opponent),
            rounds: result.rounds(),
            seed,
        }
    }

    /// Compact binary encoding for storage queues.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Destination for battle notices.
pub trait NoticeSink {
    /// Hand a notice to the collaborator.
    fn deliver(&mut self, notice: BattleNotice) -> Result<()>;
}

/// Sink that keeps notices in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub notices: Vec<BattleNotice>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoticeSink for MemorySink {
    fn deliver(&mut self, notice: BattleNotice) -> Result<()> {
        tracing::debug!(opponent = %notice.opponent, outcome = %notice.outcome, "notice stored");
        self.notices.push(notice);
        Ok(())
    }
}

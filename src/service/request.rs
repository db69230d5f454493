//! Battle requests and reports.

use serde::{Deserialize, Serialize};

use crate::battle::BattleResult;
use crate::deck::{Deck, Difficulty};

/// The authenticated caller, passed explicitly with every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSession {
    pub user_id: String,
    pub username: String,
}

impl PlayerSession {
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

/// Who the caller is fighting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Opponent {
    /// PvE: the computer builds a deck at this difficulty.
    Computer { difficulty: Difficulty },
    /// PvP: another player's saved deck. They get a notice afterwards.
    #[serde(rename_all = "camelCase")]
    Player { user_id: String, deck: Deck },
}

/// One battle request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    pub session: PlayerSession,

    /// The caller's deck.
    pub deck: Deck,

    pub opponent: Opponent,

    /// Fixed seed for replays. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BattleRequest {
    /// A battle against the computer.
    #[must_use]
    pub fn against_computer(session: PlayerSession, deck: Deck, difficulty: Difficulty) -> Self {
        Self {
            session,
            deck,
            opponent: Opponent::Computer { difficulty },
            seed: None,
        }
    }

    /// A battle against another player's deck.
    #[must_use]
    pub fn against_player(
        session: PlayerSession,
        deck: Deck,
        opponent_id: impl Into<String>,
        opponent_deck: Deck,
    ) -> Self {
        Self {
            session,
            deck,
            opponent: Opponent::Player {
                user_id: opponent_id.into(),
                deck: opponent_deck,
            },
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// What the service returns for a request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    /// Seed used; replaying the request with it reproduces the battle.
    pub seed: u64,

    /// The deck the opponent fought with (generated for the computer).
    pub opponent_deck: Deck,

    pub result: BattleResult,

    /// Whether a notice went to the opposing player.
    pub notice_delivered: bool,
}

//! Attack events - one per side per round.
//!
//! Events are produced by the resolver in battle order and handed to the
//! caller whole; pacing their reveal is up to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId, Rarity};
use crate::core::{round_to, Side, DEFAULT_DISPLAY_PRECISION};

/// Which way an attack goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackDirection {
    /// The opponent's virus against the player's vaccines. Always first in a round.
    OpponentToPlayer,
    /// The player's virus against the opponent's vaccines.
    PlayerToOpponent,
}

impl AttackDirection {
    /// Directions in the order they resolve within a round.
    pub const ROUND_ORDER: [AttackDirection; 2] =
        [AttackDirection::OpponentToPlayer, AttackDirection::PlayerToOpponent];

    /// The side whose virus attacks (and scores on a hit).
    #[must_use]
    pub const fn attacker(self) -> Side {
        match self {
            AttackDirection::OpponentToPlayer => Side::Opponent,
            AttackDirection::PlayerToOpponent => Side::Player,
        }
    }

    /// The side whose vaccines defend.
    #[must_use]
    pub const fn defender(self) -> Side {
        self.attacker().other()
    }
}

impl std::fmt::Display for AttackDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.attacker(), self.defender())
    }
}

/// Whether an attack landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttackOutcome {
    Hit,
    Miss,
}

impl AttackOutcome {
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, AttackOutcome::Hit)
    }
}

impl std::fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackOutcome::Hit => write!(f, "HIT"),
            AttackOutcome::Miss => write!(f, "MISS"),
        }
    }
}

/// Identifying data for a card shown in an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: CardId,
    pub name: String,
    pub rarity: Rarity,
}

impl From<&CardDefinition> for CardSummary {
    fn from(card: &CardDefinition) -> Self {
        Self {
            id: card.id,
            name: card.name.clone(),
            rarity: card.rarity,
        }
    }
}

/// A single resolved attack.
///
/// `roll` and `threshold` are exact; use `rounded_roll` and
/// `rounded_threshold` for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackEvent {
    /// Round number, starting at 1.
    pub round: u32,

    pub direction: AttackDirection,

    /// The attacking virus.
    pub attacker: CardSummary,

    /// Did any defending vaccine protect against the virus?
    pub is_protected: bool,

    /// First protecting vaccine, in defender deck order.
    pub defender: Option<CardSummary>,

    /// Names of every protecting vaccine, in defender deck order.
    pub protectors: Vec<String>,

    /// Uniform roll in `[0, 1)`.
    pub roll: f64,

    /// Probability the attack lands after protection.
    pub threshold: f64,

    pub outcome: AttackOutcome,
}

impl AttackEvent {
    #[must_use]
    pub fn rounded_roll(&self, places: u32) -> f64 {
        round_to(self.roll, places)
    }

    #[must_use]
    pub fn rounded_threshold(&self, places: u32) -> f64 {
        round_to(self.threshold, places)
    }

    /// Side that scores if this attack hit.
    #[must_use]
    pub fn attacker_side(&self) -> Side {
        self.direction.attacker()
    }

    /// Display the event with `places` decimals for roll and threshold.
    ///
    /// `Display` on the event itself uses `DEFAULT_DISPLAY_PRECISION`.
    #[must_use]
    pub fn display(&self, places: u32) -> EventDisplay<'_> {
        EventDisplay {
            event: self,
            places,
        }
    }
}

impl std::fmt::Display for AttackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.display(DEFAULT_DISPLAY_PRECISION).fmt(f)
    }
}

/// One-line rendering of an `AttackEvent` at a chosen precision.
#[derive(Clone, Copy, Debug)]
pub struct EventDisplay<'a> {
    event: &'a AttackEvent,
    places: u32,
}

impl std::fmt::Display for EventDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let event = self.event;
        let places = self.places as usize;
        write!(
            f,
            "round {} ({}): {} ",
            event.round, event.direction, event.attacker.name
        )?;
        if event.protectors.is_empty() {
            write!(f, "unprotected")?;
        } else {
            write!(f, "vs {}", event.protectors.join(", "))?;
        }
        write!(
            f,
            ", roll {:.*} vs {:.*} -> {}",
            places,
            event.rounded_roll(self.places),
            places,
            event.rounded_threshold(self.places),
            event.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> AttackEvent {
        AttackEvent {
            round: 2,
            direction: AttackDirection::PlayerToOpponent,
            attacker: CardSummary {
                id: CardId::new(101),
                name: "Measles".to_string(),
                rarity: Rarity::Rare,
            },
            is_protected: true,
            defender: Some(CardSummary {
                id: CardId::new(1),
                name: "MMR".to_string(),
                rarity: Rarity::Common,
            }),
            protectors: vec!["MMR".to_string(), "MMRV".to_string()],
            roll: 0.01234,
            threshold: 0.0010499,
            outcome: AttackOutcome::Miss,
        }
    }

    #[test]
    fn test_direction_sides() {
        assert_eq!(AttackDirection::OpponentToPlayer.attacker(), Side::Opponent);
        assert_eq!(AttackDirection::OpponentToPlayer.defender(), Side::Player);
        assert_eq!(AttackDirection::PlayerToOpponent.attacker(), Side::Player);
        assert_eq!(
            AttackDirection::ROUND_ORDER[0],
            AttackDirection::OpponentToPlayer
        );
    }

    #[test]
    fn test_rounding() {
        let event = event();
        assert_eq!(event.rounded_roll(2), 0.01);
        assert_eq!(event.rounded_threshold(2), 0.0);
        assert_eq!(event.rounded_threshold(3), 0.001);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            event().to_string(),
            "round 2 (player -> opponent): Measles vs MMR, MMRV, roll 0.01 vs 0.00 -> MISS"
        );
    }

    #[test]
    fn test_display_precision() {
        let event = event();
        assert_eq!(
            event.display(3).to_string(),
            "round 2 (player -> opponent): Measles vs MMR, MMRV, roll 0.012 vs 0.001 -> MISS"
        );
        assert_eq!(event.display(DEFAULT_DISPLAY_PRECISION).to_string(), event.to_string());

        let mut open = event;
        open.protectors.clear();
        assert!(open.display(0).to_string().contains("unprotected, roll 0 vs 0 -> MISS"));
    }

    #[test]
    fn test_outcome_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&AttackOutcome::Hit).unwrap(), "\"HIT\"");
        assert!(AttackOutcome::Hit.is_hit());
        assert!(!AttackOutcome::Miss.is_hit());
    }

    #[test]
    fn test_event_json_field_names() {
        let json = serde_json::to_value(event()).unwrap();
        assert_eq!(json["isProtected"], true);
        assert_eq!(json["direction"], "playerToOpponent");
        assert_eq!(json["outcome"], "MISS");
    }
}

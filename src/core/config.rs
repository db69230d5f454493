//! Battle configuration.
//!
//! `BattleConfig` controls how strictly the catalog and decks are checked
//! and how attack events are displayed. It can be built in code with the
//! `with_*` setters or loaded from TOML:
//!
//! ```
//! use vaccine_quest::core::{BattleConfig, MissingCardPolicy};
//!
//! let config = BattleConfig::from_toml_str(r#"
//!     missing_card_policy = "fail"
//!     min_deck_size = 3
//! "#).unwrap();
//!
//! assert_eq!(config.missing_card_policy, MissingCardPolicy::Fail);
//! assert_eq!(config.min_deck_size, 3);
//! assert_eq!(config.display_precision, 2);
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;

/// What to do with catalog probabilities outside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityPolicy {
    /// Clamp into `[0, 1]` and log a warning.
    #[default]
    Clamp,
    /// Refuse to load the catalog.
    Reject,
}

/// What to do when a deck references a card the catalog doesn't have
/// (or a card of the wrong kind).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCardPolicy {
    /// Skip the attack (or ignore the vaccine) and log a warning.
    #[default]
    Skip,
    /// Abort the battle with an error.
    Fail,
}

/// Decimal places shown for rolls and thresholds unless configured otherwise.
pub const DEFAULT_DISPLAY_PRECISION: u32 = 2;

/// Battle engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Handling of out-of-range catalog probabilities.
    ///
    /// Read when a catalog is loaded (`CardCatalog::builtin_with`,
    /// `from_json_str`); resolution only ever sees validated cards.
    pub probability_policy: ProbabilityPolicy,

    /// Handling of unknown card ids during resolution.
    pub missing_card_policy: MissingCardPolicy,

    /// Minimum number of vaccines and of viruses in a valid deck.
    pub min_deck_size: usize,

    /// Decimal places used when displaying rolls and thresholds.
    pub display_precision: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            probability_policy: ProbabilityPolicy::Clamp,
            missing_card_policy: MissingCardPolicy::Skip,
            min_deck_size: 4,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl BattleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn with_probability_policy(mut self, policy: ProbabilityPolicy) -> Self {
        self.probability_policy = policy;
        self
    }

    #[must_use]
    pub fn with_missing_card_policy(mut self, policy: MissingCardPolicy) -> Self {
        self.missing_card_policy = policy;
        self
    }

    #[must_use]
    pub fn with_min_deck_size(mut self, size: usize) -> Self {
        self.min_deck_size = size;
        self
    }

    #[must_use]
    pub fn with_display_precision(mut self, places: u32) -> Self {
        self.display_precision = places;
        self
    }
}

/// Round `value` to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BattleError;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();
        assert_eq!(config.probability_policy, ProbabilityPolicy::Clamp);
        assert_eq!(config.missing_card_policy, MissingCardPolicy::Skip);
        assert_eq!(config.min_deck_size, 4);
        assert_eq!(config.display_precision, 2);
    }

    #[test]
    fn test_builder() {
        let config = BattleConfig::new()
            .with_probability_policy(ProbabilityPolicy::Reject)
            .with_missing_card_policy(MissingCardPolicy::Fail)
            .with_min_deck_size(1)
            .with_display_precision(3);

        assert_eq!(config.probability_policy, ProbabilityPolicy::Reject);
        assert_eq!(config.missing_card_policy, MissingCardPolicy::Fail);
        assert_eq!(config.min_deck_size, 1);
        assert_eq!(config.display_precision, 3);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = BattleConfig::from_toml_str("probability_policy = \"reject\"").unwrap();
        assert_eq!(config.probability_policy, ProbabilityPolicy::Reject);
        assert_eq!(config.min_deck_size, 4);
    }

    #[test]
    fn test_from_toml_empty() {
        assert_eq!(BattleConfig::from_toml_str("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = BattleConfig::from_toml_str("missing_card_policy = \"explode\"").unwrap_err();
        assert!(matches!(err, BattleError::ConfigParse(_)));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 2), 0.12);
        assert_eq!(round_to(0.125001, 2), 0.13);
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(0.98765, 3), 0.988);
    }
}

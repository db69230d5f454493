//! Core engine types: sides, RNG, configuration, errors.
//!
//! Everything here is independent of card data and battle rules.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{
    round_to, BattleConfig, MissingCardPolicy, ProbabilityPolicy, DEFAULT_DISPLAY_PRECISION,
};
pub use error::{BattleError, Result};
pub use rng::{BattleRng, RollSource, ScriptedRolls};
pub use side::{Side, SideMap};

//! # vaccine-quest
//!
//! Battle engine for Vaccine Quest, a card game about viruses and vaccines.
//!
//! Players field decks of virus and vaccine cards. Each round, every side
//! attacks with its next virus; the defender's vaccines that protect
//! against that virus cut its chance of landing multiplicatively. The side
//! that lands more attacks wins.
//!
//! ## Design Principles
//!
//! 1. **Pure resolution**: The resolver does no I/O and mutates nothing.
//!    All randomness comes through a `RollSource`, so battles replay exactly.
//!
//! 2. **One catalog**: Cards load once from a single JSON source and are
//!    validated on the way in (out-of-range probabilities are clamped or
//!    rejected).
//!
//! 3. **Explicit context**: Callers pass the session, decks, and notice sink
//!    with every request. Nothing is read from ambient state.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, errors
//! - `cards`: Card definitions, catalog format, catalog
//! - `deck`: Decks and computer deck generation
//! - `battle`: Resolver, events, results, matchup stats, notices
//! - `service`: Per-request entry point

pub mod battle;
pub mod cards;
pub mod core;
pub mod deck;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleError, BattleRng, MissingCardPolicy, ProbabilityPolicy, Result,
    RollSource, ScriptedRolls, Side, SideMap,
};

pub use crate::cards::{
    CardCatalog, CardDefinition, CardId, CardKind, CardTraits, Rarity, VaccineTraits, VirusTraits,
};

pub use crate::deck::{ComputerOpponent, Deck, Difficulty};

pub use crate::battle::{
    simulate_matchup, AttackDirection, AttackEvent, AttackOutcome, BattleNotice, BattleOutcome,
    BattleResolver, BattleResult, MatchupStats, MemorySink, NoticeSink,
};

pub use crate::service::{BattleReport, BattleRequest, BattleService, Opponent, PlayerSession};

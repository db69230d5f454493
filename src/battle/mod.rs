//! Battle resolution: events, results, the resolver, and matchup stats.
//!
//! ## Key Types
//!
//! - `BattleResolver`: Runs a battle between two decks
//! - `AttackEvent`: One resolved attack
//! - `BattleResult`: Outcome, hit counts, and the ordered event log
//! - `MatchupStats`: Aggregates over many seeded battles
//! - `BattleNotice`: Payload for the defending player's notification

pub mod event;
pub mod notice;
pub mod resolver;
pub mod result;
pub mod stats;

pub use event::{AttackDirection, AttackEvent, AttackOutcome, CardSummary, EventDisplay};
pub use notice::{BattleNotice, MemorySink, NoticeSink};
pub use resolver::{resolve_attack, threshold_for, AttackResolution, BattleResolver};
pub use result::{BattleOutcome, BattleResult};
pub use stats::{simulate_matchup, MatchupStats};

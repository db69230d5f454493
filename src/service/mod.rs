//! Request-level entry point: session context in, battle report out.
//!
//! Authentication and persistence live outside this crate. Callers pass
//! the authenticated `PlayerSession` with each `BattleRequest` and supply a
//! `NoticeSink` for PvP notifications.

pub mod battle_service;
pub mod request;

pub use battle_service::BattleService;
pub use request::{BattleReport, BattleRequest, Opponent, PlayerSession};

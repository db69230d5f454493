//! Decks and computer opponent deck generation.

pub mod model;
pub mod opponent;

pub use model::Deck;
pub use opponent::{ComputerOpponent, Difficulty};

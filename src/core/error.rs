//! Error type shared by the catalog, deck, battle and service layers.

use thiserror::Error;

use super::side::Side;
use crate::cards::{CardId, CardKind};

pub type Result<T> = std::result::Result<T, BattleError>;

#[derive(Debug, Error)]
pub enum BattleError {
    #[error("card catalog is unavailable or has no usable cards")]
    CatalogUnavailable,

    #[error("malformed card catalog: {0}")]
    CatalogFormat(String),

    #[error("failed to parse JSON document")]
    CatalogParse(#[from] serde_json::Error),

    #[error("{0} is registered more than once")]
    DuplicateCard(CardId),

    #[error("{card} has {field} = {value}, expected a value in [0, 1]")]
    InvalidProbability {
        card: CardId,
        field: &'static str,
        value: f64,
    },

    #[error("{id} in the {side} deck is not in the catalog")]
    UnknownCard { id: CardId, side: Side },

    #[error("{id} is not a {expected} card")]
    WrongCardKind { id: CardId, expected: CardKind },

    #[error("{side} deck has {len} {kind} cards, at least {min} required")]
    DeckTooSmall {
        side: Side,
        kind: CardKind,
        len: usize,
        min: usize,
    },

    #[error("failed to parse battle configuration")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to encode or decode battle notice")]
    NoticeEncoding(#[from] bincode::Error),

    #[error("notice sink rejected delivery: {0}")]
    NoticeDelivery(String),
}

//! Player decks.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, CardKind};
use crate::core::{BattleConfig, BattleError, Result, Side};

/// A player's chosen vaccines and viruses, as catalog ids.
///
/// Viruses attack one per round in list order; vaccines defend as a pool.
/// Missing lists deserialize as empty.
///
/// ```
/// use vaccine_quest::deck::Deck;
///
/// let deck: Deck = serde_json::from_str(r#"{"viruses": [101, 102]}"#).unwrap();
/// assert!(deck.vaccines.is_empty());
/// assert_eq!(deck.viruses.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deck {
    pub vaccines: Vec<CardId>,
    pub viruses: Vec<CardId>,
}

impl Deck {
    #[must_use]
    pub fn new(vaccines: Vec<CardId>, viruses: Vec<CardId>) -> Self {
        Self { vaccines, viruses }
    }

    /// Build a deck from raw ids.
    #[must_use]
    pub fn from_ids(vaccines: &[u32], viruses: &[u32]) -> Self {
        Self {
            vaccines: vaccines.iter().copied().map(CardId::new).collect(),
            viruses: viruses.iter().copied().map(CardId::new).collect(),
        }
    }

    /// Parse a deck from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The ids of one kind.
    #[must_use]
    pub fn cards(&self, kind: CardKind) -> &[CardId] {
        match kind {
            CardKind::Vaccine => &self.vaccines,
            CardKind::Virus => &self.viruses,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vaccines.is_empty() && self.viruses.is_empty()
    }

    /// Check that the deck is playable: enough cards of each kind, every id
    /// known to the catalog and of the right kind.
    ///
    /// The resolver itself accepts any deck; this is for callers building
    /// decks from player input.
    pub fn validate(&self, side: Side, catalog: &CardCatalog, config: &BattleConfig) -> Result<()> {
        for kind in [CardKind::Vaccine, CardKind::Virus] {
            let ids = self.cards(kind);
            if ids.len() < config.min_deck_size {
                return Err(BattleError::DeckTooSmall {
                    side,
                    kind,
                    len: ids.len(),
                    min: config.min_deck_size,
                });
            }
            for &id in ids {
                let card = catalog.get(id).ok_or(BattleError::UnknownCard { id, side })?;
                if card.kind() != kind {
                    return Err(BattleError::WrongCardKind { id, expected: kind });
                }
            }
        }
        Ok(())
    }
}

//! Card catalog for definition lookup.
//!
//! The `CardCatalog` holds every card definition the game knows about.
//! It is loaded once and never mutated afterwards; share it between
//! battles behind an `Arc`.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardKind, Rarity, VaccineTraits, VirusTraits};
use super::record::CatalogFile;
use crate::core::{BattleError, ProbabilityPolicy, Result};

const BUILTIN_CATALOG: &str = include_str!("data/cards.json");

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use vaccine_quest::cards::{CardCatalog, CardDefinition, CardId, Rarity};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(CardDefinition::virus(CardId::new(101), "Measles", Rarity::Rare, 0.7))
///     .unwrap();
///
/// let (card, virus) = catalog.virus(CardId::new(101)).unwrap();
/// assert_eq!(card.name, "Measles");
/// assert_eq!(virus.death_probability, 0.7);
/// assert!(catalog.vaccine(CardId::new(101)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the crate, loaded with the default policy.
    pub fn builtin() -> Result<Self> {
        Self::builtin_with(ProbabilityPolicy::default())
    }

    /// The bundled catalog, validated under `policy`.
    pub fn builtin_with(policy: ProbabilityPolicy) -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG, policy)
    }

    /// Load a catalog from a `{ "cards": [...] }` JSON document.
    pub fn from_json_str(json: &str, policy: ProbabilityPolicy) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for record in file.cards {
            catalog.register_with(record.into_definition(policy)?, policy)?;
        }
        tracing::debug!(cards = catalog.len(), "card catalog loaded");
        Ok(catalog)
    }

    /// Register a card definition, clamping out-of-range probabilities.
    ///
    /// Fails if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) -> Result<()> {
        self.register_with(card, ProbabilityPolicy::default())
    }

    /// Register a card definition, validating its probabilities under `policy`.
    pub fn register_with(&mut self, card: CardDefinition, policy: ProbabilityPolicy) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(BattleError::DuplicateCard(card.id));
        }
        let card = card.validated(policy)?;
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Fail with `CatalogUnavailable` if there is nothing to battle with.
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_empty() {
            return Err(BattleError::CatalogUnavailable);
        }
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a vaccine card and its protection data.
    #[must_use]
    pub fn vaccine(&self, id: CardId) -> Option<(&CardDefinition, &VaccineTraits)> {
        let card = self.get(id)?;
        card.as_vaccine().map(|traits| (card, traits))
    }

    /// Get a virus card and its lethality data.
    #[must_use]
    pub fn virus(&self, id: CardId) -> Option<(&CardDefinition, &VirusTraits)> {
        let card = self.get(id)?;
        card.as_virus().map(|traits| (card, traits))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find cards of one kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.kind() == kind)
    }

    /// Find cards of one kind at or below a rarity, sorted by id.
    #[must_use]
    pub fn ids_up_to(&self, kind: CardKind, max_rarity: Rarity) -> Vec<CardId> {
        let mut ids: Vec<_> = self
            .find_by_kind(kind)
            .filter(|c| c.rarity <= max_rarity)
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

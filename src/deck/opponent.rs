//! Computer opponent deck generation.
//!
//! The computer draws its deck from the catalog. Difficulty caps the
//! rarity of the cards it may pick.

use serde::{Deserialize, Serialize};

use super::model::Deck;
use crate::cards::{CardCatalog, CardId, CardKind, Rarity};
use crate::core::{BattleError, BattleRng, Result};

/// Computer opponent strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Common and uncommon cards only.
    Easy,
    /// Up to rare cards.
    #[default]
    Normal,
    /// Any card.
    Hard,
}

impl Difficulty {
    /// Highest rarity the computer may draw at this difficulty.
    #[must_use]
    pub const fn max_rarity(self) -> Rarity {
        match self {
            Difficulty::Easy => Rarity::Uncommon,
            Difficulty::Normal => Rarity::Rare,
            Difficulty::Hard => Rarity::Legendary,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty {:?}", other)),
        }
    }
}

/// Deck generator for the computer side.
///
/// ```
/// use vaccine_quest::cards::CardCatalog;
/// use vaccine_quest::core::BattleRng;
/// use vaccine_quest::deck::{ComputerOpponent, Difficulty};
///
/// let catalog = CardCatalog::builtin().unwrap();
/// let mut rng = BattleRng::new(42);
/// let deck = ComputerOpponent::from_difficulty(Difficulty::Easy)
///     .generate(&catalog, &mut rng)
///     .unwrap();
///
/// assert_eq!(deck.vaccines.len(), 4);
/// assert_eq!(deck.viruses.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerOpponent {
    /// Number of vaccines to draw.
    pub vaccines: usize,
    /// Number of viruses to draw.
    pub viruses: usize,
    /// Rarity cap.
    pub max_rarity: Rarity,
}

impl Default for ComputerOpponent {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

impl ComputerOpponent {
    /// Preset for a difficulty: 4 vaccines, 4 viruses, difficulty rarity cap.
    #[must_use]
    pub const fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            vaccines: 4,
            viruses: 4,
            max_rarity: difficulty.max_rarity(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, vaccines: usize, viruses: usize) -> Self {
        self.vaccines = vaccines;
        self.viruses = viruses;
        self
    }

    /// Draw a deck from the catalog.
    ///
    /// Candidates are sorted by id before shuffling so the same seed gives
    /// the same deck regardless of catalog iteration order. If there are
    /// fewer candidates than requested, the shuffled pool is cycled.
    pub fn generate(&self, catalog: &CardCatalog, rng: &mut BattleRng) -> Result<Deck> {
        let vaccines = self.draw(catalog, CardKind::Vaccine, self.vaccines, rng)?;
        let viruses = self.draw(catalog, CardKind::Virus, self.viruses, rng)?;
        tracing::debug!(?vaccines, ?viruses, "generated computer deck");
        Ok(Deck::new(vaccines, viruses))
    }

    fn draw(
        &self,
        catalog: &CardCatalog,
        kind: CardKind,
        count: usize,
        rng: &mut BattleRng,
    ) -> Result<Vec<CardId>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut pool = catalog.ids_up_to(kind, self.max_rarity);
        if pool.is_empty() {
            return Err(BattleError::CatalogUnavailable);
        }
        rng.shuffle(&mut pool);
        Ok(pool.iter().copied().cycle().take(count).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;

    #[test]
    fn test_difficulty_caps() {
        let catalog = CardCatalog::builtin().unwrap();
        for seed in 0..20 {
            let mut rng = BattleRng::new(seed);
            let deck = ComputerOpponent::from_difficulty(Difficulty::Easy)
                .generate(&catalog, &mut rng)
                .unwrap();
            for id in deck.vaccines.iter().chain(&deck.viruses) {
                assert!(catalog.get(*id).unwrap().rarity <= Rarity::Uncommon);
            }
        }
    }

    #[test]
    fn test_kinds_are_correct_and_distinct() {
        let catalog = CardCatalog::builtin().unwrap();
        let mut rng = BattleRng::new(9);
        let deck = ComputerOpponent::from_difficulty(Difficulty::Hard)
            .generate(&catalog, &mut rng)
            .unwrap();

        assert!(deck.vaccines.iter().all(|id| catalog.vaccine(*id).is_some()));
        assert!(deck.viruses.iter().all(|id| catalog.virus(*id).is_some()));

        let mut unique = deck.viruses.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), deck.viruses.len());
    }

    #[test]
    fn test_same_seed_same_deck() {
        let catalog = CardCatalog::builtin().unwrap();
        let opponent = ComputerOpponent::default();
        let a = opponent.generate(&catalog, &mut BattleRng::new(5)).unwrap();
        let b = opponent.generate(&catalog, &mut BattleRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_pool_cycles() {
        let mut catalog = CardCatalog::new();
        catalog
            .register(CardDefinition::vaccine(CardId::new(1), "Only", Rarity::Common))
            .unwrap();
        catalog
            .register(CardDefinition::virus(CardId::new(101), "Only", Rarity::Common, 0.5))
            .unwrap();

        let deck = ComputerOpponent::default()
            .with_size(3, 2)
            .generate(&catalog, &mut BattleRng::new(1))
            .unwrap();
        assert_eq!(deck.vaccines, vec![CardId::new(1); 3]);
        assert_eq!(deck.viruses, vec![CardId::new(101); 2]);
    }

    #[test]
    fn test_empty_pool_fails() {
        let mut catalog = CardCatalog::new();
        catalog
            .register(CardDefinition::vaccine(CardId::new(1), "Rare", Rarity::Epic))
            .unwrap();

        let err = ComputerOpponent::from_difficulty(Difficulty::Easy)
            .generate(&catalog, &mut BattleRng::new(1))
            .unwrap_err();
        assert!(matches!(err, BattleError::CatalogUnavailable));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("nightmare".parse::<Difficulty>().is_err());
    }
}

//! Card definitions - static card data.
//!
//! A `CardDefinition` is either a vaccine or a virus. The kind-specific
//! data lives in `CardTraits` so a vaccine can never carry a death
//! probability and a virus can never protect anything.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BattleError, ProbabilityPolicy, Result};

/// Unique identifier for a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The two kinds of cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Vaccine,
    Virus,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Vaccine => write!(f, "vaccine"),
            CardKind::Virus => write!(f, "virus"),
        }
    }
}

/// Card rarity, ordered from most to least common.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Protection data carried by vaccine cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VaccineTraits {
    /// Viruses this vaccine defends against.
    pub protected_viruses: SmallVec<[CardId; 4]>,

    /// Per-virus efficacy in `[0, 1]` (0 = none, 1 = perfect).
    pub protection: SmallVec<[(CardId, f64); 4]>,
}

impl VaccineTraits {
    /// Does this vaccine defend against `virus`?
    #[must_use]
    pub fn protects(&self, virus: CardId) -> bool {
        self.protected_viruses.contains(&virus)
    }

    /// Efficacy recorded for `virus`, if any.
    #[must_use]
    pub fn efficacy_against(&self, virus: CardId) -> Option<f64> {
        self.protection
            .iter()
            .find(|(id, _)| *id == virus)
            .map(|(_, efficacy)| *efficacy)
    }
}

/// Lethality data carried by virus cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VirusTraits {
    /// Probability an unmitigated attack lands.
    pub death_probability: f64,

    /// Lethality against a vaccinated target. Informational only; the
    /// battle resolver derives protection from the defending vaccines.
    pub death_probability_vaccinated: f64,
}

/// Kind-specific card data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardTraits {
    Vaccine(VaccineTraits),
    Virus(VirusTraits),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use vaccine_quest::cards::{CardDefinition, CardId, Rarity};
///
/// let measles = CardDefinition::virus(CardId::new(101), "Measles", Rarity::Rare, 0.7);
/// let mmr = CardDefinition::vaccine(CardId::new(1), "MMR", Rarity::Common)
///     .with_protection(CardId::new(101), 0.97);
///
/// assert!(mmr.as_vaccine().unwrap().protects(measles.id));
/// assert_eq!(measles.as_virus().unwrap().death_probability, 0.7);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Collectible rarity.
    pub rarity: Rarity,

    /// Image path, relative to the asset root.
    pub image: String,

    /// Vaccine or virus data.
    pub traits: CardTraits,
}

impl CardDefinition {
    /// Create a vaccine card with no protections.
    #[must_use]
    pub fn vaccine(id: CardId, name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            rarity,
            image: String::new(),
            traits: CardTraits::Vaccine(VaccineTraits::default()),
        }
    }

    /// Create a virus card.
    #[must_use]
    pub fn virus(
        id: CardId,
        name: impl Into<String>,
        rarity: Rarity,
        death_probability: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rarity,
            image: String::new(),
            traits: CardTraits::Virus(VirusTraits {
                death_probability,
                death_probability_vaccinated: 0.0,
            }),
        }
    }

    /// Protect against `virus` with the given efficacy.
    ///
    /// No-op on virus cards.
    #[must_use]
    pub fn with_protection(mut self, virus: CardId, efficacy: f64) -> Self {
        if let CardTraits::Vaccine(traits) = &mut self.traits {
            if !traits.protects(virus) {
                traits.protected_viruses.push(virus);
            }
            traits.protection.retain(|(id, _)| *id != virus);
            traits.protection.push((virus, efficacy));
        }
        self
    }

    /// Set the vaccinated lethality. No-op on vaccine cards.
    #[must_use]
    pub fn with_vaccinated_probability(mut self, probability: f64) -> Self {
        if let CardTraits::Virus(traits) = &mut self.traits {
            traits.death_probability_vaccinated = probability;
        }
        self
    }

    /// Bring every probability into `[0, 1]`, or fail, per `policy`.
    pub fn validated(mut self, policy: ProbabilityPolicy) -> Result<Self> {
        let id = self.id;
        match &mut self.traits {
            CardTraits::Vaccine(traits) => {
                for (_, efficacy) in &mut traits.protection {
                    *efficacy = checked_probability(id, "protectionMap", *efficacy, policy)?;
                }
            }
            CardTraits::Virus(traits) => {
                traits.death_probability =
                    checked_probability(id, "deathProbability", traits.death_probability, policy)?;
                traits.death_probability_vaccinated = checked_probability(
                    id,
                    "deathProbabilityVaccinated",
                    traits.death_probability_vaccinated,
                    policy,
                )?;
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self.traits {
            CardTraits::Vaccine(_) => CardKind::Vaccine,
            CardTraits::Virus(_) => CardKind::Virus,
        }
    }

    #[must_use]
    pub fn as_vaccine(&self) -> Option<&VaccineTraits> {
        match &self.traits {
            CardTraits::Vaccine(traits) => Some(traits),
            CardTraits::Virus(_) => None,
        }
    }

    #[must_use]
    pub fn as_virus(&self) -> Option<&VirusTraits> {
        match &self.traits {
            CardTraits::Virus(traits) => Some(traits),
            CardTraits::Vaccine(_) => None,
        }
    }
}

/// Check one probability against `[0, 1]`. NaN clamps to 0.
pub(crate) fn checked_probability(
    card: CardId,
    field: &'static str,
    value: f64,
    policy: ProbabilityPolicy,
) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        return Ok(value);
    }
    match policy {
        ProbabilityPolicy::Reject => Err(BattleError::InvalidProbability { card, field, value }),
        ProbabilityPolicy::Clamp => {
            let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
            tracing::warn!(%card, field, value, clamped, "probability out of range, clamped");
            Ok(clamped)
        }
    }
}

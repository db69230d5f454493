//! On-disk card catalog format.
//!
//! Catalog files use the field names of the game's data tables
//! (`protectedViruses`, `protectionMap`, `deathProbability`, ...).
//! `CardRecord` mirrors that layout; [`CardRecord::into_definition`]
//! validates it and produces a [`CardDefinition`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::{
    checked_probability, CardDefinition, CardId, CardTraits, Rarity, VaccineTraits, VirusTraits,
};
use crate::core::{BattleError, ProbabilityPolicy, Result};

/// Top-level catalog document: `{ "cards": [...] }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub cards: Vec<CardRecord>,
}

/// One card as it appears in a catalog file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: u32,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub data: RecordData,
}

/// Kind-specific fields, selected by the `type` tag.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordData {
    #[serde(rename_all = "camelCase")]
    Vaccine {
        #[serde(default)]
        protected_viruses: Vec<u32>,
        #[serde(default)]
        protection_map: BTreeMap<String, f64>,
    },
    #[serde(rename_all = "camelCase")]
    Virus {
        death_probability: f64,
        #[serde(default)]
        death_probability_vaccinated: f64,
    },
}

impl CardRecord {
    /// Validate the record and convert it into a card definition.
    ///
    /// Probabilities outside `[0, 1]` are clamped or rejected per `policy`.
    /// A protected virus with no `protectionMap` entry gets efficacy `0.0`.
    pub fn into_definition(self, policy: ProbabilityPolicy) -> Result<CardDefinition> {
        let id = CardId::new(self.id);

        let traits = match self.data {
            RecordData::Vaccine {
                protected_viruses,
                protection_map,
            } => {
                let mut efficacies = BTreeMap::new();
                for (key, value) in protection_map {
                    let virus: u32 = key.trim().parse().map_err(|_| {
                        BattleError::CatalogFormat(format!(
                            "{} has non-numeric protectionMap key {:?}",
                            id, key
                        ))
                    })?;
                    let value = checked_probability(id, "protectionMap", value, policy)?;
                    efficacies.insert(virus, value);
                }

                let mut traits = VaccineTraits::default();
                for virus in protected_viruses {
                    let virus_id = CardId::new(virus);
                    if traits.protects(virus_id) {
                        continue;
                    }
                    traits.protected_viruses.push(virus_id);
                    if !efficacies.contains_key(&virus) {
                        tracing::warn!(
                            card = %id,
                            virus = %virus_id,
                            "protected virus has no protectionMap entry, efficacy set to 0"
                        );
                        efficacies.insert(virus, 0.0);
                    }
                }
                traits.protection = efficacies
                    .into_iter()
                    .map(|(virus, efficacy)| (CardId::new(virus), efficacy))
                    .collect();
                CardTraits::Vaccine(traits)
            }
            RecordData::Virus {
                death_probability,
                death_probability_vaccinated,
            } => CardTraits::Virus(VirusTraits {
                death_probability: checked_probability(
                    id,
                    "deathProbability",
                    death_probability,
                    policy,
                )?,
                death_probability_vaccinated: checked_probability(
                    id,
                    "deathProbabilityVaccinated",
                    death_probability_vaccinated,
                    policy,
                )?,
            }),
        };

        Ok(CardDefinition {
            id,
            name: self.name,
            rarity: self.rarity,
            image: self.image,
            traits,
        })
    }
}

//! Battle resolution.
//!
//! Each round the opponent's next virus attacks the player's vaccine pool,
//! then the player's next virus attacks the opponent's. An attack lands
//! when the roll is below the virus's death probability, reduced
//! multiplicatively by every defending vaccine that protects against it.
//!
//! ```
//! use vaccine_quest::battle::BattleResolver;
//! use vaccine_quest::cards::CardCatalog;
//! use vaccine_quest::core::BattleConfig;
//! use vaccine_quest::deck::Deck;
//!
//! let catalog = CardCatalog::builtin().unwrap();
//! let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
//!
//! let player = Deck::from_ids(&[1, 2, 3, 4], &[101, 102, 103, 104]);
//! let opponent = Deck::from_ids(&[5, 6, 7, 8], &[105, 106]);
//! let result = resolver.resolve_seeded(&player, &opponent, 42).unwrap();
//!
//! assert_eq!(result.events.len(), 6);
//! ```

use smallvec::SmallVec;

use super::event::{AttackDirection, AttackEvent, AttackOutcome, CardSummary};
use super::result::BattleResult;
use crate::cards::{CardCatalog, CardDefinition, CardId, CardKind, VaccineTraits, VirusTraits};
use crate::core::{BattleConfig, BattleError, BattleRng, MissingCardPolicy, Result, RollSource, Side, SideMap};
use crate::deck::Deck;

/// Threshold and outcome of one attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackResolution {
    pub threshold: f64,
    pub roll: f64,
    pub outcome: AttackOutcome,
}

/// Probability that `virus` lands against the given protecting vaccines.
///
/// Each protector multiplies the risk by `1 - efficacy`. A protector with no
/// efficacy recorded for this virus leaves the risk unchanged.
#[must_use]
pub fn threshold_for(virus_id: CardId, virus: &VirusTraits, protectors: &[&VaccineTraits]) -> f64 {
    protectors.iter().fold(virus.death_probability, |risk, vaccine| {
        risk * (1.0 - vaccine.efficacy_against(virus_id).unwrap_or(0.0))
    })
}

/// Resolve one attack from a known roll.
#[must_use]
pub fn resolve_attack(
    virus_id: CardId,
    virus: &VirusTraits,
    protectors: &[&VaccineTraits],
    roll: f64,
) -> AttackResolution {
    let threshold = threshold_for(virus_id, virus, protectors);
    let outcome = if roll < threshold {
        AttackOutcome::Hit
    } else {
        AttackOutcome::Miss
    };
    AttackResolution {
        threshold,
        roll,
        outcome,
    }
}

/// Resolves battles between two decks against a catalog.
///
/// Stateless between calls: the same decks and rolls always give the same
/// result.
#[derive(Clone, Debug)]
pub struct BattleResolver<'a> {
    catalog: &'a CardCatalog,
    config: BattleConfig,
}

impl<'a> BattleResolver<'a> {
    /// Create a resolver. Fails if the catalog is empty.
    pub fn new(catalog: &'a CardCatalog, config: BattleConfig) -> Result<Self> {
        catalog.ensure_available()?;
        Ok(Self { catalog, config })
    }

    #[must_use]
    pub fn catalog(&self) -> &'a CardCatalog {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Resolve with a fresh `BattleRng` seeded from `seed`.
    pub fn resolve_seeded(&self, player: &Deck, opponent: &Deck, seed: u64) -> Result<BattleResult> {
        self.resolve(player, opponent, &mut BattleRng::new(seed))
    }

    /// Resolve a battle between `player` (deck A) and `opponent` (deck B).
    ///
    /// One roll is drawn per emitted event, in event order.
    pub fn resolve<R>(&self, player: &Deck, opponent: &Deck, rolls: &mut R) -> Result<BattleResult>
    where
        R: RollSource + ?Sized,
    {
        let decks = SideMap::new(player, opponent);
        let max_rounds = player.viruses.len().max(opponent.viruses.len());
        let mut events = Vec::with_capacity(player.viruses.len() + opponent.viruses.len());

        for round in 1..=max_rounds {
            for direction in AttackDirection::ROUND_ORDER {
                let Some(&virus_id) = decks[direction.attacker()].viruses.get(round - 1) else {
                    continue;
                };
                let defenders = &decks[direction.defender()].vaccines;
                if let Some(event) = self.attack(round as u32, direction, virus_id, defenders, rolls)? {
                    events.push(event);
                }
            }
        }

        let result = BattleResult::from_events(events);
        tracing::info!(
            outcome = %result.outcome,
            player_hits = result.player_hits,
            opponent_hits = result.opponent_hits,
            rounds = max_rounds,
            "battle resolved"
        );
        Ok(result)
    }

    fn attack<R>(
        &self,
        round: u32,
        direction: AttackDirection,
        virus_id: CardId,
        defenders: &[CardId],
        rolls: &mut R,
    ) -> Result<Option<AttackEvent>>
    where
        R: RollSource + ?Sized,
    {
        let Some((virus_card, virus)) = self.lookup_virus(virus_id, direction.attacker())? else {
            return Ok(None);
        };

        let mut protectors: SmallVec<[(&CardDefinition, &VaccineTraits); 4]> = SmallVec::new();
        for &vaccine_id in defenders {
            if let Some((card, vaccine)) = self.lookup_vaccine(vaccine_id, direction.defender())? {
                if vaccine.protects(virus_id) {
                    protectors.push((card, vaccine));
                }
            }
        }

        let traits: SmallVec<[&VaccineTraits; 4]> = protectors.iter().map(|(_, v)| *v).collect();
        let resolution = resolve_attack(virus_id, virus, &traits, rolls.roll());

        let event = AttackEvent {
            round,
            direction,
            attacker: CardSummary::from(virus_card),
            is_protected: !protectors.is_empty(),
            defender: protectors.first().map(|(card, _)| CardSummary::from(*card)),
            protectors: protectors.iter().map(|(card, _)| card.name.clone()).collect(),
            roll: resolution.roll,
            threshold: resolution.threshold,
            outcome: resolution.outcome,
        };
        tracing::debug!(
            round,
            direction = %direction,
            virus = %virus_card.name,
            protectors = event.protectors.len(),
            roll = event.rounded_roll(self.config.display_precision),
            threshold = event.rounded_threshold(self.config.display_precision),
            outcome = %event.outcome,
            "attack resolved"
        );
        Ok(Some(event))
    }

    fn lookup_virus(&self, id: CardId, side: Side) -> Result<Option<(&'a CardDefinition, &'a VirusTraits)>> {
        match self.catalog.get(id) {
            Some(card) => match card.as_virus() {
                Some(virus) => Ok(Some((card, virus))),
                None => self.missing(BattleError::WrongCardKind {
                    id,
                    expected: CardKind::Virus,
                }),
            },
            None => self.missing(BattleError::UnknownCard { id, side }),
        }
    }

    fn lookup_vaccine(&self, id: CardId, side: Side) -> Result<Option<(&'a CardDefinition, &'a VaccineTraits)>> {
        match self.catalog.get(id) {
            Some(card) => match card.as_vaccine() {
                Some(vaccine) => Ok(Some((card, vaccine))),
                None => self.missing(BattleError::WrongCardKind {
                    id,
                    expected: CardKind::Vaccine,
                }),
            },
            None => self.missing(BattleError::UnknownCard { id, side }),
        }
    }

    fn missing<T>(&self, err: BattleError) -> Result<Option<T>> {
        match self.config.missing_card_policy {
            MissingCardPolicy::Skip => {
                tracing::warn!(error = %err, "skipping card");
                Ok(None)
            }
            MissingCardPolicy::Fail => Err(err),
        }
    }
}

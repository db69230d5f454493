//! Per-request battle entry point.

use std::sync::Arc;

use super::request::{BattleReport, BattleRequest, Opponent};
use crate::battle::{BattleNotice, BattleResolver, NoticeSink};
use crate::cards::CardCatalog;
use crate::core::{BattleConfig, BattleRng, Result, Side};
use crate::deck::ComputerOpponent;

/// Runs battle requests against a shared, immutable catalog.
///
/// `BattleService` is cheap to clone and safe to share between threads;
/// requests never touch each other.
#[derive(Clone, Debug)]
pub struct BattleService {
    catalog: Arc<CardCatalog>,
    config: BattleConfig,
}

impl BattleService {
    /// Create a service. Fails if the catalog is empty.
    pub fn new(catalog: Arc<CardCatalog>, config: BattleConfig) -> Result<Self> {
        catalog.ensure_available()?;
        Ok(Self { catalog, config })
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Validate, resolve, and (for PvP) notify the opposing player.
    ///
    /// A notice the sink refuses is logged and reported through
    /// `BattleReport::notice_delivered`; the battle result is still returned.
    ///
    /// The computer's deck and the combat rolls come from separate context
    /// streams of the same seed.
    pub fn run<S>(&self, request: &BattleRequest, sink: &mut S) -> Result<BattleReport>
    where
        S: NoticeSink + ?Sized,
    {
        let resolver = BattleResolver::new(&self.catalog, self.config.clone())?;
        request.deck.validate(Side::Player, &self.catalog, &self.config)?;

        let seed = request.seed.unwrap_or_else(rand::random);
        let rng = BattleRng::new(seed);

        let opponent_deck = match &request.opponent {
            Opponent::Computer { difficulty } => ComputerOpponent::from_difficulty(*difficulty)
                .generate(&self.catalog, &mut rng.for_context("opponent-deck"))?,
            Opponent::Player { deck, .. } => {
                deck.validate(Side::Opponent, &self.catalog, &self.config)?;
                deck.clone()
            }
        };

        tracing::info!(
            user = %request.session.user_id,
            seed,
            pvp = matches!(request.opponent, Opponent::Player { .. }),
            "starting battle"
        );
        let result = resolver.resolve(&request.deck, &opponent_deck, &mut rng.for_context("battle"))?;

        let notice_delivered = match &request.opponent {
            Opponent::Player { user_id, .. } => {
                let notice =
                    BattleNotice::new(request.session.user_id.clone(), user_id.clone(), &result, seed);
                match sink.deliver(notice) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(
                            opponent = %user_id,
                            seed,
                            error = %err,
                            "battle notice not delivered"
                        );
                        false
                    }
                }
            }
            Opponent::Computer { .. } => false,
        };

        Ok(BattleReport {
            seed,
            opponent_deck,
            result,
            notice_delivered,
        })
    }
}

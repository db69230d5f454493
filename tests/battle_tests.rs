//! Battle resolution integration tests.
//!
//! These cover the round structure, the threshold math, and the hit/miss
//! accounting over whole battles.

use proptest::prelude::*;
use vaccine_quest::battle::{AttackDirection, AttackOutcome, BattleOutcome, BattleResolver};
use vaccine_quest::cards::{CardCatalog, CardDefinition, CardId, Rarity};
use vaccine_quest::core::{BattleConfig, ScriptedRolls, Side};
use vaccine_quest::deck::Deck;

/// Small catalog: vaccines 1-3, viruses 101, 102, 201.
fn test_catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();
    let cards = [
        CardDefinition::vaccine(CardId::new(1), "Strong", Rarity::Rare)
            .with_protection(CardId::new(101), 0.9),
        CardDefinition::vaccine(CardId::new(2), "Weaker", Rarity::Common)
            .with_protection(CardId::new(101), 0.8)
            .with_protection(CardId::new(201), 0.5),
        CardDefinition::vaccine(CardId::new(3), "Unrelated", Rarity::Common)
            .with_protection(CardId::new(102), 1.0),
        CardDefinition::virus(CardId::new(101), "Alpha", Rarity::Common, 0.5),
        CardDefinition::virus(CardId::new(102), "Gamma", Rarity::Uncommon, 0.9),
        CardDefinition::virus(CardId::new(201), "Beta", Rarity::Rare, 0.6),
    ];
    for card in cards {
        catalog.register(card).unwrap();
    }
    catalog
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_unprotected_attack_uses_raw_probability() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();

    let player = Deck::from_ids(&[], &[101]);
    let opponent = Deck::default();
    let result = resolver.resolve_seeded(&player, &opponent, 1).unwrap();

    let event = &result.events[0];
    assert_eq!(event.round, 1);
    assert!(!event.is_protected);
    assert!(event.defender.is_none());
    assert!(event.protectors.is_empty());
    assert_eq!(
        event.threshold,
        catalog.virus(CardId::new(101)).unwrap().1.death_probability
    );
}

#[test]
fn test_only_opponent_attacks() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();

    let player = Deck::from_ids(&[], &[]);
    let opponent = Deck::from_ids(&[], &[201]);
    let result = resolver.resolve_seeded(&player, &opponent, 3).unwrap();

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].direction, AttackDirection::OpponentToPlayer);
    assert_eq!(result.player_hits, 0);
}

#[test]
fn test_equal_hits_is_draw() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();

    // Round 1: both hit. Round 2: both miss.
    let player = Deck::from_ids(&[], &[101, 101]);
    let opponent = Deck::from_ids(&[], &[201, 201]);
    let mut rolls = ScriptedRolls::new(vec![0.0, 0.0, 0.99, 0.99]);
    let result = resolver.resolve(&player, &opponent, &mut rolls).unwrap();

    assert_eq!(result.player_hits, 1);
    assert_eq!(result.opponent_hits, 1);
    assert_eq!(result.outcome, BattleOutcome::Draw);
}

#[test]
fn test_two_protectors_stack() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();

    let player = Deck::from_ids(&[], &[101]);
    let opponent = Deck::from_ids(&[1, 3, 2], &[]);
    let result = resolver.resolve_seeded(&player, &opponent, 5).unwrap();

    let event = &result.events[0];
    assert!(event.is_protected);
    assert_eq!(event.defender.as_ref().unwrap().id, CardId::new(1));
    assert_eq!(event.protectors, vec!["Strong", "Weaker"]);
    assert!((event.threshold - 0.01).abs() < 1e-12, "threshold {}", event.threshold);
    assert_eq!(event.rounded_threshold(2), 0.01);
}

#[test]
fn test_perfect_vaccine_blocks_everything() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();

    let player = Deck::from_ids(&[], &[102; 20]);
    let opponent = Deck::from_ids(&[3], &[]);
    let result = resolver.resolve_seeded(&player, &opponent, 8).unwrap();

    assert_eq!(result.events.len(), 20);
    assert!(result.events.iter().all(|e| e.threshold == 0.0));
    assert_eq!(result.player_hits, 0);
    assert_eq!(result.outcome, BattleOutcome::Draw);
}

#[test]
fn test_uneven_decks_play_every_virus() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();

    let player = Deck::from_ids(&[2], &[101]);
    let opponent = Deck::from_ids(&[1], &[201, 102, 101]);
    let result = resolver.resolve_seeded(&player, &opponent, 13).unwrap();

    let rounds: Vec<_> = result.events.iter().map(|e| e.round).collect();
    assert_eq!(rounds, vec![1, 1, 2, 3]);
    assert_eq!(result.attacks(Side::Opponent), 3);
    assert_eq!(result.attacks(Side::Player), 1);
    assert_eq!(result.rounds(), 3);
}

#[test]
fn test_replay_from_event_rolls() {
    let catalog = CardCatalog::builtin().unwrap();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
    let player = Deck::from_ids(&[1, 2, 3, 4], &[101, 102, 103, 104]);
    let opponent = Deck::from_ids(&[5, 6, 7, 10], &[105, 106, 107, 109]);

    let original = resolver.resolve_seeded(&player, &opponent, 2024).unwrap();
    let recorded: Vec<f64> = original.events.iter().map(|e| e.roll).collect();
    let replay = resolver
        .resolve(&player, &opponent, &mut ScriptedRolls::new(recorded))
        .unwrap();

    assert_eq!(original, replay);
}

#[test]
fn test_decks_are_not_mutated() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
    let player = Deck::from_ids(&[1, 2], &[101, 201]);
    let opponent = Deck::from_ids(&[3], &[102]);
    let (before_player, before_opponent) = (player.clone(), opponent.clone());

    resolver.resolve_seeded(&player, &opponent, 4).unwrap();

    assert_eq!(player, before_player);
    assert_eq!(opponent, before_opponent);
}

#[test]
fn test_result_json_shape() {
    let catalog = test_catalog();
    let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
    let player = Deck::from_ids(&[], &[101]);
    let mut rolls = ScriptedRolls::new(vec![0.25]);
    let result = resolver.resolve(&player, &Deck::default(), &mut rolls).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "win");
    assert_eq!(json["playerHits"], 1);
    assert_eq!(json["events"][0]["outcome"], "HIT");
    assert_eq!(json["events"][0]["attacker"]["name"], "Alpha");
}

// =============================================================================
// Properties
// =============================================================================

fn deck_strategy() -> impl Strategy<Value = Deck> {
    (
        prop::collection::vec(prop::sample::select(vec![1u32, 2, 3]), 0..6),
        prop::collection::vec(prop::sample::select(vec![101u32, 102, 201]), 0..8),
    )
        .prop_map(|(vaccines, viruses)| Deck::from_ids(&vaccines, &viruses))
}

proptest! {
    #[test]
    fn prop_one_event_per_virus(player in deck_strategy(), opponent in deck_strategy(), seed in any::<u64>()) {
        let catalog = test_catalog();
        let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
        let result = resolver.resolve_seeded(&player, &opponent, seed).unwrap();

        prop_assert_eq!(result.events.len(), player.viruses.len() + opponent.viruses.len());
        prop_assert_eq!(result.attacks(Side::Player) as usize, player.viruses.len());
        prop_assert_eq!(result.attacks(Side::Opponent) as usize, opponent.viruses.len());
    }

    #[test]
    fn prop_hits_plus_misses_equal_attacks(player in deck_strategy(), opponent in deck_strategy(), seed in any::<u64>()) {
        let catalog = test_catalog();
        let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
        let result = resolver.resolve_seeded(&player, &opponent, seed).unwrap();

        for side in Side::ALL {
            prop_assert_eq!(result.hits(side) + result.misses(side), result.attacks(side));
        }
        prop_assert_eq!(result.outcome, BattleOutcome::from_hits(result.player_hits, result.opponent_hits));
    }

    #[test]
    fn prop_outcome_follows_roll_and_threshold(player in deck_strategy(), opponent in deck_strategy(), seed in any::<u64>()) {
        let catalog = test_catalog();
        let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
        let result = resolver.resolve_seeded(&player, &opponent, seed).unwrap();

        for event in &result.events {
            let expected = if event.roll < event.threshold { AttackOutcome::Hit } else { AttackOutcome::Miss };
            prop_assert_eq!(event.outcome, expected);
            prop_assert!((0.0..=1.0).contains(&event.threshold));
            prop_assert_eq!(event.is_protected, !event.protectors.is_empty());
            if !event.is_protected {
                let raw = catalog.virus(event.attacker.id).unwrap().1.death_probability;
                prop_assert_eq!(event.threshold, raw);
            }
        }
    }

    #[test]
    fn prop_round_order(player in deck_strategy(), opponent in deck_strategy()) {
        let catalog = test_catalog();
        let resolver = BattleResolver::new(&catalog, BattleConfig::default()).unwrap();
        let result = resolver
            .resolve(&player, &opponent, &mut ScriptedRolls::new(vec![0.5]))
            .unwrap();

        for pair in result.events.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.round <= b.round);
            if a.round == b.round {
                prop_assert_eq!(a.direction, AttackDirection::OpponentToPlayer);
                prop_assert_eq!(b.direction, AttackDirection::PlayerToOpponent);
            }
        }
    }
}

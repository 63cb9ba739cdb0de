//! Property tests for the placement, evolution and energy rules and for
//! match determinism.

use std::sync::Arc;

use proptest::prelude::*;

use pocket_battle::battle::BattleBuilder;
use pocket_battle::board::{Board, LaneId, Unit};
use pocket_battle::cards::{normalize_stage, CardDefinition, CardRef, DeckList};
use pocket_battle::core::{Intent, Side};
use pocket_battle::error::BattleError;
use pocket_battle::rules::{can_place, resolve_attack};

fn occupant(name: &str, placed_turn: u32) -> Unit {
    Unit::new(Arc::new(CardDefinition::new("o", name).with_hit_points(60)), placed_turn)
}

fn deck() -> DeckList {
    let cards: Vec<CardRef> = (0..20)
        .map(|i| {
            let card = if i % 4 == 3 {
                CardDefinition::new(format!("e{i}"), format!("Evolved {}", i - 1))
                    .with_stage("Stage 1")
                    .evolves_from(format!("Basic {}", i - 1))
            } else {
                CardDefinition::new(format!("b{i}"), format!("Basic {i}"))
            };
            Arc::new(
                card.with_hit_points(30 + 10 * (i % 5))
                    .with_attack("{C} Poke 10", None)
                    .with_attack("{CC} Smack 30", None),
            )
        })
        .collect();
    DeckList::new("mixed", cards)
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        (0usize..8, 0usize..4).prop_map(|(hand_index, lane)| Intent::PlaceCard {
            hand_index,
            lane: LaneId::new(lane).unwrap(),
        }),
        (0usize..4).prop_map(|lane| Intent::AttachEnergy {
            lane: LaneId::new(lane).unwrap()
        }),
        (0usize..3).prop_map(|attack_index| Intent::Attack { attack_index }),
        Just(Intent::EndTurn),
    ]
}

proptest! {
    /// Only labels normalizing to "basic" may seed an empty lane.
    #[test]
    fn prop_empty_lane_accepts_only_basic(label in "[A-Za-z0-9 ]{0,12}", turn in 1u32..50) {
        let card = CardDefinition::new("c", "C").with_stage(label.clone());
        let expected = normalize_stage(Some(&label)) == "basic";
        prop_assert_eq!(can_place(&card, None, turn), expected);
    }

    /// Any case and spacing of "basic" counts as Basic.
    #[test]
    fn prop_basic_label_variants(upper in proptest::collection::vec(any::<bool>(), 5), pad in 0usize..3) {
        let label: String = "basic"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let label = format!("{}{}{}", " ".repeat(pad), label, " ".repeat(pad));
        let card = CardDefinition::new("c", "C").with_stage(label);
        prop_assert!(can_place(&card, None, 1));
    }

    /// A name link that differs from the occupant's name is always refused.
    #[test]
    fn prop_name_mismatch_always_rejected(
        occupant_name in "[A-Za-z]{1,10}",
        link in "[A-Za-z]{1,10}",
        placed in 1u32..20,
        turn in 1u32..40,
    ) {
        prop_assume!(occupant_name != link);
        let candidate = CardDefinition::new("c", "Next").with_stage("Stage 1").evolves_from(link);
        prop_assert!(!can_place(&candidate, Some(&occupant(&occupant_name, placed)), turn));
    }

    /// With a matching link, evolution is legal exactly from the turn after
    /// placement.
    #[test]
    fn prop_evolution_turn_gate(placed in 1u32..20, turn in 1u32..40) {
        let candidate = CardDefinition::new("c", "Ivysaur")
            .with_stage("Stage 1")
            .evolves_from("Bulbasaur");
        let legal = can_place(&candidate, Some(&occupant("Bulbasaur", placed)), turn);
        prop_assert_eq!(legal, turn >= placed + 1);
    }

    /// An attack succeeds iff attached energy covers its cost, and never
    /// spends energy.
    #[test]
    fn prop_attack_energy_gate(energy in 0u32..6, cost in 0usize..6, damage in 0i64..200) {
        let info = format!("{{{}}} Strike {}", "C".repeat(cost), damage);
        let mut attacker = Board::new();
        let mut unit = Unit::new(
            Arc::new(CardDefinition::new("a", "A").with_hit_points(60).with_attack(info, None)),
            1,
        );
        unit.energy = energy;
        attacker.set(LaneId::FRONT, unit);
        let mut defender = Board::new();
        defender.set(LaneId::FRONT, occupant("D", 1));

        let result = resolve_attack(&attacker, &mut defender, 0);

        if energy as usize >= cost {
            prop_assert!(result.is_ok());
            let remaining = 60 - damage;
            if remaining > 0 {
                prop_assert_eq!(defender.front().unwrap().current_hit_points, Some(remaining));
            } else {
                prop_assert!(defender.front().is_none());
            }
        } else {
            let is_insufficient = matches!(result, Err(BattleError::InsufficientEnergy { .. }));
            prop_assert!(is_insufficient);
            prop_assert_eq!(defender.front().unwrap().current_hit_points, Some(60));
        }
        prop_assert_eq!(attacker.front().unwrap().energy, energy);
    }

    /// Same seed and same intents give the same match, and the player's
    /// cards are conserved between hand, deck and placements.
    #[test]
    fn prop_match_determinism(seed in any::<u64>(), intents in proptest::collection::vec(intent_strategy(), 0..40)) {
        let mut first = BattleBuilder::new(deck()).build(seed).unwrap();
        let mut second = BattleBuilder::new(deck()).build(seed).unwrap();

        for intent in &intents {
            let a = first.submit(intent.clone());
            let b = second.submit(intent.clone());
            prop_assert_eq!(a.is_ok(), b.is_ok());
        }

        prop_assert_eq!(first.snapshot(), second.snapshot());

        let player = first.state().side(Side::Player);
        let placements = first
            .state()
            .history
            .iter()
            .filter(|record| record.side == Side::Player)
            .filter(|record| matches!(record.intent, Intent::PlaceCard { .. }))
            .count();
        prop_assert_eq!(player.hand.len() + player.deck.len() + placements, 20);
    }

    /// Every intent the engine lists as legal is accepted.
    #[test]
    fn prop_legal_intents_accepted(seed in any::<u64>(), turns in 0usize..4) {
        let mut battle = BattleBuilder::new(deck()).build(seed).unwrap();
        for _ in 0..turns {
            let _ = battle.place_card(0, 0);
            let _ = battle.attach_energy(0);
            battle.end_turn().unwrap();
        }

        for intent in battle.legal_intents() {
            let mut copy = BattleBuilder::new(deck()).build(seed).unwrap();
            for _ in 0..turns {
                let _ = copy.place_card(0, 0);
                let _ = copy.attach_energy(0);
                copy.end_turn().unwrap();
            }
            prop_assert!(copy.submit(intent.clone()).is_ok(), "{:?}", intent);
        }
    }
}

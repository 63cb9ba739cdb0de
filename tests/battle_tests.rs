//! End-to-end battle tests.
//!
//! These drive a match through the `TurnController` the way the UI does:
//! - Seeding lanes and evolving units
//! - Once-per-turn energy
//! - Attacks, damage and defeats
//! - Turn rotation and draws

use std::sync::Arc;

use pocket_battle::ai::PassiveOpponent;
use pocket_battle::battle::{BattleBuilder, TurnController};
use pocket_battle::board::{LaneId, Unit};
use pocket_battle::cards::{CardCatalog, CardDefinition, CardId, CardRef, DeckList};
use pocket_battle::core::{BattleConfig, BattleEvent, Phase, Side, VictoryCondition};
use pocket_battle::error::{BattleError, TargetKind};
use pocket_battle::rules::GameResult;

fn filler() -> CardRef {
    Arc::new(CardDefinition::new("filler", "Filler").with_hit_points(40))
}

fn striker() -> CardRef {
    Arc::new(
        CardDefinition::new("striker", "Striker")
            .with_hit_points(60)
            .with_attack("{C} Tackle 20", None),
    )
}

fn bulbasaur() -> CardRef {
    Arc::new(
        CardDefinition::new("A1-001", "Bulbasaur")
            .with_stage("Basic")
            .with_hit_points(70)
            .with_attack("{G} Vine Whip 40", None),
    )
}

fn ivysaur() -> CardRef {
    Arc::new(
        CardDefinition::new("A1-002", "Ivysaur")
            .with_stage("Stage 1")
            .evolves_from("Bulbasaur")
            .with_hit_points(90)
            .with_attack("{GC} Razor Leaf 60", None),
    )
}

fn target(hp: i64) -> Unit {
    Unit::new(Arc::new(CardDefinition::new("target", "Target").with_hit_points(hp)), 1)
}

/// A match against a passive opponent with no opening units and the
/// player's hand replaced by `hand`.
fn battle_with_hand(hand: Vec<CardRef>) -> TurnController {
    let mut controller = BattleBuilder::new(DeckList::new("test", vec![filler(); 20]))
        .config(BattleConfig::default().with_opponent_opening_units(0))
        .policy(PassiveOpponent)
        .build(42)
        .unwrap();
    controller.state_mut().side_mut(Side::Player).hand = hand.into_iter().collect();
    controller
}

/// Test the basic attack: 20 damage against 50 hit points leaves 30.
#[test]
fn test_attack_damages_front_unit() {
    let mut battle = battle_with_hand(vec![striker()]);
    battle
        .state_mut()
        .side_mut(Side::Opponent)
        .board
        .set(LaneId::FRONT, target(50));

    battle.place_card(0, 0).unwrap();
    battle.attach_energy(0).unwrap();
    let outcome = battle.attack(0).unwrap();

    let defender = outcome.snapshot.opponent.board.front().unwrap();
    assert_eq!(defender.current_hit_points, Some(30));
    assert_eq!(outcome.snapshot.player.board.front().unwrap().energy, 1);
    assert_eq!(
        outcome.events.as_slice(),
        &[BattleEvent::Attacked {
            side: Side::Player,
            attack_index: 0,
            damage: 20,
            remaining: 30
        }]
    );
}

/// Test that a unit brought to 0 or below leaves its lane.
#[test]
fn test_attack_defeats_front_unit() {
    let mut battle = battle_with_hand(vec![striker()]);
    battle
        .state_mut()
        .side_mut(Side::Opponent)
        .board
        .set(LaneId::FRONT, target(15));

    battle.place_card(0, 0).unwrap();
    battle.attach_energy(0).unwrap();
    let outcome = battle.attack(0).unwrap();

    assert!(outcome.snapshot.opponent.board.front().is_none());
    assert_eq!(outcome.snapshot.opponent.units_lost, 1);
    assert!(outcome.events.contains(&BattleEvent::UnitDefeated {
        side: Side::Opponent,
        card: CardId::new("target"),
    }));

    // With the lane empty there is nothing left to attack.
    let err = battle.attack(0).unwrap_err();
    assert!(matches!(err, BattleError::NoTarget(TargetKind::Defender)));
}

/// Test that attacks need enough attached energy and do not spend it.
#[test]
fn test_attack_energy_gate() {
    let mut battle = battle_with_hand(vec![ivysaur(), bulbasaur()]);
    battle
        .state_mut()
        .side_mut(Side::Opponent)
        .board
        .set(LaneId::FRONT, target(500));

    battle.place_card(1, 0).unwrap();
    let err = battle.attack(0).unwrap_err();
    assert_eq!(err.to_string(), "Not enough energy: 1 required, 0 attached.");

    battle.attach_energy(0).unwrap();
    battle.attack(0).unwrap();
    let outcome = battle.attack(0).unwrap();

    // Two attacks on one energy: energy is never consumed.
    assert_eq!(outcome.snapshot.opponent.board.front().unwrap().current_hit_points, Some(420));
    assert_eq!(outcome.snapshot.player.board.front().unwrap().energy, 1);
}

/// A match where the opponent fields `hp`-point units with no attacks.
fn battle_against(hp: i64) -> TurnController {
    let target: CardRef = Arc::new(CardDefinition::new("target", "Target").with_hit_points(hp));
    BattleBuilder::new(DeckList::new("strikers", vec![striker(); 20]))
        .opponent_deck(DeckList::new("targets", vec![target; 20]))
        .build(42)
        .unwrap()
}

/// Test that energy attached on turn 1 survives the opponent's turn and
/// pays for a turn-2 attack.
#[test]
fn test_turn_one_energy_pays_for_turn_two_attack() {
    let mut battle = battle_against(50);

    battle.place_card(0, 0).unwrap();
    battle.attach_energy(0).unwrap();
    let outcome = battle.end_turn().unwrap();

    assert_eq!(outcome.snapshot.turn_number, 2);
    assert_eq!(outcome.snapshot.phase, Phase::PlayerTurn);
    assert_eq!(outcome.snapshot.player.board.front().unwrap().energy, 1);
    let defender = outcome.snapshot.opponent.board.front().unwrap();
    assert_eq!(defender.current_hit_points, Some(50));

    let outcome = battle.attack(0).unwrap();

    assert_eq!(
        outcome.snapshot.opponent.board.front().unwrap().current_hit_points,
        Some(30)
    );
    assert_eq!(outcome.snapshot.player.board.front().unwrap().energy, 1);
}

/// Test the same sequence against a 15-point unit, which is defeated.
#[test]
fn test_turn_two_attack_defeats_weak_unit() {
    let mut battle = battle_against(15);

    battle.place_card(0, 0).unwrap();
    battle.attach_energy(0).unwrap();
    battle.end_turn().unwrap();

    let outcome = battle.attack(0).unwrap();

    assert!(outcome.snapshot.opponent.board.front().is_none());
    assert_eq!(outcome.snapshot.opponent.units_lost, 1);
    assert_eq!(outcome.snapshot.phase, Phase::PlayerTurn);
}

/// Test that evolution is refused on the turn the basic was placed and
/// allowed on the next, keeping energy and restoring hit points.
#[test]
fn test_evolution_waits_one_turn() {
    let mut battle = battle_with_hand(vec![bulbasaur(), ivysaur()]);

    battle.place_card(0, 0).unwrap();
    battle.attach_energy(0).unwrap();

    let err = battle.place_card(0, 0).unwrap_err();
    assert!(matches!(err, BattleError::IllegalPlacement { .. }));
    assert_eq!(err.to_string(), "You cannot place a Stage 1 card here yet!");
    assert_eq!(battle.snapshot().player.hand.len(), 1);

    battle.end_turn().unwrap();
    assert_eq!(battle.snapshot().turn_number, 2);

    let outcome = battle.place_card(0, 0).unwrap();
    let unit = outcome.snapshot.player.board.front().unwrap();
    assert_eq!(unit.card.name, "Ivysaur");
    assert_eq!(unit.energy, 1);
    assert_eq!(unit.placed_turn, 2);
    assert_eq!(unit.current_hit_points, Some(90));
    assert!(matches!(outcome.events[0], BattleEvent::Evolved { .. }));
}

/// Test that a mismatched name link is refused on any turn.
#[test]
fn test_evolution_rejects_name_mismatch() {
    let impostor: CardRef = Arc::new(
        CardDefinition::new("x", "Venusaur")
            .with_stage("Stage 2")
            .evolves_from("Ivysaur"),
    );
    let mut battle = battle_with_hand(vec![bulbasaur(), impostor]);

    battle.place_card(0, 0).unwrap();
    for _ in 0..3 {
        battle.end_turn().unwrap();
        assert!(battle.place_card(0, 0).is_err());
    }
    assert_eq!(battle.snapshot().player.board.front().unwrap().card.name, "Bulbasaur");
}

/// Test that non-basic cards cannot seed an empty lane.
#[test]
fn test_stage_one_cannot_seed_lane() {
    let mut battle = battle_with_hand(vec![ivysaur()]);

    for lane in 0..4 {
        assert!(matches!(
            battle.place_card(0, lane),
            Err(BattleError::IllegalPlacement { .. })
        ));
    }
}

/// Test the once-per-turn energy rule and its reset.
#[test]
fn test_energy_once_per_turn() {
    let mut battle = battle_with_hand(vec![bulbasaur(), bulbasaur()]);
    battle.place_card(0, 0).unwrap();
    battle.place_card(0, 1).unwrap();

    battle.attach_energy(0).unwrap();
    assert!(matches!(battle.attach_energy(1), Err(BattleError::EnergyAlreadyPlaced)));
    assert!(battle.snapshot().player.energy_attached);

    battle.end_turn().unwrap();
    assert!(!battle.snapshot().player.energy_attached);

    let outcome = battle.attach_energy(1).unwrap();
    assert_eq!(outcome.snapshot.player.board.get(LaneId::new(1).unwrap()).unwrap().energy, 1);
}

/// Test that rejected intents leave the whole snapshot unchanged.
#[test]
fn test_rejection_changes_nothing() {
    let mut battle = battle_with_hand(vec![ivysaur(), bulbasaur()]);
    let before = battle.snapshot();

    assert!(battle.place_card(0, 0).is_err());
    assert!(battle.place_card(9, 0).is_err());
    assert!(battle.place_card(0, 4).is_err());
    assert!(battle.attach_energy(0).is_err());
    assert!(battle.attack(0).is_err());

    assert_eq!(battle.snapshot(), before);
    assert!(battle.state().history.is_empty());
}

/// Test the opening deal and the draw at the start of each player turn.
#[test]
fn test_deal_and_turn_draw() {
    let mut battle = BattleBuilder::new(DeckList::new("test", vec![filler(); 20]))
        .policy(PassiveOpponent)
        .build(3)
        .unwrap();

    let snapshot = battle.snapshot();
    assert_eq!(snapshot.phase, Phase::PlayerTurn);
    assert_eq!(snapshot.active_side, Side::Player);
    assert_eq!(snapshot.player.hand.len(), 5);
    assert_eq!(snapshot.player.deck_size, 15);

    let outcome = battle.end_turn().unwrap();
    assert_eq!(outcome.snapshot.player.hand.len(), 6);
    assert_eq!(outcome.snapshot.player.deck_size, 14);
    assert!(outcome.events.contains(&BattleEvent::CardDrawn { side: Side::Player }));
}

/// Test that drawing from an empty deck is a silent no-op.
#[test]
fn test_draw_exhaustion() {
    let mut battle = BattleBuilder::new(DeckList::new("short", vec![filler(); 5]))
        .config(BattleConfig::default().with_opponent_opening_units(0))
        .policy(PassiveOpponent)
        .build(8)
        .unwrap();
    assert_eq!(battle.snapshot().player.deck_size, 0);

    let outcome = battle.end_turn().unwrap();

    assert_eq!(outcome.snapshot.player.hand.len(), 5);
    assert_eq!(outcome.snapshot.player.deck_size, 0);
    assert!(!outcome
        .events
        .iter()
        .any(|event| matches!(event, BattleEvent::CardDrawn { .. })));
}

/// Test that matches never end unless a victory condition is configured.
#[test]
fn test_victory_condition() {
    let mut battle = BattleBuilder::new(DeckList::new("test", vec![striker(); 20]))
        .config(
            BattleConfig::default()
                .with_opponent_opening_units(0)
                .with_victory(VictoryCondition::Defeats(1)),
        )
        .policy(PassiveOpponent)
        .build(5)
        .unwrap();
    battle
        .state_mut()
        .side_mut(Side::Opponent)
        .board
        .set(LaneId::FRONT, target(10));

    battle.place_card(0, 0).unwrap();
    battle.attach_energy(0).unwrap();
    let outcome = battle.attack(0).unwrap();

    assert_eq!(outcome.snapshot.phase, Phase::GameOver);
    assert_eq!(outcome.snapshot.result, Some(GameResult::Winner(Side::Player)));
    assert!(matches!(battle.end_turn(), Err(BattleError::GameOver)));
    assert!(battle.legal_intents().is_empty());
}

/// Test a match built from catalog JSON.
#[test]
fn test_catalog_deck() {
    let catalog = CardCatalog::from_json(
        r#"{
            "A1-001": { "name": "Bulbasaur", "stage": "Basic", "hp": "70",
                        "attack": [{ "info": "{G} Vine Whip 40" }] },
            "A1-002": { "name": "Ivysaur", "stage": "Stage 1",
                        "prew_stage_name": "Bulbasaur", "hp": "90",
                        "attack": [{ "info": "{GC} Razor Leaf 60" }] }
        }"#,
    )
    .unwrap();

    let mut ids = vec![CardId::new("A1-001"); 18];
    ids.extend([CardId::new("A1-002"), CardId::new("A1-002")]);
    let deck = DeckList::new("Grass", catalog.resolve(&ids).unwrap());

    let battle = BattleBuilder::new(deck).build(11).unwrap();
    let snapshot = battle.snapshot();

    assert_eq!(snapshot.player.hand.len() + snapshot.player.deck_size, 20);

    // At most two of the opponent's five cards are not Basic.
    let opening = snapshot.opponent.board.front().unwrap();
    assert_eq!(opening.card.name, "Bulbasaur");
    assert_eq!(opening.current_hit_points, Some(70));
}

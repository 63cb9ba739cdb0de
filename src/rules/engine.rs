//! Rules engine: intent legality and application.
//!
//! `RulesEngine` is the single mutation path for a match. Both the UI (on
//! the player's behalf) and the opponent policy go through
//! `apply_intent`, so every rule is enforced in one place:
//! - Whose turn it is
//! - Placement, energy and attack legality
//! - Turn rotation, draws and the per-turn energy flag
//! - The configured victory condition

use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use tracing::{debug, info, trace};

use super::combat::{affordable_attacks, resolve_attack, AttackOutcome};
use super::energy::{attach_energy, reset_energy_flag};
use super::placement::{can_place, place_unit, Placement};
use crate::board::LaneId;
use crate::core::{BattleConfig, BattleEvent, Events, Intent, MatchState, Side, VictoryCondition};
use crate::error::{BattleError, Result};

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Side),
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_intents`: Return empty vec if the side can't act
/// - `apply_intent`: Must leave the state untouched when it returns `Err`
/// - `apply_intent`: Must be deterministic given the state's RNG streams
/// - `is_terminal`: Return None if the match continues
pub trait RulesEngine {
    /// Get the battle configuration.
    fn config(&self) -> &BattleConfig;

    /// Every intent `side` could issue right now that would be accepted.
    fn legal_intents(&self, state: &MatchState, side: Side) -> Vec<Intent>;

    /// Validate and apply an intent, returning what happened.
    fn apply_intent(&self, state: &mut MatchState, side: Side, intent: &Intent) -> Result<Events>;

    /// Check if the match is over.
    ///
    /// Returns `Some(result)` if the match has ended, `None` if it continues.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `intent` is currently legal for `side`.
    fn is_legal(&self, state: &MatchState, side: Side, intent: &Intent) -> bool {
        self.legal_intents(state, side).contains(intent)
    }
}

/// The battle rules.
#[derive(Clone, Debug, Default)]
pub struct BattleRules {
    config: BattleConfig,
}

impl BattleRules {
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        Self { config }
    }

    fn place_card(&self, state: &mut MatchState, side: Side, hand_index: usize, lane: LaneId) -> Result<Events> {
        let turn = state.turn_number;
        let side_state = state.side_mut(side);
        let card = side_state
            .hand_card(hand_index)
            .cloned()
            .ok_or(BattleError::InvalidHandIndex(hand_index))?;

        if !can_place(&card, side_state.board.get(lane), turn) {
            return Err(BattleError::IllegalPlacement {
                card: card.name.clone(),
                stage: card.stage_label().to_string(),
                lane,
            });
        }

        side_state.take_from_hand(hand_index);
        let event = match place_unit(&mut side_state.board, lane, card.clone(), turn) {
            Placement::Seeded => BattleEvent::CardPlaced {
                side,
                lane,
                card: card.id.clone(),
            },
            Placement::Evolved { from } => BattleEvent::Evolved {
                side,
                lane,
                from: from.id.clone(),
                to: card.id.clone(),
            },
        };
        Ok(smallvec![event])
    }

    fn attach(&self, state: &mut MatchState, side: Side, lane: LaneId) -> Result<Events> {
        let side_state = state.side_mut(side);
        if !attach_energy(side_state, lane) {
            return Err(if side_state.energy_attached {
                BattleError::EnergyAlreadyPlaced
            } else {
                BattleError::EmptyLane(lane)
            });
        }

        let total = side_state.board.get(lane).map_or(0, |unit| unit.energy);
        Ok(smallvec![BattleEvent::EnergyAttached { side, lane, total }])
    }

    fn attack(&self, state: &mut MatchState, side: Side, attack_index: usize) -> Result<Events> {
        let (attacker, defender) = state.sides.pair_mut(side);
        let outcome = resolve_attack(&attacker.board, &mut defender.board, attack_index)?;

        let mut events: Events = smallvec![BattleEvent::Attacked {
            side,
            attack_index,
            damage: outcome.damage(),
            remaining: outcome.remaining(),
        }];

        if let AttackOutcome::Defeated { defeated, .. } = outcome {
            defender.units_lost += 1;
            debug!(side = %side.opposite(), card = %defeated.card.name, "unit defeated");
            events.push(BattleEvent::UnitDefeated {
                side: side.opposite(),
                card: defeated.card.id.clone(),
            });

            if let Some(result) = self.is_terminal(state) {
                info!(?result, turn = state.turn_number, "match over");
                state.result = Some(result.clone());
                events.push(BattleEvent::GameOver { result });
            }
        }

        Ok(events)
    }

    /// Hand control to the other side.
    ///
    /// Ending the opponent's turn starts a new turn: the counter increments
    /// and the player draws.
    fn end_turn(&self, state: &mut MatchState, side: Side) -> Events {
        let next = side.opposite();
        reset_energy_flag(state.side_mut(side));
        reset_energy_flag(state.side_mut(next));
        state.active_side = next;

        let mut events: Events = smallvec![BattleEvent::TurnEnded { side }];
        if next == Side::Player {
            state.turn_number += 1;
            if state.draw_card(Side::Player).is_some() {
                events.push(BattleEvent::CardDrawn { side: Side::Player });
            }
        }
        events.push(BattleEvent::TurnStarted {
            side: next,
            turn: state.turn_number,
        });
        events
    }
}

impl RulesEngine for BattleRules {
    fn config(&self) -> &BattleConfig {
        &self.config
    }

    fn legal_intents(&self, state: &MatchState, side: Side) -> Vec<Intent> {
        if state.is_game_over() || state.active_side != side {
            return Vec::new();
        }

        let own = state.side(side);
        let turn = state.turn_number;
        let mut intents = Vec::new();

        for (hand_index, card) in own.hand.iter().enumerate() {
            for lane in LaneId::all() {
                if can_place(card, own.board.get(lane), turn) {
                    intents.push(Intent::PlaceCard { hand_index, lane });
                }
            }
        }

        if !own.energy_attached {
            intents.extend(own.board.units().map(|(lane, _)| Intent::AttachEnergy { lane }));
        }

        if let Some(front) = own.board.front() {
            if state.side(side.opposite()).board.front().is_some() {
                intents.extend(
                    affordable_attacks(front).map(|(attack_index, _)| Intent::Attack { attack_index }),
                );
            }
        }

        intents.push(Intent::EndTurn);
        intents
    }

    fn apply_intent(&self, state: &mut MatchState, side: Side, intent: &Intent) -> Result<Events> {
        if state.is_game_over() {
            return Err(BattleError::GameOver);
        }
        if state.active_side != side {
            trace!(%side, ?intent, "intent out of turn");
            return Err(BattleError::NotYourTurn);
        }

        if let Intent::EndTurn = intent {
            state.record(side, Intent::EndTurn);
            debug!(%side, turn = state.turn_number, "turn ended");
            return Ok(self.end_turn(state, side));
        }

        let result = match *intent {
            Intent::PlaceCard { hand_index, lane } => self.place_card(state, side, hand_index, lane),
            Intent::AttachEnergy { lane } => self.attach(state, side, lane),
            Intent::Attack { attack_index } => self.attack(state, side, attack_index),
            Intent::EndTurn => Ok(Events::new()),
        };

        match result {
            Ok(events) => {
                state.record(side, intent.clone());
                debug!(%side, ?intent, turn = state.turn_number, "intent applied");
                Ok(events)
            }
            Err(err) => {
                trace!(%side, ?intent, %err, "intent rejected");
                Err(err)
            }
        }
    }

    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        if state.result.is_some() {
            return state.result.clone();
        }
        match self.config.victory {
            VictoryCondition::Never | VictoryCondition::Defeats(0) => None,
            VictoryCondition::Defeats(needed) => Side::ALL
                .into_iter()
                .find(|side| state.side(side.opposite()).units_lost >= needed)
                .map(GameResult::Winner),
        }
    }
}

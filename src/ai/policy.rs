//! Opponent policies.
//!
//! A policy plays one opponent turn by issuing intents through the rules
//! engine. It does not end the turn; the turn controller hands control
//! back to the player once the policy has finished.

use tracing::debug;

use crate::board::LaneId;
use crate::core::{BattleEvent, Events, Intent, MatchState, Side};
use crate::rules::{affordable_attacks, RulesEngine};

/// Decides what the automated side does on its turn.
pub trait OpponentPolicy<E: RulesEngine>: Send + Sync {
    /// Play `side`'s turn against `state`, returning every event produced.
    ///
    /// Rejected intents are skipped; the state is only changed by accepted
    /// intents and the turn's draw.
    fn play_turn(&self, engine: &E, state: &mut MatchState, side: Side) -> Events;
}

/// The fixed four-step opponent:
///
/// 1. Draw a card.
/// 2. Place the first Basic in hand onto the first empty back lane (or the
///    empty front lane, when front refills are enabled).
/// 3. Attach one energy to the first unit, front first, holding fewer than
///    the configured cap.
/// 4. Attack with the highest-damage affordable attack, if both front lanes
///    are occupied. Ties go to the earlier attack.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedOpponent;

impl ScriptedOpponent {
    fn apply<E: RulesEngine>(engine: &E, state: &mut MatchState, side: Side, intent: Intent, events: &mut Events) {
        match engine.apply_intent(state, side, &intent) {
            Ok(produced) => events.extend(produced),
            Err(err) => debug!(%side, ?intent, %err, "opponent step skipped"),
        }
    }

    fn placement<E: RulesEngine>(engine: &E, state: &MatchState, side: Side) -> Option<Intent> {
        let own = state.side(side);
        let hand_index = own.hand.iter().position(|card| card.is_basic())?;
        let lane = if engine.config().opponent_refills_front_lane && own.board.front().is_none() {
            LaneId::FRONT
        } else {
            own.board.first_empty_back_lane()?
        };
        Some(Intent::PlaceCard { hand_index, lane })
    }

    fn energy_target<E: RulesEngine>(engine: &E, state: &MatchState, side: Side) -> Option<Intent> {
        let cap = engine.config().opponent_energy_cap;
        state
            .side(side)
            .board
            .units()
            .find(|(_, unit)| unit.energy < cap)
            .map(|(lane, _)| Intent::AttachEnergy { lane })
    }

    fn best_attack(state: &MatchState, side: Side) -> Option<Intent> {
        if state.side(side.opposite()).board.front().is_none() {
            return None;
        }
        let front = state.side(side).board.front()?;

        let mut best: Option<(usize, i64)> = None;
        for (index, attack) in affordable_attacks(front) {
            let damage = attack.damage();
            if best.map_or(true, |(_, top)| damage > top) {
                best = Some((index, damage));
            }
        }
        best.map(|(attack_index, _)| Intent::Attack { attack_index })
    }
}

impl<E: RulesEngine> OpponentPolicy<E> for ScriptedOpponent {
    fn play_turn(&self, engine: &E, state: &mut MatchState, side: Side) -> Events {
        let mut events = Events::new();

        if state.draw_card(side).is_some() {
            events.push(BattleEvent::CardDrawn { side });
        }

        if let Some(intent) = Self::placement(engine, state, side) {
            Self::apply(engine, state, side, intent, &mut events);
        }

        if let Some(intent) = Self::energy_target(engine, state, side) {
            Self::apply(engine, state, side, intent, &mut events);
        }

        if let Some(intent) = Self::best_attack(state, side) {
            Self::apply(engine, state, side, intent, &mut events);
        }

        events
    }
}

/// Draws and does nothing else. Useful for exercising the player's side
/// without interference.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveOpponent;

impl<E: RulesEngine> OpponentPolicy<E> for PassiveOpponent {
    fn play_turn(&self, _engine: &E, state: &mut MatchState, side: Side) -> Events {
        let mut events = Events::new();
        if state.draw_card(side).is_some() {
            events.push(BattleEvent::CardDrawn { side });
        }
        events
    }
}

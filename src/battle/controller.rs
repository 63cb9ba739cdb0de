//! The turn controller: the intent surface the UI drives.
//!
//! A `TurnController` owns one match. The four player intents map onto
//! `RulesEngine::apply_intent`; `end_turn` additionally runs the
//! opponent's turn, either inline (`Pacing::Immediate`) or as two steps
//! driven by a `TurnScheduler` (`Pacing::Deferred`).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::replay::Replay;
use crate::ai::OpponentPolicy;
use crate::board::LaneId;
use crate::core::{BattleConfig, BattleEvent, Events, Intent, MatchSnapshot, MatchState, Phase, Side};
use crate::error::Result;
use crate::rules::{BattleRules, RulesEngine};

/// Identity of one match session.
///
/// Deferred opponent steps carry the session they were scheduled for;
/// steps for a session that no longer matches the controller are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The two halves of a deferred opponent turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStep {
    /// Run the opponent policy.
    OpponentPolicy,
    /// End the opponent's turn: the turn counter increments and the player
    /// draws.
    ReturnToPlayer,
}

/// What an accepted intent did, plus the state to render.
#[derive(Clone, Debug, PartialEq)]
pub struct IntentOutcome {
    pub events: Events,
    pub snapshot: MatchSnapshot,
}

/// Drives one match on behalf of the player.
pub struct TurnController {
    rules: BattleRules,
    state: MatchState,
    policy: Box<dyn OpponentPolicy<BattleRules>>,
    session: SessionId,
    seed: u64,
    /// Next deferred step this controller will accept.
    pending: Option<TurnStep>,
}

impl TurnController {
    /// Wrap an already dealt match.
    pub fn new(
        rules: BattleRules,
        state: MatchState,
        policy: Box<dyn OpponentPolicy<BattleRules>>,
        session: SessionId,
        seed: u64,
    ) -> Self {
        Self {
            rules,
            state,
            policy,
            session,
            seed,
            pending: None,
        }
    }

    /// Play the hand card at `hand_index` onto lane `lane` (0 = front).
    pub fn place_card(&mut self, hand_index: usize, lane: usize) -> Result<IntentOutcome> {
        let lane = LaneId::new(lane)?;
        self.submit(Intent::PlaceCard { hand_index, lane })
    }

    /// Attach this turn's energy to the unit in lane `lane`.
    pub fn attach_energy(&mut self, lane: usize) -> Result<IntentOutcome> {
        let lane = LaneId::new(lane)?;
        self.submit(Intent::AttachEnergy { lane })
    }

    /// Attack the opposing front unit with the front unit's attack
    /// `attack_index`.
    pub fn attack(&mut self, attack_index: usize) -> Result<IntentOutcome> {
        self.submit(Intent::Attack { attack_index })
    }

    /// End the player's turn and start the opponent's.
    pub fn end_turn(&mut self) -> Result<IntentOutcome> {
        self.submit(Intent::EndTurn)
    }

    /// Apply a player intent.
    ///
    /// On rejection the match state is unchanged and the error's `Display`
    /// text is the message for the player.
    pub fn submit(&mut self, intent: Intent) -> Result<IntentOutcome> {
        let mut events = self.rules.apply_intent(&mut self.state, Side::Player, &intent)?;

        if intent == Intent::EndTurn && self.state.phase() == Phase::OpponentTurn {
            if self.rules.config().pacing.delays().is_some() {
                debug!(session = %self.session, "opponent turn deferred");
                self.pending = Some(TurnStep::OpponentPolicy);
                events.push(BattleEvent::OpponentTurnScheduled);
            } else {
                events.extend(self.play_opponent());
                events.extend(self.return_to_player());
            }
        }

        Ok(self.outcome(events))
    }

    /// Run one deferred step of the opponent's turn.
    ///
    /// Steps that are out of order, repeated, or arrive when it is not the
    /// opponent's turn do nothing.
    pub fn run_step(&mut self, step: TurnStep) -> Events {
        if self.pending != Some(step) || self.state.phase() != Phase::OpponentTurn {
            debug!(session = %self.session, ?step, "stale turn step ignored");
            return Events::new();
        }

        match step {
            TurnStep::OpponentPolicy => {
                self.pending = Some(TurnStep::ReturnToPlayer);
                self.play_opponent()
            }
            TurnStep::ReturnToPlayer => {
                self.pending = None;
                self.return_to_player()
            }
        }
    }

    /// Run whatever remains of a deferred opponent turn without waiting.
    pub fn finish_opponent_turn(&mut self) -> Events {
        let mut events = Events::new();
        while let Some(step) = self.pending {
            let produced = self.run_step(step);
            if produced.is_empty() && self.pending == Some(step) {
                break;
            }
            events.extend(produced);
        }
        events
    }

    fn play_opponent(&mut self) -> Events {
        self.policy.play_turn(&self.rules, &mut self.state, Side::Opponent)
    }

    fn return_to_player(&mut self) -> Events {
        self.pending = None;
        match self.rules.apply_intent(&mut self.state, Side::Opponent, &Intent::EndTurn) {
            Ok(events) => events,
            Err(err) => {
                info!(session = %self.session, %err, "match did not return to the player");
                Events::new()
            }
        }
    }

    fn outcome(&self, events: Events) -> IntentOutcome {
        IntentOutcome {
            events,
            snapshot: self.state.snapshot(),
        }
    }

    /// Intents the player could issue right now.
    #[must_use]
    pub fn legal_intents(&self) -> Vec<Intent> {
        self.rules.legal_intents(&self.state, Side::Player)
    }

    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Mutable access for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The next deferred step this controller expects, if any.
    #[must_use]
    pub fn pending_step(&self) -> Option<TurnStep> {
        self.pending
    }

    /// The player's accepted intents so far, with the seed, for replay.
    #[must_use]
    pub fn replay(&self) -> Replay {
        Replay::from_history(self.seed, &self.state.history)
    }
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("session", &self.session)
            .field("seed", &self.seed)
            .field("phase", &self.state.phase())
            .field("turn_number", &self.state.turn_number)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

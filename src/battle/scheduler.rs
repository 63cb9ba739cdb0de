//! Deferred opponent turns.
//!
//! With `Pacing::Deferred`, ending the player's turn leaves the match in
//! `OpponentTurn`. The scheduler queues the two follow-up steps with their
//! due times and fires them as the host advances its clock. The scheduler
//! keeps its own virtual clock, so hosts can drive it from a UI timer and
//! tests can drive it deterministically.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::trace;

use super::controller::{IntentOutcome, SessionId, TurnController, TurnStep};
use crate::core::{Events, Phase};
use crate::error::Result;

/// A step waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledStep {
    pub session: SessionId,
    pub step: TurnStep,
    /// Scheduler time at which the step fires.
    pub due: Duration,
}

/// Queue of deferred turn steps.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    now: Duration,
    queue: VecDeque<ScheduledStep>,
}

impl TurnScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// End the player's turn and queue the opponent's steps if the match is
    /// deferred.
    pub fn end_turn(&mut self, controller: &mut TurnController) -> Result<IntentOutcome> {
        let outcome = controller.end_turn()?;

        if controller.phase() == Phase::OpponentTurn {
            if let Some((policy_delay, return_delay)) = controller.config().pacing.delays() {
                let session = controller.session();
                let policy_due = self.now + policy_delay;
                self.schedule(ScheduledStep {
                    session,
                    step: TurnStep::OpponentPolicy,
                    due: policy_due,
                });
                self.schedule(ScheduledStep {
                    session,
                    step: TurnStep::ReturnToPlayer,
                    due: policy_due + return_delay,
                });
            }
        }

        Ok(outcome)
    }

    /// Queue a step, keeping the queue ordered by due time. Steps due at
    /// the same time fire in the order they were scheduled.
    pub fn schedule(&mut self, step: ScheduledStep) {
        let at = self.queue.partition_point(|queued| queued.due <= step.due);
        self.queue.insert(at, step);
    }

    /// Move the clock forward and fire every step now due, in order.
    ///
    /// Steps scheduled for another session are dropped without effect.
    pub fn advance(&mut self, elapsed: Duration, controller: &mut TurnController) -> Events {
        self.now += elapsed;
        let mut events = Events::new();

        while self.queue.front().is_some_and(|next| next.due <= self.now) {
            let Some(scheduled) = self.queue.pop_front() else {
                break;
            };
            if scheduled.session != controller.session() {
                trace!(session = %scheduled.session, step = ?scheduled.step, "dropping step for stale session");
                continue;
            }
            events.extend(controller.run_step(scheduled.step));
        }

        events
    }

    /// Drop every pending step for `session`, returning how many were
    /// removed.
    pub fn cancel(&mut self, session: SessionId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|scheduled| scheduled.session != session);
        before - self.queue.len()
    }

    /// Steps still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the next step, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.front().map(|scheduled| scheduled.due)
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }
}

//! Battle configuration.
//!
//! The rules themselves are fixed; `BattleConfig` covers the knobs the
//! source left open: opponent pacing, the opponent's opening board and
//! self-imposed energy cap, deck-size rules and the (optional) win
//! condition.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::DeckRules;

/// How the opponent's turn is paced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pacing {
    /// The opponent's turn runs to completion inside `end_turn`.
    Immediate,
    /// The opponent's turn runs in two delayed steps driven by a
    /// `TurnScheduler`: the policy after `policy_delay_ms`, the return to
    /// the player `return_delay_ms` later.
    Deferred {
        policy_delay_ms: u64,
        return_delay_ms: u64,
    },
}

impl Pacing {
    /// The browser client's pacing: one second per step.
    #[must_use]
    pub const fn presentation() -> Self {
        Pacing::Deferred {
            policy_delay_ms: 1000,
            return_delay_ms: 1000,
        }
    }

    /// (policy delay, return delay), or `None` for immediate pacing.
    #[must_use]
    pub fn delays(&self) -> Option<(Duration, Duration)> {
        match *self {
            Pacing::Immediate => None,
            Pacing::Deferred {
                policy_delay_ms,
                return_delay_ms,
            } => Some((
                Duration::from_millis(policy_delay_ms),
                Duration::from_millis(return_delay_ms),
            )),
        }
    }
}

/// When a match ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryCondition {
    /// Matches never end on their own.
    Never,
    /// A side wins once it has defeated this many opposing units. Zero
    /// behaves like `Never`.
    Defeats(u32),
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Cards dealt to each side at match start.
    pub opening_hand_size: usize,

    /// The opponent stops attaching energy to a unit at this count.
    /// Not applied to the player.
    pub opponent_energy_cap: u32,

    /// Basic units the opponent puts on its board at match start, front
    /// lane first. 1 seeds the front lane only.
    pub opponent_opening_units: usize,

    /// Let the opponent refill an empty front lane during its turn
    /// (otherwise it only fills back lanes).
    pub opponent_refills_front_lane: bool,

    pub pacing: Pacing,

    pub victory: VictoryCondition,

    pub deck_rules: DeckRules,

    /// Validate decks against `deck_rules` when building a match.
    pub strict_decks: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            opening_hand_size: 5,
            opponent_energy_cap: 3,
            opponent_opening_units: 1,
            opponent_refills_front_lane: false,
            pacing: Pacing::Immediate,
            victory: VictoryCondition::Never,
            deck_rules: DeckRules::default(),
            strict_decks: false,
        }
    }
}

impl BattleConfig {
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_opponent_energy_cap(mut self, cap: u32) -> Self {
        self.opponent_energy_cap = cap;
        self
    }

    #[must_use]
    pub fn with_opponent_opening_units(mut self, units: usize) -> Self {
        self.opponent_opening_units = units;
        self
    }

    #[must_use]
    pub fn with_front_lane_refill(mut self, refill: bool) -> Self {
        self.opponent_refills_front_lane = refill;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_victory(mut self, victory: VictoryCondition) -> Self {
        self.victory = victory;
        self
    }

    /// Enforce deck rules when building a match.
    #[must_use]
    pub fn strict(mut self, rules: DeckRules) -> Self {
        self.deck_rules = rules;
        self.strict_decks = true;
        self
    }
}

//! Deterministic replay.
//!
//! Every random choice in a match derives from its seed and the opponent
//! policy is deterministic, so the seed plus the player's accepted intents
//! reproduce the match exactly.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::builder::BattleBuilder;
use super::controller::TurnController;
use crate::core::{Intent, IntentRecord, Side};
use crate::error::Result;

/// A recorded match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u64,
    /// The player's accepted intents, in order.
    pub intents: Vec<Intent>,
}

impl Replay {
    /// Extract the player's intents from a match history.
    #[must_use]
    pub fn from_history(seed: u64, history: &Vector<IntentRecord>) -> Self {
        Self {
            seed,
            intents: history
                .iter()
                .filter(|record| record.side == Side::Player)
                .map(|record| record.intent.clone())
                .collect(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Rebuild the match from `builder` and re-apply every intent.
    ///
    /// The builder must be configured as the original match was. Deferred
    /// opponent turns are run to completion after each intent.
    pub fn run(&self, builder: BattleBuilder) -> Result<TurnController> {
        let mut controller = builder.build(self.seed)?;
        for intent in &self.intents {
            controller.submit(intent.clone())?;
            controller.finish_opponent_turn();
        }
        Ok(controller)
    }
}

//! Intents (what a side asks to do) and events (what happened).
//!
//! The UI issues intents on the player's behalf; the opponent policy issues
//! the same intents for the opponent. Accepted intents are recorded in the
//! match history and produce a small batch of `BattleEvent`s the UI can
//! animate or log.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::side::Side;
use crate::board::LaneId;
use crate::cards::CardId;
use crate::rules::GameResult;

/// A request to change the match state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Play the hand card at `hand_index` onto `lane` (seed or evolve).
    PlaceCard { hand_index: usize, lane: LaneId },
    /// Attach this turn's energy to the unit in `lane`.
    AttachEnergy { lane: LaneId },
    /// Front unit attacks the opposing front unit.
    Attack { attack_index: usize },
    /// Pass control to the other side.
    EndTurn,
}

/// An accepted intent with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub side: Side,
    pub intent: Intent,
    /// Turn number when the intent was accepted.
    pub turn: u32,
    /// Position in the match history.
    pub sequence: u32,
}

/// Something that happened as a result of an intent or a turn step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    CardPlaced { side: Side, lane: LaneId, card: CardId },
    Evolved { side: Side, lane: LaneId, from: CardId, to: CardId },
    EnergyAttached { side: Side, lane: LaneId, total: u32 },
    Attacked { side: Side, attack_index: usize, damage: i64, remaining: i64 },
    /// `side` lost the unit.
    UnitDefeated { side: Side, card: CardId },
    CardDrawn { side: Side },
    TurnEnded { side: Side },
    TurnStarted { side: Side, turn: u32 },
    /// The opponent's turn was handed to a scheduler.
    OpponentTurnScheduled,
    GameOver { result: GameResult },
}

/// Events produced by one intent; usually a handful.
pub type Events = SmallVec<[BattleEvent; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::PlaceCard {
            hand_index: 2,
            lane: LaneId::FRONT,
        };
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();

        assert_eq!(intent, back);
    }

    #[test]
    fn test_record_serialization() {
        let record = IntentRecord {
            side: Side::Opponent,
            intent: Intent::Attack { attack_index: 0 },
            turn: 3,
            sequence: 11,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: IntentRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, back);
    }
}

//! Placement legality and execution.
//!
//! An empty lane accepts only Basic cards. An occupied lane accepts a card
//! whose `previous_stage_name` is exactly the occupant's name, provided the
//! occupant has been in play for at least one turn. The stage label of the
//! evolving card is not cross-checked against the chain depth.

use crate::board::{Board, LaneId, Unit};
use crate::cards::{CardDefinition, CardRef};

/// Whether `candidate` may be placed onto a lane holding `target` on `turn`.
///
/// ```
/// use std::sync::Arc;
/// use pocket_battle::board::Unit;
/// use pocket_battle::cards::CardDefinition;
/// use pocket_battle::rules::can_place;
///
/// let bulbasaur = CardDefinition::new("a", "Bulbasaur").with_hit_points(70);
/// let ivysaur = CardDefinition::new("b", "Ivysaur").with_stage("Stage 1").evolves_from("Bulbasaur");
///
/// assert!(can_place(&bulbasaur, None, 1));
/// assert!(!can_place(&ivysaur, None, 1));
///
/// let occupant = Unit::new(Arc::new(bulbasaur), 1);
/// assert!(!can_place(&ivysaur, Some(&occupant), 1));
/// assert!(can_place(&ivysaur, Some(&occupant), 2));
/// ```
#[must_use]
pub fn can_place(candidate: &CardDefinition, target: Option<&Unit>, turn: u32) -> bool {
    match target {
        None => candidate.is_basic(),
        Some(occupant) => {
            candidate.previous_stage_name.as_deref() == Some(occupant.card.name.as_str())
                && occupant.turns_in_play(turn) >= 1
        }
    }
}

/// What a placement did to the lane.
#[derive(Clone, Debug, PartialEq)]
pub enum Placement {
    /// An empty lane received a Basic unit.
    Seeded,
    /// The previous unit was replaced by its evolution.
    Evolved { from: CardRef },
}

/// Put `card` into `lane`, evolving the occupant if there is one.
///
/// Legality must already have been checked with [`can_place`]. Evolution
/// keeps the occupant's energy, resets the placed turn to `turn` and
/// restores the new card's full hit points; the old unit is discarded.
pub fn place_unit(board: &mut Board, lane: LaneId, card: CardRef, turn: u32) -> Placement {
    match board.clear(lane) {
        None => {
            board.set(lane, Unit::new(card, turn));
            Placement::Seeded
        }
        Some(previous) => {
            let from = previous.card.clone();
            board.set(lane, previous.evolve(card, turn));
            Placement::Evolved { from }
        }
    }
}

//! Lanes and the per-side board.

use serde::{Deserialize, Serialize};

use super::unit::Unit;
use crate::error::{BattleError, Result};

/// Number of lanes on a board: one front lane and three back lanes.
pub const LANE_COUNT: usize = 4;

/// Index of a lane on a board. Lane 0 is the front lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneId(u8);

impl LaneId {
    /// The front lane, the only lane that attacks or is attacked.
    pub const FRONT: LaneId = LaneId(0);

    /// Validate a raw lane index coming from the UI.
    ///
    /// ```
    /// use pocket_battle::board::LaneId;
    ///
    /// assert_eq!(LaneId::new(0).unwrap(), LaneId::FRONT);
    /// assert!(LaneId::new(4).is_err());
    /// ```
    pub fn new(index: usize) -> Result<Self> {
        if index < LANE_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(BattleError::InvalidLane(index))
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_front(self) -> bool {
        self.0 == 0
    }

    /// All lanes, front first.
    pub fn all() -> impl Iterator<Item = LaneId> {
        (0..LANE_COUNT as u8).map(LaneId)
    }

    /// The three back lanes, left to right.
    pub fn back() -> impl Iterator<Item = LaneId> {
        (1..LANE_COUNT as u8).map(LaneId)
    }
}

impl std::fmt::Display for LaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_front() {
            write!(f, "the front lane")
        } else {
            write!(f, "back lane {}", self.0)
        }
    }
}

/// One side's four lanes, each empty or holding a unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    lanes: [Option<Unit>; LANE_COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit in a lane, if any.
    #[must_use]
    pub fn get(&self, lane: LaneId) -> Option<&Unit> {
        self.lanes[lane.index()].as_ref()
    }

    pub fn get_mut(&mut self, lane: LaneId) -> Option<&mut Unit> {
        self.lanes[lane.index()].as_mut()
    }

    /// Put a unit in a lane, returning whatever was there.
    pub fn set(&mut self, lane: LaneId, unit: Unit) -> Option<Unit> {
        self.lanes[lane.index()].replace(unit)
    }

    /// Empty a lane, returning the unit that was removed.
    pub fn clear(&mut self, lane: LaneId) -> Option<Unit> {
        self.lanes[lane.index()].take()
    }

    #[must_use]
    pub fn front(&self) -> Option<&Unit> {
        self.get(LaneId::FRONT)
    }

    #[must_use]
    pub fn is_empty(&self, lane: LaneId) -> bool {
        self.lanes[lane.index()].is_none()
    }

    /// First empty back lane, left to right.
    #[must_use]
    pub fn first_empty_back_lane(&self) -> Option<LaneId> {
        LaneId::back().find(|&lane| self.is_empty(lane))
    }

    /// Occupied lanes with their units, front first.
    pub fn units(&self) -> impl Iterator<Item = (LaneId, &Unit)> {
        LaneId::all().filter_map(move |lane| self.get(lane).map(|unit| (lane, unit)))
    }

    /// Number of occupied lanes.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.lanes.iter().filter(|slot| slot.is_some()).count()
    }
}

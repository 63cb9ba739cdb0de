//! Board model: four lanes per side, each empty or holding a unit.
//!
//! ## Key Types
//!
//! - `LaneId`: Validated lane index; `LaneId::FRONT` is the combat lane
//! - `Unit`: A placed card with its turn of placement, energy and damage
//! - `Board`: Fixed array of lanes owned by one side

pub mod lanes;
pub mod unit;

pub use lanes::{Board, LaneId, LANE_COUNT};
pub use unit::Unit;

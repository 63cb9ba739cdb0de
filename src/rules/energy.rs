//! Energy attachment: one attach per side per turn, onto an occupied lane.

use crate::board::LaneId;
use crate::core::SideState;

/// Attach one energy to the unit in `lane`.
///
/// Returns `false` and changes nothing if this side already attached
/// energy this turn or the lane is empty. There is no cap on the energy a
/// unit may hold.
pub fn attach_energy(side: &mut SideState, lane: LaneId) -> bool {
    if side.energy_attached {
        return false;
    }
    let Some(unit) = side.board.get_mut(lane) else {
        return false;
    };

    unit.energy += 1;
    side.energy_attached = true;
    true
}

/// Start a new turn for this side: energy may be attached again.
pub fn reset_energy_flag(side: &mut SideState) {
    side.energy_attached = false;
}

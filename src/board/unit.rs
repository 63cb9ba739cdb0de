//! Units - cards placed on a lane.
//!
//! A `Unit` tracks the per-battle state of a placed card: the turn it was
//! placed on, the energy attached to it and the damage it has taken.

use serde::{Deserialize, Serialize};

use crate::cards::CardRef;

/// A card occupying a lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Definition of the placed card.
    pub card: CardRef,

    /// Turn number at which this unit entered its lane. Evolution resets it.
    pub placed_turn: u32,

    /// Attached energy. Never reduced by attacking.
    pub energy: u32,

    /// Remaining hit points. `None` means undamaged (the card's maximum).
    pub current_hit_points: Option<i64>,
}

impl Unit {
    /// A freshly placed unit: no energy, full hit points.
    #[must_use]
    pub fn new(card: CardRef, placed_turn: u32) -> Self {
        let current_hit_points = Some(card.max_hit_points());
        Self {
            card,
            placed_turn,
            energy: 0,
            current_hit_points,
        }
    }

    /// Replace this unit's card with an evolution, keeping attached energy.
    ///
    /// The evolved unit is placed on `turn` at the new card's full hit points.
    #[must_use]
    pub fn evolve(self, card: CardRef, turn: u32) -> Self {
        Self {
            energy: self.energy,
            ..Self::new(card, turn)
        }
    }

    /// Current hit points, falling back to the card's maximum.
    #[must_use]
    pub fn hit_points(&self) -> i64 {
        self.current_hit_points
            .unwrap_or_else(|| self.card.max_hit_points())
    }

    /// Subtract damage and return the remaining hit points.
    ///
    /// Negative damage is ignored; hit points never rise.
    pub fn take_damage(&mut self, damage: i64) -> i64 {
        let remaining = self.hit_points().saturating_sub(damage.max(0));
        self.current_hit_points = Some(remaining);
        remaining
    }

    /// Turns elapsed since placement, as seen on `turn`.
    #[must_use]
    pub fn turns_in_play(&self, turn: u32) -> i64 {
        i64::from(turn) - i64::from(self.placed_turn)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::CardDefinition;

    #[test]
    fn test_new_unit_is_undamaged() {
        let unit = Unit::new(Arc::new(CardDefinition::new("a", "A").with_hit_points(60)), 3);

        assert_eq!(unit.placed_turn, 3);
        assert_eq!(unit.energy, 0);
        assert_eq!(unit.hit_points(), 60);
    }

    #[test]
    fn test_hit_points_fall_back_to_card() {
        let mut unit = Unit::new(Arc::new(CardDefinition::new("a", "A").with_hit_points(60)), 1);
        unit.current_hit_points = None;

        assert_eq!(unit.hit_points(), 60);
        assert_eq!(unit.take_damage(20), 40);
        assert_eq!(unit.current_hit_points, Some(40));
    }

    #[test]
    fn test_take_damage_never_heals() {
        let mut unit = Unit::new(Arc::new(CardDefinition::new("a", "A").with_hit_points(50)), 1);

        assert_eq!(unit.take_damage(-40), 50);
        assert_eq!(unit.current_hit_points, Some(50));
    }

    #[test]
    fn test_take_damage_saturates() {
        let mut unit = Unit::new(Arc::new(CardDefinition::new("a", "A").with_hit_points(-5)), 1);

        assert_eq!(unit.take_damage(i64::MAX), i64::MIN);
        assert!(unit.hit_points() <= 0);
    }

    #[test]
    fn test_evolve_keeps_energy_and_heals() {
        let basic = Arc::new(CardDefinition::new("b", "Bulbasaur").with_hit_points(70));
        let stage1 = Arc::new(
            CardDefinition::new("i", "Ivysaur")
                .with_stage("Stage 1")
                .evolves_from("Bulbasaur")
                .with_hit_points(90),
        );

        let mut unit = Unit::new(basic, 1);
        unit.energy = 2;
        unit.take_damage(50);

        let evolved = unit.evolve(stage1, 2);
        assert_eq!(evolved.card.name, "Ivysaur");
        assert_eq!(evolved.energy, 2);
        assert_eq!(evolved.placed_turn, 2);
        assert_eq!(evolved.hit_points(), 90);
    }
}

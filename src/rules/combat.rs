//! Attack resolution between the two front lanes.
//!
//! Only front units fight. The attacker needs at least as much attached
//! energy as the attack's cost; energy is not spent. Damage is subtracted
//! from the defender's current hit points and the defender is removed at 0
//! or below. There is no counter-attack, weakness or retreat.

use crate::board::{Board, LaneId, Unit};
use crate::cards::AttackDefinition;
use crate::error::{BattleError, Result, TargetKind};

/// Energy an attack needs.
#[must_use]
pub fn attack_requirement(attack: &AttackDefinition) -> u32 {
    attack.energy_cost()
}

/// Attacks `unit` can currently pay for, with their indices.
pub fn affordable_attacks(unit: &Unit) -> impl Iterator<Item = (usize, &AttackDefinition)> {
    unit.card
        .attacks
        .iter()
        .enumerate()
        .filter(move |(_, attack)| unit.energy >= attack_requirement(attack))
}

/// Result of a successful attack.
#[derive(Clone, Debug, PartialEq)]
pub enum AttackOutcome {
    /// The defender survived with `remaining` hit points.
    Damaged { damage: i64, remaining: i64 },
    /// The defender reached 0 or below and left the board.
    Defeated { damage: i64, remaining: i64, defeated: Unit },
}

impl AttackOutcome {
    #[must_use]
    pub fn damage(&self) -> i64 {
        match self {
            AttackOutcome::Damaged { damage, .. } | AttackOutcome::Defeated { damage, .. } => *damage,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> i64 {
        match self {
            AttackOutcome::Damaged { remaining, .. } | AttackOutcome::Defeated { remaining, .. } => {
                *remaining
            }
        }
    }
}

/// Resolve `attacker`'s front unit using attack `attack_index` against
/// `defender`'s front unit.
///
/// Checks, in order: attacker present, attack exists, defender present,
/// enough energy. Any failure leaves both boards untouched.
pub fn resolve_attack(attacker: &Board, defender: &mut Board, attack_index: usize) -> Result<AttackOutcome> {
    let unit = attacker
        .front()
        .ok_or(BattleError::NoTarget(TargetKind::Attacker))?;
    let attack = unit
        .card
        .attack(attack_index)
        .ok_or(BattleError::NoTarget(TargetKind::Attack(attack_index)))?;
    if defender.front().is_none() {
        return Err(BattleError::NoTarget(TargetKind::Defender));
    }

    let required = attack_requirement(attack);
    if unit.energy < required {
        return Err(BattleError::InsufficientEnergy {
            required,
            available: unit.energy,
        });
    }

    let damage = attack.damage();
    let Some(target) = defender.get_mut(LaneId::FRONT) else {
        return Err(BattleError::NoTarget(TargetKind::Defender));
    };
    let remaining = target.take_damage(damage);

    if remaining <= 0 {
        let defeated = defender
            .clear(LaneId::FRONT)
            .ok_or(BattleError::NoTarget(TargetKind::Defender))?;
        Ok(AttackOutcome::Defeated {
            damage,
            remaining,
            defeated,
        })
    } else {
        Ok(AttackOutcome::Damaged { damage, remaining })
    }
}

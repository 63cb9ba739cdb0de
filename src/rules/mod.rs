//! Battle rules.
//!
//! The pure rule checks (`can_place`, `attach_energy`, `resolve_attack`)
//! live in their own modules; `RulesEngine` combines them into intent
//! validation and application over a `MatchState`.

pub mod combat;
pub mod energy;
pub mod engine;
pub mod placement;

pub use combat::{affordable_attacks, attack_requirement, resolve_attack, AttackOutcome};
pub use energy::{attach_energy, reset_energy_flag};
pub use engine::{BattleRules, GameResult, RulesEngine};
pub use placement::{can_place, place_unit, Placement};

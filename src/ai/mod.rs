//! Opponent automation.
//!
//! The opponent plays through the same `RulesEngine` intents as the
//! player; a policy only decides which intents to issue.

pub mod policy;

pub use policy::{OpponentPolicy, PassiveOpponent, ScriptedOpponent};

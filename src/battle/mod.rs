//! Turn sequencing: match setup, the player-facing controller, deferred
//! opponent turns and replay.

pub mod builder;
pub mod controller;
pub mod replay;
pub mod scheduler;

pub use builder::BattleBuilder;
pub use controller::{IntentOutcome, SessionId, TurnController, TurnStep};
pub use replay::Replay;
pub use scheduler::{ScheduledStep, TurnScheduler};

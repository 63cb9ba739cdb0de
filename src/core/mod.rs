//! Core battle types: sides, state, intents, RNG, configuration.
//!
//! Everything here is plain data. Rules live in `rules`, turn sequencing in
//! `battle`.

pub mod side;
pub mod rng;
pub mod config;
pub mod intent;
pub mod state;

pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{BattleConfig, Pacing, VictoryCondition};
pub use intent::{BattleEvent, Events, Intent, IntentRecord};
pub use state::{MatchSnapshot, MatchState, Phase, SideState, SideView};

//! # pocket-battle
//!
//! Turn-based battle rules for a pocket collectible card game: two sides,
//! four lanes each, Basic units evolving along name links, once-per-turn
//! energy and front-lane attacks, against a scripted opponent.
//!
//! ## Design Principles
//!
//! 1. **One mutation path**: the UI and the opponent both issue `Intent`s
//!    through `RulesEngine::apply_intent`. Rejections leave the state
//!    untouched and carry the message to show the player.
//!
//! 2. **Deterministic**: every shuffle and draw comes from a seeded
//!    `GameRng` stream, so a seed plus the player's intents reproduce a
//!    match (`battle::Replay`).
//!
//! 3. **Cheap snapshots**: hands, decks and history are `im` persistent
//!    vectors and card definitions are shared `Arc`s.
//!
//! ## Modules
//!
//! - `core`: Sides, match state, intents and events, RNG, configuration
//! - `cards`: Card definitions, attacks, the catalog and decks
//! - `board`: Lanes and placed units
//! - `rules`: Placement, energy and attack rules; the `RulesEngine`
//! - `ai`: Opponent policies
//! - `battle`: Match setup, the turn controller and deferred turns
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pocket_battle::{BattleBuilder, CardDefinition, DeckList, Phase};
//!
//! let card = Arc::new(
//!     CardDefinition::new("A1-001", "Bulbasaur")
//!         .with_hit_points(70)
//!         .with_attack("{GC} Vine Whip 40", None),
//! );
//! let mut battle = BattleBuilder::new(DeckList::new("Grass", vec![card; 20]))
//!     .build(7)
//!     .unwrap();
//!
//! battle.place_card(0, 0).unwrap();
//! battle.attach_energy(0).unwrap();
//!
//! // Vine Whip needs two energy.
//! let err = battle.attack(0).unwrap_err();
//! assert_eq!(err.to_string(), "Not enough energy: 2 required, 1 attached.");
//!
//! let outcome = battle.end_turn().unwrap();
//! assert_eq!(outcome.snapshot.phase, Phase::PlayerTurn);
//! assert_eq!(outcome.snapshot.turn_number, 2);
//! ```

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod ai;
pub mod battle;
pub mod error;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleEvent, Events, GameRng, Intent, IntentRecord, MatchSnapshot, MatchState,
    Pacing, Phase, Side, SideMap, SideState, SideView, VictoryCondition,
};

pub use crate::cards::{
    AttackDefinition, CardCatalog, CardDefinition, CardId, CardRef, DeckList, DeckRepository,
    DeckRules, EnergyType, InMemoryDeckRepository,
};

pub use crate::board::{Board, LaneId, Unit, LANE_COUNT};

pub use crate::rules::{can_place, BattleRules, GameResult, RulesEngine};

pub use crate::ai::{OpponentPolicy, PassiveOpponent, ScriptedOpponent};

pub use crate::battle::{
    BattleBuilder, IntentOutcome, Replay, SessionId, TurnController, TurnScheduler, TurnStep,
};

pub use crate::error::{BattleError, Result};

//! Card system: definitions, attacks, catalog and decks.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data as supplied by the catalog
//! - `AttackDefinition`: Energy cost and damage of one attack
//! - `CardCatalog`: Card definition lookup
//! - `DeckList` / `DeckRepository`: Saved decks read at match start

pub mod attack;
pub mod catalog;
pub mod deck;
pub mod definition;

pub use attack::AttackDefinition;
pub use catalog::{CardCatalog, CardRef};
pub use deck::{DeckList, DeckRepository, DeckRules, EnergyType, InMemoryDeckRepository};
pub use definition::{normalize_stage, CardDefinition, CardId, Stage};

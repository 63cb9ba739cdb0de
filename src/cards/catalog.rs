//! Card catalog for definition lookup.
//!
//! The `CardCatalog` holds every card definition available in a session.
//! It is loaded once (from the `cards.json` object keyed by card id) and
//! shared read-only afterwards; definitions are handed out as
//! `Arc<CardDefinition>` so hands, decks and units can refer to them
//! without copying.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{CardDefinition, CardId};
use crate::error::{BattleError, Result};

/// Shared, immutable card definition.
pub type CardRef = Arc<CardDefinition>;

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use pocket_battle::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new("A1-001", "Bulbasaur").with_hit_points(70));
///
/// let found = catalog.get(&CardId::new("A1-001")).unwrap();
/// assert_eq!(found.name, "Bulbasaur");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardRef>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON object keyed by card id.
    ///
    /// Entries whose `id` field is missing take the key as their id.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: FxHashMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for (key, mut value) in raw {
            if let Some(obj) = value.as_object_mut() {
                obj.entry("id").or_insert_with(|| serde_json::Value::String(key.clone()));
            }
            let card: CardDefinition = serde_json::from_value(value)?;
            catalog.register(card);
        }

        debug!(cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Register a card definition, replacing any previous one with the same id.
    ///
    /// Returns the shared handle.
    pub fn register(&mut self, card: CardDefinition) -> CardRef {
        let card = Arc::new(card);
        self.cards.insert(card.id.clone(), Arc::clone(&card));
        card
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardRef> {
        self.cards.get(id)
    }

    /// Resolve a list of ids (duplicates allowed) to shared definitions.
    pub fn resolve<'a, I>(&self, ids: I) -> Result<Vec<CardRef>>
    where
        I: IntoIterator<Item = &'a CardId>,
    {
        ids.into_iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| BattleError::UnknownCard(id.to_string()))
            })
            .collect()
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardRef> {
        self.cards.values()
    }

    /// Cards whose name matches exactly.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CardRef> + 'a {
        self.cards.values().filter(move |c| c.name == name)
    }
}

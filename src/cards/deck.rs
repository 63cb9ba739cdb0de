//! Deck lists, energy labels and the saved-deck repository.
//!
//! Decks are built and stored outside the engine. The engine only reads
//! them, once, when a match starts: through a `DeckRepository`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::catalog::CardRef;
use super::definition::CardId;
use crate::core::GameRng;
use crate::error::{BattleError, Result};

/// Energy type a deck declares. Cosmetic: the energy rule counts energy
/// without types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Darkness,
    Fire,
    Water,
    Grass,
    Lightning,
    Psychic,
    Fighting,
    Metal,
    Dragon,
    Fairy,
    Colorless,
}

impl EnergyType {
    const BY_KEYWORD: [(&'static str, EnergyType); 13] = [
        ("darkness", EnergyType::Darkness),
        ("fire", EnergyType::Fire),
        ("water", EnergyType::Water),
        ("grass", EnergyType::Grass),
        ("lightning", EnergyType::Lightning),
        ("electric", EnergyType::Lightning),
        ("psychic", EnergyType::Psychic),
        ("fighting", EnergyType::Fighting),
        ("metal", EnergyType::Metal),
        ("steel", EnergyType::Metal),
        ("dragon", EnergyType::Dragon),
        ("fairy", EnergyType::Fairy),
        ("colorless", EnergyType::Colorless),
    ];

    /// Map a deck-builder label to an energy type by substring match.
    /// Unrecognized labels are colorless.
    ///
    /// ```
    /// use pocket_battle::cards::EnergyType;
    ///
    /// assert_eq!(EnergyType::from_label("Fire"), EnergyType::Fire);
    /// assert_eq!(EnergyType::from_label("electric"), EnergyType::Lightning);
    /// assert_eq!(EnergyType::from_label("???"), EnergyType::Colorless);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        Self::BY_KEYWORD
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map_or(EnergyType::Colorless, |(_, ty)| *ty)
    }
}

/// Deck construction limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRules {
    /// Exact size of a saved deck.
    pub size: usize,
    /// Maximum copies of one card id.
    pub max_copies: usize,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            size: 20,
            max_copies: 2,
        }
    }
}

impl DeckRules {
    /// Whether one more copy of `card` may be added to `cards`.
    #[must_use]
    pub fn can_add(&self, cards: &[CardRef], card: &CardId) -> bool {
        let copies = cards.iter().filter(|c| &c.id == card).count();
        copies < self.max_copies && cards.len() < self.size
    }

    /// Check a complete deck.
    pub fn validate(&self, deck: &DeckList) -> Result<()> {
        if deck.cards.len() != self.size {
            return Err(BattleError::InvalidDeck(format!(
                "{:?} has {} cards, expected {}",
                deck.name,
                deck.cards.len(),
                self.size
            )));
        }

        let mut copies: FxHashMap<&CardId, usize> = FxHashMap::default();
        for card in &deck.cards {
            let count = copies.entry(&card.id).or_insert(0);
            *count += 1;
            if *count > self.max_copies {
                return Err(BattleError::InvalidDeck(format!(
                    "{:?} holds more than {} copies of {}",
                    deck.name, self.max_copies, card.id
                )));
            }
        }

        Ok(())
    }
}

/// A saved deck: an ordered card list (duplicates allowed) plus the energy
/// labels the player picked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckList {
    pub name: String,
    pub cards: Vec<CardRef>,
    #[serde(default, rename = "energyTypes")]
    pub energy_types: Vec<String>,
}

impl DeckList {
    #[must_use]
    pub fn new(name: impl Into<String>, cards: Vec<CardRef>) -> Self {
        Self {
            name: name.into(),
            cards,
            energy_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_energy_types<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.energy_types = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Pick one of the deck's energy types uniformly. `None` when the deck
    /// declares none.
    pub fn pick_energy_type(&self, rng: &mut GameRng) -> Option<EnergyType> {
        rng.choose(&self.energy_types)
            .map(|label| EnergyType::from_label(label))
    }
}

/// Read-only source of saved decks, queried when a match starts.
pub trait DeckRepository {
    /// All saved decks, in the order the player saved them.
    fn list_saved_decks(&self) -> Result<Vec<DeckList>>;

    /// Look a deck up by name.
    fn find_deck(&self, name: &str) -> Result<DeckList> {
        self.list_saved_decks()?
            .into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| BattleError::DeckNotFound(name.to_string()))
    }
}

/// Repository backed by an in-memory list, e.g. parsed from the browser's
/// `savedDecks` JSON.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDeckRepository {
    decks: Vec<DeckList>,
}

impl InMemoryDeckRepository {
    #[must_use]
    pub fn new(decks: Vec<DeckList>) -> Self {
        Self { decks }
    }

    /// Parse a JSON array of saved decks.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl DeckRepository for InMemoryDeckRepository {
    fn list_saved_decks(&self) -> Result<Vec<DeckList>> {
        Ok(self.decks.clone())
    }
}

//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card as supplied by
//! the catalog. Per-battle state (placed turn, attached energy, damage) lives
//! on `board::Unit` instead.
//!
//! The serde layout matches the catalog JSON: `hp` arrives as a numeric
//! string, the evolution link as `prew_stage_name`, attacks under `attack`.

use serde::{Deserialize, Deserializer, Serialize};

use super::attack::AttackDefinition;

/// Unique identifier for a card definition (e.g. `"A1-001"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Evolution tier of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// May be placed on an empty lane.
    Basic,
    /// `Stage 1`, `Stage 2`, ...
    Evolved(u8),
    /// Any label the catalog uses that is neither of the above.
    Other(String),
}

impl Stage {
    /// Parse a catalog stage label. A missing label is `Basic`.
    ///
    /// ```
    /// use pocket_battle::cards::Stage;
    ///
    /// assert_eq!(Stage::parse(None), Stage::Basic);
    /// assert_eq!(Stage::parse(Some(" basic ")), Stage::Basic);
    /// assert_eq!(Stage::parse(Some("Stage 2")), Stage::Evolved(2));
    /// ```
    #[must_use]
    pub fn parse(label: Option<&str>) -> Self {
        let normalized = normalize_stage(label);
        if normalized == "basic" {
            return Stage::Basic;
        }
        normalized
            .strip_prefix("stage")
            .and_then(|n| n.parse().ok())
            .map_or_else(|| Stage::Other(normalized.clone()), Stage::Evolved)
    }
}

/// Lower-case a stage label and strip all whitespace. `None` is `"basic"`.
#[must_use]
pub fn normalize_stage(label: Option<&str>) -> String {
    label
        .unwrap_or("Basic")
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use pocket_battle::cards::CardDefinition;
///
/// let ivysaur = CardDefinition::new("A1-002", "Ivysaur")
///     .with_stage("Stage 1")
///     .evolves_from("Bulbasaur")
///     .with_hit_points(90)
///     .with_attack("{GC} Razor Leaf 60", None);
///
/// assert!(!ivysaur.is_basic());
/// assert_eq!(ivysaur.max_hit_points(), 90);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Display name; also the key evolution links refer to.
    pub name: String,

    /// Raw stage label. Absent means Basic.
    #[serde(default)]
    pub stage: Option<String>,

    /// Name of the card this one evolves from.
    #[serde(default, rename = "prew_stage_name", alias = "previousStageName")]
    pub previous_stage_name: Option<String>,

    /// Base maximum hit points, parsed from the catalog's numeric string.
    #[serde(
        default,
        rename = "hp",
        alias = "hitPoints",
        deserialize_with = "de_hit_points"
    )]
    pub hit_points: Option<i64>,

    #[serde(default, rename = "attack", alias = "attacks")]
    pub attacks: Vec<AttackDefinition>,

    /// Carried for future rules; unused by the battle engine.
    #[serde(default, deserialize_with = "de_text")]
    pub weakness: Option<String>,

    /// Carried for future rules; unused by the battle engine.
    #[serde(default, rename = "retreat", alias = "retreatCost", deserialize_with = "de_text")]
    pub retreat_cost: Option<String>,

    #[serde(default)]
    pub rarity: Option<String>,

    #[serde(default, rename = "setId")]
    pub set_id: Option<String>,
}

impl CardDefinition {
    /// Create a Basic card with no hit points and no attacks.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            stage: None,
            previous_stage_name: None,
            hit_points: None,
            attacks: Vec::new(),
            weakness: None,
            retreat_cost: None,
            rarity: None,
            set_id: None,
        }
    }

    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    #[must_use]
    pub fn evolves_from(mut self, name: impl Into<String>) -> Self {
        self.previous_stage_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, hp: i64) -> Self {
        self.hit_points = Some(hp);
        self
    }

    /// Add an attack from its cost/description text and optional damage.
    #[must_use]
    pub fn with_attack(mut self, info: impl Into<String>, damage: Option<i64>) -> Self {
        self.attacks.push(AttackDefinition::new(info, damage));
        self
    }

    /// Parsed evolution tier.
    #[must_use]
    pub fn stage(&self) -> Stage {
        Stage::parse(self.stage.as_deref())
    }

    /// Stage label for messages (`"Basic"` when absent).
    #[must_use]
    pub fn stage_label(&self) -> &str {
        self.stage.as_deref().unwrap_or("Basic")
    }

    /// Whether the stage normalizes to `basic`.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        normalize_stage(self.stage.as_deref()) == "basic"
    }

    /// Hit points a freshly placed unit starts with. Missing or
    /// non-numeric catalog values count as 0.
    #[must_use]
    pub fn max_hit_points(&self) -> i64 {
        self.hit_points.unwrap_or(0)
    }

    /// Attack at `index`, if any.
    #[must_use]
    pub fn attack(&self, index: usize) -> Option<&AttackDefinition> {
        self.attacks.get(index)
    }
}

/// Integer-prefix parse: `"60"` → 60, `"60 HP"` → 60, `"-"` → None.
pub(crate) fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_hit_points<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Int(n)) => Some(n),
        Some(TextOrNumber::Float(f)) => Some(f.trunc() as i64),
        Some(TextOrNumber::Text(s)) => parse_leading_int(&s),
        None => None,
    })
}

fn de_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Int(n)) => Some(n.to_string()),
        Some(TextOrNumber::Float(f)) => Some(f.to_string()),
        Some(TextOrNumber::Text(s)) => Some(s),
        None => None,
    })
}

//! Attack definitions and cost/damage extraction.
//!
//! The catalog describes an attack as a single text such as
//! `"{GC} Razor Leaf 60"`: energy symbols in braces, then the name, then the
//! damage. A structured `damage` field, when present, overrides the text.

use serde::{Deserialize, Deserializer, Serialize};

/// One attack on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDefinition {
    /// Cost descriptor and description, e.g. `"{GG} Vine Whip 40"`.
    #[serde(default, alias = "cost")]
    pub info: String,

    /// Structured damage, authoritative over the text suffix.
    #[serde(default, deserialize_with = "de_damage", skip_serializing_if = "Option::is_none")]
    pub damage: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl AttackDefinition {
    #[must_use]
    pub fn new(info: impl Into<String>, damage: Option<i64>) -> Self {
        Self {
            info: info.into(),
            damage,
            effect: None,
        }
    }

    /// Energy this attack requires.
    ///
    /// Counts the symbol characters of every `{...}` token made of upper-case
    /// letters only.
    ///
    /// ```
    /// use pocket_battle::cards::AttackDefinition;
    ///
    /// assert_eq!(AttackDefinition::new("{G} Tackle 10", None).energy_cost(), 1);
    /// assert_eq!(AttackDefinition::new("{GG}{C} Solar Beam 90", None).energy_cost(), 3);
    /// assert_eq!(AttackDefinition::new("Splash", None).energy_cost(), 0);
    /// ```
    #[must_use]
    pub fn energy_cost(&self) -> u32 {
        energy_symbols(&self.info)
            .iter()
            .map(|token| token.len() as u32)
            .sum()
    }

    /// Damage dealt: the structured field if present, otherwise the trailing
    /// integer of the text, otherwise 0. Never negative.
    ///
    /// ```
    /// use pocket_battle::cards::AttackDefinition;
    ///
    /// assert_eq!(AttackDefinition::new("{G} Vine Whip 40", None).damage(), 40);
    /// assert_eq!(AttackDefinition::new("{G} Vine Whip 40", Some(50)).damage(), 50);
    /// assert_eq!(AttackDefinition::new("{C} Growl", None).damage(), 0);
    /// ```
    #[must_use]
    pub fn damage(&self) -> i64 {
        self.damage
            .or_else(|| trailing_int(&self.info))
            .unwrap_or(0)
            .max(0)
    }
}

/// Contents of each `{...}` token whose body is one or more `A-Z`.
fn energy_symbols(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let body = &after[..close];
        if !body.is_empty() && body.bytes().all(|b| b.is_ascii_uppercase()) {
            tokens.push(body);
            rest = &after[close + 1..];
        } else {
            rest = after;
        }
    }

    tokens
}

/// Integer made of the digits at the very end of `text` (trailing
/// whitespace ignored).
fn trailing_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    trimmed[start..].parse().ok()
}

/// Integer made of the digits at the start of `text` (leading whitespace
/// ignored). Signs are not digits, so `"-40"` has none.
fn leading_digits(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DamageValue {
    Int(i64),
    Text(String),
}

fn de_damage<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<DamageValue>::deserialize(deserializer)? {
        Some(DamageValue::Int(n)) => Some(n.max(0)),
        Some(DamageValue::Text(s)) => leading_digits(&s),
        None => None,
    })
}

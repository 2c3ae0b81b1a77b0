//! Card records consumed by the engine

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Card name → copy count. Missing entries mean one copy.
pub type QuantityMap = BTreeMap<String, u32>;

/// Quantity of a card, defaulting to 1 when absent
pub fn quantity_of(quantities: &QuantityMap, name: &str) -> u32 {
    quantities.get(name).copied().unwrap_or(1)
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFace {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_line: String,
    #[serde(deserialize_with = "null_as_default")]
    pub oracle_text: String,
}

/// A card as supplied by the upstream card database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    /// Unique within a deck, case-sensitive
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_line: String,
    #[serde(deserialize_with = "null_as_default")]
    pub oracle_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: BTreeSet<String>,
    /// Null reads as 0; a non-numeric value reads as NaN and marks the
    /// card defective
    #[serde(deserialize_with = "lenient_cmc")]
    pub cmc: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub colors: BTreeSet<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub card_faces: Vec<CardFace>,
}

/// JSON `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManaValue {
    Number(f64),
    Other(IgnoredAny),
}

fn lenient_cmc<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ManaValue>::deserialize(deserializer)? {
        None => 0.0,
        Some(ManaValue::Number(cmc)) => cmc,
        Some(ManaValue::Other(_)) => f64::NAN,
    })
}

impl Card {
    pub fn new(name: impl Into<String>, type_line: impl Into<String>, cmc: f64) -> Self {
        Self {
            name: name.into(),
            type_line: type_line.into(),
            cmc,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, oracle_text: impl Into<String>) -> Self {
        self.oracle_text = oracle_text.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Oracle text, falling back to the joined face texts for
    /// double-faced cards
    pub fn full_oracle_text(&self) -> String {
        if !self.oracle_text.is_empty() || self.card_faces.is_empty() {
            return self.oracle_text.clone();
        }

        self.card_faces
            .iter()
            .map(|face| face.oracle_text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Type line, falling back to the joined face type lines
    pub fn full_type_line(&self) -> String {
        if !self.type_line.is_empty() || self.card_faces.is_empty() {
            return self.type_line.clone();
        }

        self.card_faces
            .iter()
            .map(|face| face.type_line.as_str())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" // ")
    }

    /// Reason this card cannot be analysed, if any
    pub fn defect(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("card has no name".to_string());
        }
        if !self.cmc.is_finite() {
            return Some(format!("mana value {} is not a number", self.cmc));
        }
        if self.cmc < 0.0 {
            return Some(format!("mana value {} is negative", self.cmc));
        }
        None
    }
}

/// A deck as accepted by the CLI and HTTP API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckInput {
    pub cards: Vec<Card>,
    pub quantities: QuantityMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let mut q = QuantityMap::new();
        q.insert("Viscera Seer".to_string(), 4);
        assert_eq!(quantity_of(&q, "Viscera Seer"), 4);
        assert_eq!(quantity_of(&q, "Blood Artist"), 1);
    }

    #[test]
    fn test_faces_joined_when_top_level_empty() {
        let mut card = Card::new("Delver of Secrets // Insectile Aberration", "", 1.0);
        card.card_faces = vec![
            CardFace {
                name: "Delver of Secrets".into(),
                type_line: "Creature — Human Wizard".into(),
                oracle_text: "At the beginning of your upkeep, look at the top card of your library.".into(),
            },
            CardFace {
                name: "Insectile Aberration".into(),
                type_line: "Creature — Human Insect".into(),
                oracle_text: "Flying".into(),
            },
        ];

        let text = card.full_oracle_text();
        assert!(text.contains("upkeep"));
        assert!(text.ends_with("\nFlying"));
        assert_eq!(
            card.full_type_line(),
            "Creature — Human Wizard // Creature — Human Insect"
        );
    }

    #[test]
    fn test_defects() {
        assert!(Card::new("Ok", "Instant", 1.0).defect().is_none());
        assert!(Card::new("  ", "Instant", 1.0).defect().is_some());
        assert!(Card::new("Bad", "Instant", f64::NAN).defect().is_some());
        assert!(Card::new("Bad", "Instant", -1.0).defect().is_some());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let deck: DeckInput = serde_json::from_str(
            r#"{"cards": [
                {"name": "Blank", "type_line": null, "oracle_text": null, "keywords": null, "cmc": null, "colors": null, "card_faces": null},
                {"name": "Opt", "type_line": "Instant", "oracle_text": "Draw a card.", "cmc": 1}
            ]}"#,
        )
        .unwrap();

        assert_eq!(deck.cards.len(), 2);
        let blank = &deck.cards[0];
        assert!(blank.oracle_text.is_empty());
        assert!(blank.type_line.is_empty());
        assert!(blank.keywords.is_empty());
        assert_eq!(blank.cmc, 0.0);
        assert!(blank.defect().is_none());
        assert_eq!(deck.cards[1].oracle_text, "Draw a card.");
    }

    #[test]
    fn test_non_numeric_cmc_is_a_defect() {
        let card: Card = serde_json::from_str(r#"{"name": "Odd", "cmc": "three"}"#).unwrap();
        assert!(card.cmc.is_nan());
        assert!(card.defect().unwrap().contains("not a number"));
    }

    #[test]
    fn test_sparse_json() {
        let card: Card = serde_json::from_str(r#"{"name": "Sol Ring", "cmc": 1}"#).unwrap();
        assert_eq!(card.name, "Sol Ring");
        assert!(card.oracle_text.is_empty());
        assert!(card.keywords.is_empty());
    }
}

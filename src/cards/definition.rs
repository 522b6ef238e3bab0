//! Card definitions - static card data.
//!
//! `CardDefinition` holds the printed properties of a card: name, type
//! line and attributes. Instance-specific data (zone, controller, power
//! modifiers, choice memory) lives in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{AttributeKey, AttributeValue, Attributes};

/// The five basic land subtypes, in the order they are offered.
pub const BASIC_LAND_TYPES: [&str; 5] = ["Plains", "Island", "Swamp", "Mountain", "Forest"];

/// Creature subtypes that make up a full party.
pub const PARTY_TYPES: [&str; 4] = ["Cleric", "Rogue", "Warrior", "Wizard"];

/// Attribute key holding printed power.
pub const POWER: &str = "power";

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card types on the type line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Instant,
    Sorcery,
    Planeswalker,
}

/// Static card definition.
///
/// ```
/// use ccg_choice::cards::{CardDefinition, CardId, CardType};
///
/// let bear = CardDefinition::new(CardId::new(1), "Grizzly Bears")
///     .with_type(CardType::Creature)
///     .with_subtype("Bear")
///     .with_power(2);
///
/// assert!(bear.is_type(CardType::Creature));
/// assert_eq!(bear.power(), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Card name; also the catalog key.
    pub name: String,

    #[serde(default)]
    pub types: SmallVec<[CardType; 2]>,

    #[serde(default)]
    pub subtypes: SmallVec<[String; 2]>,

    /// Game-specific attributes.
    #[serde(default)]
    pub attributes: Attributes,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: SmallVec::new(),
            subtypes: SmallVec::new(),
            attributes: Attributes::default(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        if !self.types.contains(&card_type) {
            self.types.push(card_type);
        }
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtypes.push(subtype.into());
        self
    }

    #[must_use]
    pub fn with_power(self, power: i64) -> Self {
        self.with_attr(POWER, power)
    }

    #[must_use]
    pub fn with_attr(
        mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(&AttributeKey::new(key))
    }

    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get_attr(key)
            .and_then(|v| v.as_int())
            .unwrap_or(default)
    }

    /// Printed power, if the card has one.
    #[must_use]
    pub fn power(&self) -> Option<i64> {
        self.get_attr(POWER).and_then(|v| v.as_int())
    }

    #[must_use]
    pub fn is_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_type_line() {
        let card = CardDefinition::new(CardId::new(1), "Breeding Pool")
            .with_type(CardType::Land)
            .with_type(CardType::Land)
            .with_subtype("Forest")
            .with_subtype("Island");

        assert_eq!(card.types.len(), 1);
        assert!(card.has_subtype("Island"));
        assert!(!card.has_subtype("Swamp"));
        assert_eq!(card.power(), None);
    }

    #[test]
    fn test_attributes() {
        let card = CardDefinition::new(CardId::new(1), "Test")
            .with_power(-1)
            .with_attr("cmc", 3i32);

        assert_eq!(card.power(), Some(-1));
        assert_eq!(card.get_int("cmc", 0), 3);
        assert_eq!(card.get_int("toughness", 7), 7);
    }

    #[test]
    fn test_json_defaults() {
        let card: CardDefinition =
            serde_json::from_str(r#"{"id": 4, "name": "Wastes"}"#).unwrap();

        assert_eq!(card.name, "Wastes");
        assert!(card.types.is_empty());
        assert!(card.attributes.is_empty());
    }
}

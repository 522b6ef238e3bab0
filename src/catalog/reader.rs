//! The `ItemReader` contract and the card catalog readers.

use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::cards::{CardDefinition, CardId};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid binary catalog: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("duplicate catalog key '{0}'")]
    DuplicateKey(String),
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
    #[error("item stored under '{stored}' reports key '{actual}'")]
    KeyMismatch { stored: String, actual: String },
}

/// Loads a catalog of items keyed by string.
pub trait ItemReader<T> {
    /// Read every item, keyed by `item_key`.
    fn read_all(&self) -> Result<FxHashMap<String, T>, CatalogError>;

    /// The key an item is stored under.
    fn item_key(&self, item: &T) -> String;
}

/// Verify the round-trip contract on a map a reader produced.
pub fn check_round_trip<T, R>(reader: &R, items: &FxHashMap<String, T>) -> Result<(), CatalogError>
where
    R: ItemReader<T> + ?Sized,
{
    for (stored, item) in items {
        let actual = reader.item_key(item);
        if &actual != stored {
            return Err(CatalogError::KeyMismatch {
                stored: stored.clone(),
                actual,
            });
        }
    }
    Ok(())
}

fn key_cards(cards: Vec<CardDefinition>) -> Result<FxHashMap<String, CardDefinition>, CatalogError> {
    let mut keyed = FxHashMap::default();
    for card in cards {
        if keyed.contains_key(&card.name) {
            return Err(CatalogError::DuplicateKey(card.name));
        }
        keyed.insert(card.name.clone(), card);
    }
    Ok(keyed)
}

/// Reads card definitions from a JSON array.
///
/// ```
/// use ccg_choice::catalog::{ItemReader, JsonCardReader};
///
/// let reader = JsonCardReader::new(r#"[{"id": 1, "name": "Island", "types": ["Land"]}]"#);
/// let cards = reader.read_all().unwrap();
/// assert_eq!(reader.item_key(&cards["Island"]), "Island");
/// ```
#[derive(Clone, Debug)]
pub struct JsonCardReader {
    source: String,
}

impl JsonCardReader {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

impl ItemReader<CardDefinition> for JsonCardReader {
    fn read_all(&self) -> Result<FxHashMap<String, CardDefinition>, CatalogError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(&self.source)?;
        key_cards(cards)
    }

    fn item_key(&self, item: &CardDefinition) -> String {
        item.name.clone()
    }
}

/// Reads card definitions from a bincode-encoded list.
#[derive(Clone, Debug)]
pub struct BincodeCardReader {
    bytes: Vec<u8>,
}

impl BincodeCardReader {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Encode definitions into the format this reader accepts.
    pub fn encode(cards: &[CardDefinition]) -> Result<Vec<u8>, CatalogError> {
        Ok(bincode::serialize(cards)?)
    }
}

impl ItemReader<CardDefinition> for BincodeCardReader {
    fn read_all(&self) -> Result<FxHashMap<String, CardDefinition>, CatalogError> {
        let cards: Vec<CardDefinition> = bincode::deserialize(&self.bytes)?;
        key_cards(cards)
    }

    fn item_key(&self, item: &CardDefinition) -> String {
        item.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    const CARDS: &str = r#"[
        {"id": 1, "name": "Plains", "types": ["Land"], "subtypes": ["Plains"]},
        {"id": 2, "name": "Savannah Lions", "types": ["Creature"], "subtypes": ["Cat"],
         "attributes": {"power": {"Int": 2}}}
    ]"#;

    #[test]
    fn test_json_read_all() {
        let reader = JsonCardReader::new(CARDS);
        let cards = reader.read_all().unwrap();

        assert_eq!(cards.len(), 2);
        assert!(cards["Plains"].is_type(CardType::Land));
        assert_eq!(cards["Savannah Lions"].power(), Some(2));
        check_round_trip(&reader, &cards).unwrap();
    }

    #[test]
    fn test_json_duplicate_key() {
        let reader = JsonCardReader::new(r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "A"}]"#);
        assert!(matches!(reader.read_all(), Err(CatalogError::DuplicateKey(k)) if k == "A"));
    }

    #[test]
    fn test_json_malformed() {
        let reader = JsonCardReader::new("[{\"id\": \"one\"}]");
        assert!(matches!(reader.read_all(), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = JsonCardReader::from_file("/nonexistent/cards.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_bincode_matches_json() {
        let json = JsonCardReader::new(CARDS).read_all().unwrap();
        let mut cards: Vec<_> = json.values().cloned().collect();
        cards.sort_by_key(|c| c.id.raw());

        let reader = BincodeCardReader::new(BincodeCardReader::encode(&cards).unwrap());
        let decoded = reader.read_all().unwrap();

        assert_eq!(decoded, json);
    }

    #[test]
    fn test_round_trip_detects_mismatch() {
        let reader = JsonCardReader::new(CARDS);
        let mut cards = reader.read_all().unwrap();
        let lions = cards.remove("Savannah Lions").unwrap();
        cards.insert("Lions".to_string(), lions);

        let err = check_round_trip(&reader, &cards).unwrap_err();
        assert!(matches!(err, CatalogError::KeyMismatch { stored, .. } if stored == "Lions"));
    }
}

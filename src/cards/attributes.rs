//! Card attribute system for game-specific properties.
//!
//! Cards carry attributes like "power", "toughness" or "cmc". The engine
//! only interprets `power` (see `CardDefinition::power`); everything else
//! is opaque data the game reads back.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Key for accessing card attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Value for a card attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Integer value (power, toughness, cost).
    Int(i64),
    /// Boolean flag (flying, haste).
    Bool(bool),
    /// Text value.
    Text(String),
}

impl AttributeValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(v as i64)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

/// Collection of attributes.
pub type Attributes = FxHashMap<AttributeKey, AttributeValue>;

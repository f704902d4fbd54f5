use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value stored in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String
    S(String),

    /// Number
    N(f64),
}

impl AttributeValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            Self::N(_) => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::N(n) => Some(*n),
            Self::S(_) => None,
        }
    }
}

/// A flat item written to the table: attribute name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(BTreeMap<String, AttributeValue>);

impl Item {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an attribute, replacing any earlier value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        let _ = self.0.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(AttributeValue::as_f64)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A copy of the item with every number rounded half away from zero to `places` decimals.
    #[must_use]
    pub fn rounded(&self, places: i32) -> Self {
        let scale = 10_f64.powi(places);
        let attributes = self
            .0
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    AttributeValue::N(n) => AttributeValue::N(round_scaled(*n, scale)),
                    AttributeValue::S(s) => AttributeValue::S(s.clone()),
                };
                (name.clone(), value)
            })
            .collect();

        Self(attributes)
    }
}

/// Above 2^52 an `f64` has no fractional digits left to round.
const NO_FRACTION_LIMIT: f64 = 4_503_599_627_370_496.0;

fn round_scaled(n: f64, scale: f64) -> f64 {
    let scaled = n * scale;
    if !scaled.is_finite() || scaled.abs() >= NO_FRACTION_LIMIT {
        return n;
    }

    scaled.round() / scale
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

//! Attribute values and node/edge labels.
//!
//! A [`Label`] is a schema-free map from attribute name to [`AttributeValue`].
//! Lookups are soft: the typed accessors return `None` both when the key is
//! absent and when the stored variant differs from the requested one, so
//! partially labelled datasets flow through cost evaluation without errors.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GedError;

/// Conventional key for symbolic labels.
pub const LABEL_KEY: &str = "label";
/// Conventional key for node coordinates.
pub const COORDS_KEY: &str = "coords";
/// Conventional key for node or edge embeddings.
pub const EMBEDDING_KEY: &str = "embedding";
/// Conventional key for edge weights.
pub const WEIGHT_KEY: &str = "weight";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Vector(Vec<f64>),
}

impl AttributeValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Vector(_) => "vector",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            AttributeValue::Vector(values) => Some(values),
            AttributeValue::Text(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(value: Vec<f64>) -> Self {
        AttributeValue::Vector(value)
    }
}

impl From<&[f64]> for AttributeValue {
    fn from(value: &[f64]) -> Self {
        AttributeValue::Vector(value.to_vec())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label {
    attributes: AHashMap<String, AttributeValue>,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used heavily when assembling test graphs.
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<AttributeValue>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns the text stored under `key`, or `None` if absent or not text.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_text)
    }

    /// Returns the vector stored under `key`, or `None` if absent or not a vector.
    pub fn get_vector(&self, key: &str) -> Option<&[f64]> {
        self.get(key).and_then(AttributeValue::as_vector)
    }

    /// Reads a scalar: either numeric text (GXL style) or a one-element vector.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            AttributeValue::Text(text) => text.trim().parse::<f64>().ok(),
            AttributeValue::Vector(values) if values.len() == 1 => Some(values[0]),
            AttributeValue::Vector(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute names in sorted order for deterministic output.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.attributes.iter()
    }

    /// Builds a label from a JSON object. Strings become text, numbers become
    /// one-element vectors and numeric arrays become vectors.
    pub fn from_json(value: &Value) -> Result<Self, GedError> {
        let object = value
            .as_object()
            .ok_or_else(|| GedError::type_mismatch("label", "object", json_kind(value)))?;
        let mut label = Label::new();
        for (key, entry) in object {
            let attribute = match entry {
                Value::String(text) => AttributeValue::Text(text.clone()),
                Value::Number(number) => {
                    let scalar = number.as_f64().ok_or_else(|| {
                        GedError::type_mismatch(key.as_str(), "finite number", number.to_string())
                    })?;
                    AttributeValue::Vector(vec![scalar])
                }
                Value::Array(items) => {
                    let mut values = Vec::with_capacity(items.len());
                    for item in items {
                        let scalar = item.as_f64().ok_or_else(|| {
                            GedError::type_mismatch(key.as_str(), "numeric array", json_kind(item))
                        })?;
                        values.push(scalar);
                    }
                    AttributeValue::Vector(values)
                }
                other => {
                    return Err(GedError::type_mismatch(
                        key.as_str(),
                        "string, number or numeric array",
                        json_kind(other),
                    ));
                }
            };
            label.attributes.insert(key.clone(), attribute);
        }
        Ok(label)
    }

    pub fn to_json(&self) -> Value {
        let mut object = serde_json::Map::new();
        let mut entries: Vec<(&String, &AttributeValue)> = self.attributes.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            let entry = match value {
                AttributeValue::Text(text) => Value::String(text.clone()),
                AttributeValue::Vector(values) => Value::Array(
                    values
                        .iter()
                        .map(|v| {
                            serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number)
                        })
                        .collect(),
                ),
            };
            object.insert(key.clone(), entry);
        }
        Value::Object(object)
    }
}

impl<K, V> FromIterator<(K, V)> for Label
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut label = Label::new();
        for (key, value) in iter {
            label.insert(key, value);
        }
        label
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

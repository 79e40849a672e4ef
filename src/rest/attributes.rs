//! The attribute bag holding one record's fields.
//!
//! # Fill semantics
//!
//! Filling a bag that already holds fields with a non-empty payload merges
//! the payload in: incoming keys overwrite, absent keys are kept. In every
//! other case the bag is replaced by the payload, so filling with an empty
//! payload empties the bag.
//!
//! ```rust
//! use salesforce_model::rest::AttributeBag;
//! use serde_json::json;
//!
//! let mut bag = AttributeBag::from_value(json!({"a": 1, "b": 2})).unwrap();
//! bag.fill_value(json!({"b": 3, "c": 4})).unwrap();
//! assert_eq!(bag.to_value(), json!({"a": 1, "b": 3, "c": 4}));
//!
//! bag.fill_value(json!({})).unwrap();
//! assert!(bag.is_empty());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::ResourceError;

/// Field name to value mapping for one remote record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag {
    fields: Map<String, Value>,
}

impl AttributeBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if `value` is neither an
    /// object nor `null`.
    pub fn from_value(value: Value) -> Result<Self, ResourceError> {
        let mut bag = Self::new();
        bag.fill_value(value)?;
        Ok(bag)
    }

    /// Fills the bag from a field map.
    pub fn fill(&mut self, payload: Map<String, Value>) {
        if !payload.is_empty() && !self.fields.is_empty() {
            self.fields.extend(payload);
        } else {
            self.fields = payload;
        }
    }

    /// Fills the bag from a JSON value. `null` counts as an empty payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if `value` is neither an
    /// object nor `null`.
    pub fn fill_value(&mut self, value: Value) -> Result<(), ResourceError> {
        match value {
            Value::Object(map) => {
                self.fill(map);
                Ok(())
            }
            Value::Null => {
                self.fill(Map::new());
                Ok(())
            }
            other => Err(ResourceError::InvalidPayload {
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Fills the bag from a raw JSON body.
    ///
    /// An empty or whitespace-only body counts as an empty payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if the body is not a JSON
    /// object.
    pub fn fill_json(&mut self, body: &str) -> Result<(), ResourceError> {
        if body.trim().is_empty() {
            self.fill(Map::new());
            return Ok(());
        }
        let value: Value = serde_json::from_str(body)?;
        self.fill_value(value)
    }

    /// Returns a field value.
    ///
    /// Looks up `name` first and its lower-cased form second. A field that is
    /// present with an empty or `null` value is returned as such; `None`
    /// means the field is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .get(name)
            .or_else(|| self.fields.get(&name.to_lowercase()))
    }

    /// Returns a field value as a string slice, if it is a JSON string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Sets a field, returning its previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Returns `true` if the field is present under exactly `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the bag holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.fields.iter()
    }

    /// Returns the underlying field map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the bag, returning the field map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Returns the fields as a JSON object value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for AttributeBag {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<'a> IntoIterator for &'a AttributeBag {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for AttributeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> AttributeBag {
        AttributeBag::from_value(value).unwrap()
    }

    #[test]
    fn test_fill_merges_into_non_empty_bag() {
        let mut attributes = bag(json!({"a": 1, "b": 2}));
        attributes.fill_value(json!({"b": 3, "c": 4})).unwrap();
        assert_eq!(attributes.to_value(), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_fill_with_empty_payload_replaces() {
        let mut attributes = bag(json!({"a": 1}));
        attributes.fill(Map::new());
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_fill_with_null_replaces() {
        let mut attributes = bag(json!({"a": 1}));
        attributes.fill_value(Value::Null).unwrap();
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_fill_empty_bag_takes_payload_verbatim() {
        let mut attributes = AttributeBag::new();
        attributes.fill_value(json!({"Id": "001", "Name": "Acme"})).unwrap();
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn test_fill_json_parses_body() {
        let mut attributes = bag(json!({"Id": "001"}));
        attributes.fill_json(r#"{"Name":"Acme"}"#).unwrap();
        assert_eq!(attributes.get_str("Id"), Some("001"));
        assert_eq!(attributes.get_str("Name"), Some("Acme"));

        attributes.fill_json("  ").unwrap();
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_fill_rejects_non_object_payloads() {
        let mut attributes = AttributeBag::new();
        assert!(matches!(
            attributes.fill_value(json!([1, 2])),
            Err(ResourceError::InvalidPayload { .. })
        ));
        assert!(matches!(
            attributes.fill_json("not json"),
            Err(ResourceError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_get_falls_back_to_lowercase_name() {
        let attributes = bag(json!({"id": "001xyz"}));
        assert_eq!(attributes.get_str("Id"), Some("001xyz"));
        assert_eq!(attributes.get("Missing"), None);
    }

    #[test]
    fn test_get_distinguishes_empty_from_absent() {
        let attributes = bag(json!({"Phone": "", "Fax": null, "Active": false}));
        assert_eq!(attributes.get("Phone"), Some(&json!("")));
        assert_eq!(attributes.get("Fax"), Some(&Value::Null));
        assert_eq!(attributes.get("Active"), Some(&json!(false)));
        assert_eq!(attributes.get("Website"), None);
    }

    #[test]
    fn test_set_and_remove() {
        let mut attributes = AttributeBag::new();
        assert!(attributes.set("Name", "Acme").is_none());
        assert_eq!(attributes.set("Name", "Globex"), Some(json!("Acme")));
        assert!(attributes.contains("Name"));
        assert_eq!(attributes.remove("Name"), Some(json!("Globex")));
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_display_is_json() {
        let attributes = bag(json!({"Name": "Acme"}));
        assert_eq!(attributes.to_string(), r#"{"Name":"Acme"}"#);
    }

    #[test]
    fn test_serde_is_transparent() {
        let attributes: AttributeBag = serde_json::from_str(r#"{"Id":"001"}"#).unwrap();
        assert_eq!(serde_json::to_value(&attributes).unwrap(), json!({"Id": "001"}));
    }
}

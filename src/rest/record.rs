//! A single Salesforce record: its object descriptor plus its fields.

use std::fmt;

use serde_json::{Map, Value};

use crate::rest::{AttributeBag, ResourceDescriptor, ResourceError};

/// One remote record.
///
/// A `Record` pairs the [`ResourceDescriptor`] of its object type with an
/// [`AttributeBag`] holding the fields known from the server plus any
/// locally staged changes.
///
/// # Example
///
/// ```rust
/// use salesforce_model::rest::{Record, ResourceDescriptor};
/// use serde_json::json;
///
/// let descriptor = ResourceDescriptor::new(
///     "https://na1.salesforce.com",
///     "/services/data/v20.0/sobjects/Account",
/// );
/// let record = Record::from_value(descriptor, json!({"Id": "001xyz", "Name": "Acme"})).unwrap();
///
/// assert_eq!(record.id(), Some("001xyz"));
/// assert_eq!(record.get("Name"), Some(&json!("Acme")));
/// assert_eq!(record.to_string(), r#"{"Id":"001xyz","Name":"Acme"}"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    descriptor: ResourceDescriptor,
    attributes: AttributeBag,
}

impl Record {
    /// Creates a record with no fields.
    #[must_use]
    pub fn new(descriptor: ResourceDescriptor) -> Self {
        Self {
            descriptor,
            attributes: AttributeBag::new(),
        }
    }

    /// Creates a record seeded with `fields`.
    #[must_use]
    pub fn with_attributes(descriptor: ResourceDescriptor, fields: Map<String, Value>) -> Self {
        Self {
            descriptor,
            attributes: AttributeBag::from(fields),
        }
    }

    /// Creates a record seeded from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if `value` is neither an
    /// object nor `null`.
    pub fn from_value(descriptor: ResourceDescriptor, value: Value) -> Result<Self, ResourceError> {
        Ok(Self {
            descriptor,
            attributes: AttributeBag::from_value(value)?,
        })
    }

    /// Returns the object descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Returns the object name (e.g. `Account`).
    #[must_use]
    pub fn object_name(&self) -> &str {
        self.descriptor.object_name()
    }

    /// Returns the record's fields.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Returns the record's fields mutably.
    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    /// Consumes the record, returning its fields.
    #[must_use]
    pub fn into_attributes(self) -> AttributeBag {
        self.attributes
    }

    /// Returns a field value, falling back to the lower-cased name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Stages a field change locally, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.set(name, value)
    }

    /// Returns the primary-key value, if present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes
            .get(self.descriptor.primary_key())
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.attributes, f)
    }
}

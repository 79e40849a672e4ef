//! Query responses.
//!
//! [`QueryResult`] is the decoded body of the Salesforce query endpoint. It
//! implements `Deref<Target = [AttributeBag]>` so the records can be used
//! directly:
//!
//! ```rust
//! use salesforce_model::rest::QueryResult;
//! use serde_json::json;
//!
//! let result: QueryResult = serde_json::from_value(json!({
//!     "totalSize": 2,
//!     "done": true,
//!     "records": [
//!         {"attributes": {"type": "Account"}, "Id": "001a", "Name": "Acme"},
//!         {"attributes": {"type": "Account"}, "Id": "001b", "Name": "Globex"}
//!     ]
//! }))
//! .unwrap();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].get_str("Name"), Some("Globex"));
//! assert!(result.done);
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::rest::AttributeBag;

/// A page of query results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Total number of records matching the query.
    #[serde(default)]
    pub total_size: u64,

    /// Whether this page is the last one.
    #[serde(default = "default_done")]
    pub done: bool,

    /// Relative URL of the next page, when `done` is `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,

    /// The records on this page.
    #[serde(default)]
    pub records: Vec<AttributeBag>,
}

const fn default_done() -> bool {
    true
}

impl QueryResult {
    /// Returns `true` if more records can be fetched.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        !self.done && self.next_records_url.is_some()
    }

    /// Consumes the result, returning the first record.
    #[must_use]
    pub fn into_first(self) -> Option<AttributeBag> {
        self.records.into_iter().next()
    }

    /// Consumes the result, returning all records.
    #[must_use]
    pub fn into_records(self) -> Vec<AttributeBag> {
        self.records
    }
}

impl Deref for QueryResult {
    type Target = [AttributeBag];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl DerefMut for QueryResult {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.records
    }
}

impl IntoIterator for QueryResult {
    type Item = AttributeBag;
    type IntoIter = std::vec::IntoIter<AttributeBag>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_use_defaults() {
        let result: QueryResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result.total_size, 0);
        assert!(result.done);
        assert!(result.is_empty());
        assert!(!result.has_next_page());
    }

    #[test]
    fn test_next_page_detection() {
        let result: QueryResult = serde_json::from_value(json!({
            "totalSize": 4000,
            "done": false,
            "nextRecordsUrl": "/services/data/v20.0/query/01gD0000002HU6KIAW-2000",
            "records": []
        }))
        .unwrap();
        assert!(result.has_next_page());
        assert_eq!(result.total_size, 4000);
    }

    #[test]
    fn test_into_first_on_empty_records_is_none() {
        let result: QueryResult = serde_json::from_value(json!({"records": []})).unwrap();
        assert!(result.into_first().is_none());
    }

    #[test]
    fn test_iterates_records() {
        let result: QueryResult = serde_json::from_value(json!({
            "records": [{"Id": "1"}, {"Id": "2"}]
        }))
        .unwrap();
        let ids: Vec<String> = result
            .into_iter()
            .filter_map(|r| r.get_str("Id").map(String::from))
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}

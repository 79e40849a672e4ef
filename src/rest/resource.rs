//! Typed Salesforce objects.
//!
//! This module defines the [`SObjectResource`] trait. A type implementing it
//! names one Salesforce object by its REST path and gains `find()`,
//! `create()`, `get()`, `find_where()`, `describe()` and `query()` without
//! any further code.
//!
//! # Implementing a Resource
//!
//! ```rust
//! use salesforce_model::rest::SObjectResource;
//!
//! pub struct Invoice;
//!
//! impl SObjectResource for Invoice {
//!     const OBJECT_PATH: &'static str = "/services/data/v20.0/sobjects/Invoice__c";
//! }
//!
//! assert_eq!(Invoice::PRIMARY_KEY, "Id");
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use salesforce_model::rest::SObjectResource;
//! use salesforce_model::rest::resources::Account;
//!
//! let account = Account::find(&client, "001xx000003DGb2AAG").await?;
//! let ids = Account::find_where(&client, [("Name", "Acme")]).await?;
//! let page = Account::get(&client).await?;
//! ```

use serde_json::{Map, Value};

use crate::clients::Transport;
use crate::rest::{
    QueryBuilder, QueryResult, Record, ResourceError, SObjectRepository, SalesforceClient,
    DEFAULT_PRIMARY_KEY,
};

/// A Salesforce object addressed by a fixed REST path.
///
/// # Associated Constants
///
/// - `OBJECT_PATH`: the object's path below the base URL, ending in the object name
/// - `PRIMARY_KEY`: the field holding the record id (defaults to `Id`)
#[allow(async_fn_in_trait)]
pub trait SObjectResource: Sized {
    /// The object's REST path (e.g. `/services/data/v20.0/sobjects/Account`).
    const OBJECT_PATH: &'static str;

    /// The primary-key field name.
    const PRIMARY_KEY: &'static str = DEFAULT_PRIMARY_KEY;

    /// Returns a repository for this object.
    fn repository<T: Transport>(client: &SalesforceClient<T>) -> SObjectRepository<'_, T> {
        client.resource::<Self>()
    }

    /// Creates an unsaved record of this object type.
    fn new_record<T: Transport>(client: &SalesforceClient<T>, fields: Map<String, Value>) -> Record {
        Self::repository(client).new_record(fields)
    }

    /// Starts a query against this object.
    fn query<T: Transport>(client: &SalesforceClient<T>) -> QueryBuilder {
        Self::repository(client).query()
    }

    /// Fetches one record by id.
    ///
    /// # Errors
    ///
    /// See [`SObjectRepository::find`].
    async fn find<T: Transport>(
        client: &SalesforceClient<T>,
        id: &str,
    ) -> Result<Record, ResourceError> {
        Self::repository(client).find(id).await
    }

    /// Creates a record and fetches it back.
    ///
    /// # Errors
    ///
    /// See [`SObjectRepository::create`].
    async fn create<T: Transport>(
        client: &SalesforceClient<T>,
        data: Map<String, Value>,
    ) -> Result<Record, ResourceError> {
        Self::repository(client).create(data).await
    }

    /// Fetches the query endpoint without a statement.
    ///
    /// # Errors
    ///
    /// See [`SObjectRepository::get`].
    async fn get<T: Transport>(client: &SalesforceClient<T>) -> Result<QueryResult, ResourceError> {
        Self::repository(client).get().await
    }

    /// Finds the ids of records whose fields equal the given values.
    ///
    /// # Errors
    ///
    /// See [`SObjectRepository::find_where`].
    async fn find_where<T, I, K, V>(
        client: &SalesforceClient<T>,
        attributes: I,
    ) -> Result<String, ResourceError>
    where
        T: Transport,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::repository(client).find_where(attributes).await
    }

    /// Fetches the object's metadata.
    ///
    /// # Errors
    ///
    /// See [`SObjectRepository::describe`].
    async fn describe<T: Transport>(client: &SalesforceClient<T>) -> Result<String, ResourceError> {
        Self::repository(client).describe().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::config::{InstanceUrl, SalesforceConfig};
    use serde_json::json;

    struct Widget;

    impl SObjectResource for Widget {
        const OBJECT_PATH: &'static str = "/services/data/v20.0/sobjects/Widget__c";
        const PRIMARY_KEY: &'static str = "External_Id__c";
    }

    fn client() -> SalesforceClient {
        let config = SalesforceConfig::builder()
            .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
            .build()
            .unwrap();
        SalesforceClient::new(config, Session::new("token", "")).unwrap()
    }

    #[test]
    fn test_repository_uses_constants() {
        let client = client();
        let repo = Widget::repository(&client);
        assert_eq!(repo.descriptor().object_name(), "Widget__c");
        assert_eq!(repo.descriptor().primary_key(), "External_Id__c");
    }

    #[test]
    fn test_new_record_uses_custom_primary_key() {
        let client = client();
        let mut fields = Map::new();
        fields.insert("External_Id__c".to_string(), json!("W-1"));
        let record = Widget::new_record(&client, fields);
        assert_eq!(record.id(), Some("W-1"));
    }

    #[test]
    fn test_query_targets_object() {
        let client = client();
        let sql = Widget::query(&client).select(["Name"]).to_sql().unwrap();
        assert_eq!(sql, "SELECT Name FROM Widget__c");
    }
}

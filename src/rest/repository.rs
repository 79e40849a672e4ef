//! Record operations for one Salesforce object.
//!
//! An [`SObjectRepository`] binds a [`ResourceDescriptor`] to a
//! [`SalesforceClient`] and implements the find, create, update, list and
//! query operations for that object. Every operation is a single
//! request/response round trip; the authorization header is fetched fresh
//! for each one.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::{json, Map, Value};
//!
//! let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
//!
//! let mut data = Map::new();
//! data.insert("Name".into(), json!("Acme"));
//! let mut account = accounts.create(data).await?;
//! println!("Created {}", account.id().unwrap_or_default());
//!
//! let mut changes = Map::new();
//! changes.insert("Phone".into(), json!("555-0100"));
//! accounts.update(&mut account, changes).await?;
//!
//! let query = accounts.query().select(["Id", "Name"]).where_like("Name", "Ac");
//! for row in accounts.execute_query(&query).await?.iter() {
//!     println!("{row}");
//! }
//! ```

use serde_json::{Map, Value};

use crate::clients::{HttpClient, Transport};
use crate::rest::{
    AttributeBag, QueryBuilder, QueryResult, Record, ResourceDescriptor, ResourceError,
    SalesforceClient,
};

/// Record operations for one object type.
#[derive(Debug)]
pub struct SObjectRepository<'c, T = HttpClient> {
    client: &'c SalesforceClient<T>,
    descriptor: ResourceDescriptor,
}

impl<T> Clone for SObjectRepository<'_, T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            descriptor: self.descriptor.clone(),
        }
    }
}

impl<'c, T: Transport> SObjectRepository<'c, T> {
    /// Creates a repository for `descriptor`.
    #[must_use]
    pub const fn new(client: &'c SalesforceClient<T>, descriptor: ResourceDescriptor) -> Self {
        Self { client, descriptor }
    }

    /// Returns the object descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Creates an unsaved record seeded with `fields`.
    #[must_use]
    pub fn new_record(&self, fields: Map<String, Value>) -> Record {
        Record::with_attributes(self.descriptor.clone(), fields)
    }

    /// Starts a query against this object.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(self.descriptor.object_name())
    }

    /// Fetches one record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyId`] for an empty id,
    /// [`ResourceError::ConnectionNotConfigured`] for an unconfigured
    /// descriptor, and transport, authorization or payload errors otherwise.
    pub async fn find(&self, id: &str) -> Result<Record, ResourceError> {
        if id.is_empty() {
            return Err(ResourceError::EmptyId { operation: "find" });
        }
        let url = self.descriptor.resource_url(Some(id))?;
        let response = self.client.get(&url).await?;

        let mut record = Record::new(self.descriptor.clone());
        record.attributes_mut().fill_json(&response.body)?;
        tracing::debug!(
            object = self.descriptor.object_name(),
            id,
            fields = record.attributes().len(),
            "Filled record from Salesforce"
        );
        Ok(record)
    }

    /// Creates a record and returns it as fetched back from Salesforce.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if the create response has
    /// no `id`, and connection, transport or authorization errors otherwise.
    pub async fn create(&self, data: Map<String, Value>) -> Result<Record, ResourceError> {
        let url = self.descriptor.resource_url(None)?;
        let response = self.client.post(&url, &Value::Object(data)).await?;

        let body = response.json()?;
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ResourceError::InvalidPayload {
                reason: "create response carries no id".to_string(),
            })?;
        tracing::debug!(
            object = self.descriptor.object_name(),
            id,
            "Created Salesforce record"
        );

        self.find(id).await
    }

    /// Fetches the query endpoint without a statement.
    ///
    /// # Errors
    ///
    /// Returns connection, transport, authorization or payload errors.
    pub async fn get(&self) -> Result<QueryResult, ResourceError> {
        let url = self.descriptor.query_url(None)?;
        self.fetch_query(&url).await
    }

    /// Runs the statement compiled from `builder`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ConnectionNotConfigured`] for an unconfigured
    /// descriptor, [`ResourceError::InvalidFieldName`] if the builder holds an
    /// invalid name, and transport, authorization or payload errors otherwise.
    pub async fn execute_query(&self, builder: &QueryBuilder) -> Result<QueryResult, ResourceError> {
        self.descriptor.ensure_configured()?;
        let sql = builder.to_sql()?;
        self.execute_query_raw(&sql).await
    }

    /// Runs the statement compiled from `builder`, returning only the first record.
    ///
    /// Returns `Ok(None)` when the query matches nothing.
    ///
    /// # Errors
    ///
    /// See [`execute_query`](Self::execute_query).
    pub async fn execute_query_first(
        &self,
        builder: &QueryBuilder,
    ) -> Result<Option<AttributeBag>, ResourceError> {
        Ok(self.execute_query(builder).await?.into_first())
    }

    /// Runs a literal SOQL statement.
    ///
    /// # Errors
    ///
    /// Returns connection, transport, authorization or payload errors.
    pub async fn execute_query_raw(&self, soql: &str) -> Result<QueryResult, ResourceError> {
        let url = self.descriptor.query_url(Some(&encode_query(soql)))?;
        self.fetch_query(&url).await
    }

    /// Runs a literal SOQL statement, returning only the first record.
    ///
    /// Returns `Ok(None)` when the query matches nothing.
    ///
    /// # Errors
    ///
    /// See [`execute_query_raw`](Self::execute_query_raw).
    pub async fn execute_query_raw_first(
        &self,
        soql: &str,
    ) -> Result<Option<AttributeBag>, ResourceError> {
        Ok(self.execute_query_raw(soql).await?.into_first())
    }

    /// Patches `record` with `data`.
    ///
    /// On success the submitted fields are merged into the record and the
    /// decoded response body is returned (`null` for 204 No Content).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ActiveRecordNotSet`] before any call when the
    /// record has no primary-key value, and connection, transport or
    /// authorization errors otherwise.
    pub async fn update(
        &self,
        record: &mut Record,
        data: Map<String, Value>,
    ) -> Result<Value, ResourceError> {
        let id = record
            .id()
            .ok_or_else(|| ResourceError::ActiveRecordNotSet {
                object: record.object_name().to_string(),
            })?
            .to_string();
        let url = record.descriptor().resource_url(Some(&id))?;

        let body = Value::Object(data);
        let response = self.client.patch(&url, &body).await?;
        let decoded = response.json()?;

        if let Value::Object(fields) = body {
            for (name, value) in fields {
                record.set(name, value);
            }
        }
        tracing::debug!(
            object = record.object_name(),
            id = %id,
            "Updated Salesforce record"
        );
        Ok(decoded)
    }

    /// Compiles the `SELECT Id ... WHERE` statement used by
    /// [`find_where`](Self::find_where).
    ///
    /// Conditions are joined with `AND` in iteration order; values are
    /// escaped. No attributes yields a statement without a `WHERE` clause.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidFieldName`] for an invalid field name.
    pub fn find_where_sql<I, K, V>(&self, attributes: I) -> Result<String, ResourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        attributes
            .into_iter()
            .fold(self.query(), |builder, (field, value)| {
                builder.where_eq(field, value)
            })
            .to_sql()
    }

    /// Finds the ids of records whose fields equal the given values.
    ///
    /// Returns the raw response body of the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ConnectionNotConfigured`] for an unconfigured
    /// descriptor, [`ResourceError::InvalidFieldName`] for an invalid field
    /// name, and transport or authorization errors otherwise.
    pub async fn find_where<I, K, V>(&self, attributes: I) -> Result<String, ResourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        self.descriptor.ensure_configured()?;
        let sql = self.find_where_sql(attributes)?;
        let url = self.descriptor.query_url(Some(&encode_query(&sql)))?;
        let response = self.client.get(&url).await?;
        Ok(response.body)
    }

    /// Fetches the object's metadata from the instance URL.
    ///
    /// Returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ConnectionNotConfigured`] when the object
    /// path is empty, and transport or authorization errors otherwise.
    pub async fn describe(&self) -> Result<String, ResourceError> {
        self.descriptor.ensure_object_path()?;
        let url = self
            .descriptor
            .describe_url(self.client.config().instance_url().as_ref());
        let response = self.client.get(&url).await?;
        Ok(response.body)
    }

    async fn fetch_query(&self, url: &str) -> Result<QueryResult, ResourceError> {
        let response = self.client.get(url).await?;
        let result: QueryResult = serde_json::from_value(response.json()?)?;
        tracing::debug!(
            object = self.descriptor.object_name(),
            records = result.len(),
            total = result.total_size,
            "Received Salesforce query page"
        );
        Ok(result)
    }
}

fn encode_query(soql: &str) -> String {
    format!("q={}", urlencoding::encode(soql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::config::{InstanceUrl, SalesforceConfig};
    use serde_json::json;

    fn client() -> SalesforceClient {
        let config = SalesforceConfig::builder()
            .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
            .build()
            .unwrap();
        SalesforceClient::new(config, Session::new("token", "")).unwrap()
    }

    #[test]
    fn test_find_where_sql_single_condition() {
        let client = client();
        let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
        let sql = accounts.find_where_sql([("Name", "Acme")]).unwrap();
        assert_eq!(sql, "SELECT Id FROM Account WHERE Name = 'Acme'");
    }

    #[test]
    fn test_find_where_sql_joins_with_and() {
        let client = client();
        let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
        let sql = accounts
            .find_where_sql([("Name", "Acme"), ("Type", "Customer")])
            .unwrap();
        assert_eq!(
            sql,
            "SELECT Id FROM Account WHERE Name = 'Acme' AND Type = 'Customer'"
        );
    }

    #[test]
    fn test_find_where_sql_without_attributes_has_no_where() {
        let client = client();
        let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
        let sql = accounts
            .find_where_sql(Vec::<(String, String)>::new())
            .unwrap();
        assert_eq!(sql, "SELECT Id FROM Account");
    }

    #[test]
    fn test_find_where_sql_escapes_values() {
        let client = client();
        let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
        let sql = accounts.find_where_sql([("Name", "O'Brien")]).unwrap();
        assert_eq!(sql, "SELECT Id FROM Account WHERE Name = 'O\\'Brien'");
    }

    #[test]
    fn test_new_record_and_query_are_bound_to_object() {
        let client = client();
        let contacts = client.sobject("/services/data/v20.0/sobjects/Contact");

        let mut fields = Map::new();
        fields.insert("LastName".to_string(), json!("Smith"));
        let record = contacts.new_record(fields);
        assert_eq!(record.object_name(), "Contact");
        assert_eq!(record.id(), None);

        assert_eq!(contacts.query().object(), "Contact");
    }

    #[test]
    fn test_encode_query_escapes_statement() {
        assert_eq!(
            encode_query("SELECT Id FROM Account WHERE Name = 'A&B'"),
            "q=SELECT%20Id%20FROM%20Account%20WHERE%20Name%20%3D%20%27A%26B%27"
        );
    }

    #[tokio::test]
    async fn test_find_rejects_empty_id_without_network() {
        let client = client();
        let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
        let result = accounts.find("").await;
        assert!(matches!(
            result,
            Err(ResourceError::EmptyId { operation: "find" })
        ));
    }

    #[tokio::test]
    async fn test_update_without_id_fails_before_network() {
        let client = client();
        let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
        let mut record = accounts.new_record(Map::new());
        let result = accounts.update(&mut record, Map::new()).await;
        assert!(matches!(
            result,
            Err(ResourceError::ActiveRecordNotSet { object }) if object == "Account"
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_object_fails_before_network() {
        let client = client();
        let repo = client.sobject("");
        assert!(matches!(
            repo.get().await,
            Err(ResourceError::ConnectionNotConfigured { .. })
        ));
        assert!(matches!(
            repo.describe().await,
            Err(ResourceError::ConnectionNotConfigured { .. })
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_object_query_paths_report_connection_error() {
        let client = client();
        let repo = client.sobject("");
        assert!(matches!(
            repo.find_where([("Name", "Acme")]).await,
            Err(ResourceError::ConnectionNotConfigured { .. })
        ));
        assert!(matches!(
            repo.execute_query(&repo.query()).await,
            Err(ResourceError::ConnectionNotConfigured { .. })
        ));
        assert!(matches!(
            repo.execute_query_first(&repo.query().select(["Name"])).await,
            Err(ResourceError::ConnectionNotConfigured { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_base_url_reports_connection_error() {
        let client = client();
        let repo = SObjectRepository::new(
            &client,
            ResourceDescriptor::new("", "/services/data/v20.0/sobjects/Account"),
        );
        assert!(matches!(
            repo.find_where([("Name", "Acme")]).await,
            Err(ResourceError::ConnectionNotConfigured { object_path })
                if object_path == "/services/data/v20.0/sobjects/Account"
        ));
    }
}

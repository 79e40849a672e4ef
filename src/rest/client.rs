//! The Salesforce client shared by all record operations.
//!
//! [`SalesforceClient`] owns the configuration, the authorization provider
//! and the transport. Object-specific work happens in an
//! [`SObjectRepository`] obtained from [`SalesforceClient::sobject`] or
//! [`SalesforceClient::resource`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::auth::AuthorizationProvider;
use crate::clients::{HttpClient, HttpResponse, Transport};
use crate::config::SalesforceConfig;
use crate::rest::{ResourceDescriptor, ResourceError, SObjectRepository, SObjectResource};

/// Client for Salesforce record operations.
///
/// The authorization header is requested from the provider for every call,
/// so a provider such as [`SessionStore`](crate::auth::SessionStore) can
/// swap sessions while the client is in use.
///
/// # Thread Safety
///
/// `SalesforceClient` is `Send + Sync` when its transport is.
///
/// # Example
///
/// ```rust
/// use salesforce_model::{InstanceUrl, SalesforceClient, SalesforceConfig};
/// use salesforce_model::auth::SessionStore;
///
/// let config = SalesforceConfig::builder()
///     .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
///     .build()
///     .unwrap();
///
/// let client = SalesforceClient::new(config, SessionStore::new()).unwrap();
/// let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
/// assert_eq!(accounts.descriptor().object_name(), "Account");
/// ```
pub struct SalesforceClient<T = HttpClient> {
    config: SalesforceConfig,
    auth: Arc<dyn AuthorizationProvider>,
    transport: T,
}

// Verify SalesforceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SalesforceClient>();
};

impl SalesforceClient<HttpClient> {
    /// Creates a client using the reqwest-backed [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the HTTP client cannot be created.
    pub fn new(
        config: SalesforceConfig,
        auth: impl AuthorizationProvider + 'static,
    ) -> Result<Self, ResourceError> {
        let transport = HttpClient::new(Some(&config))?;
        Ok(Self::with_transport(config, auth, transport))
    }
}

impl<T: Transport> SalesforceClient<T> {
    /// Creates a client using a custom transport.
    pub fn with_transport(
        config: SalesforceConfig,
        auth: impl AuthorizationProvider + 'static,
        transport: T,
    ) -> Self {
        Self {
            config,
            auth: Arc::new(auth),
            transport,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SalesforceConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds a descriptor for `object_path` against the configured base URL.
    #[must_use]
    pub fn descriptor(&self, object_path: impl Into<String>) -> ResourceDescriptor {
        ResourceDescriptor::new(self.config.base_url().as_ref(), object_path)
    }

    /// Returns a repository for the object at `object_path`.
    #[must_use]
    pub fn sobject(&self, object_path: impl Into<String>) -> SObjectRepository<'_, T> {
        SObjectRepository::new(self, self.descriptor(object_path))
    }

    /// Returns a repository for the typed resource `R`.
    #[must_use]
    pub fn resource<R: SObjectResource>(&self) -> SObjectRepository<'_, T> {
        let descriptor = self
            .descriptor(R::OBJECT_PATH)
            .with_primary_key(R::PRIMARY_KEY);
        SObjectRepository::new(self, descriptor)
    }

    /// Sends a `GET`, failing on non-2xx responses.
    pub(crate) async fn get(&self, url: &str) -> Result<HttpResponse, ResourceError> {
        let headers = self.headers()?;
        let response = self.transport.request(url, None, &headers).await?;
        Self::ensure_ok(response)
    }

    /// Sends a `POST`, failing on non-2xx responses.
    pub(crate) async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, ResourceError> {
        let headers = self.headers()?;
        let response = self.transport.request(url, Some(body), &headers).await?;
        Self::ensure_ok(response)
    }

    /// Sends a `PATCH`, failing on non-2xx responses.
    pub(crate) async fn patch(
        &self,
        url: &str,
        body: &Value,
    ) -> Result<HttpResponse, ResourceError> {
        let headers = self.headers()?;
        let response = self.transport.patch(url, body, &headers).await?;
        Self::ensure_ok(response)
    }

    fn headers(&self) -> Result<HashMap<String, String>, ResourceError> {
        let authorization = self.auth.authorization_header()?;
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), authorization);
        Ok(headers)
    }

    fn ensure_ok(response: HttpResponse) -> Result<HttpResponse, ResourceError> {
        if response.is_ok() {
            Ok(response)
        } else {
            Err(ResourceError::from_http_response(&response))
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SalesforceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

//! URL construction for Salesforce objects.
//!
//! A [`ResourceDescriptor`] identifies one object type: the base URL of the
//! org, the object's path relative to it, and the name of its primary-key
//! field. All URLs used by record operations are built here, by plain
//! concatenation, with no network access.
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::rest::ResourceDescriptor;
//!
//! let descriptor = ResourceDescriptor::new(
//!     "https://na1.salesforce.com",
//!     "/services/data/v20.0/sobjects/Account",
//! );
//!
//! assert_eq!(
//!     descriptor.resource_url(Some("001xyz")).unwrap(),
//!     "https://na1.salesforce.com/services/data/v20.0/sobjects/Account/001xyz"
//! );
//! assert_eq!(
//!     descriptor.query_url(None).unwrap(),
//!     "https://na1.salesforce.com/services/data/v20.0/query"
//! );
//! assert_eq!(descriptor.object_name(), "Account");
//! ```

use crate::config::API_VERSION;
use crate::rest::ResourceError;

/// The primary-key field used when none is configured.
pub const DEFAULT_PRIMARY_KEY: &str = "Id";

/// Identity of a remote object type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    base_url: String,
    object_path: String,
    primary_key: String,
}

impl ResourceDescriptor {
    /// Creates a descriptor with the default `Id` primary key.
    #[must_use]
    pub fn new(base_url: impl Into<String>, object_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            object_path: object_path.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    /// Overrides the primary-key field name.
    #[must_use]
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the object path relative to the base URL.
    #[must_use]
    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// Returns the primary-key field name.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Returns the object name: the last segment of the object path.
    #[must_use]
    pub fn object_name(&self) -> &str {
        self.object_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Returns `true` when both the base URL and the object path are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.object_path.is_empty()
    }

    /// Builds the URL of the object collection, or of one record when `id` is given.
    ///
    /// An empty `id` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ConnectionNotConfigured`] if the base URL or
    /// the object path is empty.
    pub fn resource_url(&self, id: Option<&str>) -> Result<String, ResourceError> {
        self.ensure_configured()?;
        Ok(match id.filter(|id| !id.is_empty()) {
            Some(id) => format!("{}{}/{id}", self.base_url, self.object_path),
            None => format!("{}{}", self.base_url, self.object_path),
        })
    }

    /// Builds the query endpoint URL, appending `raw_query` after `?` when given.
    ///
    /// `raw_query` must already be URL-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ConnectionNotConfigured`] if the base URL or
    /// the object path is empty.
    pub fn query_url(&self, raw_query: Option<&str>) -> Result<String, ResourceError> {
        self.ensure_configured()?;
        let root = format!("{}/services/data/{API_VERSION}/query", self.base_url);
        Ok(match raw_query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{root}?{query}"),
            None => root,
        })
    }

    /// Builds the describe URL for this object against `instance_url`.
    #[must_use]
    pub fn describe_url(&self, instance_url: &str) -> String {
        format!(
            "{instance_url}/services/data/{API_VERSION}/sobjects/{}/describe",
            self.object_name()
        )
    }

    /// Fails with [`ResourceError::ConnectionNotConfigured`] unless both the
    /// base URL and the object path are set.
    pub(crate) fn ensure_configured(&self) -> Result<(), ResourceError> {
        if self.base_url.is_empty() {
            return Err(self.not_configured());
        }
        self.ensure_object_path()
    }

    /// Fails with [`ResourceError::ConnectionNotConfigured`] unless the object
    /// path is set.
    pub(crate) fn ensure_object_path(&self) -> Result<(), ResourceError> {
        if self.object_path.is_empty() {
            Err(self.not_configured())
        } else {
            Ok(())
        }
    }

    fn not_configured(&self) -> ResourceError {
        ResourceError::ConnectionNotConfigured {
            object_path: self.object_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cs81.salesforce.com";
    const PATH: &str = "/services/data/v20.0/sobjects/Account";

    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::new(BASE, PATH)
    }

    #[test]
    fn test_resource_url_with_and_without_id() {
        let d = descriptor();
        assert_eq!(d.resource_url(Some("001xyz")).unwrap(), format!("{BASE}{PATH}/001xyz"));
        assert_eq!(d.resource_url(None).unwrap(), format!("{BASE}{PATH}"));
        assert_eq!(d.resource_url(Some("")).unwrap(), format!("{BASE}{PATH}"));
    }

    #[test]
    fn test_query_url_with_and_without_query() {
        let d = descriptor();
        assert_eq!(
            d.query_url(None).unwrap(),
            format!("{BASE}/services/data/v20.0/query")
        );
        assert_eq!(
            d.query_url(Some("q=SELECT+Id+FROM+Account")).unwrap(),
            format!("{BASE}/services/data/v20.0/query?q=SELECT+Id+FROM+Account")
        );
    }

    #[test]
    fn test_unconfigured_descriptor_fails_every_url() {
        for d in [
            ResourceDescriptor::new("", PATH),
            ResourceDescriptor::new(BASE, ""),
        ] {
            assert!(!d.is_configured());
            assert!(matches!(
                d.resource_url(Some("001")),
                Err(ResourceError::ConnectionNotConfigured { .. })
            ));
            assert!(matches!(
                d.resource_url(None),
                Err(ResourceError::ConnectionNotConfigured { .. })
            ));
            assert!(matches!(
                d.query_url(None),
                Err(ResourceError::ConnectionNotConfigured { .. })
            ));
        }
    }

    #[test]
    fn test_object_name_is_last_segment() {
        assert_eq!(ResourceDescriptor::new(BASE, "/sobjects/Account").object_name(), "Account");
        assert_eq!(ResourceDescriptor::new(BASE, "/sobjects/Lead/").object_name(), "Lead");
        assert_eq!(ResourceDescriptor::new(BASE, "Contact").object_name(), "Contact");
    }

    #[test]
    fn test_primary_key_defaults_to_id() {
        assert_eq!(descriptor().primary_key(), "Id");
        assert_eq!(
            descriptor().with_primary_key("External_Id__c").primary_key(),
            "External_Id__c"
        );
    }

    #[test]
    fn test_describe_url_uses_given_instance() {
        assert_eq!(
            descriptor().describe_url("https://login.example.com"),
            "https://login.example.com/services/data/v20.0/sobjects/Account/describe"
        );
    }
}

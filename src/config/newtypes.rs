//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated connected-app consumer key.
///
/// This newtype ensures the consumer key is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use salesforce_model::ConsumerKey;
///
/// let key = ConsumerKey::new("3MVG9...").unwrap();
/// assert_eq!(key.as_ref(), "3MVG9...");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerKey(String);

impl ConsumerKey {
    /// Creates a new validated consumer key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyConsumerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ConsumerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated connected-app consumer secret.
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ConsumerSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use salesforce_model::ConsumerSecret;
///
/// let secret = ConsumerSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ConsumerSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerSecret(String);

impl ConsumerSecret {
    /// Creates a new validated consumer secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyConsumerSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ConsumerSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConsumerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsumerSecret(*****)")
    }
}

/// A user password, masked in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wraps a password.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A validated Salesforce instance URL (e.g. `https://cs81.salesforce.com`).
///
/// The URL must carry a scheme and a host. Trailing slashes are removed so
/// that relative object paths can be appended verbatim.
///
/// # Example
///
/// ```rust
/// use salesforce_model::InstanceUrl;
///
/// let url = InstanceUrl::new("https://cs81.salesforce.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://cs81.salesforce.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("cs81.salesforce.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl InstanceUrl {
    /// Creates a new validated instance URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInstanceUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidInstanceUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidInstanceUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidInstanceUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidInstanceUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for InstanceUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for InstanceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for InstanceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for InstanceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_key_rejects_empty_string() {
        let result = ConsumerKey::new("");
        assert!(matches!(result, Err(ConfigError::EmptyConsumerKey)));
    }

    #[test]
    fn test_consumer_secret_masks_value_in_debug() {
        let secret = ConsumerSecret::new("super-secret-key").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "ConsumerSecret(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("hunter2");
        assert_eq!(format!("{password:?}"), "Password(*****)");
        assert_eq!(password.as_ref(), "hunter2");
    }

    #[test]
    fn test_instance_url_validates_format() {
        let url = InstanceUrl::new("https://cs81.salesforce.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("cs81.salesforce.com"));

        let url = InstanceUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_instance_url_strips_trailing_slashes() {
        let url = InstanceUrl::new("  https://na1.salesforce.com//  ").unwrap();
        assert_eq!(url.as_ref(), "https://na1.salesforce.com");
    }

    #[test]
    fn test_instance_url_rejects_invalid() {
        assert!(InstanceUrl::new("cs81.salesforce.com").is_err());
        assert!(InstanceUrl::new("https://").is_err());
        assert!(InstanceUrl::new("://example.com").is_err());
        assert!(InstanceUrl::new("").is_err());
    }

    #[test]
    fn test_instance_url_deserializes_with_validation() {
        let url: InstanceUrl = serde_json::from_str(r#""https://na1.salesforce.com""#).unwrap();
        assert_eq!(url.as_ref(), "https://na1.salesforce.com");

        let result: Result<InstanceUrl, _> = serde_json::from_str(r#""not a url""#);
        assert!(result.is_err());
    }
}

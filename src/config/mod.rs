//! Configuration types for the Salesforce model SDK.
//!
//! This module provides the configuration used to point the SDK at a
//! Salesforce org and to describe the connected app credentials for each
//! deployment environment.
//!
//! # Overview
//!
//! - [`SalesforceConfig`]: The main configuration struct holding all SDK settings
//! - [`SalesforceConfigBuilder`]: A builder for constructing [`SalesforceConfig`] instances
//! - [`EnvironmentConfig`]: Connected app settings for one named environment
//! - [`InstanceUrl`]: A validated Salesforce instance URL
//! - [`ConsumerKey`] / [`ConsumerSecret`]: Connected app credentials
//! - [`Password`]: A user password with masked debug output
//!
//! # Environments
//!
//! A configuration carries any number of named environments (for example
//! `development` and `live`) and an environment selector. The selected
//! environment's `sf_base_url`, when present, takes precedence over the
//! top-level instance URL for record operations.
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::{SalesforceConfig, EnvironmentConfig, InstanceUrl};
//!
//! let config = SalesforceConfig::builder()
//!     .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
//!     .environment("live")
//!     .environment_config(
//!         "live",
//!         EnvironmentConfig::builder()
//!             .sf_base_url(InstanceUrl::new("https://na1.salesforce.com").unwrap())
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://na1.salesforce.com");
//! assert_eq!(config.instance_url().as_ref(), "https://cs81.salesforce.com");
//! ```

mod newtypes;

pub use newtypes::{ConsumerKey, ConsumerSecret, InstanceUrl, Password};

use crate::error::ConfigError;
use std::collections::HashMap;
use std::time::Duration;

/// The Salesforce REST API version used by query and describe endpoints.
pub const API_VERSION: &str = "v20.0";

/// The environment selected when none is configured explicitly.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Connected app settings for a single named environment.
///
/// Every field is optional; the OAuth flow that consumes these values lives
/// outside this crate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    consumer_key: Option<ConsumerKey>,
    consumer_secret: Option<ConsumerSecret>,
    sf_base_url: Option<InstanceUrl>,
    callback: Option<String>,
    username: Option<String>,
    password: Option<Password>,
}

impl EnvironmentConfig {
    /// Creates a new builder for an environment.
    #[must_use]
    pub fn builder() -> EnvironmentConfigBuilder {
        EnvironmentConfigBuilder::default()
    }

    /// Returns the connected app consumer key.
    #[must_use]
    pub const fn consumer_key(&self) -> Option<&ConsumerKey> {
        self.consumer_key.as_ref()
    }

    /// Returns the connected app consumer secret.
    #[must_use]
    pub const fn consumer_secret(&self) -> Option<&ConsumerSecret> {
        self.consumer_secret.as_ref()
    }

    /// Returns the environment's base URL, if it overrides the instance URL.
    #[must_use]
    pub const fn sf_base_url(&self) -> Option<&InstanceUrl> {
        self.sf_base_url.as_ref()
    }

    /// Returns the OAuth callback URL.
    #[must_use]
    pub fn callback(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    /// Returns the integration user name.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the integration user password.
    #[must_use]
    pub const fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }
}

/// Builder for [`EnvironmentConfig`].
#[derive(Debug, Default)]
pub struct EnvironmentConfigBuilder {
    inner: EnvironmentConfig,
}

impl EnvironmentConfigBuilder {
    /// Sets the consumer key.
    #[must_use]
    pub fn consumer_key(mut self, key: ConsumerKey) -> Self {
        self.inner.consumer_key = Some(key);
        self
    }

    /// Sets the consumer secret.
    #[must_use]
    pub fn consumer_secret(mut self, secret: ConsumerSecret) -> Self {
        self.inner.consumer_secret = Some(secret);
        self
    }

    /// Sets the base URL used for record operations in this environment.
    #[must_use]
    pub fn sf_base_url(mut self, url: InstanceUrl) -> Self {
        self.inner.sf_base_url = Some(url);
        self
    }

    /// Sets the OAuth callback URL.
    #[must_use]
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.inner.callback = Some(callback.into());
        self
    }

    /// Sets the integration user name.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.inner.username = Some(username.into());
        self
    }

    /// Sets the integration user password.
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.inner.password = Some(password);
        self
    }

    /// Finishes the environment.
    #[must_use]
    pub fn build(self) -> EnvironmentConfig {
        self.inner
    }
}

/// Configuration for the Salesforce model SDK.
///
/// # Thread Safety
///
/// `SalesforceConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use salesforce_model::{SalesforceConfig, InstanceUrl};
///
/// let config = SalesforceConfig::builder()
///     .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.environment(), Some("development"));
/// assert!(config.environment_config().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct SalesforceConfig {
    instance_url: InstanceUrl,
    environment: Option<String>,
    environments: HashMap<String, EnvironmentConfig>,
    app_name: Option<String>,
    api_name: Option<String>,
    enable_oauth: bool,
    user_agent_prefix: Option<String>,
    request_timeout: Option<Duration>,
}

impl SalesforceConfig {
    /// Creates a new builder for constructing a `SalesforceConfig`.
    #[must_use]
    pub fn builder() -> SalesforceConfigBuilder {
        SalesforceConfigBuilder::new()
    }

    /// Returns the top-level instance URL.
    #[must_use]
    pub const fn instance_url(&self) -> &InstanceUrl {
        &self.instance_url
    }

    /// Returns the selected environment name, if any.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Returns the settings of the selected environment.
    ///
    /// Returns `None` when no environment is selected or when the selector
    /// names an environment that is not configured.
    #[must_use]
    pub fn environment_config(&self) -> Option<&EnvironmentConfig> {
        let name = self.environment.as_deref()?;
        self.environments.get(name)
    }

    /// Returns the settings of a named environment.
    #[must_use]
    pub fn environment_named(&self, name: &str) -> Option<&EnvironmentConfig> {
        self.environments.get(name)
    }

    /// Returns the base URL for record operations.
    ///
    /// This is the selected environment's `sf_base_url` when set, and the
    /// top-level instance URL otherwise.
    #[must_use]
    pub fn base_url(&self) -> &InstanceUrl {
        self.environment_config()
            .and_then(EnvironmentConfig::sf_base_url)
            .unwrap_or(&self.instance_url)
    }

    /// Returns the application name.
    #[must_use]
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Returns the API name.
    #[must_use]
    pub fn api_name(&self) -> Option<&str> {
        self.api_name.as_deref()
    }

    /// Returns whether the OAuth flow is enabled.
    #[must_use]
    pub const fn enable_oauth(&self) -> bool {
        self.enable_oauth
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the HTTP request timeout, if configured.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

// Verify SalesforceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SalesforceConfig>();
};

/// Builder for constructing [`SalesforceConfig`] instances.
///
/// The only required field is `instance_url`.
///
/// # Defaults
///
/// - `environment`: `"development"`
/// - `enable_oauth`: `true`
/// - `environments`: none
/// - `app_name`, `api_name`, `user_agent_prefix`, `request_timeout`: `None`
#[derive(Debug, Default)]
pub struct SalesforceConfigBuilder {
    instance_url: Option<InstanceUrl>,
    environment: Option<String>,
    environments: HashMap<String, EnvironmentConfig>,
    app_name: Option<String>,
    api_name: Option<String>,
    enable_oauth: Option<bool>,
    user_agent_prefix: Option<String>,
    request_timeout: Option<Duration>,
}

impl SalesforceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the top-level instance URL (required).
    #[must_use]
    pub fn instance_url(mut self, url: InstanceUrl) -> Self {
        self.instance_url = Some(url);
        self
    }

    /// Selects the active environment. A blank name selects none.
    #[must_use]
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Registers the settings for a named environment.
    #[must_use]
    pub fn environment_config(mut self, name: impl Into<String>, env: EnvironmentConfig) -> Self {
        self.environments.insert(name.into(), env);
        self
    }

    /// Sets the application name.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the API name.
    #[must_use]
    pub fn api_name(mut self, name: impl Into<String>) -> Self {
        self.api_name = Some(name.into());
        self
    }

    /// Enables or disables the OAuth flow.
    #[must_use]
    pub const fn enable_oauth(mut self, enabled: bool) -> Self {
        self.enable_oauth = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the [`SalesforceConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `instance_url` is not
    /// set, and [`ConfigError::InvalidEnvironment`] if a registered
    /// environment name is empty. A blank selector selects no environment.
    pub fn build(self) -> Result<SalesforceConfig, ConfigError> {
        let instance_url = self.instance_url.ok_or(ConfigError::MissingRequiredField {
            field: "instance_url",
        })?;

        let environment = self
            .environment
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let environment = Some(environment.trim().to_string()).filter(|name| !name.is_empty());
        if let Some(name) = self.environments.keys().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidEnvironment { name: name.clone() });
        }

        Ok(SalesforceConfig {
            instance_url,
            environment,
            environments: self.environments,
            app_name: self.app_name,
            api_name: self.api_name,
            enable_oauth: self.enable_oauth.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
            request_timeout: self.request_timeout,
        })
    }
}

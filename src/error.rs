//! Error types for the Salesforce model SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::{ConsumerKey, ConfigError};
//!
//! let result = ConsumerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyConsumerKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Consumer key cannot be empty.
    #[error("Consumer key cannot be empty. Please provide the connected app's consumer key.")]
    EmptyConsumerKey,

    /// Consumer secret cannot be empty.
    #[error("Consumer secret cannot be empty. Please provide the connected app's consumer secret.")]
    EmptyConsumerSecret,

    /// Instance URL is invalid.
    #[error("Invalid instance URL '{url}'. Please provide a URL with scheme (e.g., 'https://cs81.salesforce.com').")]
    InvalidInstanceUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// An environment name is invalid.
    #[error("Invalid environment name '{name}'. Environment names cannot be empty.")]
    InvalidEnvironment {
        /// The invalid environment name that was provided.
        name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

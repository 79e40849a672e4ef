//! # Salesforce Model
//!
//! An ActiveRecord-style layer over the Salesforce REST API. Records are
//! fetched, created and updated through object repositories, and SOQL
//! statements are compiled by a fluent, escaping query builder.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`SalesforceConfig`] and [`SalesforceConfigBuilder`]
//! - Named environments with their own consumer credentials and base URL
//! - Bearer sessions and a swappable [`SessionStore`] for the `Authorization` header
//! - OAuth token response decoding with signature verification via [`auth::token`]
//! - An async HTTP transport with retry and API-usage handling
//! - Record operations via [`SalesforceClient`] and [`SObjectRepository`]
//! - Typed standard objects via [`SObjectResource`] and [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use salesforce_model::{InstanceUrl, SalesforceClient, SalesforceConfig, Session};
//!
//! let config = SalesforceConfig::builder()
//!     .instance_url(InstanceUrl::new("https://na1.salesforce.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let session = Session::new("00Dxx0000001gPL!AR8AQ...", "https://na1.salesforce.com");
//! let client = SalesforceClient::new(config, session).unwrap();
//!
//! let accounts = client.sobject("/services/data/v20.0/sobjects/Account");
//! let sql = accounts.find_where_sql([("Name", "Acme")]).unwrap();
//! assert_eq!(sql, "SELECT Id FROM Account WHERE Name = 'Acme'");
//! ```
//!
//! ## Environments
//!
//! ```rust
//! use salesforce_model::{EnvironmentConfig, InstanceUrl, SalesforceConfig};
//!
//! let config = SalesforceConfig::builder()
//!     .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
//!     .environment("production")
//!     .environment_config(
//!         "production",
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
//!
//! ## Record Operations
//!
//! ```rust,ignore
//! use salesforce_model::SObjectResource;
//! use salesforce_model::rest::resources::Account;
//! use serde_json::{json, Map};
//!
//! let mut data = Map::new();
//! data.insert("Name".into(), json!("Acme"));
//! let mut account = Account::create(&client, data).await?;
//!
//! let mut changes = Map::new();
//! changes.insert("Industry".into(), json!("Manufacturing"));
//! Account::repository(&client).update(&mut account, changes).await?;
//!
//! let query = Account::query(&client).select(["Id", "Name"]).limit(5);
//! let page = Account::repository(&client).execute_query(&query).await?;
//! for row in page.iter() {
//!     println!("{row}");
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction, configs on `build()`
//! - **Typed errors**: Every operation returns a `Result`; nothing is swallowed
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, AuthorizationProvider, Session, SessionStore, TokenResponse};
pub use config::{
    ConsumerKey, ConsumerSecret, EnvironmentConfig, InstanceUrl, Password, SalesforceConfig,
    SalesforceConfigBuilder, API_VERSION,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiUsage, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, Transport,
};

// Re-export record layer types
pub use rest::{
    AttributeBag, QueryBuilder, QueryResult, Record, ResourceDescriptor, ResourceError,
    SObjectRepository, SObjectResource, SalesforceClient,
};

//! ActiveRecord-style access to Salesforce objects.
//!
//! This module provides the record layer on top of the HTTP transport:
//!
//! - **[`ResourceDescriptor`]**: where an object lives (base URL, object path, primary key)
//! - **[`AttributeBag`]** and **[`Record`]**: a record's fields with merge-or-replace fill semantics
//! - **[`SalesforceClient`]**: configuration, authorization and transport in one handle
//! - **[`SObjectRepository`]**: find, create, update, list, query, find-where and describe
//! - **[`SObjectResource`]**: compile-time object types built on the repository
//! - **[`QueryBuilder`]** and [`soql`]: SOQL statements with escaped values
//! - **[`QueryResult`]**: a decoded page of query results
//! - **[`ResourceError`]**: semantic errors for all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_model::rest::SObjectResource;
//! use salesforce_model::rest::resources::Contact;
//! use serde_json::{json, Map};
//!
//! let mut contact = Contact::find(&client, "003xx000004TmiQAAS").await?;
//! println!("{}", contact.get("LastName").unwrap_or(&json!(null)));
//!
//! let mut changes = Map::new();
//! changes.insert("Title".into(), json!("CTO"));
//! Contact::repository(&client).update(&mut contact, changes).await?;
//!
//! let query = Contact::query(&client)
//!     .select(["Id", "Email"])
//!     .where_eq("LastName", "Smith")
//!     .limit(10);
//! if let Some(first) = Contact::repository(&client).execute_query_first(&query).await? {
//!     println!("{first}");
//! }
//! ```

mod attributes;
mod client;
mod descriptor;
mod errors;
mod query;
mod record;
mod repository;
mod resource;
mod response;

pub mod resources;

// Public exports
pub use attributes::AttributeBag;
pub use client::SalesforceClient;
pub use descriptor::{ResourceDescriptor, DEFAULT_PRIMARY_KEY};
pub use errors::ResourceError;
pub use query::{soql, QueryBuilder};
pub use record::Record;
pub use repository::SObjectRepository;
pub use resource::SObjectResource;
pub use response::QueryResult;

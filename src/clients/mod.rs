//! HTTP transport for Salesforce REST communication.
//!
//! This module provides the layer that moves requests and responses
//! between record operations and Salesforce.
//!
//! # Overview
//!
//! - [`Transport`]: The seam used by record operations (GET/POST and PATCH)
//! - [`HttpClient`]: The reqwest-backed transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A response with raw body and parsed headers
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH)
//! - [`ApiUsage`]: Daily API usage from the `Sforce-Limit-Info` header
//!
//! # Retry Behavior
//!
//! - **429 (Too Many Requests)**: Retries using `Retry-After`, or 1 second if not present
//! - **503 (Service Unavailable)**: Retries using `Retry-After`, or 1 second if not present
//! - **Other errors**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`HttpClient::with_tries`] or [`HttpRequestBuilder::tries`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, API_USAGE_WARNING_PERCENT, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiUsage, HttpResponse};
pub use transport::Transport;

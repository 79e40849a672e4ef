//! HTTP response types for the Salesforce model SDK.
//!
//! This module provides the [`HttpResponse`] type and the [`ApiUsage`]
//! counter parsed from Salesforce's `Sforce-Limit-Info` header.

use std::collections::HashMap;

/// Daily API usage parsed from the `Sforce-Limit-Info` header.
///
/// The header format is `api-usage=X/Y` where X is the number of calls made
/// in the last 24 hours and Y is the org's daily allocation.
///
/// # Example
///
/// ```rust
/// use salesforce_model::clients::ApiUsage;
///
/// let usage = ApiUsage::parse("api-usage=18/5000").unwrap();
/// assert_eq!(usage.used, 18);
/// assert_eq!(usage.limit, 5000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiUsage {
    /// Calls made in the current window.
    pub used: u32,
    /// Calls allowed in the current window.
    pub limit: u32,
}

impl ApiUsage {
    /// Parses the `Sforce-Limit-Info` header value.
    ///
    /// Other comma-separated limit entries in the header are ignored.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let counts = header_value
            .split(',')
            .map(str::trim)
            .find_map(|entry| entry.strip_prefix("api-usage="))?;

        let (used, limit) = counts.split_once('/')?;
        Some(Self {
            used: used.trim().parse().ok()?,
            limit: limit.trim().parse().ok()?,
        })
    }

    /// Returns `true` if usage is at or above `percent` of the limit.
    #[must_use]
    pub fn is_near_limit(&self, percent: u32) -> bool {
        self.limit > 0 && u64::from(self.used) * 100 >= u64::from(self.limit) * u64::from(percent)
    }
}

/// An HTTP response from Salesforce.
///
/// The body is kept as raw text; use [`HttpResponse::json`] to decode it.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// API usage (from `Sforce-Limit-Info` header).
    pub api_usage: Option<ApiUsage>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let api_usage = headers
            .get("sforce-limit-info")
            .and_then(|values| values.first())
            .and_then(|value| ApiUsage::parse(value));

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body: body.into(),
            api_usage,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body (for example a 204 No Content) decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// Returns the first value of a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), "");
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), "");
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_json_decodes_body() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"id":"001xyz","success":true}"#);
        assert_eq!(
            response.json().unwrap(),
            json!({"id": "001xyz", "success": true})
        );
    }

    #[test]
    fn test_json_on_empty_body_is_null() {
        let response = HttpResponse::new(204, HashMap::new(), "");
        assert_eq!(response.json().unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_json_on_invalid_body_fails() {
        let response = HttpResponse::new(200, HashMap::new(), "<html>");
        assert!(response.json().is_err());
    }

    #[test]
    fn test_parses_limit_info_and_retry_after() {
        let mut headers = HashMap::new();
        headers.insert(
            "sforce-limit-info".to_string(),
            vec!["api-usage=4600/5000".to_string()],
        );
        headers.insert("retry-after".to_string(), vec!["2.5".to_string()]);

        let response = HttpResponse::new(200, headers, "{}");
        assert_eq!(
            response.api_usage,
            Some(ApiUsage {
                used: 4600,
                limit: 5000
            })
        );
        assert_eq!(response.retry_request_after, Some(2.5));
        assert_eq!(response.header("Retry-After"), Some("2.5"));
    }

    #[test]
    fn test_api_usage_parse_rejects_malformed() {
        assert!(ApiUsage::parse("api-usage=abc/5000").is_none());
        assert!(ApiUsage::parse("per-app-api-usage=1/2").is_none());
        assert!(ApiUsage::parse("").is_none());
    }

    #[test]
    fn test_api_usage_parse_skips_other_entries() {
        let usage = ApiUsage::parse("per-app-api-usage=2/250(appName=x), api-usage=25/5000").unwrap();
        assert_eq!(usage.used, 25);
    }

    #[test]
    fn test_api_usage_near_limit() {
        assert!(ApiUsage { used: 4500, limit: 5000 }.is_near_limit(90));
        assert!(!ApiUsage { used: 4499, limit: 5000 }.is_near_limit(90));
        assert!(!ApiUsage { used: 0, limit: 0 }.is_near_limit(90));
    }
}

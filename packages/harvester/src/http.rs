//! HTTP client wrapper for the eCFR versioner API.
//!
//! Requests are made once. A failed request is reported to the caller and
//! never retried.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("ecfr-harvester/", env!("CARGO_PKG_VERSION"));

/// Accept header value for JSON endpoints.
pub const ACCEPT_JSON: &str = "application/json";

/// Accept header value for full-title XML.
pub const ACCEPT_XML: &str = "application/xml";

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Issue a GET request and return the response whatever its status.
///
/// Transport failures (connection refused, timeouts, invalid URLs) are
/// returned as `HarvesterError::Http`; status handling is up to the caller.
pub fn get(client: &Client, url: &str, accept: &str) -> Result<Response> {
    tracing::debug!(url, accept, "GET");
    let response = client.get(url).header(ACCEPT, accept).send()?;
    tracing::debug!(url, status = %response.status(), "Response received");
    Ok(response)
}

/// Decode a response body as UTF-8, replacing invalid sequences.
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!(context, error = %e, "Response is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

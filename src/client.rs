use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use std::time::Duration;

use crate::constant::USER_AGENT;

/// HTTP client for upstream feeds. Every request is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()?;

    Ok(client)
}

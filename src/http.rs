//! Shared HTTP client construction

use crate::constants::api::USER_AGENT;
use crate::error::Result;
use std::time::Duration;

/// Build a client with the crate User-Agent and a per-request timeout
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

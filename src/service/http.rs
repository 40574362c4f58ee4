use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, Result};

/// Factory for the shared HTTP client (user agent + per-request timeout).
pub fn create_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::network(format!("Failed to build HTTP client: {}", e)))
}

//! Career page fetching with bounded retry and exponential backoff.

use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;

use crate::config::ScrapingConfig;
use crate::error::Result;
use crate::service::http::create_client;

pub struct PageFetcher {
    client: Client,
    retry_attempts: u32,
    retry_delay: f64,
}

impl PageFetcher {
    pub fn new(config: &ScrapingConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(&config.user_agent, Duration::from_secs(config.timeout))?,
            retry_attempts: config.retry_attempts.max(1),
            // Negative delays cannot form a Duration
            retry_delay: config.retry_delay.max(0.0),
        })
    }

    #[cfg(test)]
    pub fn with_client(client: Client, retry_attempts: u32, retry_delay: f64) -> Self {
        Self {
            client,
            retry_attempts: retry_attempts.max(1),
            retry_delay,
        }
    }

    /// Fetch a page body. Transient failures retry with backoff
    /// (`retry_delay * 2^attempt` seconds); exhausting every attempt is a
    /// soft failure returning `None`, never an error.
    pub async fn fetch(&self, url: &str, company_name: &str) -> Option<String> {
        for attempt in 0..self.retry_attempts {
            match self.try_fetch(url).await {
                Ok(body) => return Some(body),
                Err(e) if e.is_timeout() => {
                    tracing::warn!(
                        "[FETCH] Timeout fetching {} (attempt {}/{})",
                        company_name,
                        attempt + 1,
                        self.retry_attempts
                    );
                }
                Err(e) if is_retryable(&e) => {
                    tracing::error!(
                        "[FETCH] Error fetching {} (attempt {}/{}): {}",
                        company_name,
                        attempt + 1,
                        self.retry_attempts,
                        e
                    );
                }
                Err(e) => {
                    tracing::error!("[FETCH] Unexpected error fetching {}: {}", company_name, e);
                    break;
                }
            }

            if attempt + 1 < self.retry_attempts {
                let wait = self.retry_delay * 2f64.powi(attempt as i32);
                tracing::info!("[FETCH] Retrying in {} seconds...", wait);
                sleep(Duration::from_secs_f64(wait)).await;
            }
        }
        None
    }

    async fn try_fetch(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}

/// Timeouts, transport errors and bad statuses are worth another attempt;
/// request-construction failures are not.
fn is_retryable(e: &reqwest::Error) -> bool {
    !e.is_builder() && !e.is_redirect()
}

//! Runtime configuration.
//!
//! Loaded from a TOML file; every field has a default so a missing or
//! unparsable file degrades to the embedded default configuration instead
//! of failing the run.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search_keywords: Vec<String>,
    pub scraping: ScrapingConfig,
    pub notifications: NotificationConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Per-request timeout in seconds
    pub timeout: u64,
    pub retry_attempts: u32,
    /// Base backoff delay in seconds; doubles per attempt
    pub retry_delay: f64,
    /// Politeness delay between companies, in seconds
    pub request_delay: f64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub send_summary: bool,
    pub max_jobs_per_notification: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    /// Accepted for config-file compatibility; backups are not implemented.
    pub backup_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_keywords: [
                "Project Manager",
                "Programme Manager",
                "Program Manager",
                "PM",
                "Technical Project Manager",
                "TPM",
                "Senior Project Manager",
                "Junior Project Manager",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            scraping: ScrapingConfig::default(),
            notifications: NotificationConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            retry_attempts: 3,
            retry_delay: 2.0,
            request_delay: 2.0,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            send_summary: true,
            max_jobs_per_notification: 10,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "jobs_database.json".to_string(),
            backup_enabled: false,
        }
    }
}

impl Config {
    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!("[CONFIG] {:?} not found, using defaults", path);
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!("[CONFIG] Loaded configuration from {:?}", path);
                config.sanitized()
            }
            Err(e) => {
                tracing::error!("[CONFIG] {:#}", e);
                tracing::info!("[CONFIG] Using default configuration");
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values a syntactically valid file can still carry.
    /// Negative delays would otherwise panic when converted to `Duration`.
    pub fn sanitized(mut self) -> Self {
        if self.scraping.retry_delay < 0.0 {
            tracing::warn!(
                "[CONFIG] Negative retry_delay {} clamped to 0",
                self.scraping.retry_delay
            );
            self.scraping.retry_delay = 0.0;
        }
        if self.scraping.request_delay < 0.0 {
            tracing::warn!(
                "[CONFIG] Negative request_delay {} clamped to 0",
                self.scraping.request_delay
            );
            self.scraping.request_delay = 0.0;
        }
        self
    }
}

//! Telegram notifications for new job postings.
//!
//! Credentials come from the process environment; without them the notifier
//! runs disabled and every send short-circuits to `false` after logging.
//! All operations are best-effort and never propagate errors.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::config::NotificationConfig;
use crate::domain::models::JobPosting;
use crate::service::http::create_client;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    enabled: bool,
    send_summary: bool,
}

impl TelegramNotifier {
    /// Build a notifier from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`.
    /// Missing credentials or `notifications.enabled = false` disable it.
    pub fn from_env(config: &NotificationConfig) -> Self {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").unwrap_or_default();
        Self::new(config, TELEGRAM_API_BASE, bot_token, chat_id)
    }

    pub fn new(
        config: &NotificationConfig,
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        let bot_token = bot_token.into();
        let chat_id = chat_id.into();
        let enabled = config.enabled && !bot_token.is_empty() && !chat_id.is_empty();

        if !enabled {
            tracing::warn!(
                "[NOTIFY] Telegram credentials not configured or notifications disabled. \
                 Set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID to enable sends."
            );
        } else {
            tracing::info!("[NOTIFY] Telegram notifier initialized");
        }

        Self {
            client: create_client("jobtracker", SEND_TIMEOUT)
                .unwrap_or_else(|_| Client::new()),
            api_base: api_base.into(),
            bot_token,
            chat_id,
            enabled,
            send_summary: config.send_summary,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Send a raw message through the Bot API. Returns false when disabled
    /// or on any transport failure.
    pub async fn send_message(&self, text: &str) -> bool {
        if !self.enabled {
            tracing::info!("[NOTIFY] Disabled, would send: {}", text);
            return false;
        }

        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": false,
        });

        match self.client.post(&url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("[NOTIFY] Message sent via Telegram");
                true
            }
            Ok(response) => {
                tracing::error!(
                    "[NOTIFY] Telegram rejected message: HTTP {}",
                    response.status()
                );
                false
            }
            Err(e) => {
                tracing::error!("[NOTIFY] Failed to send Telegram message: {}", e);
                false
            }
        }
    }

    /// Send a formatted alert for one new posting.
    pub async fn notify_job(&self, job: &JobPosting) -> bool {
        let message = format!(
            "\u{1F3AF} <b>New Job Posting!</b>\n\n\
             <b>Company:</b> {}\n\
             <b>Position:</b> {}\n\
             <b>Discovered:</b> {}\n\n\
             <b>Apply here:</b> {}\n\n\
             #JobAlert",
            job.company,
            job.title,
            job.first_seen.to_rfc3339(),
            job.url
        );
        self.send_message(&message).await
    }

    /// Send a run summary. Skipped (returns true, no HTTP call) when there
    /// is nothing to report.
    pub async fn notify_summary(
        &self,
        new_jobs_count: usize,
        total_jobs_count: usize,
        errors: usize,
    ) -> bool {
        if !self.send_summary {
            return true;
        }
        if new_jobs_count == 0 && errors == 0 {
            tracing::info!("[NOTIFY] No new jobs or errors, skipping summary");
            return true;
        }

        let emoji = if errors == 0 { "\u{2705}" } else { "\u{26A0}\u{FE0F}" };
        let message = format!(
            "{} <b>Job Tracker Summary</b>\n\n\
             <b>New Jobs Found:</b> {}\n\
             <b>Total Jobs Tracked:</b> {}\n\
             <b>Errors:</b> {}",
            emoji, new_jobs_count, total_jobs_count, errors
        );
        self.send_message(&message).await
    }

    /// Send an error alert.
    pub async fn notify_error(&self, error_message: &str) -> bool {
        let message = format!(
            "\u{274C} <b>Job Tracker Error</b>\n\n{}",
            error_message
        );
        self.send_message(&message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn config() -> NotificationConfig {
        NotificationConfig {
            enabled: true,
            send_summary: true,
            max_jobs_per_notification: 10,
        }
    }

    fn posting() -> JobPosting {
        let now = Utc::now();
        JobPosting {
            company: "Acme".to_string(),
            title: "Senior Project Manager".to_string(),
            url: "https://acme.test/pm-1".to_string(),
            first_seen: now,
            last_seen: now,
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_disable_sends() {
        let notifier = TelegramNotifier::new(&config(), "http://unused.test", "", "");
        assert!(!notifier.is_enabled());
        assert!(!notifier.send_message("hello").await);
        assert!(!notifier.notify_job(&posting()).await);
    }

    #[tokio::test]
    async fn test_config_disabled_overrides_credentials() {
        let mut cfg = config();
        cfg.enabled = false;
        let notifier = TelegramNotifier::new(&cfg, "http://unused.test", "token", "42");
        assert!(!notifier.is_enabled());
        assert!(!notifier.send_message("hello").await);
    }

    #[tokio::test]
    async fn test_notify_job_posts_expected_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bottoken/sendMessage")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::PartialJson(json!({"chat_id": "42"})),
                mockito::Matcher::PartialJson(json!({"parse_mode": "HTML"})),
            ]))
            .with_status(200)
            .with_body("{\"ok\":true}")
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(&config(), server.url(), "token", "42");
        assert!(notifier.notify_job(&posting()).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_returns_false() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(500)
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(&config(), server.url(), "token", "42");
        assert!(!notifier.send_message("hello").await);
    }

    #[tokio::test]
    async fn test_summary_skipped_when_nothing_to_report() {
        // No mock server at all: a skipped summary must not touch the network
        let notifier =
            TelegramNotifier::new(&config(), "http://127.0.0.1:1", "token", "42");
        assert!(notifier.notify_summary(0, 25, 0).await);
    }

    #[tokio::test]
    async fn test_summary_sent_when_new_jobs_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(200)
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(&config(), server.url(), "token", "42");
        assert!(notifier.notify_summary(3, 25, 0).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_summary_sent_when_errors_nonzero() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(200)
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(&config(), server.url(), "token", "42");
        assert!(notifier.notify_summary(0, 25, 1).await);
        mock.assert_async().await;
    }
}

//! Run orchestration.
//!
//! Coordinates the full scrape-extract-diff-persist-notify pipeline:
//! 1. Load the persisted store
//! 2. Fetch and extract candidates per company (serialized, with a
//!    politeness delay between requests)
//! 3. Diff candidates against the store
//! 4. Insert new jobs and persist
//! 5. Notify per new job up to the configured cap, then a run summary

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use url::Url;

use crate::companies::read_company_list;
use crate::config::Config;
use crate::domain::models::{CompanyRow, JobPosting, RunStats};
use crate::error::Result;
use crate::extractor::JobExtractor;
use crate::repository::JobStoreRepository;
use crate::service::fetcher::PageFetcher;
use crate::service::notifier::TelegramNotifier;
use crate::service::diff::identify_new_jobs;

/// Politeness delay between individual notification sends.
const NOTIFY_DELAY: Duration = Duration::from_secs(1);

/// Drives one end-to-end tracker run.
pub struct JobPipeline {
    config: Config,
    fetcher: PageFetcher,
    store_repo: JobStoreRepository,
    notifier: TelegramNotifier,
    notify_delay: Duration,
}

impl JobPipeline {
    pub fn new(
        config: Config,
        store_path: impl Into<PathBuf>,
        notifier: TelegramNotifier,
    ) -> Result<Self> {
        let fetcher = PageFetcher::new(&config.scraping)?;
        Ok(Self {
            config,
            fetcher,
            store_repo: JobStoreRepository::new(store_path),
            notifier,
            notify_delay: NOTIFY_DELAY,
        })
    }

    /// Shorten the inter-notification delay; integration tests use this to
    /// keep capped-notification runs fast.
    pub fn with_notify_delay(mut self, delay: Duration) -> Self {
        self.notify_delay = delay;
        self
    }

    /// Run the pipeline once. Unexpected errors are caught here, reported
    /// through the error channel and reflected in the returned stats; the
    /// process never sees them.
    pub async fn run(&self, companies_path: &Path) -> RunStats {
        tracing::info!("[RUN] Starting job tracker run");

        match self.run_inner(companies_path).await {
            Ok(stats) => {
                tracing::info!(
                    "[RUN] Completed: {} new jobs, {} total, {} errors",
                    stats.new_jobs,
                    stats.total_jobs,
                    stats.errors
                );
                stats
            }
            Err(e) => {
                tracing::error!("[RUN] Critical error in run: {:#}", e);
                self.notifier
                    .notify_error(&format!("Critical error: {:#}", e))
                    .await;
                RunStats {
                    errors: 1,
                    ..RunStats::default()
                }
            }
        }
    }

    async fn run_inner(&self, companies_path: &Path) -> Result<RunStats> {
        let mut store = self.store_repo.load();

        let companies = match read_company_list(companies_path) {
            Ok(rows) => {
                tracing::info!("[RUN] Loaded {} companies from {:?}", rows.len(), companies_path);
                rows
            }
            Err(e) => {
                // Soft failure: an unreadable list means an empty scrape
                tracing::error!("[RUN] {:#}", e);
                Vec::new()
            }
        };

        let candidates = self.scrape_companies(&companies).await;
        if candidates.is_empty() {
            tracing::warn!("[RUN] No jobs found in current scrape");
        }

        let new_jobs = identify_new_jobs(&candidates, &mut store);
        for job in &new_jobs {
            store.insert(job.clone());
        }
        self.store_repo.save(&mut store);

        self.send_notifications(&new_jobs).await;

        let stats = RunStats {
            new_jobs: new_jobs.len(),
            total_jobs: store.jobs.len(),
            errors: 0,
        };
        self.notifier
            .notify_summary(stats.new_jobs, stats.total_jobs, stats.errors)
            .await;

        Ok(stats)
    }

    /// Fetch and extract each company sequentially, with the configured
    /// delay between requests.
    async fn scrape_companies(&self, companies: &[CompanyRow]) -> Vec<JobPosting> {
        let request_delay = Duration::from_secs_f64(self.config.scraping.request_delay.max(0.0));
        let mut candidates = Vec::new();

        for (idx, company) in companies.iter().enumerate() {
            tracing::info!("[RUN] Scraping {}: {}", company.name, company.url);

            let base_url = match Url::parse(&company.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        "[RUN] Skipping {}: invalid URL {}: {}",
                        company.name,
                        company.url,
                        e
                    );
                    continue;
                }
            };

            if let Some(body) = self.fetcher.fetch(&company.url, &company.name).await {
                let jobs = JobExtractor::extract(
                    &body,
                    &base_url,
                    &company.name,
                    &self.config.search_keywords,
                );
                tracing::info!("[RUN] Found {} potential jobs at {}", jobs.len(), company.name);
                candidates.extend(jobs);
            }

            if idx + 1 < companies.len() && !request_delay.is_zero() {
                tracing::debug!(
                    "[RUN] Waiting {:?} before next request",
                    request_delay
                );
                sleep(request_delay).await;
            }
        }

        tracing::info!("[RUN] Total candidates across all companies: {}", candidates.len());
        candidates
    }

    /// One notification per new job, capped; the remainder is logged once.
    async fn send_notifications(&self, new_jobs: &[JobPosting]) {
        let cap = self.config.notifications.max_jobs_per_notification;

        for (idx, job) in new_jobs.iter().enumerate() {
            if idx >= cap {
                tracing::info!(
                    "[NOTIFY] Reached max notifications limit ({}), skipping remaining {} jobs",
                    cap,
                    new_jobs.len() - idx
                );
                break;
            }
            self.notifier.notify_job(job).await;
            if idx + 1 < new_jobs.len().min(cap) && !self.notify_delay.is_zero() {
                sleep(self.notify_delay).await;
            }
        }
    }
}

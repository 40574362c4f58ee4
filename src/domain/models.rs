//! Domain entities - behavior lives WITH data

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Job postings ======

/// A single job posting discovered on a company career page.
///
/// Identity is `(company, url)`, not the title: titles vary in whitespace
/// and casing between scrapes of the same posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub company: String,
    pub title: String,
    pub url: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl JobPosting {
    /// Composite key uniquely identifying this posting in the store.
    pub fn composite_key(&self) -> String {
        format!("{}||{}", self.company, self.url)
    }
}

// ====== Persistent store ======

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreMetadata {
    pub last_updated: Option<DateTime<Utc>>,
    pub total_jobs: usize,
}

/// The persisted job database: composite key -> posting, plus metadata.
///
/// Loaded once per run, mutated in memory, flushed once at the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobStore {
    pub jobs: HashMap<String, JobPosting>,
    pub metadata: StoreMetadata,
}

impl JobStore {
    pub fn contains(&self, key: &str) -> bool {
        self.jobs.contains_key(key)
    }

    pub fn insert(&mut self, posting: JobPosting) {
        self.jobs.insert(posting.composite_key(), posting);
    }
}

// ====== Run statistics ======

/// Per-run counters, returned from the orchestrator and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub new_jobs: usize,
    pub total_jobs: usize,
    pub errors: usize,
}

// ====== Input rows ======

/// One row from the company list: a name and its career page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRow {
    pub name: String,
    pub url: String,
}

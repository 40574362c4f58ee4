//! File-backed job store.
//!
//! The store is a flat JSON document; it must survive restarts, and a
//! missing or corrupt file yields a fresh empty store rather than an error.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::models::JobStore;
use crate::error::{AppError, Result};

pub struct JobStoreRepository {
    path: PathBuf,
}

impl JobStoreRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store. Never fails: missing or malformed files produce a
    /// fresh empty store.
    pub fn load(&self) -> JobStore {
        if !self.path.exists() {
            tracing::info!(
                "[STORE] Database file {:?} not found, creating new store",
                self.path
            );
            return JobStore::default();
        }
        match self.try_load() {
            Ok(store) => {
                tracing::info!("[STORE] Loaded {} jobs from {:?}", store.jobs.len(), self.path);
                store
            }
            Err(e) => {
                tracing::error!("[STORE] {:#}", e);
                tracing::info!("[STORE] Creating new store");
                JobStore::default()
            }
        }
    }

    /// Save the store, refreshing `metadata.last_updated` and
    /// `metadata.total_jobs` first. Returns false on failure (logged).
    pub fn save(&self, store: &mut JobStore) -> bool {
        store.metadata.last_updated = Some(Utc::now());
        store.metadata.total_jobs = store.jobs.len();

        match self.try_save(store) {
            Ok(()) => {
                tracing::info!("[STORE] Saved {} jobs to {:?}", store.jobs.len(), self.path);
                true
            }
            Err(e) => {
                tracing::error!("[STORE] {:#}", e);
                false
            }
        }
    }

    fn try_load(&self) -> Result<JobStore> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::store(format!("Failed to read {:?}: {}", self.path, e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::store(format!("Failed to parse {:?}: {}", self.path, e)))
    }

    fn try_save(&self, store: &JobStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)
            .map_err(|e| AppError::store(format!("Failed to serialize store: {}", e)))?;
        std::fs::write(&self.path, json)
            .map_err(|e| AppError::store(format!("Failed to write {:?}: {}", self.path, e)))
    }
}

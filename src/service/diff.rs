//! New-vs-known partition of scraped candidates.

use crate::domain::models::{JobPosting, JobStore};

/// Compare candidates against the store.
///
/// Unknown keys are returned for the caller to insert; known keys get their
/// stored `last_seen` refreshed in place and are not returned. A duplicate
/// key within one batch resolves last-write-wins for `last_seen`.
pub fn identify_new_jobs(candidates: &[JobPosting], store: &mut JobStore) -> Vec<JobPosting> {
    let mut new_jobs = Vec::new();

    for candidate in candidates {
        let key = candidate.composite_key();
        match store.jobs.get_mut(&key) {
            None => {
                tracing::info!(
                    "[DIFF] New job: {} at {}",
                    candidate.title,
                    candidate.company
                );
                new_jobs.push(candidate.clone());
            }
            Some(existing) => {
                existing.last_seen = candidate.last_seen;
            }
        }
    }

    tracing::info!("[DIFF] Identified {} new jobs", new_jobs.len());
    new_jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn posting(company: &str, url: &str, title: &str) -> JobPosting {
        let now = Utc::now();
        JobPosting {
            company: company.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            first_seen: now,
            last_seen: now,
        }
    }

    #[test]
    fn test_unknown_candidate_is_new() {
        let mut store = JobStore::default();
        let candidates = vec![posting(
            "Acme",
            "https://acme.test/pm-1",
            "Senior Project Manager",
        )];

        let new_jobs = identify_new_jobs(&candidates, &mut store);

        assert_eq!(new_jobs.len(), 1);
        // Caller inserts; diff itself does not touch the map for new keys
        assert!(store.jobs.is_empty());
    }

    #[test]
    fn test_known_candidate_refreshes_last_seen_in_place() {
        let mut store = JobStore::default();
        let mut old = posting("Acme", "https://acme.test/pm-1", "PM");
        old.first_seen = Utc::now() - Duration::days(7);
        old.last_seen = old.first_seen;
        let original_first_seen = old.first_seen;
        store.insert(old);

        let fresh = posting("Acme", "https://acme.test/pm-1", "PM");
        let fresh_last_seen = fresh.last_seen;
        let new_jobs = identify_new_jobs(&[fresh], &mut store);

        assert!(new_jobs.is_empty());
        let stored = &store.jobs["Acme||https://acme.test/pm-1"];
        assert_eq!(stored.last_seen, fresh_last_seen);
        assert_eq!(stored.first_seen, original_first_seen);
    }

    #[test]
    fn test_duplicate_key_in_batch_last_write_wins() {
        let mut store = JobStore::default();
        store.insert(posting("Acme", "https://acme.test/pm-1", "PM"));

        let mut first = posting("Acme", "https://acme.test/pm-1", "PM");
        first.last_seen = Utc::now() - Duration::hours(1);
        let second = posting("Acme", "https://acme.test/pm-1", "PM");
        let winning = second.last_seen;

        let new_jobs = identify_new_jobs(&[first, second], &mut store);

        assert!(new_jobs.is_empty());
        assert_eq!(store.jobs["Acme||https://acme.test/pm-1"].last_seen, winning);
    }

    #[test]
    fn test_same_url_different_company_are_distinct() {
        let mut store = JobStore::default();
        store.insert(posting("Acme", "https://boards.test/pm-1", "PM"));

        let candidates = vec![posting("Globex", "https://boards.test/pm-1", "PM")];
        let new_jobs = identify_new_jobs(&candidates, &mut store);

        assert_eq!(new_jobs.len(), 1);
        assert_eq!(new_jobs[0].company, "Globex");
    }
}

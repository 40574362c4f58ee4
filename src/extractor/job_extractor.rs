use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::Utc;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::models::JobPosting;

/// Structural selectors that tend to capture job posting anchors.
/// Generic on purpose: career sites structure their HTML differently.
const JOB_SELECTORS: &[&str] = &[
    "a[href*=\"job\"]",
    "a[href*=\"career\"]",
    "a[href*=\"position\"]",
    "a.job-title",
    "a.career-link",
    "[class*=\"job\"] a",
    "[class*=\"career\"] a",
    "[class*=\"position\"] a",
];

pub struct JobExtractor;

impl JobExtractor {
    /// Extract keyword-matching job postings from a fetched career page.
    ///
    /// Anchors matched by several selectors collapse to one candidate via
    /// the (absolute url, title) set; returned order is unspecified.
    pub fn extract(
        html: &str,
        base_url: &Url,
        company_name: &str,
        keywords: &[String],
    ) -> Vec<JobPosting> {
        static SELECTORS: OnceLock<Vec<Selector>> = OnceLock::new();
        let selectors = SELECTORS.get_or_init(|| {
            JOB_SELECTORS
                .iter()
                .map(|s| Selector::parse(s).unwrap())
                .collect()
        });

        let document = Html::parse_document(html);

        let mut links: HashSet<(String, String)> = HashSet::new();
        for selector in selectors {
            for element in document.select(selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };
                let Ok(resolved) = base_url.join(href) else {
                    continue;
                };
                let title = element.text().collect::<String>().trim().to_string();
                links.insert((resolved.to_string(), title));
            }
        }
        tracing::debug!(
            "[EXTRACT] {} candidate links on {} page",
            links.len(),
            company_name
        );

        let now = Utc::now();
        links
            .into_iter()
            .filter(|(_, title)| matches_keywords(title, keywords))
            .map(|(url, title)| JobPosting {
                company: company_name.to_string(),
                title,
                url,
                first_seen: now,
                last_seen: now,
            })
            .collect()
    }
}

/// Case-insensitive substring match against any keyword.
///
/// Intentionally permissive: no tokenization or word boundaries, so "PM"
/// matches inside "Upmarket". Accepted imprecision, not a bug to fix.
pub fn matches_keywords(text: &str, keywords: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text_lower.contains(&keyword.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_keywords_case_insensitive() {
        let kw = keywords(&["Project Manager"]);
        assert!(matches_keywords("senior PROJECT manager (remote)", &kw));
        assert!(!matches_keywords("Software Engineer", &kw));
    }

    #[test]
    fn test_matches_keywords_empty_text_is_false() {
        assert!(!matches_keywords("", &keywords(&["PM"])));
        assert!(!matches_keywords("", &[]));
    }

    #[test]
    fn test_matches_keywords_substring_is_permissive() {
        // Known-and-accepted imprecision: "PM" hits inside unrelated words
        assert!(matches_keywords("Upmarket Sales Lead", &keywords(&["PM"])));
    }

    #[test]
    fn test_extract_resolves_relative_hrefs() {
        let base = Url::parse("https://acme.test/careers").unwrap();
        let html = r#"
            <html><body>
                <a href="/jobs/pm-1">Senior Project Manager</a>
                <a href="https://acme.test/jobs/eng-1">Software Engineer</a>
            </body></html>
        "#;
        let jobs = JobExtractor::extract(html, &base, "Acme", &keywords(&["Project Manager"]));

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://acme.test/jobs/pm-1");
        assert_eq!(jobs[0].title, "Senior Project Manager");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].first_seen, jobs[0].last_seen);
    }

    #[test]
    fn test_extract_dedupes_multi_selector_matches() {
        let base = Url::parse("https://acme.test/").unwrap();
        // Matches both a[href*="job"] and [class*="job"] a
        let html = r#"
            <div class="job-listing">
                <a href="/jobs/pm-1">Project Manager</a>
            </div>
        "#;
        let jobs = JobExtractor::extract(html, &base, "Acme", &keywords(&["Project Manager"]));
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_extract_class_hint_selectors() {
        let base = Url::parse("https://acme.test/").unwrap();
        let html = r#"
            <ul class="open-positions">
                <li><a href="/p/123">Technical Project Manager</a></li>
                <li><a href="/p/124">Data Scientist</a></li>
            </ul>
        "#;
        let jobs = JobExtractor::extract(html, &base, "Acme", &keywords(&["Project Manager"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://acme.test/p/123");
    }

    #[test]
    fn test_extract_skips_anchors_without_href() {
        let base = Url::parse("https://acme.test/").unwrap();
        let html = r#"<a class="job-title">Project Manager</a>"#;
        let jobs = JobExtractor::extract(html, &base, "Acme", &keywords(&["Project Manager"]));
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_extract_no_keyword_match_yields_empty() {
        let base = Url::parse("https://acme.test/").unwrap();
        let html = r#"<a href="/jobs/1">Backend Engineer</a>"#;
        let jobs = JobExtractor::extract(html, &base, "Acme", &keywords(&["Project Manager"]));
        assert!(jobs.is_empty());
    }
}

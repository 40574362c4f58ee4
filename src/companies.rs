//! Company list input.
//!
//! Reads the CSV file that provides (company name, career page URL) rows.
//! The header row is matched case-insensitively; both the short `company,url`
//! form and the verbose spreadsheet headers (`Company Name`,
//! `Career Website URL`) are accepted.

use std::path::Path;

use crate::domain::models::CompanyRow;
use crate::error::{AppError, Result};

/// Read the company list, skipping rows without a URL.
///
/// A missing or unreadable file is reported to the caller; the orchestrator
/// downgrades it to an empty-run, not a crash.
pub fn read_company_list(path: &Path) -> Result<Vec<CompanyRow>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::CompanyListError(format!("Failed to read {:?}: {}", path, e))
    })?;
    parse_company_list(&content)
}

fn parse_company_list(content: &str) -> Result<Vec<CompanyRow>> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header = match lines.next() {
        Some(h) => split_csv_line(h),
        None => return Ok(Vec::new()),
    };
    let name_col = find_column(&header, &["company", "company name"]);
    let url_col = find_column(&header, &["url", "career website url"]);
    let (name_col, url_col) = match (name_col, url_col) {
        (Some(n), Some(u)) => (n, u),
        _ => {
            return Err(AppError::CompanyListError(
                "Header must contain company and url columns".to_string(),
            ))
        }
    };

    let mut rows = Vec::new();
    for line in lines {
        let fields = split_csv_line(line);
        let name = fields
            .get(name_col)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
            .to_string();
        let url = fields
            .get(url_col)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if url.is_empty() {
            tracing::warn!("[INPUT] Skipping {}: No URL provided", name);
            continue;
        }
        rows.push(CompanyRow { name, url });
    }
    Ok(rows)
}

fn find_column(header: &[String], names: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

/// Minimal CSV field split: commas separate fields, double quotes group them.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

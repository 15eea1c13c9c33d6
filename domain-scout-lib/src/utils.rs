//! Utility functions for domain strings and candidate lists.
//!
//! Splitting names from TLDs, expanding bare names with TLDs, and reading the
//! newline-delimited and CSV list formats exchanged between pipeline stages.

use crate::error::DomainScoutError;
use crate::types::CheckResult;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::warn;

lazy_static! {
    static ref WELL_FORMED_DOMAIN: Regex =
        Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z]{2,})+$")
            .expect("valid domain pattern");
}

/// Strip the top-level label: everything after the final dot is removed.
///
/// A string without a dot is already a bare name.
pub fn bare_name(domain: &str) -> &str {
    match domain.rsplit_once('.') {
        Some((name, _)) => name,
        None => domain,
    }
}

/// The top-level label (text after the final dot), if any.
pub fn top_level_label(domain: &str) -> Option<&str> {
    domain
        .rsplit_once('.')
        .map(|(_, tld)| tld)
        .filter(|tld| !tld.is_empty())
}

/// Expand domain inputs with TLDs.
///
/// - Entries with a dot are treated as FQDNs and kept as-is
/// - Entries without a dot get one entry per TLD (defaults to `com`)
/// - Empty entries are dropped; output keeps input order without duplicates
pub fn expand_domain_inputs(domains: &[String], tlds: &[String]) -> Vec<String> {
    let default_tlds = ["com".to_string()];
    let tlds: &[String] = if tlds.is_empty() { &default_tlds } else { tlds };

    let mut seen = std::collections::HashSet::new();
    let mut results = Vec::new();

    for domain in domains {
        let trimmed = domain.trim().to_lowercase();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.contains('.') {
            if seen.insert(trimmed.clone()) {
                results.push(trimmed);
            }
        } else {
            for tld in tlds {
                let tld_clean = tld.trim().trim_start_matches('.');
                if tld_clean.is_empty() {
                    continue;
                }
                let fqdn = format!("{}.{}", trimmed, tld_clean.to_lowercase());
                if seen.insert(fqdn.clone()) {
                    results.push(fqdn);
                }
            }
        }
    }

    results
}

/// Parse a newline-delimited domain list.
///
/// Blank lines and lines starting with `#` are ignored, as is anything after
/// an inline `#`.
pub fn parse_domain_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let domain = line.split('#').next().unwrap_or("").trim();
            (!domain.is_empty()).then(|| domain.to_string())
        })
        .collect()
}

/// Read a newline-delimited domain list from a file.
///
/// A missing file is an input error for the calling stage.
pub fn read_domain_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DomainScoutError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DomainScoutError::file_error(
            path.to_string_lossy(),
            "Domain file not found",
        ));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        DomainScoutError::file_error(path.to_string_lossy(), format!("Failed to read: {}", e))
    })?;

    Ok(parse_domain_list(&content))
}

/// Parse check-result records for the ranking stage.
///
/// Accepts either a CSV of `domain,available[,...]` rows or a plain list of
/// domains, which are all taken to be available. A first row whose first
/// column reads `domain` is a header. Rows whose availability column reads
/// `false` are kept with `available == false` so callers can decide what to
/// do with them; rows with an unreadable flag are skipped with a warning.
pub fn parse_check_records(content: &str) -> Result<Vec<CheckResult>, DomainScoutError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    let mut first_row = true;

    for row in reader.records() {
        let row = row?;
        let domain = match row.get(0) {
            Some(d) if !d.is_empty() => d,
            _ => continue,
        };

        if std::mem::take(&mut first_row) && domain.eq_ignore_ascii_case("domain") {
            continue;
        }

        let available = match row.get(1) {
            None | Some("") => true,
            Some(flag) => match parse_flag(flag) {
                Some(available) => available,
                None => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    warn!(line, domain, flag, "unreadable availability flag, skipping row");
                    continue;
                }
            },
        };

        records.push(CheckResult::new(domain.to_lowercase(), available));
    }

    Ok(records)
}

/// Read check-result records from a file. See [`parse_check_records`].
pub fn read_check_records<P: AsRef<Path>>(path: P) -> Result<Vec<CheckResult>, DomainScoutError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DomainScoutError::file_error(
            path.to_string_lossy(),
            "Input file not found",
        ));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        DomainScoutError::file_error(path.to_string_lossy(), format!("Failed to read: {}", e))
    })?;

    parse_check_records(&content).map_err(|e| {
        DomainScoutError::file_error(path.to_string_lossy(), e.to_string())
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Whether a TLD-qualified domain has a well-formed shape: alphanumeric
/// first label of at most 63 characters with inner hyphens, followed by one
/// or more alphabetic labels of two or more letters.
pub fn is_well_formed_domain(domain: &str) -> bool {
    WELL_FORMED_DOMAIN.is_match(domain)
}

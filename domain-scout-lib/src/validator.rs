//! Structural validity rules for candidate names.
//!
//! The same predicate is applied to every string the generator produces and
//! can be used on its own to filter externally supplied lists.

use crate::config::GenerationConfig;

/// Length, charset, forbidden-substring and hyphen rules for a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateValidator {
    min_length: usize,
    max_length: usize,
    forbidden: Vec<String>,
}

impl CandidateValidator {
    pub fn new(min_length: usize, max_length: usize, forbidden: Vec<String>) -> Self {
        Self {
            min_length,
            max_length,
            forbidden,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.min_length,
            config.max_length,
            config.excluded_patterns.clone(),
        )
    }

    /// Check a candidate against every rule.
    ///
    /// Length is counted in characters. A string passes only if:
    /// - its length lies within `[min_length, max_length]`
    /// - it contains none of the forbidden substrings
    /// - every character is an ASCII lowercase letter, a digit or `-`
    /// - it has no `--` and does not start or end with `-`
    pub fn is_valid(&self, candidate: &str) -> bool {
        let length = candidate.chars().count();
        if length < self.min_length || length > self.max_length {
            return false;
        }

        if self
            .forbidden
            .iter()
            .any(|pattern| !pattern.is_empty() && candidate.contains(pattern.as_str()))
        {
            return false;
        }

        if !candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return false;
        }

        !(candidate.contains("--") || candidate.starts_with('-') || candidate.ends_with('-'))
    }
}

impl Default for CandidateValidator {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

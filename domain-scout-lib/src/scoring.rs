//! Domain scoring and ranking.
//!
//! Scores are integers computed from the bare name (the domain minus its
//! top-level label):
//!
//! ```text
//! score = base_score
//!       - (syllables - syllable_threshold) * syllable_penalty
//!       - len(bare_name) * length_penalty
//!       + bonus for every category word found in the name
//!       + bonus for every special combination present
//!       - penalty for every penalty rule that matches
//! ```
//!
//! Ranking keeps available entries only and orders them with
//! [`RankedEntry`]'s total order.

use crate::config::ScoutConfig;
use crate::syllables::name_syllables;
use crate::types::{CheckResult, RankedEntry};
use crate::utils::bare_name;
use tracing::debug;

/// Applies one configuration's scoring rules.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    config: &'a ScoutConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a ScoutConfig) -> Self {
        Self { config }
    }

    /// Score a domain, TLD-qualified or bare.
    pub fn score(&self, domain: &str) -> i64 {
        let name = bare_name(domain).to_lowercase();
        self.score_bare(&name, name_syllables(&name))
    }

    /// Score and measure a domain for ranking.
    pub fn entry(&self, domain: &str) -> RankedEntry {
        let name = bare_name(domain).to_lowercase();
        let syllables = name_syllables(&name);
        RankedEntry {
            domain: domain.to_string(),
            score: self.score_bare(&name, syllables),
            syllables,
            length: name.chars().count(),
        }
    }

    fn score_bare(&self, name: &str, syllables: u32) -> i64 {
        let scoring = &self.config.scoring;
        let length = name.chars().count() as i64;

        let mut score = scoring.base_score;
        score -= (i64::from(syllables) - scoring.syllable_threshold) * scoring.syllable_penalty;
        score -= length * scoring.length_penalty;

        for (_, category) in self.config.categories() {
            let hits = category
                .words
                .iter()
                .filter(|word| !word.is_empty() && name.contains(word.as_str()))
                .count() as i64;
            score += hits * category.bonus;
        }

        for combo in &self.config.special_combinations {
            let primary = !combo.primary.is_empty() && name.contains(combo.primary.as_str());
            if primary
                && combo
                    .secondary
                    .iter()
                    .any(|s| !s.is_empty() && name.contains(s.as_str()))
            {
                score += combo.bonus;
            }
        }

        for rule in self.config.penalties.values() {
            if rule
                .patterns
                .iter()
                .any(|p| !p.is_empty() && name.contains(p.as_str()))
            {
                score -= rule.penalty;
            }
        }

        score
    }
}

/// Score a single domain against a configuration.
pub fn score_domain(domain: &str, config: &ScoutConfig) -> i64 {
    Scorer::new(config).score(domain)
}

/// Score every available result, optionally drop entries above `max_syllables`,
/// and sort best first.
pub fn rank_domains(
    results: &[CheckResult],
    config: &ScoutConfig,
    max_syllables: Option<u32>,
) -> Vec<RankedEntry> {
    let scorer = Scorer::new(config);

    let mut ranked: Vec<RankedEntry> = results
        .iter()
        .filter(|r| r.available)
        .map(|r| scorer.entry(&r.domain))
        .filter(|e| max_syllables.map_or(true, |max| e.syllables <= max))
        .collect();

    ranked.sort();
    debug!(
        input = results.len(),
        ranked = ranked.len(),
        "ranked available domains"
    );
    ranked
}

//! Candidate name generation engine.
//!
//! Expands keyword categories into bare candidate names using the pattern
//! toggles in [`PatternConfig`](crate::config::PatternConfig). Every produced
//! string passes through the same [`CandidateValidator`], the per-pattern sets
//! are unioned, and the result is reported in ascending order. TLD
//! qualification is left to [`DomainSettings::qualify`](crate::config::DomainSettings::qualify).
//!
//! # Patterns
//!
//! - single word: every category word
//! - two-word combo: words of two different categories, both orders
//! - prefix / suffix: each affix with every distinct word
//! - creative suffix: like suffix, but `ify` and `ly` drop a trailing `e`/`y`
//! - special combination: primary + secondary, both orders
//! - compound: `word1-word2` for distinct words of at most 8 characters
//!
//! # Examples
//!
//! ```
//! use domain_scout_lib::config::{KeywordCategory, ScoutConfig};
//! use domain_scout_lib::generate::generate_candidates;
//!
//! let mut config = ScoutConfig::default();
//! config.generation.patterns.single_word = false;
//! config.keyword_categories.insert(
//!     "a".into(),
//!     KeywordCategory { words: vec!["push".into()], bonus: 0 },
//! );
//! config.keyword_categories.insert(
//!     "b".into(),
//!     KeywordCategory { words: vec!["sync".into()], bonus: 0 },
//! );
//!
//! let result = generate_candidates(&config, None);
//! assert_eq!(result.names, vec!["pushsync", "syncpush"]);
//! ```

use crate::config::ScoutConfig;
use crate::syllables::name_syllables;
use crate::types::GenerationResult;
use crate::validator::CandidateValidator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Creative suffixes that elide a trailing `e` or `y` of the base word.
pub const ELIDING_SUFFIXES: &[&str] = &["ify", "ly"];

/// Longest word used in hyphenated compounds.
pub const COMPOUND_WORD_MAX_LEN: usize = 8;

/// Distinct words across all categories, in ascending order.
pub fn word_union(config: &ScoutConfig) -> Vec<String> {
    config
        .keyword_categories
        .values()
        .flat_map(|category| category.words.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn keep_valid<I>(validator: &CandidateValidator, candidates: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .filter(|c| validator.is_valid(c))
        .collect()
}

/// Every word of every category.
pub fn single_words(config: &ScoutConfig, validator: &CandidateValidator) -> BTreeSet<String> {
    keep_valid(validator, word_union(config))
}

/// Words from each unordered pair of distinct categories, joined in both orders.
pub fn two_word_combos(config: &ScoutConfig, validator: &CandidateValidator) -> BTreeSet<String> {
    let categories: Vec<_> = config.keyword_categories.values().collect();
    let mut out = BTreeSet::new();

    for (i, first) in categories.iter().enumerate() {
        for second in &categories[i + 1..] {
            for a in &first.words {
                for b in &second.words {
                    out.extend(keep_valid(
                        validator,
                        [format!("{}{}", a, b), format!("{}{}", b, a)],
                    ));
                }
            }
        }
    }

    out
}

/// Each prefix followed by every distinct word.
pub fn prefixed_words(
    words: &[String],
    prefixes: &[String],
    validator: &CandidateValidator,
) -> BTreeSet<String> {
    keep_valid(
        validator,
        prefixes
            .iter()
            .flat_map(|prefix| words.iter().map(move |word| format!("{}{}", prefix, word))),
    )
}

/// Every distinct word followed by each suffix.
pub fn suffixed_words(
    words: &[String],
    suffixes: &[String],
    validator: &CandidateValidator,
) -> BTreeSet<String> {
    keep_valid(
        validator,
        suffixes
            .iter()
            .flat_map(|suffix| words.iter().map(move |word| format!("{}{}", word, suffix))),
    )
}

/// Join a word with a creative suffix, eliding a trailing `e`/`y` when the
/// suffix is one of [`ELIDING_SUFFIXES`].
pub fn apply_creative_suffix(word: &str, suffix: &str) -> String {
    let base = if ELIDING_SUFFIXES.contains(&suffix) && (word.ends_with('e') || word.ends_with('y'))
    {
        &word[..word.len() - 1]
    } else {
        word
    };
    format!("{}{}", base, suffix)
}

/// Every distinct word with each creative suffix.
pub fn creative_words(
    words: &[String],
    suffixes: &[String],
    validator: &CandidateValidator,
) -> BTreeSet<String> {
    keep_valid(
        validator,
        suffixes.iter().flat_map(|suffix| {
            words
                .iter()
                .map(move |word| apply_creative_suffix(word, suffix))
        }),
    )
}

/// Configured primary/secondary pairs, both orders.
pub fn special_pairs(config: &ScoutConfig, validator: &CandidateValidator) -> BTreeSet<String> {
    keep_valid(
        validator,
        config.special_combinations.iter().flat_map(|combo| {
            combo.secondary.iter().flat_map(move |secondary| {
                [
                    format!("{}{}", combo.primary, secondary),
                    format!("{}{}", secondary, combo.primary),
                ]
            })
        }),
    )
}

/// Hyphenated `word1-word2` for every ordered pair of distinct short words.
pub fn compound_variations(words: &[String], validator: &CandidateValidator) -> BTreeSet<String> {
    let short: Vec<&String> = words
        .iter()
        .filter(|w| w.chars().count() <= COMPOUND_WORD_MAX_LEN)
        .collect();

    let mut out = BTreeSet::new();
    for first in &short {
        for second in &short {
            if first != second {
                let candidate = format!("{}-{}", first, second);
                if validator.is_valid(&candidate) {
                    out.insert(candidate);
                }
            }
        }
    }
    out
}

/// Run every enabled pattern and return the full, uncapped union.
pub fn generate_all(config: &ScoutConfig) -> BTreeSet<String> {
    let validator = CandidateValidator::from_config(&config.generation);
    let patterns = &config.generation.patterns;
    let words = word_union(config);
    let mut all = BTreeSet::new();

    info!(unique_words = words.len(), "generating candidates");

    let mut run = |label: &str, produced: BTreeSet<String>| {
        info!(pattern = label, count = produced.len(), "pattern expanded");
        all.extend(produced);
    };

    if patterns.single_word {
        run("single_word", single_words(config, &validator));
    }
    if patterns.two_word_combo {
        run("two_word_combo", two_word_combos(config, &validator));
    }
    if !patterns.prefix_patterns.is_empty() {
        run(
            "prefix",
            prefixed_words(&words, &patterns.prefix_patterns, &validator),
        );
    }
    if !patterns.suffix_patterns.is_empty() {
        run(
            "suffix",
            suffixed_words(&words, &patterns.suffix_patterns, &validator),
        );
    }
    if !patterns.creative_suffixes.is_empty() {
        run(
            "creative_suffix",
            creative_words(&words, &patterns.creative_suffixes, &validator),
        );
    }
    if patterns.special_combinations {
        run("special_combination", special_pairs(config, &validator));
    }
    if patterns.compound_words {
        run("compound", compound_variations(&words, &validator));
    }

    all
}

/// Generate candidates and enforce `max_syllables` and `max_domains`.
///
/// When the union exceeds `max_domains`, a uniform random sample without
/// replacement is taken. Pass a seed for reproducible samples; without one the
/// thread RNG is used. Output is always sorted ascending.
pub fn generate_candidates(config: &ScoutConfig, seed: Option<u64>) -> GenerationResult {
    let mut names: Vec<String> = generate_all(config).into_iter().collect();

    if let Some(limit) = config.generation.max_syllables {
        let before = names.len();
        names.retain(|name| name_syllables(name) <= limit);
        debug!(
            limit,
            dropped = before - names.len(),
            "applied syllable filter"
        );
    }

    let total_generated = names.len();
    let cap = config.generation.max_domains;

    if total_generated <= cap {
        return GenerationResult {
            names,
            total_generated,
            sampled: false,
        };
    }

    info!(cap, total = total_generated, "limiting output by random sample");
    let names = match seed {
        Some(seed) => sample(&names, cap, &mut StdRng::seed_from_u64(seed)),
        None => sample(&names, cap, &mut rand::thread_rng()),
    };

    GenerationResult {
        names,
        total_generated,
        sampled: true,
    }
}

fn sample<R: Rng + ?Sized>(names: &[String], cap: usize, rng: &mut R) -> Vec<String> {
    let mut picked: Vec<String> = names.choose_multiple(rng, cap).cloned().collect();
    picked.sort();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeywordCategory, SpecialCombination};

    fn category(words: &[&str]) -> KeywordCategory {
        KeywordCategory {
            words: words.iter().map(|w| w.to_string()).collect(),
            bonus: 0,
        }
    }

    fn config_with(categories: &[(&str, &[&str])]) -> ScoutConfig {
        let mut config = ScoutConfig::default();
        for (name, words) in categories {
            config
                .keyword_categories
                .insert(name.to_string(), category(words));
        }
        config
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── Patterns ────────────────────────────────────────────────────

    #[test]
    fn test_two_word_combos_both_orders() {
        let mut config = config_with(&[("a", &["push"]), ("b", &["sync"])]);
        config.generation.patterns.single_word = false;

        let result = generate_candidates(&config, None);
        assert_eq!(result.names, strings(&["pushsync", "syncpush"]));
        assert!(!result.sampled);
    }

    #[test]
    fn test_two_word_combos_skip_same_category() {
        let config = config_with(&[("a", &["push", "sync"])]);
        let validator = CandidateValidator::default();
        assert!(two_word_combos(&config, &validator).is_empty());
    }

    #[test]
    fn test_single_words_filtered_by_length() {
        let config = config_with(&[("a", &["ai", "cloud"]), ("b", &["data"])]);
        let validator = CandidateValidator::from_config(&config.generation);
        let singles = single_words(&config, &validator);
        assert_eq!(singles.into_iter().collect::<Vec<_>>(), strings(&["cloud", "data"]));
    }

    #[test]
    fn test_prefix_and_suffix() {
        let words = strings(&["cloud", "sync"]);
        let validator = CandidateValidator::default();

        let pre = prefixed_words(&words, &strings(&["get"]), &validator);
        assert!(pre.contains("getcloud"));
        assert!(pre.contains("getsync"));

        let suf = suffixed_words(&words, &strings(&["hub"]), &validator);
        assert!(suf.contains("cloudhub"));
        assert!(suf.contains("synchub"));
    }

    #[test]
    fn test_creative_suffix_elision() {
        assert_eq!(apply_creative_suffix("share", "ify"), "sharify");
        assert_eq!(apply_creative_suffix("easy", "ly"), "easly");
        assert_eq!(apply_creative_suffix("sync", "ify"), "syncify");
        assert_eq!(apply_creative_suffix("store", "io"), "storeio");
    }

    #[test]
    fn test_special_pairs_both_orders() {
        let mut config = ScoutConfig::default();
        config.special_combinations.push(SpecialCombination {
            primary: "sync".to_string(),
            secondary: strings(&["link", "hub"]),
            bonus: 10,
        });
        let validator = CandidateValidator::default();
        let pairs = special_pairs(&config, &validator);
        assert_eq!(
            pairs.into_iter().collect::<Vec<_>>(),
            strings(&["hubsync", "linksync", "synchub", "synclink"])
        );
    }

    #[test]
    fn test_compound_variations_use_short_words_only() {
        let words = strings(&["push", "sync", "platforms"]);
        let validator = CandidateValidator::default();
        let compounds = compound_variations(&words, &validator);
        assert_eq!(
            compounds.into_iter().collect::<Vec<_>>(),
            strings(&["push-sync", "sync-push"])
        );
    }

    #[test]
    fn test_compound_words_off_by_default() {
        let config = config_with(&[("a", &["push", "sync"])]);
        let result = generate_candidates(&config, None);
        assert!(result.names.iter().all(|n| !n.contains('-')));
    }

    // ── Pipeline ────────────────────────────────────────────────────

    #[test]
    fn test_every_candidate_is_valid() {
        let mut config = config_with(&[
            ("a", &["push", "sync", "data"]),
            ("b", &["link", "cloud", "hub"]),
        ]);
        config.generation.excluded_patterns = strings(&["ush"]);
        config.generation.patterns.prefix_patterns = strings(&["get", "my"]);
        config.generation.patterns.creative_suffixes = strings(&["ify", "ly"]);
        config.generation.patterns.compound_words = true;

        let validator = CandidateValidator::from_config(&config.generation);
        let result = generate_candidates(&config, None);
        assert!(!result.names.is_empty());
        for name in &result.names {
            assert!(validator.is_valid(name), "{}", name);
            assert!(!name.contains("ush"));
        }
    }

    #[test]
    fn test_output_sorted_and_unique() {
        let config = config_with(&[("a", &["sync", "link"]), ("b", &["link", "push"])]);
        let result = generate_candidates(&config, None);

        let mut expected = result.names.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(result.names, expected);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let config = config_with(&[("a", &["sync", "link"]), ("b", &["push", "data"])]);
        assert_eq!(
            generate_candidates(&config, None),
            generate_candidates(&config, None)
        );
    }

    #[test]
    fn test_max_syllables_filter() {
        let mut config = config_with(&[("a", &["sync", "radio"])]);
        config.generation.max_syllables = Some(1);
        let result = generate_candidates(&config, None);
        assert_eq!(result.names, strings(&["sync"]));
    }

    // ── Sampling ────────────────────────────────────────────────────

    #[test]
    fn test_cap_samples_subset() {
        let mut config = config_with(&[
            ("a", &["push", "sync", "data"]),
            ("b", &["link", "cloud", "flow"]),
        ]);
        let full = generate_all(&config);
        config.generation.max_domains = 5;

        let result = generate_candidates(&config, Some(7));
        assert!(result.sampled);
        assert_eq!(result.names.len(), 5);
        assert_eq!(result.total_generated, full.len());
        assert!(result.names.iter().all(|n| full.contains(n)));

        let mut sorted = result.names.clone();
        sorted.sort();
        assert_eq!(result.names, sorted);
    }

    #[test]
    fn test_seeded_sample_is_reproducible() {
        let mut config = config_with(&[
            ("a", &["push", "sync", "data"]),
            ("b", &["link", "cloud", "flow"]),
        ]);
        config.generation.max_domains = 4;

        let first = generate_candidates(&config, Some(42));
        let second = generate_candidates(&config, Some(42));
        assert_eq!(first.names, second.names);
    }

    #[test]
    fn test_empty_config_generates_nothing() {
        let result = generate_candidates(&ScoutConfig::default(), Some(1));
        assert!(result.names.is_empty());
        assert_eq!(result.total_generated, 0);
    }
}

//! Configuration document parsing and management.
//!
//! The naming search is driven by one document with six sections:
//! `generation`, `keyword_categories`, `special_combinations`, `scoring`,
//! `penalties` and `domain_settings`. Every section is optional; defaults are
//! applied once here, at load time, so the rest of the pipeline never deals
//! with absent values.
//!
//! JSON is the primary format. Files ending in `.toml` are parsed as TOML with
//! the same schema.

use crate::error::DomainScoutError;
use crate::types::CheckConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Name of the category added by [`ScoutConfig::with_custom_keywords`].
pub const CUSTOM_CATEGORY: &str = "custom";

/// The complete configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoutConfig {
    /// Candidate validity rules and pattern toggles
    pub generation: GenerationConfig,

    /// Keyword categories by name
    pub keyword_categories: BTreeMap<String, KeywordCategory>,

    /// Primary/secondary token pairs that earn a bonus together
    pub special_combinations: Vec<SpecialCombination>,

    /// Numeric scoring weights
    pub scoring: ScoringConfig,

    /// Named penalty rules
    pub penalties: BTreeMap<String, PenaltyRule>,

    /// TLD handling for generated output
    pub domain_settings: DomainSettings,
}

/// Candidate generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Shortest accepted candidate (inclusive)
    pub min_length: usize,

    /// Longest accepted candidate (inclusive)
    pub max_length: usize,

    /// Substrings that disqualify a candidate
    pub excluded_patterns: Vec<String>,

    /// Cap on the number of emitted candidates
    pub max_domains: usize,

    /// Drop candidates estimated above this many syllables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_syllables: Option<u32>,

    /// Which generation patterns run
    pub patterns: PatternConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_length: 4,
            max_length: 20,
            excluded_patterns: Vec::new(),
            max_domains: 2000,
            max_syllables: None,
            patterns: PatternConfig::default(),
        }
    }
}

/// Pattern toggles. Affix lists double as toggles: an empty list disables the pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub single_word: bool,
    pub two_word_combo: bool,
    pub prefix_patterns: Vec<String>,
    pub suffix_patterns: Vec<String>,
    pub creative_suffixes: Vec<String>,
    pub special_combinations: bool,
    /// Hyphenated `word1-word2` compounds; quadratic in the word count
    pub compound_words: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            single_word: true,
            two_word_combo: true,
            prefix_patterns: Vec::new(),
            suffix_patterns: Vec::new(),
            creative_suffixes: Vec::new(),
            special_combinations: true,
            compound_words: false,
        }
    }
}

/// A named group of keywords with a scoring bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeywordCategory {
    pub words: Vec<String>,
    pub bonus: i64,
}

/// A primary token and the secondary tokens it pairs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpecialCombination {
    pub primary: String,
    pub secondary: Vec<String>,
    pub bonus: i64,
}

/// Numeric scoring weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: i64,
    pub syllable_penalty: i64,
    pub syllable_threshold: i64,
    pub length_penalty: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            syllable_penalty: 20,
            syllable_threshold: 2,
            length_penalty: 2,
        }
    }
}

/// Substrings that cost points when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PenaltyRule {
    pub patterns: Vec<String>,
    pub penalty: i64,
}

/// TLD settings for generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainSettings {
    pub default_tld: String,
    pub append_tld_to_output: bool,
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            default_tld: "com".to_string(),
            append_tld_to_output: true,
        }
    }
}

impl DomainSettings {
    /// Qualify a bare candidate for output, honoring `append_tld_to_output`.
    pub fn qualify(&self, name: &str) -> String {
        if self.append_tld_to_output {
            format!("{}.{}", name, self.default_tld)
        } else {
            name.to_string()
        }
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl ScoutConfig {
    /// Parse a document from a string and apply normalization.
    pub fn from_str_with_format(
        content: &str,
        format: ConfigFormat,
    ) -> Result<Self, DomainScoutError> {
        let mut config: ScoutConfig = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.normalize();
        Ok(config)
    }

    /// Lowercase and trim every token so generation and scoring see the same strings.
    pub fn normalize(&mut self) {
        fn clean(list: &mut Vec<String>) {
            for item in list.iter_mut() {
                *item = item.trim().to_lowercase();
            }
            list.retain(|w| !w.is_empty());
        }

        clean(&mut self.generation.excluded_patterns);
        clean(&mut self.generation.patterns.prefix_patterns);
        clean(&mut self.generation.patterns.suffix_patterns);
        clean(&mut self.generation.patterns.creative_suffixes);

        for category in self.keyword_categories.values_mut() {
            clean(&mut category.words);
        }
        for combo in &mut self.special_combinations {
            combo.primary = combo.primary.trim().to_lowercase();
            clean(&mut combo.secondary);
        }
        for rule in self.penalties.values_mut() {
            clean(&mut rule.patterns);
        }

        let tld = self.domain_settings.default_tld.trim().trim_start_matches('.');
        self.domain_settings.default_tld = tld.to_lowercase();
    }

    /// Add (or replace) the `custom` keyword category.
    pub fn with_custom_keywords(mut self, words: Vec<String>, bonus: i64) -> Self {
        self.keyword_categories.insert(
            CUSTOM_CATEGORY.to_string(),
            KeywordCategory { words, bonus },
        );
        self.normalize();
        self
    }

    /// Iterate categories as (name, category) pairs, in name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &KeywordCategory)> {
        self.keyword_categories
            .iter()
            .map(|(name, category)| (name.as_str(), category))
    }
}

/// Default fallback search order used when no explicit path is given.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "config/rank_config.json",
    "rank_config.json",
    "../config/rank_config.json",
    "config/examples/saas_startup.json",
];

/// Configuration discovery and loading.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a manager with the default fallback search order.
    pub fn new() -> Self {
        Self {
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Create a manager with a custom fallback search order.
    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The fallback search order, first match wins.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file is a fatal configuration error; there is no fallback
    /// once the caller has named a path.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<ScoutConfig, DomainScoutError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainScoutError::config(format!(
                "Config file '{}' not found",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainScoutError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config = ScoutConfig::from_str_with_format(&content, ConfigFormat::from_path(path))
            .map_err(|e| match e {
                DomainScoutError::ConfigError { message } => DomainScoutError::config(format!(
                    "{} (in '{}')",
                    message,
                    path.display()
                )),
                other => other,
            })?;

        self.validate_config(&config)?;
        debug!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    /// Walk the fallback search order and load the first file that exists.
    pub fn discover_and_load(&self) -> Result<(PathBuf, ScoutConfig), DomainScoutError> {
        for candidate in &self.search_paths {
            if candidate.exists() {
                info!(path = %candidate.display(), "using configuration");
                let config = self.load_file(candidate)?;
                return Ok((candidate.clone(), config));
            }
        }

        let searched: Vec<String> = self
            .search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        Err(DomainScoutError::config(format!(
            "No configuration file found (searched: {})",
            searched.join(", ")
        )))
    }

    /// Load an explicit file when given, otherwise discover one.
    pub fn load(&self, explicit: Option<&Path>) -> Result<ScoutConfig, DomainScoutError> {
        match explicit {
            Some(path) => self.load_file(path),
            None => self.discover_and_load().map(|(_, config)| config),
        }
    }

    /// Validate a configuration for common issues.
    pub fn validate_config(&self, config: &ScoutConfig) -> Result<(), DomainScoutError> {
        let generation = &config.generation;

        if generation.min_length == 0 {
            return Err(DomainScoutError::config(
                "generation.min_length must be at least 1",
            ));
        }
        if generation.min_length > generation.max_length {
            return Err(DomainScoutError::config(format!(
                "generation.min_length ({}) exceeds generation.max_length ({})",
                generation.min_length, generation.max_length
            )));
        }
        if generation.max_domains == 0 {
            return Err(DomainScoutError::config(
                "generation.max_domains must be at least 1",
            ));
        }
        if generation.max_syllables == Some(0) {
            return Err(DomainScoutError::config(
                "generation.max_syllables must be at least 1",
            ));
        }

        for name in config.keyword_categories.keys() {
            if name.trim().is_empty() {
                return Err(DomainScoutError::config(
                    "Keyword category names cannot be empty",
                ));
            }
        }

        for (i, combo) in config.special_combinations.iter().enumerate() {
            if combo.primary.is_empty() {
                return Err(DomainScoutError::config(format!(
                    "special_combinations[{}] has an empty primary token",
                    i
                )));
            }
        }

        let tld = &config.domain_settings.default_tld;
        if tld.is_empty() || tld.contains('.') || !tld.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(DomainScoutError::config(format!(
                "Invalid domain_settings.default_tld '{}'",
                tld
            )));
        }

        Ok(())
    }
}

/// Verifier settings read from `DS_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub rate_limit: Option<Duration>,
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Overlay the values that are set onto a check configuration.
    pub fn apply(&self, mut config: CheckConfig) -> CheckConfig {
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(rate_limit) = self.rate_limit {
            config = config.with_rate_limit(rate_limit);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(retries) = self.retries {
            config = config.with_retry_count(retries);
        }
        config
    }
}

/// Load configuration from the process environment.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

/// Load environment configuration through an arbitrary variable lookup.
pub fn load_env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    if let Some(val) = lookup("DS_CONCURRENCY") {
        match val.trim().parse::<usize>() {
            Ok(concurrency) if (1..=100).contains(&concurrency) => {
                debug!(concurrency, "using DS_CONCURRENCY");
                env_config.concurrency = Some(concurrency);
            }
            _ => warn!("Invalid DS_CONCURRENCY='{}', must be 1-100", val),
        }
    }

    if let Some(val) = lookup("DS_RATE_LIMIT") {
        match parse_seconds(&val) {
            Some(rate_limit) => {
                debug!(?rate_limit, "using DS_RATE_LIMIT");
                env_config.rate_limit = Some(rate_limit);
            }
            None => warn!("Invalid DS_RATE_LIMIT='{}', use seconds like '0.1'", val),
        }
    }

    if let Some(val) = lookup("DS_TIMEOUT") {
        match parse_timeout_string(&val) {
            Some(secs) if secs > 0 => {
                debug!(secs, "using DS_TIMEOUT");
                env_config.timeout = Some(Duration::from_secs(secs));
            }
            _ => warn!(
                "Invalid DS_TIMEOUT='{}', use format like '5s', '30s', '2m'",
                val
            ),
        }
    }

    if let Some(val) = lookup("DS_RETRIES") {
        match val.trim().parse::<u32>() {
            Ok(retries) => {
                debug!(retries, "using DS_RETRIES");
                env_config.retries = Some(retries);
            }
            Err(_) => warn!("Invalid DS_RETRIES='{}', must be a whole number", val),
        }
    }

    if let Some(path) = lookup("DS_CONFIG") {
        if !path.trim().is_empty() {
            debug!(path = %path, "using DS_CONFIG");
            env_config.config = Some(path);
        }
    }

    env_config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}

/// Parse a non-negative, possibly fractional, number of seconds.
pub fn parse_seconds(value: &str) -> Option<Duration> {
    let secs = value.trim().parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

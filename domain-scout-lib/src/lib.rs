//! # Domain Scout Library
//!
//! Generates candidate domain names from keyword lists, verifies their
//! availability over RDAP, and ranks the available ones.
//!
//! The three stages are independent and can be used on their own:
//!
//! - [`generate::generate_candidates`] expands keyword categories into a
//!   sorted, validated list of bare names
//! - [`AvailabilityVerifier`] checks domains concurrently with per-worker rate
//!   limiting and retries
//! - [`scoring::rank_domains`] scores available domains and sorts them
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_scout_lib::{
//!     generate_candidates, rank_domains, AvailabilityVerifier, CheckConfig, ConfigManager,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigManager::new().load(None)?;
//!     let names = generate_candidates(&config, None).names;
//!     let domains: Vec<String> = names
//!         .iter()
//!         .map(|n| format!("{}.{}", n, config.domain_settings.default_tld))
//!         .collect();
//!
//!     let verifier = AvailabilityVerifier::rdap(CheckConfig::default())?;
//!     let results = verifier.check_domains(&domains).await?;
//!
//!     for entry in rank_domains(&results, &config, None).iter().take(10) {
//!         println!("{} {}", entry.domain, entry.score);
//!     }
//!     Ok(())
//! }
//! ```

// Re-export main public API types and functions
pub use checker::AvailabilityVerifier;
pub use config::{load_env_config, ConfigManager, EnvConfig, ScoutConfig};
pub use error::DomainScoutError;
pub use generate::generate_candidates;
pub use protocols::{LookupStatus, RegistryLookup};
#[cfg(feature = "rdap")]
pub use protocols::RdapClient;
pub use scoring::{rank_domains, score_domain, Scorer};
pub use syllables::count_syllables;
pub use types::{CheckConfig, CheckResult, GenerationResult, RankedEntry, VerifyOutcome};
pub use utils::expand_domain_inputs;
pub use validator::CandidateValidator;

// Public modules
pub mod config;
pub mod generate;
pub mod protocols;
pub mod scoring;
pub mod syllables;
pub mod utils;
pub mod validator;

// Internal modules
mod checker;
mod concurrent;
mod error;
mod types;

pub type Result<T> = std::result::Result<T, DomainScoutError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information for debugging or display purposes.
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        features: get_enabled_features(),
    }
}

/// Information about the library build and features
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub version: &'static str,
    pub features: Vec<&'static str>,
}

#[allow(clippy::vec_init_then_push)]
fn get_enabled_features() -> Vec<&'static str> {
    let mut features = Vec::new();

    #[cfg(feature = "rdap")]
    features.push("rdap");

    features
}

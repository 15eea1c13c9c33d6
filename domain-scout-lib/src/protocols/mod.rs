//! Registry lookup protocols.
//!
//! The verifier only needs one bit from a registry: does it know the domain
//! or not. [`RegistryLookup`] is that seam; [`RdapClient`] is the production
//! implementation.

use crate::error::DomainScoutError;
use async_trait::async_trait;

/// RDAP (Registration Data Access Protocol) client
#[cfg(feature = "rdap")]
pub mod rdap;

/// Static TLD to RDAP endpoint table
pub mod registry;

#[cfg(feature = "rdap")]
pub use rdap::RdapClient;
pub use registry::{get_all_known_tlds, EndpointTable, DEFAULT_RDAP_TEMPLATE};

/// A definitive registry answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    /// The registry has no record of the domain (HTTP 404)
    NotFound,

    /// Any other response; carries the HTTP status
    Registered(u16),
}

impl LookupStatus {
    pub fn is_available(self) -> bool {
        matches!(self, LookupStatus::NotFound)
    }
}

/// One existence query against a registry.
///
/// `Err` means the query produced no definitive answer. Retryable errors
/// (see [`DomainScoutError::is_retryable`]) are attempted again by the
/// verifier; anything else makes the domain unavailable immediately.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<LookupStatus, DomainScoutError>;
}

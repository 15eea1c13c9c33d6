//! RDAP existence queries.
//!
//! Only the status line matters: a `HEAD` request is sent to the domain's
//! RDAP URL and `404 Not Found` means the registry has no record. No response
//! body is read.

use crate::error::DomainScoutError;
use crate::protocols::registry::EndpointTable;
use crate::protocols::{LookupStatus, RegistryLookup};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::trace;

/// RDAP client for availability lookups.
#[derive(Clone)]
pub struct RdapClient {
    /// HTTP client for making RDAP requests
    http_client: reqwest::Client,
    /// Per-request timeout
    timeout: Duration,
    /// Where each domain's query goes
    endpoints: EndpointTable,
}

impl RdapClient {
    /// Create a client with the default 5 second timeout.
    pub fn new() -> Result<Self, DomainScoutError> {
        Self::with_timeout(Duration::from_secs(5))
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainScoutError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2))
            .user_agent(concat!("domain-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainScoutError::network_with_source(
                    "Failed to create RDAP HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
            endpoints: EndpointTable::builtin(),
        })
    }

    /// Replace the endpoint table.
    pub fn with_endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn query(&self, url: &str) -> Result<StatusCode, DomainScoutError> {
        let response = self.http_client.head(url).send().await?;
        Ok(response.status())
    }
}

#[async_trait]
impl RegistryLookup for RdapClient {
    async fn lookup(&self, domain: &str) -> Result<LookupStatus, DomainScoutError> {
        let url = self.endpoints.resolve(domain).ok_or_else(|| {
            DomainScoutError::invalid_domain(domain, "Domain has no top-level label")
        })?;

        trace!(%url, "RDAP request");

        let status = tokio::time::timeout(self.timeout, self.query(&url))
            .await
            .map_err(|_| DomainScoutError::timeout("RDAP request", self.timeout))??;

        trace!(domain, status = status.as_u16(), "RDAP response");

        Ok(match status {
            StatusCode::NOT_FOUND => LookupStatus::NotFound,
            other => LookupStatus::Registered(other.as_u16()),
        })
    }
}

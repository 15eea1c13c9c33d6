//! Error handling for the domain scouting pipeline.
//!
//! A single error type covers every stage: configuration loading, candidate list
//! input, registry lookups and batch interruption. Per-candidate problems during
//! generation are never errors; they are silently filtered.

use std::fmt;
use std::time::Duration;

/// Main error type for domain scouting operations.
#[derive(Debug, Clone)]
pub enum DomainScoutError {
    /// Invalid domain name format
    InvalidDomain { domain: String, reason: String },

    /// Network-related errors (connection refused, DNS failure, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Undecodable responses and malformed record files
    ParseError { message: String },

    /// Configuration errors (missing file, invalid settings, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading candidate lists or writing results
    FileError { path: String, message: String },

    /// A single lookup took longer than the per-request timeout
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// A verification batch was stopped by an external interrupt
    Interrupted { completed: usize, pending: usize },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl DomainScoutError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a transport failure that the verifier should retry.
    ///
    /// A malformed domain is not retried; no request was ever sent for it.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::ParseError { .. }
        )
    }

}

impl fmt::Display for DomainScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Interrupted { completed, pending } => {
                write!(
                    f,
                    "Interrupted: {} domains checked, {} not checked",
                    completed, pending
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainScoutError {}

#[cfg(feature = "rdap")]
impl From<reqwest::Error> for DomainScoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("HTTP request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else if err.is_decode() || err.is_body() {
            Self::parse(format!("Undecodable response: {}", err))
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

impl From<toml::de::Error> for DomainScoutError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Invalid TOML: {}", err),
        }
    }
}

impl From<csv::Error> for DomainScoutError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match line {
            Some(line) => Self::parse(format!("Malformed record on line {}: {}", line, err)),
            None => Self::parse(format!("Malformed record: {}", err)),
        }
    }
}

//! Error types of the engine

use serde::Serialize;
use thiserror::Error;

pub use dns_bulk_provider::ProviderError;

/// Placeholder used when a failed action carried no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Core layer error type
///
/// Only caller contract violations and pass-through service failures end up
/// here. Failures inside a bulk run are reported through [`BulkError`] entries
/// of the report instead.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The operation, its domain list or a single-record request is malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A domain selector matched no zone
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Provider error (converted from the provider crate)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the error is expected behavior (user input, missing resource).
    ///
    /// `true` is logged at `warn`, `false` at `error`.
    /// **Update this method whenever a variant is added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::DomainNotFound(_) => true,
            Self::Provider(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// A failure recorded inside a bulk run.
///
/// The `Display` output is the line that lands in
/// [`DetailedReport::errors`](crate::types::DetailedReport::errors).
#[derive(Error, Debug, Clone)]
pub enum BulkError {
    /// Reading a domain's records failed; the domain contributed no actions.
    #[error("{domain}: Failed to fetch records: {}", source.message())]
    Expansion {
        /// Display name of the domain
        domain: String,
        /// Provider failure
        source: ProviderError,
    },

    /// One dispatched action failed.
    #[error("Action {position}: {}", message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Dispatch {
        /// 1-based submission position
        position: usize,
        /// Provider message, if one was carried
        message: Option<String>,
    },

    /// The action list could not be submitted at all.
    #[error("Bulk submission failed: {0}")]
    FatalSubmission(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_error(message: &str) -> ProviderError {
        ProviderError::Unknown {
            provider: "memory".to_string(),
            raw_code: None,
            raw_message: message.to_string(),
        }
    }

    #[test]
    fn expansion_line_omits_provider_prefix() {
        let err = BulkError::Expansion {
            domain: "a.com".to_string(),
            source: provider_error("zone locked"),
        };
        assert_eq!(err.to_string(), "a.com: Failed to fetch records: zone locked");
    }

    #[test]
    fn dispatch_line_uses_position_and_fallback() {
        let with_message = BulkError::Dispatch {
            position: 2,
            message: Some("rate limited".to_string()),
        };
        let without_message = BulkError::Dispatch {
            position: 7,
            message: None,
        };
        assert_eq!(with_message.to_string(), "Action 2: rate limited");
        assert_eq!(without_message.to_string(), "Action 7: Unknown error");
    }

    #[test]
    fn fatal_line() {
        let err = BulkError::FatalSubmission("action 3 has no zone id".to_string());
        assert_eq!(
            err.to_string(),
            "Bulk submission failed: action 3 has no zone id"
        );
    }

    #[test]
    fn core_error_classification() {
        assert!(CoreError::ValidationError("ttl".to_string()).is_expected());
        assert!(!CoreError::Provider(ProviderError::Timeout {
            provider: "cloudflare".to_string(),
            detail: "30s".to_string(),
        })
        .is_expected());
    }

    #[test]
    fn core_error_serializes_with_code() {
        let json = serde_json::to_value(CoreError::DomainNotFound("b.com".to_string())).unwrap();
        assert_eq!(json["code"], "DomainNotFound");
        assert_eq!(json["details"], "b.com");
    }
}

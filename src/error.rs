//! # Error Types
//!
//! Stable error taxonomy for specification construction and query matching.
//!
//! Callers of the repository surface only ever see [`Error`]. Backend failures
//! are carried inside it as [`ExecutorError`] sources, so the cause chain stays
//! intact while match sites can branch on the contract-level outcome.

use crate::executor::ExecutorError;
use thiserror::Error;

/// Errors surfaced by specification construction and the repository contracts.
#[derive(Error, Debug)]
pub enum Error {
    /// A specification or modifier was built from malformed input, such as an
    /// empty membership set or a blank `HAVING` expression.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A single-result contract matched zero rows.
    #[error("No result found where exactly one was expected")]
    NoResult {
        #[source]
        source: ExecutorError,
    },

    /// A single-result contract matched more than one row.
    #[error("Non-unique result: {source}")]
    NonUniqueResult {
        #[source]
        source: ExecutorError,
    },

    /// A fetched row could not be deserialized into the requested type.
    #[error("Failed to hydrate result row: {0}")]
    Hydration(#[from] serde_json::Error),

    /// Any other executor failure, propagated unchanged.
    #[error(transparent)]
    Execution(#[from] ExecutorError),
}

impl Error {
    /// Create an invalid argument error from any string-like input.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = Error::invalid_argument("IN requires at least one value");
        assert_eq!(
            error.to_string(),
            "Invalid argument: IN requires at least one value"
        );
    }

    #[test]
    fn test_no_result_preserves_source() {
        let error = Error::NoResult {
            source: ExecutorError::NoResult,
        };
        assert!(matches!(error, Error::NoResult { .. }));
        let source = std::error::Error::source(&error).expect("source should be preserved");
        assert_eq!(source.to_string(), ExecutorError::NoResult.to_string());
    }

    #[test]
    fn test_non_unique_result_reports_count() {
        let error = Error::NonUniqueResult {
            source: ExecutorError::NonUniqueResult { count: 3 },
        };
        assert!(error.to_string().contains("3 rows"));
    }

    #[test]
    fn test_executor_error_passes_through_transparently() {
        let source = ExecutorError::NoResult;
        let message = source.to_string();
        let error: Error = source.into();
        assert!(matches!(error, Error::Execution(_)));
        assert_eq!(error.to_string(), message);
    }
}

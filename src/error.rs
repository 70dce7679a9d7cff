// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! `SourceError` says precisely what went wrong while talking to the
//! content source; `AppError` is what callers see, and deliberately
//! collapses every fetch failure into one coarse variant.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Everything that can go wrong while pulling a page tree from the source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}, HTTP {status}): {message}")]
    Api {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Fetch did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Block tree is deeper than the limit of {0} levels")]
    DepthLimitExceeded(usize),

    #[error("Block {0} appears among its own ancestors")]
    CycleDetected(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::MalformedResponse(err.to_string())
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// Any failure while fetching a page. The message stays generic; the
    /// underlying cause is available through `source()`.
    #[error("Failed to load content from Notion")]
    SourceUnavailable {
        page_id: String,
        #[source]
        cause: SourceError,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    pub fn source_unavailable(page_id: impl fmt::Display, cause: SourceError) -> Self {
        AppError::SourceUnavailable {
            page_id: page_id.to_string(),
            cause,
        }
    }

    /// The fetch-level cause, when this is a `SourceUnavailable` error.
    pub fn source_cause(&self) -> Option<&SourceError> {
        match self {
            AppError::SourceUnavailable { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn source_unavailable_hides_cause_in_display() {
        let err = AppError::source_unavailable(
            "abc",
            SourceError::Api {
                code: NotionErrorCode::ObjectNotFound,
                message: "Could not find page".to_string(),
                status: 404,
            },
        );
        assert_eq!(err.to_string(), "Failed to load content from Notion");
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("object_not_found"));
    }

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in ["rate_limited", "object_not_found", "restricted_resource"] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new"),
            NotionErrorCode::Unknown("brand_new".to_string())
        );
        assert_eq!(NotionErrorCode::from_http_status(404).to_string(), "http_404");
    }
}

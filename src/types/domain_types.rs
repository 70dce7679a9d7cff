// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// API key for Notion API authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible = self.0.get(..10).unwrap_or(&self.0);
        write!(f, "{}...", visible)
    }
}

/// Base URL of the content API, always ending in a slash so that relative
/// endpoints join underneath it instead of replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let with_slash = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        };

        let parsed = Url::parse(&with_slash).map_err(|e| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        Ok(Self(parsed))
    }

    /// Resolves an endpoint path such as `pages/<id>` against the base.
    pub fn join(&self, endpoint: &str) -> Result<Url, ValidationError> {
        self.0
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| ValidationError::InvalidUrl {
                url: endpoint.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("secret_abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("invalid_key").is_err());
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        assert_eq!(key.to_string(), "secret_abc...");
    }

    #[test]
    fn test_base_url_join_keeps_version_segment() {
        let base = ApiBaseUrl::parse("https://api.notion.com/v1").unwrap();
        let url = base.join("pages/abc").unwrap();
        assert_eq!(url.as_str(), "https://api.notion.com/v1/pages/abc");
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(ApiBaseUrl::parse("ftp://example.com").is_err());
        assert!(ApiBaseUrl::parse("not a url").is_err());
    }
}

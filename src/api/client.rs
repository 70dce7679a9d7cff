// src/api/client.rs
//! HTTP client wrapper for the Notion API.
//!
//! A thin layer over reqwest that handles authentication and request
//! construction; decoding lives in [`super::parser`].

use super::parser;
use super::{ChildrenPage, ContentSource};
use crate::constants::{NOTION_API_PAGE_SIZE, NOTION_API_VERSION};
use crate::error::{AppError, SourceError};
use crate::model::Page;
use crate::types::{ApiBaseUrl, ApiKey, NotionId, PageId};
use reqwest::{header, Client, Response};

/// A reqwest client preconfigured with Notion authentication headers.
///
/// Constructed once at startup and shared by handle; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ApiBaseUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, base_url: ApiBaseUrl) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `endpoint` (relative to the base URL).
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<String>, SourceError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| SourceError::MalformedResponse(e.to_string()))?;

        log::debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?;
        extract_response_text(response).await
    }
}

#[async_trait::async_trait]
impl ContentSource for NotionHttpClient {
    async fn get_page(&self, id: &PageId) -> Result<Page, SourceError> {
        let endpoint = format!("pages/{}", id.to_dashed());
        let result = self.get(&endpoint, &[]).await?;
        parser::parse_page(parser::parse_api_response(result)?)
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<ChildrenPage, SourceError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());

        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor.to_string()));
        }

        let result = self.get(&endpoint, &query).await?;
        parser::parse_children_page(parser::parse_api_response(result)?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, SourceError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    if !status.is_success() {
        log::debug!("{} returned HTTP {}", url, status);
    }

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_valid_key() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        let base = ApiBaseUrl::parse("https://api.notion.com/v1").unwrap();
        assert!(NotionHttpClient::new(&key, base).is_ok());
    }

    #[test]
    fn test_headers_carry_version_and_bearer() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        let headers = NotionHttpClient::create_headers(&key).unwrap();
        assert_eq!(headers["Notion-Version"], NOTION_API_VERSION);
        assert_eq!(
            headers[header::AUTHORIZATION],
            "Bearer secret_abcdefghijklmnopqrs"
        );
    }
}

// src/api/parser.rs
//! Turns raw Notion API responses into domain types.
//!
//! This is the fetch boundary: every payload is validated here, so the
//! renderer never has to guess at field presence. Unrecognised or broken
//! block items degrade instead of failing the page.

use super::client::ApiResponse;
use super::ChildrenPage;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{NotionErrorCode, SourceError};
use crate::model::*;
use crate::types::{plain_text_of, BlockId, PageId, RichTextSpan};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Error envelope returned by the Notion API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    status: u16,
    code: String,
    message: String,
}

/// Checks the HTTP status and decodes the body as JSON.
pub fn parse_api_response(result: ApiResponse<String>) -> Result<Value, SourceError> {
    if result.status.is_success() {
        serde_json::from_str(&result.data).map_err(|e| {
            log::error!("Failed to parse response from {}: {}", result.url, e);
            SourceError::MalformedResponse(format!(
                "{} (body: {})",
                e,
                preview(&result.data)
            ))
        })
    } else {
        Err(parse_error_body(&result.data, result.status.as_u16()))
    }
}

/// Decodes a Notion error envelope, falling back to the HTTP status.
pub fn parse_error_body(body: &str, status: u16) -> SourceError {
    match serde_json::from_str::<NotionErrorBody>(body) {
        Ok(error) => SourceError::Api {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status: error.status,
        },
        Err(_) => SourceError::Api {
            code: NotionErrorCode::from_http_status(status),
            message: format!("HTTP {}: {}", status, preview(body)),
            status,
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    id: PageId,
    #[serde(default)]
    url: String,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    properties: IndexMap<String, Value>,
}

/// Parses a `GET /pages/{id}` body.
pub fn parse_page(value: Value) -> Result<Page, SourceError> {
    let raw: RawPage = serde_json::from_value(value)?;
    let title = title_from_properties(&raw.properties);

    Ok(Page {
        id: raw.id,
        title,
        url: raw.url,
        created_time: raw.created_time,
        last_edited_time: raw.last_edited_time,
        archived: raw.archived,
        properties: raw.properties,
    })
}

/// Finds the property of type `title` and flattens it to plain text.
fn title_from_properties(properties: &IndexMap<String, Value>) -> String {
    properties
        .values()
        .find(|p| p.get("type").and_then(Value::as_str) == Some("title"))
        .and_then(|p| p.get("title").cloned())
        .and_then(|t| serde_json::from_value::<Vec<RichTextSpan>>(t).ok())
        .map(|spans| plain_text_of(&spans))
        .unwrap_or_default()
}

/// Parses a `GET /blocks/{id}/children` body.
pub fn parse_children_page(value: Value) -> Result<ChildrenPage, SourceError> {
    let results = value
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SourceError::MalformedResponse("Missing 'results' array in block listing".to_string())
        })?;

    let blocks = results.iter().filter_map(parse_block).collect();

    Ok(ChildrenPage {
        results: blocks,
        next_cursor: value
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(str::to_string),
        has_more: value
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Parses one block item.
///
/// Returns `None` for items without a string `type` or `id`. Tags outside
/// the known set, and known tags with a payload that does not decode,
/// become `Block::Unsupported`.
pub fn parse_block(item: &Value) -> Option<Block> {
    let Some(tag) = item.get("type").and_then(Value::as_str) else {
        log::warn!("Dropping block item without a type discriminator");
        return None;
    };
    let Some(id) = item.get("id").and_then(Value::as_str) else {
        log::warn!("Dropping '{}' block item without an id", tag);
        return None;
    };

    let id = BlockId::parse(id).unwrap_or_else(|_| BlockId::from_normalized(id.to_string()));
    let common = BlockCommon {
        id,
        children: Vec::new(),
        has_children: item
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        archived: item
            .get("archived")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    };

    let payload = item
        .get(tag)
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    let decoded = match tag {
        "paragraph" => decode(payload).map(Block::Paragraph),
        "heading_1" => decode(payload).map(Block::Heading1),
        "heading_2" => decode(payload).map(Block::Heading2),
        "heading_3" => decode(payload).map(Block::Heading3),
        "bulleted_list_item" => decode(payload).map(Block::BulletedListItem),
        "numbered_list_item" => decode(payload).map(Block::NumberedListItem),
        "to_do" => decode(payload).map(Block::ToDo),
        "toggle" => decode(payload).map(Block::Toggle),
        "quote" => decode(payload).map(Block::Quote),
        "callout" => decode(payload).map(Block::Callout),
        "code" => decode(payload).map(Block::Code),
        "equation" => decode(payload).map(Block::Equation),
        "divider" => decode(payload).map(Block::Divider),
        "table_of_contents" => decode(payload).map(Block::TableOfContents),
        "image" => decode(payload).map(Block::Image),
        "video" => decode(payload).map(Block::Video),
        "audio" => decode(payload).map(Block::Audio),
        "file" => decode(payload).map(Block::File),
        "pdf" => decode(payload).map(Block::Pdf),
        "bookmark" => decode(payload).map(Block::Bookmark),
        "embed" => decode(payload).map(Block::Embed),
        "child_page" => decode(payload).map(Block::ChildPage),
        "table" => decode(payload).map(Block::Table),
        "table_row" => decode(payload).map(Block::TableRow),
        "column_list" => decode(payload).map(Block::ColumnList),
        "column" => decode(payload).map(Block::Column),
        "synced_block" => decode(payload).map(Block::Synced),
        other => {
            log::debug!("Block {} has unsupported type '{}'", common.id, other);
            return Some(unsupported(common, other));
        }
    };

    match decoded {
        Ok(mut block) => {
            *block.common_mut() = common;
            Some(block)
        }
        Err(e) => {
            log::warn!(
                "Block {} of type '{}' has a malformed payload, rendering as unsupported: {}",
                common.id,
                tag,
                e
            );
            Some(unsupported(common, tag))
        }
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload)
}

fn unsupported(common: BlockCommon, tag: &str) -> Block {
    Block::Unsupported(UnsupportedBlock {
        common,
        block_type: tag.to_string(),
    })
}

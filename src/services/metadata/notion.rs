//! Record lookup against Notion's private v3 API.
//!
//! Authenticates with the `token_v2` session cookie. Transient failures are
//! retried with exponential backoff; everything else is terminal.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use super::{Entity, MetadataSource};
use crate::services::config::ClientConfig;
use crate::types::{EnhanceError, EnhanceResult, LookupError};

/// Block types that are standalone pages.
const PAGE_TYPES: &[&str] = &["page", "collection_view_page"];

/// First backoff delay; doubles after every failed attempt.
const BASE_BACKOFF_MS: u64 = 1000;

pub struct NotionClient {
    client: Client,
    config: ClientConfig,
}

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done(Result<Entity, LookupError>),
    Retry(String),
}

#[derive(Debug, Deserialize)]
struct SyncRecordValuesResponse {
    #[serde(rename = "recordMap", default)]
    record_map: RecordMap,
}

#[derive(Debug, Default, Deserialize)]
struct RecordMap {
    #[serde(default)]
    block: HashMap<String, RecordEntry>,
}

#[derive(Debug, Deserialize)]
struct RecordEntry {
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct BlockRecord {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    properties: Option<BlockProperties>,
    #[serde(default)]
    format: Option<BlockFormat>,
    #[serde(default)]
    created_time: f64,
    #[serde(default)]
    last_edited_time: f64,
    parent_id: Option<String>,
    parent_table: Option<String>,
    content: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct BlockProperties {
    /// Rich text: a list of `[text, annotations?]` segments.
    #[serde(default)]
    title: Vec<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct BlockFormat {
    page_icon: Option<String>,
}

impl NotionClient {
    pub fn new(config: ClientConfig) -> EnhanceResult<Self> {
        if config.token_v2.trim().is_empty() {
            return Err(EnhanceError::Config("token_v2 must not be empty".into()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EnhanceError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn fetch_once(&self, block_id: &str) -> Attempt {
        let url = format!("{}/syncRecordValues", self.config.base_url);
        let body = json!({
            "requests": [{ "pointer": { "table": "block", "id": block_id }, "version": -1 }]
        });

        let response = match self
            .client
            .post(&url)
            .header("Cookie", format!("token_v2={}", self.config.token_v2))
            .json(&body)
            .send()
        {
            Ok(r) => r,
            Err(e) => return Attempt::Retry(format!("HTTP request failed: {e}")),
        };

        let status = response.status();
        if is_retryable_status(status) {
            return Attempt::Retry(format!("HTTP {status}"));
        }
        if !status.is_success() {
            return Attempt::Done(Err(LookupError::Http(format!("HTTP {status}"))));
        }

        Attempt::Done(
            response
                .json::<SyncRecordValuesResponse>()
                .map_err(|e| LookupError::Decode(format!("JSON parse failed: {e}")))
                .and_then(|parsed| entity_from_response(parsed, block_id)),
        )
    }
}

impl MetadataSource for NotionClient {
    fn lookup(&self, identifier: &str) -> Result<Entity, LookupError> {
        let block_id = to_uuid(identifier);
        let max_tries = self.config.max_tries.max(1);

        let mut last_error = String::new();
        for attempt in 1..=max_tries {
            match self.fetch_once(&block_id) {
                Attempt::Done(result) => return result,
                Attempt::Retry(reason) => {
                    log::warn!("Lookup of {block_id} failed (try {attempt}/{max_tries}): {reason}");
                    last_error = reason;
                    if attempt < max_tries {
                        std::thread::sleep(backoff_delay(attempt));
                    }
                }
            }
        }

        Err(LookupError::Http(last_error))
    }
}

/// Delay before retry number `attempt + 1`.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(1u64 << (attempt - 1).min(16)))
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Hyphenate a bare 32-char identifier into UUID form (8-4-4-4-12).
pub(crate) fn to_uuid(identifier: &str) -> String {
    if identifier.len() != 32 || !identifier.chars().all(|c| c.is_ascii_hexdigit()) {
        return identifier.to_string();
    }
    format!(
        "{}-{}-{}-{}-{}",
        &identifier[0..8],
        &identifier[8..12],
        &identifier[12..16],
        &identifier[16..20],
        &identifier[20..32]
    )
}

fn entity_from_response(
    response: SyncRecordValuesResponse,
    block_id: &str,
) -> Result<Entity, LookupError> {
    let mut blocks = response.record_map.block;
    let entry = blocks
        .remove(block_id)
        .ok_or_else(|| LookupError::NotFound(block_id.to_string()))?;

    // Newer responses wrap the record as `{ "value": { "value": {..}, "role": .. } }`.
    let value = match entry.value {
        Some(Value::Object(mut outer)) if !outer.contains_key("type") => outer
            .remove("value")
            .ok_or_else(|| LookupError::NotFound(block_id.to_string()))?,
        Some(value) => value,
        None => return Err(LookupError::NotFound(block_id.to_string())),
    };

    let record: BlockRecord = serde_json::from_value(value)
        .map_err(|e| LookupError::Decode(format!("Bad block record for {block_id}: {e}")))?;
    Ok(entity_from_record(record))
}

fn entity_from_record(record: BlockRecord) -> Entity {
    let title = record
        .properties
        .map(|properties| {
            properties
                .title
                .iter()
                .filter_map(|segment| segment.first().and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default();

    // Parents in other tables (spaces, collections) cannot be looked up as blocks.
    let parent = match record.parent_table.as_deref() {
        Some("block") => record.parent_id,
        _ => None,
    };

    Entity {
        id: record.id,
        title,
        icon: record.format.and_then(|format| format.page_icon),
        created_at_millis: record.created_time.round() as i64,
        edited_at_millis: record.last_edited_time.round() as i64,
        is_page_like: PAGE_TYPES.contains(&record.block_type.as_str()),
        parent,
        children: record.content,
    }
}

#[cfg(test)]
#[path = "tests/notion_tests.rs"]
mod notion_tests;

//! Turns one exported stem into its human name plus page timestamps.

use chrono::{DateTime, Utc};

use super::identifier::extract_identifier;
use super::normalizer::{is_single_emoji, sanitize_title, truncate_chars, MAX_NAME_CHARS};
use crate::services::metadata::{resolve_page, MetadataSource};

/// The exporter cuts page names at this many characters.
pub const TRUNCATED_NAME_CHARS: usize = 50;

/// A successful rename of one stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRewrite {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

/// Rewrite `stem` using the page behind its identifier.
///
/// - Strips the identifier
/// - Restores the full title when the exported name was truncated
/// - Prefixes the page icon when it is a single emoji
///
/// Returns `None` (pass through unchanged) when the stem has no identifier
/// or its page cannot be resolved.
pub fn rewrite_name(source: &dyn MetadataSource, stem: &str) -> Option<NameRewrite> {
    let extracted = extract_identifier(stem)?;

    let page = match resolve_page(source, extracted.identifier) {
        Ok(page) => page,
        Err(e) => {
            log::warn!("Failed to retrieve page for ID {}: {e}", extracted.identifier);
            return None;
        }
    };

    let mut name = extracted.human_name.to_string();
    if extracted.human_name.chars().count() == TRUNCATED_NAME_CHARS {
        let (full_name, truncated) = truncate_chars(&sanitize_title(&page.title), MAX_NAME_CHARS);
        if truncated {
            log::warn!("'{}' too long, truncating to {MAX_NAME_CHARS}", page.title);
        }
        if full_name.trim().is_empty() {
            log::debug!("Page {} has no usable title, keeping exported name", page.id);
        } else {
            name = full_name;
        }
    }

    if let Some(icon) = page.icon.as_deref().filter(|icon| is_single_emoji(icon)) {
        name = format!("{icon} {name}");
    }

    Some(NameRewrite {
        name,
        created_at: millis_to_utc(page.created_at_millis),
        edited_at: millis_to_utc(page.edited_at_millis),
    })
}

fn millis_to_utc(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}

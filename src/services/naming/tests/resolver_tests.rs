use super::resolver::*;
use crate::services::metadata::{Entity, MemorySource};
use chrono::{DateTime, Utc};

const ID: &str = "0123456789abcdef0123456789abcdef";
const DEFAULT_TIME_MS: i64 = 1609238729000;

fn page(title: &str) -> Entity {
    Entity::page(ID, title).with_times(DEFAULT_TIME_MS, DEFAULT_TIME_MS)
}

fn default_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1609238729, 0).unwrap()
}

#[test]
fn test_non_matching_names_pass_through() {
    let source = MemorySource::new();
    assert_eq!(rewrite_name(&source, "asdf"), None);
    assert_eq!(rewrite_name(&source, "asdf 4fe9r0ogij"), None);
    assert_eq!(source.lookup_count(), 0);
}

#[test]
fn test_strips_identifier() {
    let source = MemorySource::new().with(
        Entity::page(ID, "Notes").with_times(DEFAULT_TIME_MS, DEFAULT_TIME_MS + 1000),
    );

    let rewrite = rewrite_name(&source, &format!("Notes {ID}")).unwrap();
    assert_eq!(rewrite.name, "Notes");
    assert_eq!(rewrite.created_at, default_time());
    assert_eq!(
        rewrite.edited_at,
        DateTime::from_timestamp(1609238730, 0).unwrap()
    );
}

#[test]
fn test_failed_lookup_passes_through() {
    let source = MemorySource::new();
    assert_eq!(rewrite_name(&source, &format!("Notes {ID}")), None);
}

#[test]
fn test_truncated_name_uses_full_title() {
    let source = MemorySource::new().with(page(
        "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz",
    ));
    let exported = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwx";
    assert_eq!(exported.chars().count(), TRUNCATED_NAME_CHARS);

    let rewrite = rewrite_name(&source, &format!("{exported} {ID}")).unwrap();
    assert_eq!(
        rewrite.name,
        "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz"
    );
}

#[test]
fn test_only_exactly_fifty_chars_counts_as_truncated() {
    let source = MemorySource::new().with(page("Full Title"));

    let short = "a".repeat(49);
    let long = "a".repeat(51);
    assert_eq!(rewrite_name(&source, &format!("{short} {ID}")).unwrap().name, short);
    assert_eq!(rewrite_name(&source, &format!("{long} {ID}")).unwrap().name, long);

    let exact = "a".repeat(50);
    assert_eq!(
        rewrite_name(&source, &format!("{exact} {ID}")).unwrap().name,
        "Full Title"
    );
}

#[test]
fn test_full_title_is_sanitized_and_capped() {
    let title = format!("Q: what/why? {}", "x".repeat(300));
    let source = MemorySource::new().with(page(&title));

    let rewrite = rewrite_name(&source, &format!("{} {ID}", "a".repeat(50))).unwrap();
    assert!(rewrite.name.starts_with("Q  what why  x"));
    assert_eq!(rewrite.name.chars().count(), 200);
}

#[test]
fn test_icon_not_emoji_is_ignored() {
    let source = MemorySource::new().with(page("owo").with_icon("https://example.com"));

    let rewrite = rewrite_name(&source, &format!("owo {ID}")).unwrap();
    assert_eq!(rewrite.name, "owo");
}

#[test]
fn test_emoji_icons_are_prefixed() {
    let other = "00000000000000000000000000000000";
    let source = MemorySource::new()
        .with(page("owo").with_icon("🌲"))
        .with(
            Entity::page(other, "owo")
                .with_icon("🕳️")
                .with_times(DEFAULT_TIME_MS, DEFAULT_TIME_MS),
        );

    assert_eq!(
        rewrite_name(&source, &format!("owo {ID}")).unwrap().name,
        "🌲 owo"
    );
    assert_eq!(
        rewrite_name(&source, &format!("owo {other}")).unwrap().name,
        "🕳️ owo"
    );
}

#[test]
fn test_times_are_converted() {
    let source =
        MemorySource::new().with(Entity::page(ID, "owo").with_times(1555555555000, 16666666666777));

    let rewrite = rewrite_name(&source, &format!("owo {ID}")).unwrap();
    assert_eq!(
        rewrite.created_at,
        DateTime::from_timestamp(1555555555, 0).unwrap()
    );
    assert_eq!(
        rewrite.edited_at,
        DateTime::from_timestamp_millis(16666666666777).unwrap()
    );
}

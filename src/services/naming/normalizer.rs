//! Text normalization for names derived from page titles.

use regex::Regex;
use std::sync::LazyLock;

/// Characters the exporter refuses in file names, replaced by a space.
static RE_FORBIDDEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/?:*"<>|]"#).expect("Invalid regex"));

/// A whole string that is exactly one emoji sequence.
///
/// Covers keycaps, flag pairs, modifier/variation suffixes, ZWJ chains and
/// tag sequences (subdivision flags).
static RE_SINGLE_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    let element = r"(?:\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})?|[#*0-9]\x{FE0F}?\x{20E3})";
    Regex::new(&format!(
        r"^(?:\p{{Regional_Indicator}}{{2}}|{element}(?:\x{{200D}}{element})*[\x{{E0020}}-\x{{E007F}}]*)$"
    ))
    .expect("Invalid regex")
});

/// Longest name we will write for a page whose exported name was truncated.
pub const MAX_NAME_CHARS: usize = 200;

/// Replace filesystem-hostile characters in a title with spaces.
///
/// Forbidden: `\ / ? : * " < > |`
pub fn sanitize_title(title: &str) -> String {
    RE_FORBIDDEN_CHARS.replace_all(title, " ").to_string()
}

/// Hard-truncate `name` to at most `max_chars` characters.
///
/// Returns the (possibly shortened) name and whether truncation happened.
pub fn truncate_chars(name: &str, max_chars: usize) -> (String, bool) {
    match name.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (name[..byte_index].to_string(), true),
        None => (name.to_string(), false),
    }
}

/// Whether `icon` is exactly one emoji. Uploaded icon URLs and plain text never are.
pub fn is_single_emoji(icon: &str) -> bool {
    RE_SINGLE_EMOJI.is_match(icon)
}

//! Rewrites relative markdown link and image targets to follow renamed files.
//!
//! Only inline `[text](target)` / `![alt](target)` forms are handled, and
//! only targets made of URL-safe characters (exported links are
//! percent-encoded, so a space ends the match).

use regex::Regex;
use std::sync::LazyLock;

use crate::services::fs_utils::path_utils::{join_normalized, relative_path, split_parent};
use crate::services::renamer::RenameSession;

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[.+?\]\(([\w\-.~:/?=#%\[\]@!$&'()*+,;]+?)\)").expect("Invalid regex")
});

/// Result of rewriting one document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub body: String,
    /// Targets whose text actually changed.
    pub rewritten: usize,
}

/// Rewrite every local link target in `body`, a document at original path `doc_path`.
///
/// Remote targets (`scheme://`), targets outside the export and targets that
/// do not exist are left untouched.
pub fn rewrite_links(session: &mut RenameSession<'_>, doc_path: &str, body: &str) -> LinkRewrite {
    let (doc_dir, _) = split_parent(doc_path);
    let new_doc_path = session.rename_path(doc_path);
    let (new_doc_dir, _) = split_parent(&new_doc_path);

    let mut out = String::with_capacity(body.len());
    let mut copied = 0;
    let mut cursor = 0;
    let mut rewritten = 0;

    while let Some(captures) = RE_LINK.captures_at(body, cursor) {
        let Some(target) = captures.get(1) else {
            break;
        };
        cursor = target.end();

        let Some(new_target) = rewrite_target(session, doc_dir, new_doc_dir, target.as_str())
        else {
            continue;
        };

        out.push_str(&body[copied..target.start()]);
        out.push_str(&new_target);
        copied = target.end();
        if new_target != target.as_str() {
            rewritten += 1;
        }
    }
    out.push_str(&body[copied..]);

    LinkRewrite {
        body: out,
        rewritten,
    }
}

fn rewrite_target(
    session: &mut RenameSession<'_>,
    doc_dir: &str,
    new_doc_dir: &str,
    target: &str,
) -> Option<String> {
    if target.contains("://") {
        return None;
    }

    // Keep `#fragment` / `?query` as written; only the path is renamed.
    let split_at = target.find(['#', '?']).unwrap_or(target.len());
    let (encoded_path, suffix) = target.split_at(split_at);
    if encoded_path.is_empty() {
        return None;
    }

    let decoded = match urlencoding::decode(encoded_path) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("Skipping link '{target}': bad percent-encoding ({e})");
            return None;
        }
    };

    let Some(original) = join_normalized(doc_dir, &decoded) else {
        log::warn!("Skipping link '{target}': points outside the export");
        return None;
    };

    if !session.root().join(&original).exists() {
        log::warn!("Skipping link '{target}': '{original}' is not in the export");
        return None;
    }

    let new_target = session.rename_path(&original);
    let relative = relative_path(new_doc_dir, &new_target);
    Some(format!("{}{suffix}", encode_path(&relative)))
}

/// Percent-encode each segment of a `/`-separated path.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

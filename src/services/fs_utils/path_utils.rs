//! Helpers for the `/`-separated relative paths used inside an export.
//!
//! Archive entries and markdown links both use forward slashes regardless of
//! platform, so these helpers operate on strings instead of `std::path`.

use std::path::{Component, Path};

/// Validates that the `target_path` strictly resolves _inside_ the `base_path`.
/// Rejects path traversal attempts using `..` or absolute paths aiming outside the allowed directory.
pub fn is_path_safe(base_path: &Path, target_path: &Path) -> bool {
    if target_path.is_absolute() {
        return target_path.starts_with(base_path);
    }

    let mut depth = 0;
    for component in target_path.components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => {
                depth += 1;
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }

    true
}

/// Split a relative path into its non-empty components, accepting either separator.
pub fn components(rel_path: &str) -> Vec<&str> {
    rel_path
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

/// Join `rel_path` onto `base_dir` and fold away `.` and `..` lexically.
///
/// Returns `None` when the result would escape the root of the tree.
pub fn join_normalized(base_dir: &str, rel_path: &str) -> Option<String> {
    let joined = if base_dir.is_empty() {
        rel_path.to_string()
    } else {
        format!("{base_dir}/{rel_path}")
    };

    if !is_path_safe(Path::new(""), Path::new(&joined.replace('\\', "/"))) {
        return None;
    }

    let mut stack: Vec<&str> = Vec::new();
    for part in components(&joined) {
        if part == ".." {
            stack.pop()?;
        } else {
            stack.push(part);
        }
    }
    Some(stack.join("/"))
}

/// Split `a/b/c` into (`a/b`, `c`). A bare name has an empty parent.
pub fn split_parent(rel_path: &str) -> (&str, &str) {
    match rel_path.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", rel_path),
    }
}

/// Split a file name into stem and extension (extension keeps its dot).
///
/// A leading dot does not start an extension, so `.gitignore` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 && !name[..index].chars().all(|c| c == '.') => {
            (&name[..index], &name[index..])
        }
        _ => (name, ""),
    }
}

/// Relative path from directory `from_dir` to `target`, both rooted at the same tree.
pub fn relative_path(from_dir: &str, target: &str) -> String {
    let from = components(from_dir);
    let to = components(target);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend(&to[common..]);

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Relative `/`-separated form of `path` under `root`.
pub fn to_relative(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

//! Renaming state for a single export conversion.
//!
//! A [`RenameSession`] owns the rename cache and the collision registry, so
//! two conversions never share names. Sessions are single-threaded: the
//! order of calls decides which entry wins a bare name.

mod collision;

pub use collision::CollisionRegistry;

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::fs_utils::path_utils::{components, split_extension, split_parent};
use crate::services::metadata::MetadataSource;
use crate::services::naming::{extract_identifier, rewrite_name};

/// Leaf name for a page merged into its folder. `!` sorts before letters and digits.
pub const INDEX_MARKER: &str = "!index";

/// Extension of exported page documents.
pub const DOCUMENT_EXTENSION: &str = ".md";

/// The new name of one path component (or of a whole path, see
/// [`RenameSession::rename_path_and_times`]).
///
/// Timestamps are `None` when the name was passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl ResolvedName {
    fn verbatim(name: &str) -> Self {
        Self {
            name: name.to_string(),
            created_at: None,
            edited_at: None,
        }
    }
}

pub struct RenameSession<'a> {
    source: &'a dyn MetadataSource,
    /// Root of the unpacked original tree, consulted for merge folders.
    root: PathBuf,
    /// Original relative path -> resolved name of its last component.
    rename_cache: HashMap<String, ResolvedName>,
    collisions: CollisionRegistry,
    /// Directories whose identifier-less entries are already reserved.
    scanned_dirs: HashSet<String>,
}

impl<'a> RenameSession<'a> {
    pub fn new(source: &'a dyn MetadataSource, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            root: root.into(),
            rename_cache: HashMap::new(),
            collisions: CollisionRegistry::new(),
            scanned_dirs: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rename only the last component of `rel_path`, with its page timestamps.
    ///
    /// `rel_path` is an original path relative to the root. Results are
    /// memoized per full path, so the same input always yields the same name.
    pub fn rename_and_times(&mut self, rel_path: &str) -> ResolvedName {
        let key = components(rel_path).join("/");
        if let Some(hit) = self.rename_cache.get(&key) {
            return hit.clone();
        }

        let resolved = self.resolve_component(&key);
        self.rename_cache.insert(key, resolved.clone());
        resolved
    }

    /// Rename only the last component of `rel_path`.
    pub fn rename(&mut self, rel_path: &str) -> String {
        self.rename_and_times(rel_path).name
    }

    /// Rename every component of `rel_path`.
    pub fn rename_path(&mut self, rel_path: &str) -> String {
        let parts = components(rel_path);
        let mut renamed = Vec::with_capacity(parts.len());
        for end in 1..=parts.len() {
            renamed.push(self.rename(&parts[..end].join("/")));
        }
        renamed.join("/")
    }

    /// Rename every component of `rel_path`, returning the full new path
    /// and the timestamps of its last component.
    pub fn rename_path_and_times(&mut self, rel_path: &str) -> ResolvedName {
        let normalized = components(rel_path).join("/");
        let (parent, _) = split_parent(&normalized);

        let new_parent = self.rename_path(parent);
        let leaf = self.rename_and_times(&normalized);

        if new_parent.is_empty() {
            leaf
        } else {
            ResolvedName {
                name: format!("{new_parent}/{}", leaf.name),
                ..leaf
            }
        }
    }

    /// Reserve every entry of `parent` that carries no identifier.
    ///
    /// Those names can never change, so they win over renamed siblings no
    /// matter which of the two is visited first.
    fn reserve_fixed_names(&mut self, parent: &str) {
        if !self.scanned_dirs.insert(parent.to_string()) {
            return;
        }
        let Ok(entries) = fs::read_dir(self.root.join(parent)) else {
            return;
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let stem = if is_dir {
                name.as_str()
            } else {
                split_extension(&name).0
            };
            if extract_identifier(stem).is_none() {
                self.collisions.register_verbatim(parent, &name);
            }
        }
    }

    fn resolve_component(&mut self, rel_path: &str) -> ResolvedName {
        let (parent, name) = split_parent(rel_path);
        self.reserve_fixed_names(parent);
        let (stem, extension) = if self.root.join(rel_path).is_dir() {
            (name, "")
        } else {
            split_extension(name)
        };

        let Some(rewrite) = rewrite_name(self.source, stem) else {
            self.collisions.register_verbatim(parent, name);
            return ResolvedName::verbatim(name);
        };

        // A page whose children were exported as a sibling folder moves inside it.
        let mut new_stem = rewrite.name;
        if extension == DOCUMENT_EXTENSION {
            let folder = if parent.is_empty() {
                stem.to_string()
            } else {
                format!("{parent}/{stem}")
            };
            if self.root.join(&folder).is_dir() {
                let folder_name = self.rename(&folder);
                log::debug!("Merging '{rel_path}' into folder '{folder_name}'");
                new_stem = format!("{folder_name}/{INDEX_MARKER}");
            }
        }

        let final_stem = self.collisions.claim(parent, &new_stem, extension);
        ResolvedName {
            name: format!("{final_stem}{extension}"),
            created_at: Some(rewrite.created_at),
            edited_at: Some(rewrite.edited_at),
        }
    }
}

#[cfg(test)]
#[path = "tests/renamer_tests.rs"]
mod tests;

//! Page metadata lookup.
//!
//! The renamer only needs a synchronous `lookup(identifier)` from some
//! source of records. [`resolve_page`] layers the fallback traversal on top:
//! an identifier may name an embedded block rather than the page itself.

mod memory;
mod notion;

pub use memory::MemorySource;
pub use notion::NotionClient;

use crate::types::LookupError;

/// Upper bound on parent hops, in case a source hands back a cycle.
const MAX_PARENT_DEPTH: usize = 64;

/// One record as seen by the renamer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub title: String,
    /// Emoji or uploaded image URL, whatever the source stores.
    pub icon: Option<String>,
    pub created_at_millis: i64,
    pub edited_at_millis: i64,
    /// Whether this record is a standalone page rather than an embedded block.
    pub is_page_like: bool,
    /// Identifier of the parent record, when the parent is itself a block.
    pub parent: Option<String>,
    /// Identifiers of child records, in document order.
    pub children: Option<Vec<String>>,
}

impl Entity {
    /// A page record with the given title and zeroed timestamps.
    pub fn page(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            created_at_millis: 0,
            edited_at_millis: 0,
            is_page_like: true,
            parent: None,
            children: None,
        }
    }

    /// A non-page block (image, text...) with no title.
    pub fn block(id: impl Into<String>) -> Self {
        Self {
            is_page_like: false,
            ..Self::page(id, "")
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_times(mut self, created_at_millis: i64, edited_at_millis: i64) -> Self {
        self.created_at_millis = created_at_millis;
        self.edited_at_millis = edited_at_millis;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = Some(children.into_iter().map(Into::into).collect());
        self
    }
}

/// Anything that can answer "what record is behind this identifier".
///
/// Retries on transient failures are the implementation's business; an
/// `Err` here is terminal for that identifier.
pub trait MetadataSource {
    fn lookup(&self, identifier: &str) -> Result<Entity, LookupError>;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn lookup(&self, identifier: &str) -> Result<Entity, LookupError> {
        (**self).lookup(identifier)
    }
}

/// Find the page an identifier stands for.
///
/// 1. A page-like record is used as is.
/// 2. Otherwise, if it has a parent, walk parents up to the first page.
/// 3. Otherwise, if exactly one child is a page, use that child.
///
/// Anything else is a [`LookupError`].
pub fn resolve_page(source: &dyn MetadataSource, identifier: &str) -> Result<Entity, LookupError> {
    let entity = source.lookup(identifier)?;
    if entity.is_page_like {
        return Ok(entity);
    }

    log::debug!("Block at ID {identifier} was not a page");

    if entity.parent.is_some() {
        let mut current = entity;
        for _ in 0..MAX_PARENT_DEPTH {
            let Some(parent_id) = current.parent.take() else {
                break;
            };
            current = source.lookup(&parent_id)?;
            if current.is_page_like {
                log::debug!("Using parent {} as page for ID {identifier}", current.id);
                return Ok(current);
            }
        }
        return Err(LookupError::NoPage(identifier.to_string()));
    }

    if let Some(children) = &entity.children {
        let mut pages: Vec<Entity> = children
            .iter()
            .filter_map(|child_id| match source.lookup(child_id) {
                Ok(child) => Some(child),
                Err(e) => {
                    log::debug!("Skipping child {child_id} of {identifier}: {e}");
                    None
                }
            })
            .filter(|child| child.is_page_like)
            .collect();

        if pages.len() != 1 {
            return Err(LookupError::Ambiguous {
                id: identifier.to_string(),
                count: pages.len(),
            });
        }

        log::debug!("Using only child page as page for ID {identifier}");
        return pages.pop().ok_or_else(|| LookupError::NoPage(identifier.to_string()));
    }

    Err(LookupError::NoPage(identifier.to_string()))
}

#[cfg(test)]
#[path = "tests/resolve_page_tests.rs"]
mod tests;

//! Prettifies Notion `.zip` exports.
//!
//! Identifiers are stripped from every name, colliding names are numbered,
//! pages with sub-pages move into their folder and in-document links are
//! rewritten to match.

pub mod services;
pub mod types;

pub use services::config::{ClientConfig, EnhanceOptions};
pub use services::enhancer::{enhance_export, EnhanceReport};
pub use services::metadata::{Entity, MemorySource, MetadataSource, NotionClient};
pub use types::{EnhanceError, EnhanceResult, LookupError};

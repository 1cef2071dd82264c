use std::cell::Cell;
use std::collections::HashMap;

use super::{Entity, MetadataSource};
use crate::types::LookupError;

/// Metadata source backed by a map, for offline runs and tests.
#[derive(Debug, Default)]
pub struct MemorySource {
    entities: HashMap<String, Entity>,
    lookups: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` under its own id.
    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    pub fn with(mut self, entity: Entity) -> Self {
        self.insert(entity);
        self
    }

    /// How many lookups have been served (hits and misses).
    pub fn lookup_count(&self) -> usize {
        self.lookups.get()
    }
}

impl MetadataSource for MemorySource {
    fn lookup(&self, identifier: &str) -> Result<Entity, LookupError> {
        self.lookups.set(self.lookups.get() + 1);
        self.entities
            .get(identifier)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(identifier.to_string()))
    }
}

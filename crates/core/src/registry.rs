// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run stores for cube descriptors and deployment adapters.
//!
//! Both stores are populated once at test-run startup and then only read.
//! Each adapter record sits behind its own lock so concurrent setups of
//! different containers never contend, while the reconciler and the
//! adapter cannot race on the same record's property map.

use crate::adapter::AdapterRecord;
use crate::descriptor::{CubeDescriptor, DescriptorError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Adapter record shared between the registry and its container.
pub type SharedAdapter = Arc<Mutex<AdapterRecord>>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("adapter '{0}' is already registered")]
    DuplicateAdapter(String),

    #[error("cube '{0}' is already defined")]
    DuplicateCube(String),

    #[error("cube definitions must be a mapping of cube name to definition")]
    NotAMapping,

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Cube descriptors for one test run, keyed by cube id.
#[derive(Debug, Default, Clone)]
pub struct DescriptorStore {
    cubes: HashMap<String, CubeDescriptor>,
}

impl DescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every cube from a parsed `{ name: definition }` mapping.
    pub fn from_mappings(definitions: &serde_json::Value) -> Result<Self, RegistryError> {
        let definitions = definitions.as_object().ok_or(RegistryError::NotAMapping)?;
        let mut store = Self::new();
        for (id, definition) in definitions {
            let mapping = definition.as_object().ok_or_else(|| DescriptorError::InvalidMapping {
                id: id.clone(),
                message: "definition is not a mapping".to_string(),
            })?;
            store.insert(CubeDescriptor::from_mapping(id.clone(), mapping)?)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, descriptor: CubeDescriptor) -> Result<(), RegistryError> {
        if self.cubes.contains_key(&descriptor.id) {
            return Err(RegistryError::DuplicateCube(descriptor.id));
        }
        self.cubes.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    pub fn lookup_descriptor(&self, name: &str) -> Option<&CubeDescriptor> {
        self.cubes.get(name)
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}

/// Deployment adapters for one test run, keyed by container name.
#[derive(Debug, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, SharedAdapter>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter and return the shared handle its container uses.
    pub fn register(&mut self, record: AdapterRecord) -> Result<SharedAdapter, RegistryError> {
        if self.adapters.contains_key(&record.name) {
            return Err(RegistryError::DuplicateAdapter(record.name));
        }
        let name = record.name.clone();
        let shared = Arc::new(Mutex::new(record));
        self.adapters.insert(name, Arc::clone(&shared));
        Ok(shared)
    }

    pub fn lookup_adapter(&self, name: &str) -> Option<SharedAdapter> {
        self.adapters.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

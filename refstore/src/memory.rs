use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use accentid_embed::Embedding;

use crate::{ReferenceStore, StoreError, validate_class_name};

/// In-memory [`ReferenceStore`]. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    refs: RwLock<BTreeMap<String, Embedding>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReferenceStore for MemoryStore {
    fn put(&self, class: &str, embedding: &Embedding) -> Result<(), StoreError> {
        validate_class_name(class)?;
        let mut refs = self.refs.write().unwrap_or_else(|e| e.into_inner());
        refs.insert(class.to_string(), embedding.clone());
        Ok(())
    }

    fn get(&self, class: &str) -> Result<Option<Embedding>, StoreError> {
        validate_class_name(class)?;
        let refs = self.refs.read().unwrap_or_else(|e| e.into_inner());
        Ok(refs.get(class).cloned())
    }

    fn list_classes(&self) -> Result<BTreeSet<String>, StoreError> {
        let refs = self.refs.read().unwrap_or_else(|e| e.into_inner());
        Ok(refs.keys().cloned().collect())
    }

    fn remove(&self, class: &str) -> Result<bool, StoreError> {
        validate_class_name(class)?;
        let mut refs = self.refs.write().unwrap_or_else(|e| e.into_inner());
        Ok(refs.remove(class).is_some())
    }
}

use async_trait::async_trait;
use linklet_core::store::Result;
use linklet_core::{LinkId, LinkRecord, Shortcode, Store, StoreError};
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory implementation of the `Store` trait.
///
/// Clones share the same underlying collection. Used in tests and
/// wherever persistence across runs is not needed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<LinkRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list(&self) -> Result<Vec<LinkRecord>> {
        Ok(self.records.read().clone())
    }

    async fn get(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn contains_code(&self, code: &Shortcode) -> Result<bool> {
        Ok(self
            .records
            .read()
            .iter()
            .any(|record| record.shortcode == *code))
    }

    async fn insert(&self, record: LinkRecord) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.shortcode == record.shortcode) {
            return Err(StoreError::CodeConflict(record.shortcode.to_string()));
        }
        records.push(record);
        Ok(())
    }

    async fn update(&self, record: LinkRecord) -> Result<()> {
        let mut records = self.records.write();
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            return Err(StoreError::UnknownId(record.id.get()));
        };
        *slot = record;
        Ok(())
    }
}

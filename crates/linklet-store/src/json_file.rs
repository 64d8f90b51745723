use async_trait::async_trait;
use linklet_core::store::Result;
use linklet_core::{LinkId, LinkRecord, Shortcode, Store, StoreError};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// File-backed store holding the whole collection as one JSON array.
///
/// The collection is loaded once when the store is opened and every
/// mutation rewrites the entire file, so the in-memory copy and the
/// blob on disk never diverge. There is no versioning or migration
/// logic; the blob is the schema.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Arc<RwLock<Vec<LinkRecord>>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any previously persisted
    /// collection. A missing file yields an empty collection; the file
    /// is only created on the first mutation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let records = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Vec<LinkRecord>>(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        info!(path = %path.display(), records = records.len(), "opened link store");

        Ok(Self {
            path,
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Overwrites the blob with the given collection.
    ///
    /// Called with the write lock held so the file always reflects the
    /// in-memory state.
    fn flush(&self, records: &[LinkRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, bytes).map_err(|e| StoreError::Io(e.to_string()))?;
        debug!(path = %self.path.display(), records = records.len(), "flushed link store");
        Ok(())
    }
}

#[async_trait]
impl Store for JsonFileStore {
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
        self.flush(&records)
    }

    async fn update(&self, record: LinkRecord) -> Result<()> {
        let mut records = self.records.write();
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            return Err(StoreError::UnknownId(record.id.get()));
        };
        *slot = record;
        self.flush(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use linklet_core::ClickEvent;

    fn record(id: u64, code: &str) -> LinkRecord {
        let now = Timestamp::now();
        LinkRecord {
            id: LinkId::new(id),
            original_url: format!("https://example{}.com", id),
            shortcode: Shortcode::new_unchecked(code),
            created_at: now,
            expiry_at: now + SignedDuration::from_secs(1800),
            clicks: 0,
            click_events: Vec::new(),
        }
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("links.json")).unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.insert(record(1, "abc123")).await.unwrap();
        store.insert(record(2, "xyz789")).await.unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let all = reopened.list().await.unwrap();

        assert_eq!(all, store.list().await.unwrap());
        assert_eq!(all[0].shortcode.as_str(), "abc123");
        assert_eq!(all[1].shortcode.as_str(), "xyz789");
    }

    #[tokio::test]
    async fn update_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.insert(record(1, "abc123")).await.unwrap();

        let mut updated = store.get(LinkId::new(1)).await.unwrap().unwrap();
        updated.record_click(ClickEvent::direct(Timestamp::now()));
        store.update(updated).await.unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let found = reopened.get(LinkId::new(1)).await.unwrap().unwrap();
        assert_eq!(found.clicks, 1);
        assert_eq!(found.click_events.len(), 1);
    }

    #[tokio::test]
    async fn blob_is_a_json_array_with_rfc3339_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.insert(record(1, "abc123")).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert!(array[0]["created_at"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_code() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("links.json")).unwrap();
        store.insert(record(1, "abc123")).await.unwrap();

        let err = store.insert(record(2, "abc123")).await.unwrap_err();
        assert!(matches!(err, StoreError::CodeConflict(_)));
    }

    #[tokio::test]
    async fn corrupt_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}

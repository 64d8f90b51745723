use crate::error::StoreError;
use crate::record::{LinkId, LinkRecord};
use crate::shortcode::Shortcode;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence seam for the link collection.
///
/// Implementations own the whole collection and persist it on every
/// mutation; there is exactly one logical writer, so no operation needs
/// transactional semantics. Insertion order is preserved and is the
/// chronological creation order.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Returns every record in insertion order.
    async fn list(&self) -> Result<Vec<LinkRecord>>;

    /// Retrieves the record with the given id, if any.
    async fn get(&self, id: LinkId) -> Result<Option<LinkRecord>>;

    /// Checks whether any record already uses the given shortcode.
    async fn contains_code(&self, code: &Shortcode) -> Result<bool>;

    /// Appends a new record. Fails with [`StoreError::CodeConflict`] if
    /// the shortcode is already taken.
    async fn insert(&self, record: LinkRecord) -> Result<()>;

    /// Replaces the record with the matching id. Fails with
    /// [`StoreError::UnknownId`] if no such record exists.
    async fn update(&self, record: LinkRecord) -> Result<()>;
}

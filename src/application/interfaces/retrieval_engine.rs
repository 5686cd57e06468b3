use async_trait::async_trait;

use crate::domain::{Answer, DomainError};

/// One ingestion batch as reported by the engine.
#[derive(Debug, Clone)]
pub struct IngestionBatch {
    pub id: String,
    pub status: String,
}

/// The hosted embedding/retrieval engine, consumed only through its
/// documented surface: store lifecycle, content registration, batching,
/// and retrieval-augmented queries.
#[async_trait]
pub trait RetrievalEngine: Send + Sync {
    async fn create_store(&self, name: &str) -> Result<String, DomainError>;

    /// Registers raw content with the engine and returns its content id.
    async fn register_content(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError>;

    /// Attaches already-registered content ids to a store in one batch.
    async fn batch_ingest(
        &self,
        store_id: &str,
        content_ids: &[String],
    ) -> Result<IngestionBatch, DomainError>;

    async fn batch_status(
        &self,
        store_id: &str,
        batch_id: &str,
    ) -> Result<IngestionBatch, DomainError>;

    async fn remove_content_from_store(
        &self,
        store_id: &str,
        content_id: &str,
    ) -> Result<(), DomainError>;

    async fn delete_content(&self, content_id: &str) -> Result<(), DomainError>;

    async fn delete_store(&self, store_id: &str) -> Result<(), DomainError>;

    /// Submits a query. An empty store-id list means a plain language-model
    /// call with no retrieval augmentation.
    async fn query(
        &self,
        prompt: &str,
        store_ids: &[String],
        system_context: &str,
    ) -> Result<Answer, DomainError>;
}

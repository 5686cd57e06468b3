use async_trait::async_trait;

use crate::domain::{Document, DocumentFilter, DomainError};

/// Row access to the documents table.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn insert(&self, document: &Document) -> Result<(), DomainError>;

    async fn find_by_content_ids(
        &self,
        content_ids: &[String],
    ) -> Result<Vec<Document>, DomainError>;

    /// Deletes every row whose content id is in the given set. Returns the
    /// number of rows removed.
    async fn delete_by_content_ids(&self, content_ids: &[String]) -> Result<u64, DomainError>;

    async fn list(&self, filter: &DocumentFilter) -> Result<Vec<Document>, DomainError>;

    /// Documents created by the given expert, optionally narrowed to one
    /// domain; used to derive client names.
    async fn list_by_creator(
        &self,
        created_by: &str,
        domain_name: Option<&str>,
    ) -> Result<Vec<Document>, DomainError>;
}

use async_trait::async_trait;

use crate::domain::DomainError;

/// Raw bytes fetched for one document reference, with the file name the
/// engine should see.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Resolves a document reference (HTTP URL or local path) to raw bytes.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, reference: &str) -> Result<FetchedDocument, DomainError>;
}

use std::sync::Arc;

use crate::application::DocumentRepository;
use crate::domain::{Document, DocumentFilter, DomainError};

/// Lists documents with tier-priority filtering: a client name wins over a
/// creator, a creator over plain domain defaults, and no filter at all
/// returns nothing rather than everything.
pub struct ListDocumentsUseCase {
    document_repo: Arc<dyn DocumentRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(document_repo: Arc<dyn DocumentRepository>) -> Self {
        Self { document_repo }
    }

    pub async fn execute(
        &self,
        domain_name: Option<&str>,
        created_by: Option<&str>,
        client_name: Option<&str>,
    ) -> Result<Vec<Document>, DomainError> {
        let filter = if let Some(client) = client_name {
            DocumentFilter::for_client(
                client,
                domain_name.map(str::to_string),
                created_by.map(str::to_string),
            )
        } else if let Some(creator) = created_by {
            DocumentFilter::for_creator(creator, domain_name.map(str::to_string))
        } else if let Some(domain) = domain_name {
            DocumentFilter::domain_defaults(domain)
        } else {
            return Ok(Vec::new());
        };

        self.document_repo.list(&filter).await
    }
}

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::application::DocumentRepository;
use crate::domain::DomainError;

/// Unique client names an expert has ingested documents for, derived from
/// the documents table.
pub struct ClientNamesUseCase {
    document_repo: Arc<dyn DocumentRepository>,
}

impl ClientNamesUseCase {
    pub fn new(document_repo: Arc<dyn DocumentRepository>) -> Self {
        Self { document_repo }
    }

    pub async fn execute(
        &self,
        expert_name: &str,
        domain_name: Option<&str>,
    ) -> Result<Vec<String>, DomainError> {
        let documents = self
            .document_repo
            .list_by_creator(expert_name, domain_name)
            .await?;

        let names: BTreeSet<String> = documents
            .iter()
            .filter_map(|doc| doc.client_name().map(str::to_string))
            .collect();

        Ok(names.into_iter().collect())
    }
}

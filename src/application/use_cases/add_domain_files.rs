use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::use_cases::{DocumentIngestor, IngestReport, Outcome};
use crate::application::DomainRepository;
use crate::domain::{DomainError, OwnerTuple};

/// Attaches documents to a domain's default store.
pub struct AddDomainFilesUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    ingestor: Arc<DocumentIngestor>,
}

impl AddDomainFilesUseCase {
    pub fn new(domain_repo: Arc<dyn DomainRepository>, ingestor: Arc<DocumentIngestor>) -> Self {
        Self {
            domain_repo,
            ingestor,
        }
    }

    pub async fn execute(
        &self,
        domain_name: &str,
        mapping: &BTreeMap<String, String>,
    ) -> Result<Outcome<IngestReport>, DomainError> {
        let domain = self
            .domain_repo
            .find_by_name(domain_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))?;

        let store_id = domain.default_store_id().ok_or_else(|| {
            DomainError::invalid_request(format!("Domain {} has no default store", domain_name))
        })?;

        self.ingestor
            .attach(store_id, &OwnerTuple::domain(domain_name), mapping)
            .await
    }
}

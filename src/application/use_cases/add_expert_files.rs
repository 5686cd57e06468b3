use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::use_cases::{DocumentIngestor, IngestReport, Outcome, StoreResolver};
use crate::application::ExpertRepository;
use crate::domain::{DomainError, OwnerTuple};

/// Attaches documents to an expert's dedicated store, or to a client-scoped
/// store when a client name is given.
pub struct AddExpertFilesUseCase {
    expert_repo: Arc<dyn ExpertRepository>,
    resolver: Arc<StoreResolver>,
    ingestor: Arc<DocumentIngestor>,
}

impl AddExpertFilesUseCase {
    pub fn new(
        expert_repo: Arc<dyn ExpertRepository>,
        resolver: Arc<StoreResolver>,
        ingestor: Arc<DocumentIngestor>,
    ) -> Self {
        Self {
            expert_repo,
            resolver,
            ingestor,
        }
    }

    pub async fn execute(
        &self,
        expert_name: &str,
        client_name: Option<&str>,
        mapping: &BTreeMap<String, String>,
    ) -> Result<Outcome<IngestReport>, DomainError> {
        let expert = self
            .expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))?;

        let (resolved, owner) = match client_name {
            Some(client) => {
                let resolved = self
                    .resolver
                    .resolve_client_store(expert_name, client)
                    .await?;
                let owner = OwnerTuple::client(expert.domain(), expert_name, client);
                (resolved, owner)
            }
            None => {
                let resolved = self.resolver.ensure_dedicated_store(expert_name).await?;
                let owner = OwnerTuple::expert(expert.domain(), expert_name);
                (resolved, owner)
            }
        };

        self.ingestor
            .attach(&resolved.store_id, &owner, mapping)
            .await
    }
}

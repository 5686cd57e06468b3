use std::sync::Arc;

use tracing::info;

use crate::application::{DomainRepository, RetrievalEngine};
use crate::domain::{Domain, DomainError};

/// Registers a new domain and creates its default store alongside it.
pub struct CreateDomainUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    engine: Arc<dyn RetrievalEngine>,
}

impl CreateDomainUseCase {
    pub fn new(domain_repo: Arc<dyn DomainRepository>, engine: Arc<dyn RetrievalEngine>) -> Self {
        Self {
            domain_repo,
            engine,
        }
    }

    pub async fn execute(&self, domain_name: &str) -> Result<Domain, DomainError> {
        if self.domain_repo.find_by_name(domain_name).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Domain {} already exists",
                domain_name
            )));
        }

        let store_name = format!("Default_{}", domain_name);
        let store_id = self.engine.create_store(&store_name).await?;
        info!("Created default store {} ({})", store_name, store_id);

        let domain = Domain::new(domain_name.to_string(), Some(store_id));
        // A concurrent creation of the same name surfaces here as a Conflict
        // from the datastore's unique constraint.
        self.domain_repo.insert(&domain).await?;

        info!("Domain {} created", domain_name);
        Ok(domain)
    }
}

use std::sync::Arc;

use crate::application::DomainRepository;
use crate::domain::{Domain, DomainError};

pub struct ListDomainsUseCase {
    domain_repo: Arc<dyn DomainRepository>,
}

impl ListDomainsUseCase {
    pub fn new(domain_repo: Arc<dyn DomainRepository>) -> Self {
        Self { domain_repo }
    }

    pub async fn execute(&self) -> Result<Vec<Domain>, DomainError> {
        self.domain_repo.list().await
    }

    pub async fn find(&self, domain_name: &str) -> Result<Domain, DomainError> {
        self.domain_repo
            .find_by_name(domain_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))
    }
}

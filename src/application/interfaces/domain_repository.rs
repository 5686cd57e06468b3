use async_trait::async_trait;

use crate::domain::{Domain, DomainError};

/// Row access to the domains table.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Fails with `Conflict` when a domain with the same name already exists.
    async fn insert(&self, domain: &Domain) -> Result<(), DomainError>;

    async fn find_by_name(&self, domain_name: &str) -> Result<Option<Domain>, DomainError>;

    async fn list(&self) -> Result<Vec<Domain>, DomainError>;

    async fn set_default_store(
        &self,
        domain_name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError>;

    async fn set_expert_names(
        &self,
        domain_name: &str,
        expert_names: &[String],
    ) -> Result<(), DomainError>;
}

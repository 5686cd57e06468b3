use async_trait::async_trait;

use crate::domain::{DomainError, Expert};

/// Row access to the experts table.
#[async_trait]
pub trait ExpertRepository: Send + Sync {
    async fn insert(&self, expert: &Expert) -> Result<(), DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Expert>, DomainError>;

    async fn list(&self) -> Result<Vec<Expert>, DomainError>;

    async fn list_by_domain(&self, domain_name: &str) -> Result<Vec<Expert>, DomainError>;

    async fn update_context(&self, name: &str, context: &str) -> Result<(), DomainError>;

    async fn set_default_store(
        &self,
        name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError>;

    async fn set_preferred_store(
        &self,
        name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError>;
}

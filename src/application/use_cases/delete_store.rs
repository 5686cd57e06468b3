use std::sync::Arc;

use tracing::info;

use crate::application::{DomainRepository, ExpertRepository, RetrievalEngine, StoreRegistry};
use crate::domain::{DomainError, OwnerTuple, StoreRecord};

/// Tears stores down while enforcing ownership consistency: a domain store
/// cannot go while experts reference the domain, an expert store cannot go
/// while client-scoped stores reference the expert.
pub struct DeleteStoreUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    expert_repo: Arc<dyn ExpertRepository>,
    registry: Arc<dyn StoreRegistry>,
    engine: Arc<dyn RetrievalEngine>,
}

impl DeleteStoreUseCase {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        expert_repo: Arc<dyn ExpertRepository>,
        registry: Arc<dyn StoreRegistry>,
        engine: Arc<dyn RetrievalEngine>,
    ) -> Self {
        Self {
            domain_repo,
            expert_repo,
            registry,
            engine,
        }
    }

    /// Deletes an expert's preferred store by explicit id. The id must match
    /// the expert's current preferred store.
    pub async fn delete_expert_store(
        &self,
        expert_name: &str,
        store_id: &str,
    ) -> Result<(), DomainError> {
        let expert = self
            .expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))?;

        if expert.preferred_store_id() != Some(store_id) {
            return Err(DomainError::conflict(format!(
                "Store id {} does not match expert {}'s preferred store",
                store_id, expert_name
            )));
        }

        self.engine.delete_store(store_id).await?;
        self.expert_repo
            .set_preferred_store(expert_name, None)
            .await?;
        self.registry.delete(store_id).await?;

        info!("Deleted store {} for expert {}", store_id, expert_name);
        Ok(())
    }

    /// Deletes the store belonging to the owner inferred from the provided
    /// names: domain only, expert only, or expert plus client.
    pub async fn delete_by_owner(
        &self,
        domain_name: Option<&str>,
        expert_name: Option<&str>,
        client_name: Option<&str>,
    ) -> Result<StoreRecord, DomainError> {
        match (domain_name, expert_name, client_name) {
            (Some(domain), None, None) => self.delete_domain_store(domain).await,
            (_, Some(expert), Some(client)) => self.delete_client_store(expert, client).await,
            (_, Some(expert), None) => self.delete_expert_owned_store(expert).await,
            _ => Err(DomainError::invalid_request(
                "Provide either a domain only, an expert only, or an expert and client",
            )),
        }
    }

    async fn delete_domain_store(&self, domain_name: &str) -> Result<StoreRecord, DomainError> {
        let record = self.require_record(&OwnerTuple::domain(domain_name)).await?;

        let experts = self.expert_repo.list_by_domain(domain_name).await?;
        if !experts.is_empty() {
            return Err(DomainError::conflict(format!(
                "Cannot delete domain memory for '{}': {} experts still reference it. Remove the experts first.",
                domain_name,
                experts.len()
            )));
        }

        self.engine.delete_store(record.store_id()).await?;
        self.domain_repo
            .set_default_store(domain_name, None)
            .await?;
        self.registry.delete(record.store_id()).await?;

        info!("Deleted domain store {} for {}", record.store_id(), domain_name);
        Ok(record)
    }

    async fn delete_expert_owned_store(
        &self,
        expert_name: &str,
    ) -> Result<StoreRecord, DomainError> {
        let expert = self
            .expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))?;

        let record = self
            .require_record(&OwnerTuple::expert(expert.domain(), expert_name))
            .await?;

        let clients = self.registry.client_stores_for_expert(expert_name).await?;
        if !clients.is_empty() {
            return Err(DomainError::conflict(format!(
                "Cannot delete expert memory for '{}': {} client stores still reference it. Remove the client memories first.",
                expert_name,
                clients.len()
            )));
        }

        self.engine.delete_store(record.store_id()).await?;
        self.expert_repo
            .set_preferred_store(expert_name, None)
            .await?;
        self.registry.delete(record.store_id()).await?;

        info!("Deleted expert store {} for {}", record.store_id(), expert_name);
        Ok(record)
    }

    async fn delete_client_store(
        &self,
        expert_name: &str,
        client_name: &str,
    ) -> Result<StoreRecord, DomainError> {
        let expert = self
            .expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))?;

        let record = self
            .require_record(&OwnerTuple::client(expert.domain(), expert_name, client_name))
            .await?;

        self.engine.delete_store(record.store_id()).await?;
        self.registry.delete(record.store_id()).await?;

        info!(
            "Deleted client store {} for {} / {}",
            record.store_id(),
            expert_name,
            client_name
        );
        Ok(record)
    }

    async fn require_record(&self, tuple: &OwnerTuple) -> Result<StoreRecord, DomainError> {
        self.registry.find(tuple).await?.ok_or_else(|| {
            DomainError::not_found(format!("No store found for {}", tuple.describe()))
        })
    }
}

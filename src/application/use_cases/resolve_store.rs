use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{DomainRepository, ExpertRepository, RetrievalEngine, StoreRegistry};
use crate::domain::{DomainError, Expert, OwnerTuple, StoreRecord};

/// Result of resolving an owner tuple to a usable store.
#[derive(Debug, Clone)]
pub struct ResolvedStore {
    pub store_id: String,
    pub store_name: String,
    /// True when this resolution created the store rather than reusing one.
    pub created: bool,
}

/// Maps an owner tuple to a store identifier, creating one only when
/// necessary. This is the at-most-one-store-per-owner guarantee: domain and
/// expert resolutions cache their result on the owning row, client
/// resolutions reuse the registry record when one exists.
pub struct StoreResolver {
    domain_repo: Arc<dyn DomainRepository>,
    expert_repo: Arc<dyn ExpertRepository>,
    registry: Arc<dyn StoreRegistry>,
    engine: Arc<dyn RetrievalEngine>,
}

impl StoreResolver {
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

    /// Returns the domain's default store, creating and persisting it when
    /// the row does not carry one yet. Resolving twice returns the same
    /// identifier both times.
    pub async fn resolve_domain_store(
        &self,
        domain_name: &str,
    ) -> Result<ResolvedStore, DomainError> {
        let domain = self
            .domain_repo
            .find_by_name(domain_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))?;

        let store_name = domain.default_store_name();

        if let Some(store_id) = domain.default_store_id() {
            debug!("Domain {} already has default store {}", domain_name, store_id);
            return Ok(ResolvedStore {
                store_id: store_id.to_string(),
                store_name,
                created: false,
            });
        }

        info!("Creating default store {} for domain {}", store_name, domain_name);
        let store_id = self.engine.create_store(&store_name).await?;
        self.domain_repo
            .set_default_store(domain_name, Some(&store_id))
            .await?;

        Ok(ResolvedStore {
            store_id,
            store_name,
            created: true,
        })
    }

    /// Initializes an expert's store references at creation time: the owning
    /// domain's default is copied into the expert's default-store field
    /// unconditionally; opting into domain knowledge also copies it into the
    /// preferred-store field, otherwise a dedicated store is created.
    pub async fn init_expert_stores(
        &self,
        expert_name: &str,
        use_domain_default: bool,
    ) -> Result<ResolvedStore, DomainError> {
        let expert = self.require_expert(expert_name).await?;
        let domain_name = self.require_domain_association(&expert)?;

        let domain = self
            .domain_repo
            .find_by_name(domain_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))?;

        let default_store_id = domain.default_store_id().ok_or_else(|| {
            DomainError::invalid_request(format!(
                "Domain {} has no default store to copy",
                domain_name
            ))
        })?;

        self.expert_repo
            .set_default_store(expert_name, Some(default_store_id))
            .await?;

        if use_domain_default {
            self.expert_repo
                .set_preferred_store(expert_name, Some(default_store_id))
                .await?;
            info!(
                "Expert {} uses domain {} default store {}",
                expert_name, domain_name, default_store_id
            );
            return Ok(ResolvedStore {
                store_id: default_store_id.to_string(),
                store_name: domain.default_store_name(),
                created: false,
            });
        }

        self.ensure_dedicated_store(expert_name).await
    }

    /// Returns the expert's dedicated store, creating it (and registering
    /// its store record) at most once. An expert whose preferred store is
    /// already distinct from the domain default gets the cached identifier.
    pub async fn ensure_dedicated_store(
        &self,
        expert_name: &str,
    ) -> Result<ResolvedStore, DomainError> {
        let expert = self.require_expert(expert_name).await?;
        let domain_name = self.require_domain_association(&expert)?.to_string();
        let store_name = expert.dedicated_store_name();

        if let Some(preferred) = expert.preferred_store_id() {
            if expert.has_dedicated_store() {
                debug!("Expert {} already has dedicated store {}", expert_name, preferred);
                return Ok(ResolvedStore {
                    store_id: preferred.to_string(),
                    store_name,
                    created: false,
                });
            }
        }

        if self
            .domain_repo
            .find_by_name(&domain_name)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(format!(
                "Domain {} not found",
                domain_name
            )));
        }

        info!("Creating dedicated store {} for expert {}", store_name, expert_name);
        let store_id = self.engine.create_store(&store_name).await?;
        self.expert_repo
            .set_preferred_store(expert_name, Some(&store_id))
            .await?;

        let record = StoreRecord::new(
            store_id.clone(),
            OwnerTuple::expert(domain_name, expert_name),
            Vec::new(),
            None,
        );
        self.registry.insert(&record).await?;

        Ok(ResolvedStore {
            store_id,
            store_name,
            created: true,
        })
    }

    /// Resolves the store for an (expert, client) pair. An existing registry
    /// record is reused; otherwise a store is created WITHOUT registering a
    /// record — registration happens only once documents are attached, so an
    /// empty store leaves no bookkeeping behind.
    pub async fn resolve_client_store(
        &self,
        expert_name: &str,
        client_name: &str,
    ) -> Result<ResolvedStore, DomainError> {
        let expert = self.require_expert(expert_name).await?;
        let domain_name = self.require_domain_association(&expert)?.to_string();

        if self
            .domain_repo
            .find_by_name(&domain_name)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(format!(
                "Domain {} not found",
                domain_name
            )));
        }

        let store_name = expert.client_store_name(client_name);
        let tuple = OwnerTuple::client(domain_name, expert_name, client_name);

        if let Some(record) = self.registry.find(&tuple).await? {
            debug!(
                "Reusing client store {} for {}",
                record.store_id(),
                tuple.describe()
            );
            return Ok(ResolvedStore {
                store_id: record.store_id().to_string(),
                store_name,
                created: false,
            });
        }

        info!("Creating client store {} for {}", store_name, tuple.describe());
        let store_id = self.engine.create_store(&store_name).await?;

        Ok(ResolvedStore {
            store_id,
            store_name,
            created: true,
        })
    }

    async fn require_expert(&self, expert_name: &str) -> Result<Expert, DomainError> {
        self.expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))
    }

    fn require_domain_association<'a>(&self, expert: &'a Expert) -> Result<&'a str, DomainError> {
        if expert.domain().is_empty() {
            return Err(DomainError::invalid_request(format!(
                "Expert {} does not have an associated domain",
                expert.name()
            )));
        }
        Ok(expert.domain())
    }
}

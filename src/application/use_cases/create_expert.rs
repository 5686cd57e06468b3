use std::sync::Arc;

use tracing::{info, warn};

use crate::application::use_cases::{Outcome, StoreResolver, Warning};
use crate::application::{DomainRepository, ExpertRepository};
use crate::domain::{DomainError, Expert};

/// Registers a new expert under an existing domain, appends it to the
/// domain's advisory member list, and initializes its store references.
pub struct CreateExpertUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    expert_repo: Arc<dyn ExpertRepository>,
    resolver: Arc<StoreResolver>,
}

impl CreateExpertUseCase {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        expert_repo: Arc<dyn ExpertRepository>,
        resolver: Arc<StoreResolver>,
    ) -> Self {
        Self {
            domain_repo,
            expert_repo,
            resolver,
        }
    }

    pub async fn execute(
        &self,
        name: &str,
        domain_name: &str,
        context: &str,
        use_domain_default: bool,
    ) -> Result<Outcome<Expert>, DomainError> {
        let mut domain = self
            .domain_repo
            .find_by_name(domain_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))?;

        let expert = Expert::new(name.to_string(), domain_name.to_string(), context.to_string());
        self.expert_repo.insert(&expert).await?;
        info!("Expert {} created in domain {}", name, domain_name);

        // The expert row is durable from here on; the member-list append is
        // advisory and must not fail the creation.
        let mut warnings = Vec::new();
        if domain.add_expert(name) {
            if let Err(e) = self
                .domain_repo
                .set_expert_names(domain_name, domain.expert_names())
                .await
            {
                warn!("Failed to append {} to domain member list: {}", name, e);
                warnings.push(Warning::new(
                    "domain-members",
                    format!("member list not updated: {}", e),
                ));
            }
        }

        self.resolver
            .init_expert_stores(name, use_domain_default)
            .await?;

        let expert = self
            .expert_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", name)))?;

        Ok(Outcome::with_warnings(expert, warnings))
    }
}

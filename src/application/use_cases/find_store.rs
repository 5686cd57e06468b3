use std::sync::Arc;

use crate::application::StoreRegistry;
use crate::domain::{DomainError, StoreOwner, StoreRecord};

/// Looks a store up by equality filters, inferring the owner tier from the
/// most specific name provided. A multi-row match is rejected rather than
/// picked from arbitrarily.
pub struct FindStoreUseCase {
    registry: Arc<dyn StoreRegistry>,
}

impl FindStoreUseCase {
    pub fn new(registry: Arc<dyn StoreRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        domain_name: Option<&str>,
        expert_name: Option<&str>,
        client_name: Option<&str>,
    ) -> Result<StoreRecord, DomainError> {
        let owner = if client_name.is_some() {
            StoreOwner::Client
        } else if expert_name.is_some() {
            StoreOwner::Expert
        } else if domain_name.is_some() {
            StoreOwner::Domain
        } else {
            return Err(DomainError::invalid_request(
                "Specify a domain, expert, or client",
            ));
        };

        let mut records = self
            .registry
            .find_all(domain_name, expert_name, client_name, Some(owner))
            .await?;

        if records.len() > 1 {
            return Err(DomainError::invalid_request(
                "Multiple stores found. Narrow your search",
            ));
        }
        records
            .pop()
            .ok_or_else(|| DomainError::not_found("No store matches the given filters"))
    }
}

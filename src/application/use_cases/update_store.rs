use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::use_cases::{DocumentIngestor, IngestReport, Outcome};
use crate::application::StoreRegistry;
use crate::domain::DomainError;

/// Replaces a store's document mapping by id: kept references are reused,
/// new ones ingested, omitted ones removed.
pub struct UpdateStoreUseCase {
    registry: Arc<dyn StoreRegistry>,
    ingestor: Arc<DocumentIngestor>,
}

impl UpdateStoreUseCase {
    pub fn new(registry: Arc<dyn StoreRegistry>, ingestor: Arc<DocumentIngestor>) -> Self {
        Self { registry, ingestor }
    }

    pub async fn execute(
        &self,
        store_id: &str,
        mapping: &BTreeMap<String, String>,
    ) -> Result<Outcome<IngestReport>, DomainError> {
        let record = self
            .registry
            .find_by_store_id(store_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Store with id {} not found", store_id))
            })?;

        self.ingestor.edit_store(&record, mapping).await
    }
}

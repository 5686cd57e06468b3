use std::sync::Arc;

use crate::application::{IngestionBatch, RetrievalEngine, StoreRegistry};
use crate::domain::DomainError;

/// Reports the engine's status for one ingestion batch of a known store.
pub struct BatchStatusUseCase {
    registry: Arc<dyn StoreRegistry>,
    engine: Arc<dyn RetrievalEngine>,
}

impl BatchStatusUseCase {
    pub fn new(registry: Arc<dyn StoreRegistry>, engine: Arc<dyn RetrievalEngine>) -> Self {
        Self { registry, engine }
    }

    pub async fn execute(
        &self,
        store_id: &str,
        batch_id: &str,
    ) -> Result<IngestionBatch, DomainError> {
        if self.registry.find_by_store_id(store_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Store with id {} not found",
                store_id
            )));
        }

        self.engine.batch_status(store_id, batch_id).await
    }
}

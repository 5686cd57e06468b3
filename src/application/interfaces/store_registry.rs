use async_trait::async_trait;

use crate::domain::{DomainError, OwnerTuple, StoreOwner, StoreRecord, StoreRecordUpdate};

/// Bookkeeping over the vector_stores table. At most one record exists per
/// distinct owner tuple; `insert` is the write-time guard.
#[async_trait]
pub trait StoreRegistry: Send + Sync {
    /// Fails with `Conflict` when a record for the same owner tuple already
    /// exists (duplicate store).
    async fn insert(&self, record: &StoreRecord) -> Result<(), DomainError>;

    async fn find(&self, owner_tuple: &OwnerTuple) -> Result<Option<StoreRecord>, DomainError>;

    async fn find_by_store_id(&self, store_id: &str) -> Result<Option<StoreRecord>, DomainError>;

    /// All records matching the given equality filters, most commonly used
    /// by the filter-lookup operation.
    async fn find_all(
        &self,
        domain_name: Option<&str>,
        expert_name: Option<&str>,
        client_name: Option<&str>,
        owner: Option<StoreOwner>,
    ) -> Result<Vec<StoreRecord>, DomainError>;

    /// Client-scoped records referencing the given expert; used to block
    /// expert-store deletion while dependents exist.
    async fn client_stores_for_expert(
        &self,
        expert_name: &str,
    ) -> Result<Vec<StoreRecord>, DomainError>;

    async fn update(&self, store_id: &str, update: &StoreRecordUpdate)
        -> Result<(), DomainError>;

    async fn delete(&self, store_id: &str) -> Result<(), DomainError>;
}

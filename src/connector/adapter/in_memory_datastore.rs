use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{
    DocumentRepository, DomainRepository, ExpertRepository, StoreRegistry,
};
use crate::domain::{
    Document, DocumentFilter, Domain, DomainError, Expert, OwnerTuple, StoreOwner, StoreRecord,
    StoreRecordUpdate,
};

/// In-memory stand-in for the relational datastore. Enforces the same
/// unique constraints as the managed tables (domain name, expert name,
/// one store record per owner tuple) so callers exercise the identical
/// `Conflict` surface.
pub struct InMemoryDatastore {
    domains: Arc<Mutex<HashMap<String, Domain>>>,
    experts: Arc<Mutex<HashMap<String, Expert>>>,
    stores: Arc<Mutex<HashMap<String, StoreRecord>>>,
    documents: Arc<Mutex<Vec<Document>>>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self {
            domains: Arc::new(Mutex::new(HashMap::new())),
            experts: Arc::new(Mutex::new(HashMap::new())),
            stores: Arc::new(Mutex::new(HashMap::new())),
            documents: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for InMemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainRepository for InMemoryDatastore {
    async fn insert(&self, domain: &Domain) -> Result<(), DomainError> {
        let mut domains = self.domains.lock().await;
        if domains.contains_key(domain.name()) {
            return Err(DomainError::conflict(format!(
                "Domain {} already exists",
                domain.name()
            )));
        }
        domains.insert(domain.name().to_string(), domain.clone());
        debug!("Inserted domain {}", domain.name());
        Ok(())
    }

    async fn find_by_name(&self, domain_name: &str) -> Result<Option<Domain>, DomainError> {
        let domains = self.domains.lock().await;
        Ok(domains.get(domain_name).cloned())
    }

    async fn list(&self) -> Result<Vec<Domain>, DomainError> {
        let domains = self.domains.lock().await;
        let mut all: Vec<Domain> = domains.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn set_default_store(
        &self,
        domain_name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut domains = self.domains.lock().await;
        let domain = domains
            .get_mut(domain_name)
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))?;
        domain.set_default_store(store_id.map(str::to_string));
        Ok(())
    }

    async fn set_expert_names(
        &self,
        domain_name: &str,
        expert_names: &[String],
    ) -> Result<(), DomainError> {
        let mut domains = self.domains.lock().await;
        let domain = domains
            .get_mut(domain_name)
            .ok_or_else(|| DomainError::not_found(format!("Domain {} not found", domain_name)))?;
        domain.set_expert_names(expert_names.to_vec());
        Ok(())
    }
}

#[async_trait]
impl ExpertRepository for InMemoryDatastore {
    async fn insert(&self, expert: &Expert) -> Result<(), DomainError> {
        let mut experts = self.experts.lock().await;
        if experts.contains_key(expert.name()) {
            return Err(DomainError::conflict(format!(
                "Expert {} already exists",
                expert.name()
            )));
        }
        experts.insert(expert.name().to_string(), expert.clone());
        debug!("Inserted expert {}", expert.name());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Expert>, DomainError> {
        let experts = self.experts.lock().await;
        Ok(experts.get(name).cloned())
    }

    async fn list(&self) -> Result<Vec<Expert>, DomainError> {
        let experts = self.experts.lock().await;
        let mut all: Vec<Expert> = experts.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn list_by_domain(&self, domain_name: &str) -> Result<Vec<Expert>, DomainError> {
        let experts = self.experts.lock().await;
        let mut matching: Vec<Expert> = experts
            .values()
            .filter(|e| e.domain() == domain_name)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(matching)
    }

    async fn update_context(&self, name: &str, context: &str) -> Result<(), DomainError> {
        let mut experts = self.experts.lock().await;
        let expert = experts
            .get_mut(name)
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", name)))?;
        expert.set_context(context.to_string());
        Ok(())
    }

    async fn set_default_store(
        &self,
        name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut experts = self.experts.lock().await;
        let expert = experts
            .get_mut(name)
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", name)))?;
        expert.set_default_store(store_id.map(str::to_string));
        Ok(())
    }

    async fn set_preferred_store(
        &self,
        name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut experts = self.experts.lock().await;
        let expert = experts
            .get_mut(name)
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", name)))?;
        expert.set_preferred_store(store_id.map(str::to_string));
        Ok(())
    }
}

#[async_trait]
impl StoreRegistry for InMemoryDatastore {
    async fn insert(&self, record: &StoreRecord) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().await;
        let tuple = record.owner_tuple();
        if stores.values().any(|r| r.owner_tuple() == tuple) {
            return Err(DomainError::conflict(format!(
                "Duplicate store for {}",
                tuple.describe()
            )));
        }
        stores.insert(record.store_id().to_string(), record.clone());
        debug!("Registered store {} for {}", record.store_id(), tuple.describe());
        Ok(())
    }

    async fn find(&self, owner_tuple: &OwnerTuple) -> Result<Option<StoreRecord>, DomainError> {
        let stores = self.stores.lock().await;
        Ok(stores
            .values()
            .find(|r| r.owner_tuple() == *owner_tuple)
            .cloned())
    }

    async fn find_by_store_id(&self, store_id: &str) -> Result<Option<StoreRecord>, DomainError> {
        let stores = self.stores.lock().await;
        Ok(stores.get(store_id).cloned())
    }

    async fn find_all(
        &self,
        domain_name: Option<&str>,
        expert_name: Option<&str>,
        client_name: Option<&str>,
        owner: Option<StoreOwner>,
    ) -> Result<Vec<StoreRecord>, DomainError> {
        let stores = self.stores.lock().await;
        let mut matching: Vec<StoreRecord> = stores
            .values()
            .filter(|r| {
                domain_name.map_or(true, |d| r.domain_name() == d)
                    && expert_name.map_or(true, |e| r.expert_name() == Some(e))
                    && client_name.map_or(true, |c| r.client_name() == Some(c))
                    && owner.map_or(true, |o| r.owner() == o)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.store_id().cmp(b.store_id()));
        Ok(matching)
    }

    async fn client_stores_for_expert(
        &self,
        expert_name: &str,
    ) -> Result<Vec<StoreRecord>, DomainError> {
        self.find_all(None, Some(expert_name), None, Some(StoreOwner::Client))
            .await
    }

    async fn update(
        &self,
        store_id: &str,
        update: &StoreRecordUpdate,
    ) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().await;
        let record = stores
            .get_mut(store_id)
            .ok_or_else(|| DomainError::not_found(format!("Store {} not found", store_id)))?;
        record.apply_update(update);
        Ok(())
    }

    async fn delete(&self, store_id: &str) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().await;
        stores.remove(store_id);
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDatastore {
    async fn insert(&self, document: &Document) -> Result<(), DomainError> {
        let mut documents = self.documents.lock().await;
        documents.push(document.clone());
        Ok(())
    }

    async fn find_by_content_ids(
        &self,
        content_ids: &[String],
    ) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.lock().await;
        Ok(documents
            .iter()
            .filter(|d| content_ids.iter().any(|id| id == d.content_id()))
            .cloned()
            .collect())
    }

    async fn delete_by_content_ids(&self, content_ids: &[String]) -> Result<u64, DomainError> {
        let mut documents = self.documents.lock().await;
        let before = documents.len();
        documents.retain(|d| !content_ids.iter().any(|id| id == d.content_id()));
        Ok((before - documents.len()) as u64)
    }

    async fn list(&self, filter: &DocumentFilter) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.lock().await;
        Ok(documents.iter().filter(|d| filter.matches(d)).cloned().collect())
    }

    async fn list_by_creator(
        &self,
        created_by: &str,
        domain_name: Option<&str>,
    ) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.lock().await;
        Ok(documents
            .iter()
            .filter(|d| {
                d.created_by() == created_by && domain_name.map_or(true, |dn| d.domain() == dn)
            })
            .cloned()
            .collect())
    }
}

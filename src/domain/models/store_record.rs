use serde::{Deserialize, Serialize};

use super::current_timestamp;

/// Which tier of the memory hierarchy a store belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOwner {
    Domain,
    Expert,
    Client,
}

impl StoreOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOwner::Domain => "domain",
            StoreOwner::Expert => "expert",
            StoreOwner::Client => "client",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "domain" => Some(StoreOwner::Domain),
            "expert" => Some(StoreOwner::Expert),
            "client" => Some(StoreOwner::Client),
            _ => None,
        }
    }
}

/// The (domain, expert-or-null, client-or-null) triple identifying which
/// entity a store belongs to. A client tuple always carries its expert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerTuple {
    domain_name: String,
    expert_name: Option<String>,
    client_name: Option<String>,
}

impl OwnerTuple {
    pub fn domain(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            expert_name: None,
            client_name: None,
        }
    }

    pub fn expert(domain_name: impl Into<String>, expert_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            expert_name: Some(expert_name.into()),
            client_name: None,
        }
    }

    pub fn client(
        domain_name: impl Into<String>,
        expert_name: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            expert_name: Some(expert_name.into()),
            client_name: Some(client_name.into()),
        }
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn expert_name(&self) -> Option<&str> {
        self.expert_name.as_deref()
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn owner(&self) -> StoreOwner {
        match (&self.expert_name, &self.client_name) {
            (Some(_), Some(_)) => StoreOwner::Client,
            (Some(_), None) => StoreOwner::Expert,
            _ => StoreOwner::Domain,
        }
    }

    /// Human-readable form for error messages.
    pub fn describe(&self) -> String {
        match (&self.expert_name, &self.client_name) {
            (Some(expert), Some(client)) => {
                format!("expert {} / client {} / domain {}", expert, client, self.domain_name)
            }
            (Some(expert), None) => format!("expert {} / domain {}", expert, self.domain_name),
            _ => format!("domain {}", self.domain_name),
        }
    }
}

/// Bookkeeping row for one retrieval store: which owner tuple it belongs to
/// and which content/batch identifiers it has accumulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    store_id: String,
    owner: StoreOwner,
    domain_name: String,
    expert_name: Option<String>,
    client_name: Option<String>,
    file_ids: Vec<String>,
    batch_ids: Vec<String>,
    latest_batch_id: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl StoreRecord {
    pub fn new(
        store_id: String,
        owner_tuple: OwnerTuple,
        file_ids: Vec<String>,
        batch_id: Option<String>,
    ) -> Self {
        let now = current_timestamp();
        Self {
            store_id,
            owner: owner_tuple.owner(),
            domain_name: owner_tuple.domain_name,
            expert_name: owner_tuple.expert_name,
            client_name: owner_tuple.client_name,
            file_ids,
            batch_ids: batch_id.iter().cloned().collect(),
            latest_batch_id: batch_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        store_id: String,
        owner: StoreOwner,
        domain_name: String,
        expert_name: Option<String>,
        client_name: Option<String>,
        file_ids: Vec<String>,
        batch_ids: Vec<String>,
        latest_batch_id: Option<String>,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            store_id,
            owner,
            domain_name,
            expert_name,
            client_name,
            file_ids,
            batch_ids,
            latest_batch_id,
            created_at,
            updated_at,
        }
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn owner(&self) -> StoreOwner {
        self.owner
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn expert_name(&self) -> Option<&str> {
        self.expert_name.as_deref()
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn file_ids(&self) -> &[String] {
        &self.file_ids
    }

    pub fn batch_ids(&self) -> &[String] {
        &self.batch_ids
    }

    pub fn latest_batch_id(&self) -> Option<&str> {
        self.latest_batch_id.as_deref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn owner_tuple(&self) -> OwnerTuple {
        OwnerTuple {
            domain_name: self.domain_name.clone(),
            expert_name: self.expert_name.clone(),
            client_name: self.client_name.clone(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.file_ids.len()
    }

    /// Applies an edit's final field values and bumps the update timestamp.
    pub fn apply_update(&mut self, update: &StoreRecordUpdate) {
        self.file_ids = update.file_ids.clone();
        self.batch_ids = update.batch_ids.clone();
        self.latest_batch_id = update.latest_batch_id.clone();
        self.updated_at = current_timestamp();
    }
}

/// Final field values applied to a store record after an edit. Batch ids
/// accumulate across edits; `latest_batch_id` carries the previous value
/// through a no-op edit.
#[derive(Debug, Clone)]
pub struct StoreRecordUpdate {
    pub file_ids: Vec<String>,
    pub batch_ids: Vec<String>,
    pub latest_batch_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_derived_from_tuple() {
        assert_eq!(OwnerTuple::domain("peds").owner(), StoreOwner::Domain);
        assert_eq!(OwnerTuple::expert("peds", "DrSmith").owner(), StoreOwner::Expert);
        assert_eq!(
            OwnerTuple::client("peds", "DrSmith", "acme").owner(),
            StoreOwner::Client
        );
    }

    #[test]
    fn test_new_record_carries_single_batch() {
        let record = StoreRecord::new(
            "vs_1".to_string(),
            OwnerTuple::expert("peds", "DrSmith"),
            vec!["file_1".to_string(), "file_2".to_string()],
            Some("batch_1".to_string()),
        );

        assert_eq!(record.owner(), StoreOwner::Expert);
        assert_eq!(record.batch_ids(), &["batch_1".to_string()]);
        assert_eq!(record.latest_batch_id(), Some("batch_1"));
        assert_eq!(record.file_count(), 2);
    }

    #[test]
    fn test_owner_tuple_roundtrip() {
        let tuple = OwnerTuple::client("peds", "DrSmith", "acme");
        let record = StoreRecord::new("vs_9".to_string(), tuple.clone(), vec![], None);
        assert_eq!(record.owner_tuple(), tuple);
    }

    #[test]
    fn test_store_owner_parse() {
        assert_eq!(StoreOwner::parse("Domain"), Some(StoreOwner::Domain));
        assert_eq!(StoreOwner::parse("client"), Some(StoreOwner::Client));
        assert_eq!(StoreOwner::parse("tenant"), None);
    }
}

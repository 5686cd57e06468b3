use serde::{Deserialize, Serialize};

use super::current_timestamp;

/// A knowledge domain. Each domain carries a default retrieval store shared
/// by every expert that opts into domain-wide memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    domain_name: String,
    default_store_id: Option<String>,
    /// Advisory cache of member expert names; the experts table is
    /// authoritative.
    expert_names: Vec<String>,
    created_at: i64,
}

impl Domain {
    pub fn new(domain_name: String, default_store_id: Option<String>) -> Self {
        Self {
            domain_name,
            default_store_id,
            expert_names: Vec::new(),
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(
        domain_name: String,
        default_store_id: Option<String>,
        expert_names: Vec<String>,
        created_at: i64,
    ) -> Self {
        Self {
            domain_name,
            default_store_id,
            expert_names,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.domain_name
    }

    pub fn default_store_id(&self) -> Option<&str> {
        self.default_store_id.as_deref()
    }

    pub fn expert_names(&self) -> &[String] {
        &self.expert_names
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn default_store_name(&self) -> String {
        format!("Default_{}", self.domain_name)
    }

    pub fn has_expert(&self, expert_name: &str) -> bool {
        self.expert_names.iter().any(|n| n == expert_name)
    }

    /// Appends an expert name to the advisory member list. Returns `false`
    /// when the name was already present (the list never holds duplicates).
    pub fn add_expert(&mut self, expert_name: &str) -> bool {
        if self.has_expert(expert_name) {
            return false;
        }
        self.expert_names.push(expert_name.to_string());
        true
    }

    pub fn set_default_store(&mut self, store_id: Option<String>) {
        self.default_store_id = store_id;
    }

    pub fn set_expert_names(&mut self, expert_names: Vec<String>) {
        self.expert_names = expert_names;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_expert_is_idempotent() {
        let mut domain = Domain::new("peds".to_string(), Some("vs_1".to_string()));

        assert!(domain.add_expert("DrSmith"));
        assert!(!domain.add_expert("DrSmith"));
        assert_eq!(domain.expert_names(), &["DrSmith".to_string()]);
    }

    #[test]
    fn test_default_store_name() {
        let domain = Domain::new("peds".to_string(), None);
        assert_eq!(domain.default_store_name(), "Default_peds");
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;

/// An expert persona bound to a single domain. The default store mirrors the
/// owning domain's default at creation time; the preferred store is where
/// queries with expert-level memory are routed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expert {
    id: String,
    name: String,
    domain: String,
    context: String,
    default_store_id: Option<String>,
    preferred_store_id: Option<String>,
    created_at: i64,
}

impl Expert {
    pub fn new(name: String, domain: String, context: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            domain,
            context,
            default_store_id: None,
            preferred_store_id: None,
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        name: String,
        domain: String,
        context: String,
        default_store_id: Option<String>,
        preferred_store_id: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            name,
            domain,
            context,
            default_store_id,
            preferred_store_id,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn default_store_id(&self) -> Option<&str> {
        self.default_store_id.as_deref()
    }

    pub fn preferred_store_id(&self) -> Option<&str> {
        self.preferred_store_id.as_deref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn dedicated_store_name(&self) -> String {
        format!("{}_{}", self.name, self.domain)
    }

    pub fn client_store_name(&self, client_name: &str) -> String {
        format!("{}_{}_{}", self.name, client_name, self.domain)
    }

    pub fn set_context(&mut self, context: String) {
        self.context = context;
    }

    pub fn set_default_store(&mut self, store_id: Option<String>) {
        self.default_store_id = store_id;
    }

    pub fn set_preferred_store(&mut self, store_id: Option<String>) {
        self.preferred_store_id = store_id;
    }

    /// True when the preferred store exists and is distinct from the domain
    /// default, i.e. a dedicated store has been created for this expert.
    pub fn has_dedicated_store(&self) -> bool {
        match (&self.preferred_store_id, &self.default_store_id) {
            (Some(preferred), Some(default)) => preferred != default,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expert_with_stores(default: Option<&str>, preferred: Option<&str>) -> Expert {
        Expert::reconstitute(
            "id-1".to_string(),
            "DrSmith".to_string(),
            "peds".to_string(),
            "pediatrician".to_string(),
            default.map(str::to_string),
            preferred.map(str::to_string),
            0,
        )
    }

    #[test]
    fn test_store_names() {
        let expert = expert_with_stores(None, None);
        assert_eq!(expert.dedicated_store_name(), "DrSmith_peds");
        assert_eq!(expert.client_store_name("acme"), "DrSmith_acme_peds");
    }

    #[test]
    fn test_has_dedicated_store() {
        assert!(!expert_with_stores(None, None).has_dedicated_store());
        assert!(!expert_with_stores(Some("vs_1"), Some("vs_1")).has_dedicated_store());
        assert!(expert_with_stores(Some("vs_1"), Some("vs_2")).has_dedicated_store());
    }
}

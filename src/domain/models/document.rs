use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;

/// Who a document was ingested for when no expert is involved.
pub const DEFAULT_CREATOR: &str = "default";

/// A document reference tracked alongside its engine-issued content id.
/// Documents reference their parent domain/expert/client by name and do not
/// own them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    id: String,
    name: String,
    link: String,
    domain: String,
    created_by: String,
    client_name: Option<String>,
    content_id: String,
    created_at: i64,
}

impl Document {
    pub fn new(
        name: String,
        link: String,
        domain: String,
        created_by: Option<String>,
        client_name: Option<String>,
        content_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            link,
            domain,
            created_by: created_by.unwrap_or_else(|| DEFAULT_CREATOR.to_string()),
            client_name,
            content_id,
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        name: String,
        link: String,
        domain: String,
        created_by: String,
        client_name: Option<String>,
        content_id: String,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            name,
            link,
            domain,
            created_by,
            client_name,
            content_id,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

/// Equality/null filter over the documents table. Constructors encode the
/// three listing priorities: client-scoped, creator-scoped with no client,
/// and domain defaults.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    domain: Option<String>,
    created_by: Option<String>,
    client_name: Option<String>,
    require_null_client: bool,
}

impl DocumentFilter {
    pub fn for_client(
        client_name: impl Into<String>,
        domain: Option<String>,
        created_by: Option<String>,
    ) -> Self {
        Self {
            domain,
            created_by,
            client_name: Some(client_name.into()),
            require_null_client: false,
        }
    }

    pub fn for_creator(created_by: impl Into<String>, domain: Option<String>) -> Self {
        Self {
            domain,
            created_by: Some(created_by.into()),
            client_name: None,
            require_null_client: true,
        }
    }

    pub fn domain_defaults(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            created_by: Some(DEFAULT_CREATOR.to_string()),
            client_name: None,
            require_null_client: true,
        }
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn requires_null_client(&self) -> bool {
        self.require_null_client
    }

    pub fn matches(&self, document: &Document) -> bool {
        if let Some(domain) = &self.domain {
            if document.domain() != domain {
                return false;
            }
        }
        if let Some(created_by) = &self.created_by {
            if document.created_by() != created_by {
                return false;
            }
        }
        if let Some(client_name) = &self.client_name {
            if document.client_name() != Some(client_name.as_str()) {
                return false;
            }
        }
        if self.require_null_client && document.client_name().is_some() {
            return false;
        }
        true
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{
    DocumentRepository, DomainRepository, ExpertRepository, StoreRegistry,
};
use crate::domain::models::current_timestamp;
use crate::domain::{
    Document, DocumentFilter, Domain, DomainError, Expert, OwnerTuple, StoreOwner, StoreRecord,
    StoreRecordUpdate,
};

const REST_PATH: &str = "/rest/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize, Deserialize)]
struct DomainRow {
    domain_name: String,
    default_store_id: Option<String>,
    #[serde(default)]
    expert_names: Option<Vec<String>>,
    #[serde(default)]
    created_at: Option<i64>,
}

impl DomainRow {
    fn from_model(domain: &Domain) -> Self {
        Self {
            domain_name: domain.name().to_string(),
            default_store_id: domain.default_store_id().map(str::to_string),
            expert_names: Some(domain.expert_names().to_vec()),
            created_at: Some(domain.created_at()),
        }
    }

    fn into_model(self) -> Domain {
        Domain::reconstitute(
            self.domain_name,
            self.default_store_id,
            self.expert_names.unwrap_or_default(),
            self.created_at.unwrap_or(0),
        )
    }
}

#[derive(Serialize, Deserialize)]
struct ExpertRow {
    id: String,
    name: String,
    domain: String,
    context: String,
    default_store_id: Option<String>,
    preferred_store_id: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
}

impl ExpertRow {
    fn from_model(expert: &Expert) -> Self {
        Self {
            id: expert.id().to_string(),
            name: expert.name().to_string(),
            domain: expert.domain().to_string(),
            context: expert.context().to_string(),
            default_store_id: expert.default_store_id().map(str::to_string),
            preferred_store_id: expert.preferred_store_id().map(str::to_string),
            created_at: Some(expert.created_at()),
        }
    }

    fn into_model(self) -> Expert {
        Expert::reconstitute(
            self.id,
            self.name,
            self.domain,
            self.context,
            self.default_store_id,
            self.preferred_store_id,
            self.created_at.unwrap_or(0),
        )
    }
}

#[derive(Serialize, Deserialize)]
struct StoreRow {
    store_id: String,
    owner: StoreOwner,
    domain_name: String,
    expert_name: Option<String>,
    client_name: Option<String>,
    #[serde(default)]
    file_ids: Vec<String>,
    #[serde(default)]
    batch_ids: Vec<String>,
    latest_batch_id: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl StoreRow {
    fn from_model(record: &StoreRecord) -> Self {
        Self {
            store_id: record.store_id().to_string(),
            owner: record.owner(),
            domain_name: record.domain_name().to_string(),
            expert_name: record.expert_name().map(str::to_string),
            client_name: record.client_name().map(str::to_string),
            file_ids: record.file_ids().to_vec(),
            batch_ids: record.batch_ids().to_vec(),
            latest_batch_id: record.latest_batch_id().map(str::to_string),
            created_at: Some(record.created_at()),
            updated_at: Some(record.updated_at()),
        }
    }

    fn into_model(self) -> StoreRecord {
        StoreRecord::reconstitute(
            self.store_id,
            self.owner,
            self.domain_name,
            self.expert_name,
            self.client_name,
            self.file_ids,
            self.batch_ids,
            self.latest_batch_id,
            self.created_at.unwrap_or(0),
            self.updated_at.unwrap_or(0),
        )
    }
}

#[derive(Serialize, Deserialize)]
struct DocumentRow {
    id: String,
    name: String,
    link: String,
    domain: String,
    created_by: String,
    client_name: Option<String>,
    content_id: String,
    #[serde(default)]
    created_at: Option<i64>,
}

impl DocumentRow {
    fn from_model(document: &Document) -> Self {
        Self {
            id: document.id().to_string(),
            name: document.name().to_string(),
            link: document.link().to_string(),
            domain: document.domain().to_string(),
            created_by: document.created_by().to_string(),
            client_name: document.client_name().map(str::to_string),
            content_id: document.content_id().to_string(),
            created_at: Some(document.created_at()),
        }
    }

    fn into_model(self) -> Document {
        Document::reconstitute(
            self.id,
            self.name,
            self.link,
            self.domain,
            self.created_by,
            self.client_name,
            self.content_id,
            self.created_at.unwrap_or(0),
        )
    }
}

/// Client for a PostgREST-style managed relational API. Implements every
/// repository port with table-scoped reads and writes; the datastore's own
/// unique constraints provide the only mutual exclusion, surfacing here as
/// `Conflict` on 409 responses.
pub struct PostgrestDatastore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestDatastore {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        let trimmed = base_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: format!("{}{}", trimmed, REST_PATH),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, DomainError> {
        let response = self
            .authed(self.client.get(self.table_url(table)))
            .query(filters)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Datastore select on {}: {}", table, e)))?;

        let response = Self::check(table, response).await?;
        response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Datastore select on {}: {}", table, e)))
    }

    async fn insert_row<T: Serialize>(&self, table: &str, row: &T) -> Result<(), DomainError> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Datastore insert on {}: {}", table, e)))?;

        Self::check(table, response).await?;
        debug!("Inserted row into {}", table);
        Ok(())
    }

    async fn patch(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: serde_json::Value,
    ) -> Result<(), DomainError> {
        let response = self
            .authed(self.client.patch(self.table_url(table)))
            .query(filters)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Datastore update on {}: {}", table, e)))?;

        Self::check(table, response).await?;
        Ok(())
    }

    async fn delete_rows(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<u64, DomainError> {
        let response = self
            .authed(self.client.delete(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(filters)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Datastore delete on {}: {}", table, e)))?;

        let response = Self::check(table, response).await?;
        let deleted: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Datastore delete on {}: {}", table, e)))?;
        Ok(deleted.len() as u64)
    }

    async fn check(
        table: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Datastore returned {} on {}: {}", status, table, body);
        if status == reqwest::StatusCode::CONFLICT {
            Err(DomainError::conflict(format!("Duplicate row in {}", table)))
        } else {
            Err(DomainError::upstream(format!(
                "Datastore returned {} on {}",
                status, table
            )))
        }
    }

    fn in_filter(ids: &[String]) -> String {
        format!("in.({})", ids.join(","))
    }
}

#[async_trait]
impl DomainRepository for PostgrestDatastore {
    async fn insert(&self, domain: &Domain) -> Result<(), DomainError> {
        self.insert_row("domains", &DomainRow::from_model(domain)).await
    }

    async fn find_by_name(&self, domain_name: &str) -> Result<Option<Domain>, DomainError> {
        let rows: Vec<DomainRow> = self
            .select("domains", &[("domain_name", format!("eq.{}", domain_name))])
            .await?;
        Ok(rows.into_iter().next().map(DomainRow::into_model))
    }

    async fn list(&self) -> Result<Vec<Domain>, DomainError> {
        let rows: Vec<DomainRow> = self
            .select("domains", &[("order", "domain_name.asc".to_string())])
            .await?;
        Ok(rows.into_iter().map(DomainRow::into_model).collect())
    }

    async fn set_default_store(
        &self,
        domain_name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError> {
        self.patch(
            "domains",
            &[("domain_name", format!("eq.{}", domain_name))],
            serde_json::json!({ "default_store_id": store_id }),
        )
        .await
    }

    async fn set_expert_names(
        &self,
        domain_name: &str,
        expert_names: &[String],
    ) -> Result<(), DomainError> {
        self.patch(
            "domains",
            &[("domain_name", format!("eq.{}", domain_name))],
            serde_json::json!({ "expert_names": expert_names }),
        )
        .await
    }
}

#[async_trait]
impl ExpertRepository for PostgrestDatastore {
    async fn insert(&self, expert: &Expert) -> Result<(), DomainError> {
        self.insert_row("experts", &ExpertRow::from_model(expert)).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Expert>, DomainError> {
        let rows: Vec<ExpertRow> = self
            .select("experts", &[("name", format!("eq.{}", name))])
            .await?;
        Ok(rows.into_iter().next().map(ExpertRow::into_model))
    }

    async fn list(&self) -> Result<Vec<Expert>, DomainError> {
        let rows: Vec<ExpertRow> = self
            .select("experts", &[("order", "name.asc".to_string())])
            .await?;
        Ok(rows.into_iter().map(ExpertRow::into_model).collect())
    }

    async fn list_by_domain(&self, domain_name: &str) -> Result<Vec<Expert>, DomainError> {
        let rows: Vec<ExpertRow> = self
            .select("experts", &[("domain", format!("eq.{}", domain_name))])
            .await?;
        Ok(rows.into_iter().map(ExpertRow::into_model).collect())
    }

    async fn update_context(&self, name: &str, context: &str) -> Result<(), DomainError> {
        self.patch(
            "experts",
            &[("name", format!("eq.{}", name))],
            serde_json::json!({ "context": context }),
        )
        .await
    }

    async fn set_default_store(
        &self,
        name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError> {
        self.patch(
            "experts",
            &[("name", format!("eq.{}", name))],
            serde_json::json!({ "default_store_id": store_id }),
        )
        .await
    }

    async fn set_preferred_store(
        &self,
        name: &str,
        store_id: Option<&str>,
    ) -> Result<(), DomainError> {
        self.patch(
            "experts",
            &[("name", format!("eq.{}", name))],
            serde_json::json!({ "preferred_store_id": store_id }),
        )
        .await
    }
}

#[async_trait]
impl StoreRegistry for PostgrestDatastore {
    async fn insert(&self, record: &StoreRecord) -> Result<(), DomainError> {
        self.insert_row("stores", &StoreRow::from_model(record)).await
    }

    async fn find(&self, owner_tuple: &OwnerTuple) -> Result<Option<StoreRecord>, DomainError> {
        let mut filters = vec![
            ("domain_name", format!("eq.{}", owner_tuple.domain_name())),
            ("owner", format!("eq.{}", owner_tuple.owner().as_str())),
        ];
        filters.push((
            "expert_name",
            match owner_tuple.expert_name() {
                Some(expert) => format!("eq.{}", expert),
                None => "is.null".to_string(),
            },
        ));
        filters.push((
            "client_name",
            match owner_tuple.client_name() {
                Some(client) => format!("eq.{}", client),
                None => "is.null".to_string(),
            },
        ));

        let rows: Vec<StoreRow> = self.select("stores", &filters).await?;
        Ok(rows.into_iter().next().map(StoreRow::into_model))
    }

    async fn find_by_store_id(&self, store_id: &str) -> Result<Option<StoreRecord>, DomainError> {
        let rows: Vec<StoreRow> = self
            .select("stores", &[("store_id", format!("eq.{}", store_id))])
            .await?;
        Ok(rows.into_iter().next().map(StoreRow::into_model))
    }

    async fn find_all(
        &self,
        domain_name: Option<&str>,
        expert_name: Option<&str>,
        client_name: Option<&str>,
        owner: Option<StoreOwner>,
    ) -> Result<Vec<StoreRecord>, DomainError> {
        let mut filters: Vec<(&str, String)> = Vec::new();
        if let Some(domain) = domain_name {
            filters.push(("domain_name", format!("eq.{}", domain)));
        }
        if let Some(expert) = expert_name {
            filters.push(("expert_name", format!("eq.{}", expert)));
        }
        if let Some(client) = client_name {
            filters.push(("client_name", format!("eq.{}", client)));
        }
        if let Some(owner) = owner {
            filters.push(("owner", format!("eq.{}", owner.as_str())));
        }

        let rows: Vec<StoreRow> = self.select("stores", &filters).await?;
        Ok(rows.into_iter().map(StoreRow::into_model).collect())
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
        self.patch(
            "stores",
            &[("store_id", format!("eq.{}", store_id))],
            serde_json::json!({
                "file_ids": update.file_ids,
                "batch_ids": update.batch_ids,
                "latest_batch_id": update.latest_batch_id,
                "updated_at": current_timestamp(),
            }),
        )
        .await
    }

    async fn delete(&self, store_id: &str) -> Result<(), DomainError> {
        self.delete_rows("stores", &[("store_id", format!("eq.{}", store_id))])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for PostgrestDatastore {
    async fn insert(&self, document: &Document) -> Result<(), DomainError> {
        self.insert_row("documents", &DocumentRow::from_model(document)).await
    }

    async fn find_by_content_ids(
        &self,
        content_ids: &[String],
    ) -> Result<Vec<Document>, DomainError> {
        if content_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<DocumentRow> = self
            .select(
                "documents",
                &[("content_id", Self::in_filter(content_ids))],
            )
            .await?;
        Ok(rows.into_iter().map(DocumentRow::into_model).collect())
    }

    async fn delete_by_content_ids(&self, content_ids: &[String]) -> Result<u64, DomainError> {
        if content_ids.is_empty() {
            return Ok(0);
        }
        self.delete_rows(
            "documents",
            &[("content_id", Self::in_filter(content_ids))],
        )
        .await
    }

    async fn list(&self, filter: &DocumentFilter) -> Result<Vec<Document>, DomainError> {
        let mut filters: Vec<(&str, String)> = Vec::new();
        if let Some(domain) = filter.domain() {
            filters.push(("domain", format!("eq.{}", domain)));
        }
        if let Some(created_by) = filter.created_by() {
            filters.push(("created_by", format!("eq.{}", created_by)));
        }
        if let Some(client) = filter.client_name() {
            filters.push(("client_name", format!("eq.{}", client)));
        } else if filter.requires_null_client() {
            filters.push(("client_name", "is.null".to_string()));
        }

        let rows: Vec<DocumentRow> = self.select("documents", &filters).await?;
        Ok(rows.into_iter().map(DocumentRow::into_model).collect())
    }

    async fn list_by_creator(
        &self,
        created_by: &str,
        domain_name: Option<&str>,
    ) -> Result<Vec<Document>, DomainError> {
        let mut filters = vec![("created_by", format!("eq.{}", created_by))];
        if let Some(domain) = domain_name {
            filters.push(("domain", format!("eq.{}", domain)));
        }

        let rows: Vec<DocumentRow> = self.select("documents", &filters).await?;
        Ok(rows.into_iter().map(DocumentRow::into_model).collect())
    }
}

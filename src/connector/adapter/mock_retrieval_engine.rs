use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{IngestionBatch, RetrievalEngine};
use crate::domain::{Answer, DomainError};

/// One query as submitted to the engine, kept for assertions.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub prompt: String,
    pub store_ids: Vec<String>,
    pub system_context: String,
}

/// Deterministic retrieval-engine double: ids are issued from a counter
/// (`vs_1`, `file_1`, `batch_1`, ...), store contents are tracked in memory,
/// and every query is recorded. Also backs the `--mock-engine` mode for
/// running the surface without credentials.
pub struct MockRetrievalEngine {
    counter: AtomicU64,
    stores: Arc<Mutex<HashMap<String, Vec<String>>>>,
    deleted_content: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<RecordedQuery>>>,
    answer: Arc<Mutex<Answer>>,
    fail_content_deletion: AtomicBool,
}

impl MockRetrievalEngine {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
            stores: Arc::new(Mutex::new(HashMap::new())),
            deleted_content: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            answer: Arc::new(Mutex::new(Answer::new("mock answer"))),
            fail_content_deletion: AtomicBool::new(false),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}_{}", prefix, n)
    }

    pub async fn set_answer(&self, answer: Answer) {
        *self.answer.lock().await = answer;
    }

    /// Makes `delete_content` fail, to exercise best-effort removal paths.
    pub fn fail_content_deletion(&self, fail: bool) {
        self.fail_content_deletion.store(fail, Ordering::SeqCst);
    }

    pub async fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().await.clone()
    }

    pub async fn store_contents(&self, store_id: &str) -> Option<Vec<String>> {
        self.stores.lock().await.get(store_id).cloned()
    }

    pub async fn deleted_content(&self) -> Vec<String> {
        self.deleted_content.lock().await.clone()
    }
}

impl Default for MockRetrievalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalEngine for MockRetrievalEngine {
    async fn create_store(&self, name: &str) -> Result<String, DomainError> {
        let store_id = self.next_id("vs");
        self.stores.lock().await.insert(store_id.clone(), Vec::new());
        debug!("Mock store {} created ({})", store_id, name);
        Ok(store_id)
    }

    async fn register_content(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, DomainError> {
        let content_id = self.next_id("file");
        debug!("Mock content {} registered ({})", content_id, file_name);
        Ok(content_id)
    }

    async fn batch_ingest(
        &self,
        store_id: &str,
        content_ids: &[String],
    ) -> Result<IngestionBatch, DomainError> {
        let mut stores = self.stores.lock().await;
        let contents = stores
            .get_mut(store_id)
            .ok_or_else(|| DomainError::upstream(format!("Unknown store {}", store_id)))?;
        contents.extend(content_ids.iter().cloned());
        Ok(IngestionBatch {
            id: self.next_id("batch"),
            status: "completed".to_string(),
        })
    }

    async fn batch_status(
        &self,
        store_id: &str,
        batch_id: &str,
    ) -> Result<IngestionBatch, DomainError> {
        if !self.stores.lock().await.contains_key(store_id) {
            return Err(DomainError::upstream(format!("Unknown store {}", store_id)));
        }
        Ok(IngestionBatch {
            id: batch_id.to_string(),
            status: "completed".to_string(),
        })
    }

    async fn remove_content_from_store(
        &self,
        store_id: &str,
        content_id: &str,
    ) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().await;
        if let Some(contents) = stores.get_mut(store_id) {
            contents.retain(|id| id != content_id);
        }
        Ok(())
    }

    async fn delete_content(&self, content_id: &str) -> Result<(), DomainError> {
        if self.fail_content_deletion.load(Ordering::SeqCst) {
            return Err(DomainError::upstream(format!(
                "Injected failure deleting {}",
                content_id
            )));
        }
        self.deleted_content.lock().await.push(content_id.to_string());
        Ok(())
    }

    async fn delete_store(&self, store_id: &str) -> Result<(), DomainError> {
        self.stores.lock().await.remove(store_id);
        Ok(())
    }

    async fn query(
        &self,
        prompt: &str,
        store_ids: &[String],
        system_context: &str,
    ) -> Result<Answer, DomainError> {
        self.queries.lock().await.push(RecordedQuery {
            prompt: prompt.to_string(),
            store_ids: store_ids.to_vec(),
            system_context: system_context.to_string(),
        });
        Ok(self.answer.lock().await.clone())
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::use_cases::{Outcome, Warning};
use crate::application::{
    DocumentRepository, DocumentSource, IngestionBatch, RetrievalEngine, StoreRegistry,
};
use crate::domain::{Document, DomainError, OwnerTuple, StoreRecord, StoreRecordUpdate};

/// What one ingestion pass did to a store.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub store_id: String,
    pub new_content_ids: Vec<String>,
    pub all_content_ids: Vec<String>,
    pub batch: Option<IngestionBatch>,
    pub removed_content_ids: Vec<String>,
}

/// Turns a document-name → reference mapping into ingested content attached
/// to a target store, keeping the documents table and the store record's
/// file-id / batch-id sets consistent.
pub struct DocumentIngestor {
    document_repo: Arc<dyn DocumentRepository>,
    registry: Arc<dyn StoreRegistry>,
    engine: Arc<dyn RetrievalEngine>,
    source: Arc<dyn DocumentSource>,
}

impl DocumentIngestor {
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        registry: Arc<dyn StoreRegistry>,
        engine: Arc<dyn RetrievalEngine>,
        source: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            document_repo,
            registry,
            engine,
            source,
        }
    }

    /// Adds documents to a store with no existing record, then registers the
    /// record. Fails fast with a `Conflict` when the owner tuple is already
    /// registered — addition is only valid for unregistered stores.
    pub async fn add_to_store(
        &self,
        store_id: &str,
        owner: &OwnerTuple,
        mapping: &BTreeMap<String, String>,
    ) -> Result<Outcome<IngestReport>, DomainError> {
        if self.registry.find(owner).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Store record already exists for {}",
                owner.describe()
            )));
        }

        let mut warnings = Vec::new();
        let mut content_ids = Vec::with_capacity(mapping.len());
        for (doc_name, reference) in mapping {
            let content_id = self
                .register_document(doc_name, reference, owner, &mut warnings)
                .await?;
            content_ids.push(content_id);
        }

        let batch = if content_ids.is_empty() {
            None
        } else {
            Some(self.engine.batch_ingest(store_id, &content_ids).await?)
        };

        let record = StoreRecord::new(
            store_id.to_string(),
            owner.clone(),
            content_ids.clone(),
            batch.as_ref().map(|b| b.id.clone()),
        );
        if let Err(e) = self.registry.insert(&record).await {
            warn!("Failed to register store record for {}: {}", store_id, e);
            warnings.push(Warning::new(
                "store-registry",
                format!("store record not registered: {}", e),
            ));
        }

        info!(
            "Added {} documents to store {} ({})",
            content_ids.len(),
            store_id,
            owner.describe()
        );

        Ok(Outcome::with_warnings(
            IngestReport {
                store_id: store_id.to_string(),
                new_content_ids: content_ids.clone(),
                all_content_ids: content_ids,
                batch,
                removed_content_ids: Vec::new(),
            },
            warnings,
        ))
    }

    /// Edits a registered store: references present in both the old and new
    /// mappings keep their content ids, new references are ingested, and
    /// omitted references are removed best-effort. Batch ids accumulate and
    /// an identical mapping is a no-op save for timestamps.
    pub async fn edit_store(
        &self,
        record: &StoreRecord,
        mapping: &BTreeMap<String, String>,
    ) -> Result<Outcome<IngestReport>, DomainError> {
        let store_id = record.store_id();
        let existing = self
            .document_repo
            .find_by_content_ids(record.file_ids())
            .await?;
        let link_to_content: BTreeMap<&str, &str> = existing
            .iter()
            .map(|doc| (doc.link(), doc.content_id()))
            .collect();

        let mut warnings = Vec::new();
        let mut kept_ids = Vec::new();
        let mut new_ids = Vec::new();

        for (doc_name, reference) in mapping {
            if let Some(content_id) = link_to_content.get(reference.as_str()) {
                kept_ids.push(content_id.to_string());
                continue;
            }
            // New reference; a single bad document must not sink the rest of
            // the edit.
            match self
                .register_document(doc_name, reference, &record.owner_tuple(), &mut warnings)
                .await
            {
                Ok(content_id) => new_ids.push(content_id),
                Err(e) => {
                    warn!("Failed to ingest document {} ({}): {}", doc_name, reference, e);
                    warnings.push(Warning::new(
                        "ingest-document",
                        format!("{} skipped: {}", doc_name, e),
                    ));
                }
            }
        }

        let batch = if new_ids.is_empty() {
            debug!("No new documents for store {}", store_id);
            None
        } else {
            Some(self.engine.batch_ingest(store_id, &new_ids).await?)
        };

        let mut all_ids = kept_ids.clone();
        all_ids.extend(new_ids.iter().cloned());

        let stale_ids: Vec<String> = record
            .file_ids()
            .iter()
            .filter(|id| !all_ids.contains(id))
            .cloned()
            .collect();
        self.remove_stale(store_id, &stale_ids, &mut warnings).await;

        let mut batch_ids: Vec<String> = record.batch_ids().to_vec();
        let latest_batch_id = match &batch {
            Some(batch) => {
                if !batch_ids.contains(&batch.id) {
                    batch_ids.push(batch.id.clone());
                }
                Some(batch.id.clone())
            }
            None => record.latest_batch_id().map(str::to_string),
        };

        let update = StoreRecordUpdate {
            file_ids: all_ids.clone(),
            batch_ids,
            latest_batch_id,
        };
        if let Err(e) = self.registry.update(store_id, &update).await {
            warn!("Failed to update store record {}: {}", store_id, e);
            warnings.push(Warning::new(
                "store-registry",
                format!("store record not updated: {}", e),
            ));
        }

        info!(
            "Edited store {}: {} kept, {} new, {} removed",
            store_id,
            kept_ids.len(),
            new_ids.len(),
            stale_ids.len()
        );

        Ok(Outcome::with_warnings(
            IngestReport {
                store_id: store_id.to_string(),
                new_content_ids: new_ids,
                all_content_ids: all_ids,
                batch,
                removed_content_ids: stale_ids,
            },
            warnings,
        ))
    }

    /// Adds or edits depending on whether the owner tuple is already
    /// registered.
    pub async fn attach(
        &self,
        store_id: &str,
        owner: &OwnerTuple,
        mapping: &BTreeMap<String, String>,
    ) -> Result<Outcome<IngestReport>, DomainError> {
        match self.registry.find(owner).await? {
            Some(record) => self.edit_store(&record, mapping).await,
            None => self.add_to_store(store_id, owner, mapping).await,
        }
    }

    /// Fetches and registers one document, then records it in the documents
    /// table. The table write is a secondary step: the content id is already
    /// usable, so a failed row insert degrades to a warning.
    async fn register_document(
        &self,
        doc_name: &str,
        reference: &str,
        owner: &OwnerTuple,
        warnings: &mut Vec<Warning>,
    ) -> Result<String, DomainError> {
        let fetched = self.source.fetch(reference).await?;
        let content_id = self
            .engine
            .register_content(&fetched.file_name, fetched.bytes)
            .await?;
        debug!("Registered content {} for document {}", content_id, doc_name);

        let document = Document::new(
            doc_name.to_string(),
            reference.to_string(),
            owner.domain_name().to_string(),
            owner.expert_name().map(str::to_string),
            owner.client_name().map(str::to_string),
            content_id.clone(),
        );
        if let Err(e) = self.document_repo.insert(&document).await {
            warn!("Failed to record document {}: {}", doc_name, e);
            warnings.push(Warning::new(
                "document-table",
                format!("{} not recorded: {}", doc_name, e),
            ));
        }

        Ok(content_id)
    }

    /// Drops stale content from the engine's store, deletes the backing
    /// document rows, and deletes the content upstream. Every step is
    /// best-effort: a failure here must not abort an edit that already added
    /// new content.
    async fn remove_stale(
        &self,
        store_id: &str,
        stale_ids: &[String],
        warnings: &mut Vec<Warning>,
    ) {
        if stale_ids.is_empty() {
            return;
        }

        debug!("Removing {} stale documents from store {}", stale_ids.len(), store_id);

        if let Err(e) = self.document_repo.delete_by_content_ids(stale_ids).await {
            warn!("Failed to delete stale document rows: {}", e);
            warnings.push(Warning::new(
                "document-table",
                format!("stale rows not deleted: {}", e),
            ));
        }

        for content_id in stale_ids {
            if let Err(e) = self
                .engine
                .remove_content_from_store(store_id, content_id)
                .await
            {
                warn!("Failed to remove {} from store {}: {}", content_id, store_id, e);
                warnings.push(Warning::new(
                    "store-content",
                    format!("{} not removed from store: {}", content_id, e),
                ));
                continue;
            }
            if let Err(e) = self.engine.delete_content(content_id).await {
                warn!("Failed to delete content {}: {}", content_id, e);
                warnings.push(Warning::new(
                    "engine-content",
                    format!("{} not deleted upstream: {}", content_id, e),
                ));
            }
        }
    }
}

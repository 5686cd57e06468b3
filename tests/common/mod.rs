#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use expertmem::{
    AddDomainFilesUseCase, AddExpertFilesUseCase, BatchStatusUseCase, ClientNamesUseCase,
    CreateDomainUseCase, CreateExpertUseCase, DeleteStoreUseCase, DocumentIngestor,
    DocumentRepository, DocumentSource, DomainError, DomainRepository, ExpertRepository,
    FetchedDocument, FindStoreUseCase, InMemoryDatastore, ListDocumentsUseCase,
    ListDomainsUseCase, ListExpertsUseCase, MockRetrievalEngine, QueryMemoryUseCase,
    StoreRegistry, StoreResolver, UpdateStoreUseCase,
};

/// Document source double: any reference resolves to its own bytes, except
/// references containing "unreachable", which fail like a dead link.
pub struct StubDocumentSource;

#[async_trait]
impl DocumentSource for StubDocumentSource {
    async fn fetch(&self, reference: &str) -> Result<FetchedDocument, DomainError> {
        if reference.contains("unreachable") {
            return Err(DomainError::upstream(format!(
                "Failed to download {}",
                reference
            )));
        }
        let file_name = reference
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("document.pdf")
            .to_string();
        Ok(FetchedDocument {
            file_name,
            bytes: reference.as_bytes().to_vec(),
        })
    }
}

/// In-memory wiring of every use case against the datastore double and the
/// deterministic mock engine.
pub struct Harness {
    pub datastore: Arc<InMemoryDatastore>,
    pub engine: Arc<MockRetrievalEngine>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            datastore: Arc::new(InMemoryDatastore::new()),
            engine: Arc::new(MockRetrievalEngine::new()),
        }
    }

    pub fn domains(&self) -> Arc<dyn DomainRepository> {
        self.datastore.clone()
    }

    pub fn experts(&self) -> Arc<dyn ExpertRepository> {
        self.datastore.clone()
    }

    pub fn registry(&self) -> Arc<dyn StoreRegistry> {
        self.datastore.clone()
    }

    pub fn documents(&self) -> Arc<dyn DocumentRepository> {
        self.datastore.clone()
    }

    pub fn resolver(&self) -> Arc<StoreResolver> {
        Arc::new(StoreResolver::new(
            self.domains(),
            self.experts(),
            self.registry(),
            self.engine.clone(),
        ))
    }

    pub fn ingestor(&self) -> Arc<DocumentIngestor> {
        Arc::new(DocumentIngestor::new(
            self.documents(),
            self.registry(),
            self.engine.clone(),
            Arc::new(StubDocumentSource),
        ))
    }

    pub fn create_domain(&self) -> CreateDomainUseCase {
        CreateDomainUseCase::new(self.domains(), self.engine.clone())
    }

    pub fn list_domains(&self) -> ListDomainsUseCase {
        ListDomainsUseCase::new(self.domains())
    }

    pub fn create_expert(&self) -> CreateExpertUseCase {
        CreateExpertUseCase::new(self.domains(), self.experts(), self.resolver())
    }

    pub fn list_experts(&self) -> ListExpertsUseCase {
        ListExpertsUseCase::new(self.experts())
    }

    pub fn add_domain_files(&self) -> AddDomainFilesUseCase {
        AddDomainFilesUseCase::new(self.domains(), self.ingestor())
    }

    pub fn add_expert_files(&self) -> AddExpertFilesUseCase {
        AddExpertFilesUseCase::new(self.experts(), self.resolver(), self.ingestor())
    }

    pub fn update_store(&self) -> UpdateStoreUseCase {
        UpdateStoreUseCase::new(self.registry(), self.ingestor())
    }

    pub fn find_store(&self) -> FindStoreUseCase {
        FindStoreUseCase::new(self.registry())
    }

    pub fn delete_store(&self) -> DeleteStoreUseCase {
        DeleteStoreUseCase::new(
            self.domains(),
            self.experts(),
            self.registry(),
            self.engine.clone(),
        )
    }

    pub fn query(&self) -> QueryMemoryUseCase {
        QueryMemoryUseCase::new(
            self.domains(),
            self.experts(),
            self.registry(),
            self.engine.clone(),
        )
    }

    pub fn list_documents(&self) -> ListDocumentsUseCase {
        ListDocumentsUseCase::new(self.documents())
    }

    pub fn client_names(&self) -> ClientNamesUseCase {
        ClientNamesUseCase::new(self.documents())
    }

    pub fn batch_status(&self) -> BatchStatusUseCase {
        BatchStatusUseCase::new(self.registry(), self.engine.clone())
    }
}

/// Builds one `name=reference` mapping entry.
pub fn mapping(entries: &[(&str, &str)]) -> std::collections::BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, link)| (name.to_string(), link.to_string()))
        .collect()
}

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    AddDomainFilesUseCase, AddExpertFilesUseCase, BatchStatusUseCase, ClientNamesUseCase,
    CreateDomainUseCase, CreateExpertUseCase, DeleteStoreUseCase, DocumentIngestor,
    DocumentRepository, DocumentSource, DomainRepository, ExpertContextUseCase, ExpertRepository,
    FindStoreUseCase, ListDocumentsUseCase, ListDomainsUseCase, ListExpertsUseCase,
    QueryMemoryUseCase, RetrievalEngine, StoreRegistry, StoreResolver, UpdateStoreUseCase,
};
use crate::{
    HttpDocumentSource, InMemoryDatastore, MockRetrievalEngine, OpenAiRetrievalEngine,
    PostgrestDatastore,
};

pub struct ContainerConfig {
    /// Base URL of the managed datastore; `None` selects the in-memory
    /// datastore (demo mode, state lost at exit).
    pub datastore_url: Option<String>,
    pub datastore_key: String,
    pub engine_url: String,
    pub engine_key: String,
    pub engine_model: String,
    /// Use the deterministic mock engine instead of the hosted API.
    pub mock_engine: bool,
}

/// Composition root. All clients are constructed here and injected into the
/// use cases; nothing holds a global handle.
pub struct Container {
    domain_repo: Arc<dyn DomainRepository>,
    expert_repo: Arc<dyn ExpertRepository>,
    registry: Arc<dyn StoreRegistry>,
    document_repo: Arc<dyn DocumentRepository>,
    engine: Arc<dyn RetrievalEngine>,
    resolver: Arc<StoreResolver>,
    ingestor: Arc<DocumentIngestor>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let engine: Arc<dyn RetrievalEngine> = if config.mock_engine {
            debug!("Using mock retrieval engine");
            Arc::new(MockRetrievalEngine::new())
        } else {
            Arc::new(OpenAiRetrievalEngine::new(
                config.engine_key.clone(),
                config.engine_model.clone(),
                config.engine_url.clone(),
            ))
        };

        let (domain_repo, expert_repo, registry, document_repo): (
            Arc<dyn DomainRepository>,
            Arc<dyn ExpertRepository>,
            Arc<dyn StoreRegistry>,
            Arc<dyn DocumentRepository>,
        ) = match config.datastore_url.as_deref() {
            Some(url) => {
                debug!("Using datastore at {}", url);
                let datastore = Arc::new(PostgrestDatastore::new(url, &config.datastore_key));
                (
                    datastore.clone(),
                    datastore.clone(),
                    datastore.clone(),
                    datastore,
                )
            }
            None => {
                debug!("Using in-memory datastore");
                let datastore = Arc::new(InMemoryDatastore::new());
                (
                    datastore.clone(),
                    datastore.clone(),
                    datastore.clone(),
                    datastore,
                )
            }
        };

        let source: Arc<dyn DocumentSource> = Arc::new(HttpDocumentSource::new());

        let resolver = Arc::new(StoreResolver::new(
            domain_repo.clone(),
            expert_repo.clone(),
            registry.clone(),
            engine.clone(),
        ));

        let ingestor = Arc::new(DocumentIngestor::new(
            document_repo.clone(),
            registry.clone(),
            engine.clone(),
            source,
        ));

        Ok(Self {
            domain_repo,
            expert_repo,
            registry,
            document_repo,
            engine,
            resolver,
            ingestor,
        })
    }

    pub fn create_domain_use_case(&self) -> CreateDomainUseCase {
        CreateDomainUseCase::new(self.domain_repo.clone(), self.engine.clone())
    }

    pub fn list_domains_use_case(&self) -> ListDomainsUseCase {
        ListDomainsUseCase::new(self.domain_repo.clone())
    }

    pub fn create_expert_use_case(&self) -> CreateExpertUseCase {
        CreateExpertUseCase::new(
            self.domain_repo.clone(),
            self.expert_repo.clone(),
            self.resolver.clone(),
        )
    }

    pub fn list_experts_use_case(&self) -> ListExpertsUseCase {
        ListExpertsUseCase::new(self.expert_repo.clone())
    }

    pub fn expert_context_use_case(&self) -> ExpertContextUseCase {
        ExpertContextUseCase::new(self.expert_repo.clone())
    }

    pub fn client_names_use_case(&self) -> ClientNamesUseCase {
        ClientNamesUseCase::new(self.document_repo.clone())
    }

    pub fn resolver(&self) -> Arc<StoreResolver> {
        self.resolver.clone()
    }

    pub fn add_domain_files_use_case(&self) -> AddDomainFilesUseCase {
        AddDomainFilesUseCase::new(self.domain_repo.clone(), self.ingestor.clone())
    }

    pub fn add_expert_files_use_case(&self) -> AddExpertFilesUseCase {
        AddExpertFilesUseCase::new(
            self.expert_repo.clone(),
            self.resolver.clone(),
            self.ingestor.clone(),
        )
    }

    pub fn update_store_use_case(&self) -> UpdateStoreUseCase {
        UpdateStoreUseCase::new(self.registry.clone(), self.ingestor.clone())
    }

    pub fn find_store_use_case(&self) -> FindStoreUseCase {
        FindStoreUseCase::new(self.registry.clone())
    }

    pub fn delete_store_use_case(&self) -> DeleteStoreUseCase {
        DeleteStoreUseCase::new(
            self.domain_repo.clone(),
            self.expert_repo.clone(),
            self.registry.clone(),
            self.engine.clone(),
        )
    }

    pub fn list_documents_use_case(&self) -> ListDocumentsUseCase {
        ListDocumentsUseCase::new(self.document_repo.clone())
    }

    pub fn query_use_case(&self) -> QueryMemoryUseCase {
        QueryMemoryUseCase::new(
            self.domain_repo.clone(),
            self.expert_repo.clone(),
            self.registry.clone(),
            self.engine.clone(),
        )
    }

    pub fn batch_status_use_case(&self) -> BatchStatusUseCase {
        BatchStatusUseCase::new(self.registry.clone(), self.engine.clone())
    }
}

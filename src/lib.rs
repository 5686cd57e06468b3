pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AddDomainFilesUseCase, AddExpertFilesUseCase, BatchStatusUseCase, ClientNamesUseCase,
    CreateDomainUseCase, CreateExpertUseCase, DeleteStoreUseCase, DocumentIngestor,
    DocumentRepository, DocumentSource, DomainRepository, ExpertContextUseCase, ExpertRepository,
    FetchedDocument, FindStoreUseCase, IngestReport, IngestionBatch, ListDocumentsUseCase,
    ListDomainsUseCase,
    ListExpertsUseCase, Outcome, QueryMemoryUseCase, ResolvedStore, RetrievalEngine,
    StoreRegistry, StoreResolver, UpdateStoreUseCase, Warning, FALLBACK_ANSWER,
};

pub use cli::Commands;

pub use connector::{
    HttpDocumentSource, InMemoryDatastore, MockRetrievalEngine, OpenAiRetrievalEngine,
    PostgrestDatastore,
};

pub use domain::{
    Answer, Citation, Document, DocumentFilter, Domain, DomainError, Expert, MemoryType,
    OwnerTuple, StoreOwner, StoreRecord, StoreRecordUpdate, DEFAULT_CREATOR,
};

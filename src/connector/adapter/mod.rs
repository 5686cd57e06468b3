mod http_document_source;
mod in_memory_datastore;
mod mock_retrieval_engine;
mod openai_retrieval_engine;
mod postgrest_datastore;

pub use http_document_source::*;
pub use in_memory_datastore::*;
pub use mock_retrieval_engine::*;
pub use openai_retrieval_engine::*;
pub use postgrest_datastore::*;

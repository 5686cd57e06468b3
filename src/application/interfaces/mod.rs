mod document_repository;
mod document_source;
mod domain_repository;
mod expert_repository;
mod retrieval_engine;
mod store_registry;

pub use document_repository::*;
pub use document_source::*;
pub use domain_repository::*;
pub use expert_repository::*;
pub use retrieval_engine::*;
pub use store_registry::*;

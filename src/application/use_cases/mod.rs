mod add_domain_files;
mod add_expert_files;
mod batch_status;
mod client_names;
mod create_domain;
mod create_expert;
mod delete_store;
mod expert_context;
mod find_store;
mod ingest_documents;
mod list_documents;
mod list_domains;
mod list_experts;
mod outcome;
mod query_memory;
mod resolve_store;
mod update_store;

pub use add_domain_files::*;
pub use add_expert_files::*;
pub use batch_status::*;
pub use client_names::*;
pub use create_domain::*;
pub use create_expert::*;
pub use delete_store::*;
pub use expert_context::*;
pub use find_store::*;
pub use ingest_documents::*;
pub use list_documents::*;
pub use list_domains::*;
pub use list_experts::*;
pub use outcome::*;
pub use query_memory::*;
pub use resolve_store::*;
pub use update_store::*;

mod document;
mod domain;
mod expert;
mod query;
mod store_record;

pub use document::*;
pub use domain::*;
pub use expert::*;
pub use query::*;
pub use store_record::*;

pub(crate) fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

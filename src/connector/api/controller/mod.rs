pub mod document_controller;
pub mod domain_controller;
pub mod expert_controller;
pub mod query_controller;
pub mod store_controller;

pub use document_controller::DocumentController;
pub use domain_controller::DomainController;
pub use expert_controller::ExpertController;
pub use query_controller::QueryController;
pub use store_controller::StoreController;

use crate::application::{IngestReport, Outcome, Warning};

/// Renders an ingestion outcome, echoing any skipped sub-steps.
pub(crate) fn render_report(action: &str, outcome: &Outcome<IngestReport>) -> String {
    let report = outcome.value();
    let mut out = format!("{} store {}\n", action, report.store_id);
    out.push_str(&format!(
        "  Documents: {} new, {} kept, {} removed\n",
        report.new_content_ids.len(),
        report.all_content_ids.len() - report.new_content_ids.len(),
        report.removed_content_ids.len(),
    ));
    match &report.batch {
        Some(batch) => out.push_str(&format!("  Batch: {} ({})\n", batch.id, batch.status)),
        None => out.push_str("  Batch: none\n"),
    }
    out.push_str(&render_warnings(outcome.warnings()));
    out
}

pub(crate) fn render_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("  Warning - {}\n", w.describe()))
        .collect()
}

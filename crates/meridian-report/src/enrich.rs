use meridian_core::models::report::AssembledReport;

use crate::error::ReportError;

/// Optional collaborator that derives extra, non-scoring data from a
/// finished report (age norms, narrative hints, ...).
///
/// Providers read the report; they never change scores or gating. Their
/// output lands under `enrichments[id]`.
pub trait EnrichmentProvider: Send + Sync {
    fn id(&self) -> &str;

    fn enrich(&self, report: &AssembledReport) -> Result<serde_json::Value, ReportError>;
}

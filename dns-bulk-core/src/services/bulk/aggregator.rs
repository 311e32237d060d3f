//! Result aggregator

use crate::error::BulkError;
use crate::types::{ActionResult, DetailedReport};

/// Name of a report for an action list that never reached dispatch
pub(crate) const FATAL_OPERATION_NAME: &str = "Bulk Operation";

/// Report of a run whose actions were dispatched.
///
/// `expansion_errors` come first in `errors`, followed by one line per failed
/// action tagged with its 1-based position.
pub(crate) fn aggregate(
    operation_name: &str,
    domains_processed: usize,
    records_affected: usize,
    details: Vec<String>,
    expansion_errors: Vec<BulkError>,
    results: &[ActionResult],
) -> DetailedReport {
    let success_count = results.iter().filter(|r| r.ok).count();
    let failed_count = results.len() - success_count;

    let errors = expansion_errors
        .into_iter()
        .chain(
            results
                .iter()
                .enumerate()
                .filter(|(_, r)| !r.ok)
                .map(|(index, r)| BulkError::Dispatch {
                    position: index + 1,
                    message: r.error.clone(),
                }),
        )
        .map(|e| e.to_string())
        .collect();

    DetailedReport {
        operation_name: operation_name.to_string(),
        domains_processed,
        records_affected,
        success_count,
        failed_count,
        details,
        errors,
    }
}

/// Report of a run whose action list could not be submitted.
///
/// Every expanded action counts as failed and nothing as affected.
pub(crate) fn fatal(
    domains_processed: usize,
    actions_expanded: usize,
    details: Vec<String>,
    expansion_errors: Vec<BulkError>,
    error: &BulkError,
) -> DetailedReport {
    let errors = expansion_errors
        .iter()
        .chain(std::iter::once(error))
        .map(ToString::to_string)
        .collect();

    DetailedReport {
        operation_name: FATAL_OPERATION_NAME.to_string(),
        domains_processed,
        records_affected: 0,
        success_count: 0,
        failed_count: actions_expanded,
        details,
        errors,
    }
}

//! Consolidated outcome of a bulk run

use serde::{Deserialize, Serialize};

/// Aggregated outcome of one operation invocation.
///
/// Built once by the aggregator and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    pub operation_name: String,
    pub domains_processed: usize,
    /// Records targeted at expansion time, independent of dispatch outcome
    pub records_affected: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// One line per domain, in caller order
    pub details: Vec<String>,
    /// Expansion errors first, then action errors by position
    pub errors: Vec<String>,
}

/// Classification of a report for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportOutcome {
    Success,
    PartialFailure,
    TotalFailure,
}

impl DetailedReport {
    /// Total actions dispatched (or expanded, for a fatal submission).
    pub fn total_actions(&self) -> usize {
        self.success_count + self.failed_count
    }

    pub fn outcome(&self) -> ReportOutcome {
        let failed = self.failed_count > 0 || !self.errors.is_empty();
        if !failed {
            ReportOutcome::Success
        } else if self.success_count == 0 {
            ReportOutcome::TotalFailure
        } else {
            ReportOutcome::PartialFailure
        }
    }

    pub fn headline(&self) -> &'static str {
        match self.outcome() {
            ReportOutcome::Success => "Operation Completed Successfully",
            ReportOutcome::PartialFailure | ReportOutcome::TotalFailure => {
                "Operation Completed with Issues"
            }
        }
    }

    /// `"{operation} completed: {s} succeeded[, {f} failed]"`
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} completed: {} succeeded",
            self.operation_name, self.success_count
        );
        if self.failed_count > 0 {
            summary.push_str(&format!(", {} failed", self.failed_count));
        }
        summary
    }
}

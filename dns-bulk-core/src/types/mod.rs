//! Type definitions

mod action;
mod domain;
mod operation;
mod progress;
mod report;

pub use action::{Action, ActionOutput, ActionResult};
pub use domain::Domain;
pub use operation::{AddRecordSpec, OperationSpec, RecordFilter, UpdateRecordSpec};
pub(crate) use operation::validate_domains;
pub(crate) use progress::emit;
pub use progress::{EnginePhase, ProgressEvent, ProgressSender};
pub use report::{DetailedReport, ReportOutcome};

// Re-export provider types used in the public API
pub use dns_bulk_provider::{
    DnsRecord, DnsRecordPayload, DnsRecordType, DomainStatus, ProviderDomain,
};

//! Advisory progress events published by a bulk run

use std::fmt;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Channel a caller passes in to observe a run.
pub type ProgressSender = UnboundedSender<ProgressEvent>;

/// Phase of a bulk invocation.
///
/// `Idle → Expanding → Dispatching → Reporting → Idle`, no back-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnginePhase {
    Idle,
    Expanding,
    Dispatching,
    Reporting,
}

impl EnginePhase {
    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Expanding)
                | (Self::Expanding, Self::Dispatching)
                | (Self::Dispatching, Self::Reporting)
                | (Self::Reporting, Self::Idle)
        )
    }
}

/// Progress notification. Dropping the receiver never affects the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ProgressEvent {
    PhaseChanged { phase: EnginePhase },
    /// `index` is 1-based
    ProcessingDomain {
        domain: String,
        index: usize,
        total: usize,
    },
    Applying { count: usize },
    Finished { success: usize, failed: usize },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhaseChanged { phase } => write!(f, "Phase: {phase:?}"),
            Self::ProcessingDomain {
                domain,
                index,
                total,
            } => write!(f, "Processing {domain} ({index}/{total})..."),
            Self::Applying { count } => write!(f, "Applying {count} changes..."),
            Self::Finished { success, failed } => {
                write!(f, "Finished: {success} succeeded, {failed} failed")
            }
        }
    }
}

/// Send an event if someone is listening; a closed channel is ignored.
pub(crate) fn emit(progress: Option<&ProgressSender>, event: ProgressEvent) {
    if let Some(tx) = progress {
        let _ = tx.send(event);
    }
}

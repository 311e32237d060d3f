//! Operation orchestrator
//!
//! Drives one invocation through `Idle → Expanding → Dispatching → Reporting → Idle`.
//! Only a malformed spec or domain list fails the call; everything that goes
//! wrong afterwards ends up in the report.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{
    emit, validate_domains, Action, ActionResult, DetailedReport, Domain, EnginePhase,
    OperationSpec, ProgressEvent, ProgressSender,
};

use super::aggregator::{self, FATAL_OPERATION_NAME};
use super::{dispatcher, expander};

/// Bulk operation service
pub struct BulkOperationService {
    ctx: Arc<ServiceContext>,
}

impl BulkOperationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Apply `spec` to every domain, in the given order.
    pub async fn run(&self, spec: OperationSpec, domains: &[Domain]) -> CoreResult<DetailedReport> {
        self.run_with_progress(spec, domains, None).await
    }

    /// Same as [`run`](Self::run), publishing [`ProgressEvent`]s to `progress`.
    ///
    /// Dropping the returned future cancels the run; provider calls already
    /// issued are not undone.
    pub async fn run_with_progress(
        &self,
        spec: OperationSpec,
        domains: &[Domain],
        progress: Option<ProgressSender>,
    ) -> CoreResult<DetailedReport> {
        let spec = spec.validate().inspect_err(|e| log::warn!("Rejected bulk operation: {e}"))?;
        validate_domains(domains).inspect_err(|e| log::warn!("Rejected bulk operation: {e}"))?;

        let provider = self.ctx.provider.as_ref();
        let config = self.ctx.config;
        let mut phases = PhaseTracker::new(progress.as_ref());
        log::info!(
            "Starting {} on {} domain(s) via {}",
            spec.display_name(),
            domains.len(),
            provider.id()
        );

        phases.advance(EnginePhase::Expanding);
        let expansion = expander::expand(
            provider,
            &spec,
            domains,
            config.expansion_concurrency,
            progress.as_ref(),
        )
        .await;

        phases.advance(EnginePhase::Dispatching);
        let report = match dispatcher::validate_actions(&expansion.actions) {
            Ok(()) => {
                emit(
                    progress.as_ref(),
                    ProgressEvent::Applying {
                        count: expansion.actions.len(),
                    },
                );
                let results =
                    dispatcher::dispatch(provider, &expansion.actions, config.dispatch_concurrency)
                        .await;
                phases.advance(EnginePhase::Reporting);
                aggregator::aggregate(
                    spec.display_name(),
                    expansion.domains_processed,
                    expansion.records_affected,
                    expansion.details,
                    expansion.errors,
                    &results,
                )
            }
            Err(fatal) => {
                log::error!("{fatal}");
                phases.advance(EnginePhase::Reporting);
                aggregator::fatal(
                    expansion.domains_processed,
                    expansion.actions.len(),
                    expansion.details,
                    expansion.errors,
                    &fatal,
                )
            }
        };

        Ok(phases.finish(report))
    }

    /// Dispatch a caller-built action list as-is, without expansion.
    ///
    /// The report is named "Bulk Operation"; every action counts as an
    /// affected record and every distinct zone as a processed domain.
    pub async fn apply_actions(
        &self,
        actions: Vec<Action>,
        progress: Option<ProgressSender>,
    ) -> DetailedReport {
        self.apply_entries(actions.into_iter().map(Ok).collect(), progress)
            .await
    }

    /// Like [`apply_actions`](Self::apply_actions), for lists where some
    /// entries could not be turned into an action.
    ///
    /// An `Err(message)` entry is reported as a failed action at its own
    /// position and never reaches the provider; the rest are dispatched.
    pub async fn apply_entries(
        &self,
        entries: Vec<Result<Action, String>>,
        progress: Option<ProgressSender>,
    ) -> DetailedReport {
        let provider = self.ctx.provider.as_ref();
        let mut phases = PhaseTracker::new(progress.as_ref());
        let total = entries.len();
        let mut slots = Vec::with_capacity(total);
        let mut actions = Vec::new();
        let mut indices = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match entry {
                Ok(action) => {
                    slots.push(None);
                    actions.push(action);
                    indices.push(index);
                }
                Err(message) => {
                    log::warn!("Skipping unusable action: {message}");
                    slots.push(Some(ActionResult::failure(message)));
                }
            }
        }
        let zones = actions
            .iter()
            .map(Action::zone_id)
            .collect::<HashSet<_>>()
            .len();

        // Nothing to expand: pass straight through to dispatch.
        phases.advance(EnginePhase::Expanding);
        phases.advance(EnginePhase::Dispatching);

        let report = match dispatcher::validate_indexed(indices.into_iter().zip(&actions)) {
            Ok(()) => {
                emit(
                    progress.as_ref(),
                    ProgressEvent::Applying {
                        count: actions.len(),
                    },
                );
                let mut dispatched =
                    dispatcher::dispatch(provider, &actions, self.ctx.config.dispatch_concurrency)
                        .await
                        .into_iter();
                let results = slots
                    .into_iter()
                    .map(|slot| {
                        slot.or_else(|| dispatched.next())
                            .unwrap_or_else(|| ActionResult::failure("Action was not dispatched"))
                    })
                    .collect::<Vec<_>>();
                phases.advance(EnginePhase::Reporting);
                aggregator::aggregate(
                    FATAL_OPERATION_NAME,
                    zones,
                    total,
                    Vec::new(),
                    Vec::new(),
                    &results,
                )
            }
            Err(fatal) => {
                log::error!("{fatal}");
                phases.advance(EnginePhase::Reporting);
                aggregator::fatal(zones, total, Vec::new(), Vec::new(), &fatal)
            }
        };

        phases.finish(report)
    }
}

/// Current phase of one invocation; every transition is published.
struct PhaseTracker<'a> {
    phase: EnginePhase,
    progress: Option<&'a ProgressSender>,
}

impl<'a> PhaseTracker<'a> {
    fn new(progress: Option<&'a ProgressSender>) -> Self {
        Self {
            phase: EnginePhase::Idle,
            progress,
        }
    }

    fn advance(&mut self, next: EnginePhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal phase transition {:?} -> {next:?}",
            self.phase
        );
        self.phase = next;
        emit(self.progress, ProgressEvent::PhaseChanged { phase: next });
    }

    fn finish(mut self, report: DetailedReport) -> DetailedReport {
        log::info!("{}", report.summary());
        emit(
            self.progress,
            ProgressEvent::Finished {
                success: report.success_count,
                failed: report.failed_count,
            },
        );
        self.advance(EnginePhase::Idle);
        report
    }
}

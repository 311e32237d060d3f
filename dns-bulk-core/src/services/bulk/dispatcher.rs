//! Batch dispatcher
//!
//! Sends every action exactly once through a bounded pool. Each completion
//! carries its submission index and is written into that slot only, so the
//! result sequence always matches the action sequence.

use futures::stream::{self, StreamExt};

use dns_bulk_provider::DnsProvider;

use crate::error::BulkError;
use crate::types::{Action, ActionOutput, ActionResult};

/// Reject an action list that cannot be submitted at all.
pub(crate) fn validate_actions(actions: &[Action]) -> Result<(), BulkError> {
    validate_indexed(actions.iter().enumerate())
}

/// [`validate_actions`] for actions carrying their own zero-based index.
pub(crate) fn validate_indexed<'a>(
    actions: impl IntoIterator<Item = (usize, &'a Action)>,
) -> Result<(), BulkError> {
    for (index, action) in actions {
        let position = index + 1;
        if action.zone_id().trim().is_empty() {
            return Err(BulkError::FatalSubmission(format!(
                "action {position} has no zone id"
            )));
        }
        if action.record_id().is_some_and(|id| id.trim().is_empty()) {
            return Err(BulkError::FatalSubmission(format!(
                "action {position} ({}) has no record id",
                action.kind()
            )));
        }
    }
    Ok(())
}

/// Execute `actions`, returning one result per action in submission order.
pub(crate) async fn dispatch(
    provider: &dyn DnsProvider,
    actions: &[Action],
    concurrency: usize,
) -> Vec<ActionResult> {
    let mut slots: Vec<Option<ActionResult>> = vec![None; actions.len()];

    let mut completions = stream::iter(actions.iter().enumerate())
        .map(move |(index, action)| async move { (index, execute(provider, action).await) })
        .buffer_unordered(concurrency.max(1));

    while let Some((index, result)) = completions.next().await {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| ActionResult::failure("action was not executed")))
        .collect()
}

async fn execute(provider: &dyn DnsProvider, action: &Action) -> ActionResult {
    let outcome = match action {
        Action::Create { zone_id, payload } => provider
            .create_record(zone_id, payload)
            .await
            .map(|record| ActionOutput::Record(Box::new(record))),
        Action::Update {
            zone_id,
            record_id,
            payload,
        } => provider
            .update_record(zone_id, record_id, payload)
            .await
            .map(|record| ActionOutput::Record(Box::new(record))),
        Action::Delete { zone_id, record_id } => provider
            .delete_record(zone_id, record_id)
            .await
            .map(ActionOutput::Deleted),
    };

    match outcome {
        Ok(output) => ActionResult::success(output),
        Err(e) => {
            if e.is_expected() {
                log::warn!("{} in zone {} failed: {e}", action.kind(), action.zone_id());
            } else {
                log::error!("{} in zone {} failed: {e}", action.kind(), action.zone_id());
            }
            ActionResult::failure(e.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use dns_bulk_provider::{DnsRecordType, InMemoryProvider, ProviderCall};

    use super::*;
    use crate::test_utils::{payload, rate_limited, record};

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_zone("z1", "a.com")
            .with_record(record("z1", "r1", DnsRecordType::A, "www", "192.0.2.1", 3600))
            .with_record(record("z1", "r2", DnsRecordType::A, "api", "192.0.2.2", 3600))
            .with_record(record("z1", "r3", DnsRecordType::A, "cdn", "192.0.2.3", 3600))
    }

    fn update(record_id: &str) -> Action {
        Action::Update {
            zone_id: "z1".to_string(),
            record_id: record_id.to_string(),
            payload: payload(DnsRecordType::A, "x", "192.0.2.9", 300),
        }
    }

    #[tokio::test]
    async fn failure_is_isolated_and_positioned() {
        let provider = provider().failing_write("z1", Some("r2"), rate_limited());
        let actions = [update("r1"), update("r2"), update("r3")];

        let results = dispatch(&provider, &actions, 4).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].ok);
        assert!(!results[1].ok);
        assert_eq!(results[1].error.as_deref(), Some("rate limited"));
        assert!(results[2].ok);
    }

    #[tokio::test]
    async fn results_keep_submission_order_under_concurrency() {
        let provider = Arc::new(
            provider()
                .with_zone("slow", "slow.com")
                .with_record(record("slow", "s1", DnsRecordType::A, "www", "192.0.2.1", 60))
                .with_latency("slow", Duration::from_millis(50)),
        );
        let actions = [
            Action::Delete {
                zone_id: "slow".to_string(),
                record_id: "s1".to_string(),
            },
            update("r1"),
            update("missing"),
        ];

        let results = dispatch(provider.as_ref(), &actions, 3).await;

        assert_eq!(results[0].output, Some(ActionOutput::Deleted(true)));
        assert!(matches!(&results[1].output, Some(ActionOutput::Record(r)) if r.id == "r1"));
        assert!(!results[2].ok);
        assert_eq!(results[2].error.as_deref(), Some("Record 'missing' not found"));
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let provider = Arc::new(provider().with_latency("z1", Duration::from_millis(10)));
        let actions: Vec<Action> = (0..8).map(|_| update("r1")).collect();

        let results = dispatch(provider.as_ref(), &actions, 2).await;

        assert!(results.iter().all(|r| r.ok));
        assert_eq!(provider.max_in_flight(), 2);
    }

    #[tokio::test]
    async fn each_action_is_sent_once() {
        let provider = provider().failing_write("z1", None, rate_limited());
        let actions = [update("r1"), update("r2")];

        let results = dispatch(&provider, &actions, 1).await;

        assert!(results.iter().all(|r| !r.ok));
        let calls = provider.calls().await;
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], ProviderCall::Update { record_id, .. } if record_id == "r1"));
    }

    #[tokio::test]
    async fn empty_list_dispatches_nothing() {
        let provider = provider();
        assert!(dispatch(&provider, &[], 4).await.is_empty());
        assert!(provider.calls().await.is_empty());
    }

    #[test]
    fn malformed_lists_are_fatal() {
        let no_zone = [Action::Create {
            zone_id: String::new(),
            payload: payload(DnsRecordType::A, "www", "192.0.2.1", 300),
        }];
        let no_record = [
            update("r1"),
            Action::Delete {
                zone_id: "z1".to_string(),
                record_id: " ".to_string(),
            },
        ];

        assert!(matches!(
            validate_actions(&no_zone),
            Err(BulkError::FatalSubmission(msg)) if msg == "action 1 has no zone id"
        ));
        assert!(matches!(
            validate_actions(&no_record),
            Err(BulkError::FatalSubmission(msg)) if msg == "action 2 (delete) has no record id"
        ));
        assert!(validate_actions(&[update("r1")]).is_ok());
    }
}

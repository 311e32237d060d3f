//! Action expander
//!
//! Turns an operation and an ordered domain list into concrete actions plus one
//! detail line per domain. Record reads run concurrently across domains, but
//! every output stays keyed by the domain's position in the caller's list.

use futures::stream::{self, StreamExt};

use dns_bulk_provider::{DnsProvider, DnsRecord, DnsRecordPayload};

use crate::error::BulkError;
use crate::types::{
    emit, Action, AddRecordSpec, Domain, OperationSpec, ProgressEvent, ProgressSender,
    UpdateRecordSpec,
};

/// Output of the expansion stage.
#[derive(Debug, Default)]
pub(crate) struct Expansion {
    pub actions: Vec<Action>,
    pub details: Vec<String>,
    pub errors: Vec<BulkError>,
    pub records_affected: usize,
    pub domains_processed: usize,
}

/// Contribution of a single domain.
#[derive(Debug, Default)]
struct DomainExpansion {
    actions: Vec<Action>,
    detail: Option<String>,
    error: Option<BulkError>,
    affected: usize,
}

impl DomainExpansion {
    fn failed(error: BulkError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

pub(crate) async fn expand(
    provider: &dyn DnsProvider,
    spec: &OperationSpec,
    domains: &[Domain],
    concurrency: usize,
    progress: Option<&ProgressSender>,
) -> Expansion {
    let total = domains.len();
    let per_domain: Vec<DomainExpansion> = stream::iter(domains.iter().enumerate())
        .map(move |(index, domain)| async move {
            emit(
                progress,
                ProgressEvent::ProcessingDomain {
                    domain: domain.display_name().to_string(),
                    index: index + 1,
                    total,
                },
            );
            expand_domain(provider, spec, domain).await
        })
        // `buffered` yields in input order, whatever order the reads finish in.
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut expansion = Expansion {
        domains_processed: total,
        ..Expansion::default()
    };
    for part in per_domain {
        expansion.actions.extend(part.actions);
        expansion.details.extend(part.detail);
        expansion.errors.extend(part.error);
        expansion.records_affected += part.affected;
    }

    log::debug!(
        "Expanded {} into {} action(s) across {} domain(s)",
        spec.display_name(),
        expansion.actions.len(),
        total
    );
    expansion
}

async fn expand_domain(
    provider: &dyn DnsProvider,
    spec: &OperationSpec,
    domain: &Domain,
) -> DomainExpansion {
    match spec {
        OperationSpec::AddRecord(add) => expand_add(add, domain),
        OperationSpec::UpdateTtl { ttl } => match fetch(provider, domain).await {
            Ok(records) => expand_ttl(*ttl, domain, &records),
            Err(e) => DomainExpansion::failed(e),
        },
        OperationSpec::UpdateRecord(update) => match fetch(provider, domain).await {
            Ok(records) => expand_update(update, domain, &records),
            Err(e) => DomainExpansion::failed(e),
        },
    }
}

async fn fetch(provider: &dyn DnsProvider, domain: &Domain) -> Result<Vec<DnsRecord>, BulkError> {
    provider.list_all_records(&domain.id).await.map_err(|source| {
        log::warn!("Failed to fetch records of {}: {source}", domain.display_name());
        BulkError::Expansion {
            domain: domain.display_name().to_string(),
            source,
        }
    })
}

fn expand_ttl(ttl: u32, domain: &Domain, records: &[DnsRecord]) -> DomainExpansion {
    let actions = records
        .iter()
        .map(|record| {
            let mut payload = record.to_payload();
            payload.ttl = ttl;
            update_action(domain, record, payload)
        })
        .collect();

    DomainExpansion {
        actions,
        detail: Some(format!(
            "{}: Updated TTL to {ttl}s on {} record(s)",
            domain.display_name(),
            records.len()
        )),
        error: None,
        affected: records.len(),
    }
}

fn expand_add(spec: &AddRecordSpec, domain: &Domain) -> DomainExpansion {
    let payload = DnsRecordPayload {
        record_type: spec.record_type.clone(),
        name: spec.name.clone(),
        content: spec.content.clone(),
        ttl: spec.ttl,
        priority: spec
            .priority
            .filter(|_| spec.record_type.requires_priority()),
        proxied: spec.proxied,
        data: None,
        comment: None,
        tags: None,
    };

    DomainExpansion {
        actions: vec![Action::Create {
            zone_id: domain.id.clone(),
            payload,
        }],
        detail: Some(format!(
            "{}: Added {} record \"{}\" → {}",
            domain.display_name(),
            spec.record_type,
            spec.name,
            spec.content
        )),
        error: None,
        affected: 1,
    }
}

fn expand_update(spec: &UpdateRecordSpec, domain: &Domain, records: &[DnsRecord]) -> DomainExpansion {
    let actions: Vec<Action> = records
        .iter()
        .filter(|record| spec.filter.matches(&record.record_type, &record.name))
        .map(|record| {
            let mut payload = record.to_payload();
            if let Some(content) = &spec.new_content {
                payload.content.clone_from(content);
            }
            if let Some(ttl) = spec.new_ttl {
                payload.ttl = ttl;
            }
            update_action(domain, record, payload)
        })
        .collect();

    let matched = actions.len();
    let detail = if matched == 0 {
        format!("{}: No matching records found", domain.display_name())
    } else {
        format!(
            "{}: Updated {matched} matching record(s)",
            domain.display_name()
        )
    };

    DomainExpansion {
        actions,
        detail: Some(detail),
        error: None,
        affected: matched,
    }
}

fn update_action(domain: &Domain, record: &DnsRecord, payload: DnsRecordPayload) -> Action {
    Action::Update {
        zone_id: domain.id.clone(),
        record_id: record.id.clone(),
        payload,
    }
}

//! Test helpers
//!
//! Fixture builders on top of [`InMemoryProvider`].

use std::sync::Arc;

use dns_bulk_provider::{
    DnsRecord, DnsRecordPayload, DnsRecordType, InMemoryProvider, ProviderError,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::services::ServiceContext;
use crate::types::{Domain, ProgressEvent};

pub fn domain(id: &str, name: &str) -> Domain {
    Domain::new(id, name)
}

pub fn record(
    zone_id: &str,
    id: &str,
    record_type: DnsRecordType,
    name: &str,
    content: &str,
    ttl: u32,
) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        zone_id: zone_id.to_string(),
        record_type,
        name: name.to_string(),
        content: content.to_string(),
        ttl,
        priority: None,
        proxied: None,
        data: None,
        comment: None,
        tags: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn payload(record_type: DnsRecordType, name: &str, content: &str, ttl: u32) -> DnsRecordPayload {
    DnsRecordPayload {
        record_type,
        name: name.to_string(),
        content: content.to_string(),
        ttl,
        priority: None,
        proxied: None,
        data: None,
        comment: None,
        tags: None,
    }
}

/// Provider holding `(zone id, zone name, records)` in the given order.
pub fn provider_with_zones(zones: Vec<(&str, &str, Vec<DnsRecord>)>) -> Arc<InMemoryProvider> {
    let mut provider = InMemoryProvider::new();
    for (zone_id, name, records) in zones {
        provider = provider.with_zone(zone_id, name);
        for record in records {
            provider = provider.with_record(record);
        }
    }
    Arc::new(provider)
}

/// Provider failure whose message is the bare text "rate limited".
pub fn rate_limited() -> ProviderError {
    ProviderError::Unknown {
        provider: "memory".to_string(),
        raw_code: None,
        raw_message: "rate limited".to_string(),
    }
}

pub fn create_test_context(provider: Arc<InMemoryProvider>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(provider))
}

/// Everything published so far on a progress channel.
pub fn drain_events(mut rx: UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

//! In-memory DNS provider
//!
//! Holds zones and records in process memory. It backs demo mode and the test
//! suites of downstream crates: failures and latency can be injected per zone
//! or per record, and every call is journaled.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{
    DnsRecord, DnsRecordPayload, DnsRecordType, DomainStatus, PaginatedResponse,
    PaginationParams, ProviderDomain,
};

const PROVIDER_ID: &str = "memory";
const MAX_PAGE_SIZE: u32 = 100;

/// A call received by [`InMemoryProvider`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    ListDomains,
    ListRecords {
        zone_id: String,
    },
    Create {
        zone_id: String,
        payload: DnsRecordPayload,
    },
    Update {
        zone_id: String,
        record_id: String,
        payload: DnsRecordPayload,
    },
    Delete {
        zone_id: String,
        record_id: String,
    },
}

#[derive(Debug, Clone)]
struct WriteFailure {
    zone_id: String,
    /// Record id (update/delete) or record name (create); `None` matches every write.
    target: Option<String>,
    error: ProviderError,
}

#[derive(Debug, Default)]
struct Zone {
    name: String,
    records: Vec<DnsRecord>,
}

/// In-memory [`DnsProvider`].
///
/// Failure and latency injection is configured with the builder methods
/// before the provider is shared.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    zones: RwLock<Vec<(String, Zone)>>,
    list_failures: HashMap<String, ProviderError>,
    write_failures: Vec<WriteFailure>,
    latency: HashMap<String, Duration>,
    calls: Mutex<Vec<ProviderCall>>,
    next_id: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryProvider {
    /// Empty provider with no zones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider seeded with two zones, each holding an A and a CNAME record.
    ///
    /// | zone id  | name          |
    /// |----------|---------------|
    /// | `mock-1` | `example.com` |
    /// | `mock-2` | `acme.dev`    |
    pub fn with_sample_data() -> Self {
        let mut provider = Self::new();
        for (zone_id, name) in [("mock-1", "example.com"), ("mock-2", "acme.dev")] {
            provider = provider
                .with_zone(zone_id, name)
                .with_record(sample_record(zone_id, "r1", DnsRecordType::A, "www", "192.0.2.1", 3600))
                .with_record(sample_record(
                    zone_id,
                    "r2",
                    DnsRecordType::Cname,
                    "blog",
                    "gh-pages.github.io",
                    120,
                ));
        }
        provider
    }

    /// Add an empty zone.
    #[must_use]
    pub fn with_zone(mut self, zone_id: impl Into<String>, name: impl Into<String>) -> Self {
        let zone = Zone {
            name: name.into(),
            records: Vec::new(),
        };
        self.zones.get_mut().push((zone_id.into(), zone));
        self
    }

    /// Add a record to the zone named by `record.zone_id`.
    ///
    /// Records for unknown zones are ignored.
    #[must_use]
    pub fn with_record(mut self, record: DnsRecord) -> Self {
        if let Some((_, zone)) = self
            .zones
            .get_mut()
            .iter_mut()
            .find(|(id, _)| *id == record.zone_id)
        {
            zone.records.push(record);
        }
        self
    }

    /// Make every record listing of `zone_id` fail with `error`.
    #[must_use]
    pub fn failing_list(mut self, zone_id: impl Into<String>, error: ProviderError) -> Self {
        self.list_failures.insert(zone_id.into(), error);
        self
    }

    /// Make writes fail with `error`.
    ///
    /// `target` matches the record id of updates and deletes or the record name
    /// of creates; `None` fails every write to the zone.
    #[must_use]
    pub fn failing_write(
        mut self,
        zone_id: impl Into<String>,
        target: Option<&str>,
        error: ProviderError,
    ) -> Self {
        self.write_failures.push(WriteFailure {
            zone_id: zone_id.into(),
            target: target.map(ToString::to_string),
            error,
        });
        self
    }

    /// Delay every call touching `zone_id`.
    #[must_use]
    pub fn with_latency(mut self, zone_id: impl Into<String>, delay: Duration) -> Self {
        self.latency.insert(zone_id.into(), delay);
        self
    }

    /// Calls received so far, in arrival order.
    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().await.clone()
    }

    /// Highest number of calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Current records of a zone, or `None` if the zone does not exist.
    pub async fn records(&self, zone_id: &str) -> Option<Vec<DnsRecord>> {
        self.zones
            .read()
            .await
            .iter()
            .find(|(id, _)| id == zone_id)
            .map(|(_, zone)| zone.records.clone())
    }

    async fn enter(&self, call: ProviderCall, zone_id: Option<&str>) -> InFlight<'_> {
        self.calls.lock().await.push(call);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let guard = InFlight(&self.in_flight);

        if let Some(delay) = zone_id.and_then(|id| self.latency.get(id)) {
            tokio::time::sleep(*delay).await;
        }
        guard
    }

    fn write_failure(&self, zone_id: &str, target: &str) -> Option<ProviderError> {
        self.write_failures
            .iter()
            .find(|f| f.zone_id == zone_id && f.target.as_deref().is_none_or(|t| t == target))
            .map(|f| f.error.clone())
    }

    fn zone_not_found(zone_id: &str) -> ProviderError {
        ProviderError::DomainNotFound {
            provider: PROVIDER_ID.to_string(),
            domain: zone_id.to_string(),
            raw_message: None,
        }
    }

    fn record_not_found(record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: PROVIDER_ID.to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

/// Decrements the in-flight counter when the call finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn sample_record(
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

fn apply_payload(record: &mut DnsRecord, payload: &DnsRecordPayload) {
    record.record_type = payload.record_type.clone();
    record.name = payload.name.clone();
    record.content = payload.content.clone();
    record.ttl = payload.ttl;
    record.priority = payload.priority;
    record.proxied = payload.proxied;
    record.data.clone_from(&payload.data);
    record.comment.clone_from(&payload.comment);
    record.tags.clone_from(&payload.tags);
    record.updated_at = Some(Utc::now());
}

#[async_trait]
impl DnsProvider for InMemoryProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn validate_credentials(&self) -> Result<bool> {
        Ok(true)
    }

    async fn list_domains(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProviderDomain>> {
        let _guard = self.enter(ProviderCall::ListDomains, None).await;
        let params = params.validated(MAX_PAGE_SIZE);
        let zones = self.zones.read().await;
        let domains: Vec<ProviderDomain> = zones
            .iter()
            .map(|(id, zone)| ProviderDomain {
                id: id.clone(),
                name: zone.name.clone(),
                status: DomainStatus::Active,
                record_count: u32::try_from(zone.records.len()).ok(),
            })
            .collect();
        Ok(paginate(domains, &params))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<DnsRecord>> {
        let _guard = self
            .enter(
                ProviderCall::ListRecords {
                    zone_id: zone_id.to_string(),
                },
                Some(zone_id),
            )
            .await;
        if let Some(error) = self.list_failures.get(zone_id) {
            return Err(error.clone());
        }
        let params = params.validated(MAX_PAGE_SIZE);
        let zones = self.zones.read().await;
        let (_, zone) = zones
            .iter()
            .find(|(id, _)| id == zone_id)
            .ok_or_else(|| Self::zone_not_found(zone_id))?;
        Ok(paginate(zone.records.clone(), &params))
    }

    async fn create_record(&self, zone_id: &str, payload: &DnsRecordPayload) -> Result<DnsRecord> {
        let _guard = self
            .enter(
                ProviderCall::Create {
                    zone_id: zone_id.to_string(),
                    payload: payload.clone(),
                },
                Some(zone_id),
            )
            .await;
        if let Some(error) = self.write_failure(zone_id, &payload.name) {
            return Err(error);
        }

        let mut zones = self.zones.write().await;
        let (_, zone) = zones
            .iter_mut()
            .find(|(id, _)| id == zone_id)
            .ok_or_else(|| Self::zone_not_found(zone_id))?;

        let duplicate = zone.records.iter().any(|r| {
            r.record_type == payload.record_type
                && r.name == payload.name
                && r.content == payload.content
        });
        if duplicate {
            return Err(ProviderError::RecordExists {
                provider: PROVIDER_ID.to_string(),
                record_name: payload.name.clone(),
                raw_message: None,
            });
        }

        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let mut record = sample_record(
            zone_id,
            &format!("mem-{seq}"),
            payload.record_type.clone(),
            &payload.name,
            &payload.content,
            payload.ttl,
        );
        apply_payload(&mut record, payload);
        record.created_at = Some(now);
        zone.records.push(record.clone());
        log::debug!("[{PROVIDER_ID}] Created record {} in {zone_id}", record.id);
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<DnsRecord> {
        let _guard = self
            .enter(
                ProviderCall::Update {
                    zone_id: zone_id.to_string(),
                    record_id: record_id.to_string(),
                    payload: payload.clone(),
                },
                Some(zone_id),
            )
            .await;
        if let Some(error) = self.write_failure(zone_id, record_id) {
            return Err(error);
        }

        let mut zones = self.zones.write().await;
        let (_, zone) = zones
            .iter_mut()
            .find(|(id, _)| id == zone_id)
            .ok_or_else(|| Self::zone_not_found(zone_id))?;
        let record = zone
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Self::record_not_found(record_id))?;
        apply_payload(record, payload);
        Ok(record.clone())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<bool> {
        let _guard = self
            .enter(
                ProviderCall::Delete {
                    zone_id: zone_id.to_string(),
                    record_id: record_id.to_string(),
                },
                Some(zone_id),
            )
            .await;
        if let Some(error) = self.write_failure(zone_id, record_id) {
            return Err(error);
        }

        let mut zones = self.zones.write().await;
        let (_, zone) = zones
            .iter_mut()
            .find(|(id, _)| id == zone_id)
            .ok_or_else(|| Self::zone_not_found(zone_id))?;
        let before = zone.records.len();
        zone.records.retain(|r| r.id != record_id);
        if zone.records.len() == before {
            return Err(Self::record_not_found(record_id));
        }
        Ok(true)
    }
}

fn paginate<T>(items: Vec<T>, params: &PaginationParams) -> PaginatedResponse<T> {
    let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let skip = (params.page.saturating_sub(1) as usize).saturating_mul(params.page_size as usize);
    let page_items = items
        .into_iter()
        .skip(skip)
        .take(params.page_size as usize)
        .collect();
    PaginatedResponse::new(page_items, params.page, params.page_size, total)
}

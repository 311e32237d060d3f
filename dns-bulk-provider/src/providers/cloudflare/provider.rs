//! `DnsProvider` implementation for Cloudflare

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{
    DnsRecord, DnsRecordPayload, DnsRecordType, DomainStatus, PaginatedResponse,
    PaginationParams, ProviderDomain,
};

use super::http::CloudflarePage;
use super::types::{DeletedRecord, TokenVerification};
use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES, PROVIDER_ID,
};

/// Cloudflare zone status: active, pending, initializing, moved, deactivated
pub(crate) fn zone_to_domain(zone: CloudflareZone) -> ProviderDomain {
    let status = match zone.status.as_str() {
        "active" => DomainStatus::Active,
        "pending" | "initializing" => DomainStatus::Pending,
        "moved" | "deactivated" => DomainStatus::Paused,
        _ => DomainStatus::Unknown,
    };

    ProviderDomain {
        id: zone.id,
        name: normalize_domain_name(&zone.name).to_string(),
        status,
        record_count: None,
    }
}

pub(crate) fn cf_record_to_dns_record(record: CloudflareDnsRecord, zone_id: &str) -> DnsRecord {
    DnsRecord {
        id: record.id,
        zone_id: record.zone_id.unwrap_or_else(|| zone_id.to_string()),
        record_type: DnsRecordType::parse(&record.record_type),
        name: normalize_domain_name(&record.name).to_string(),
        content: record.content,
        ttl: record.ttl,
        priority: record.priority,
        proxied: record.proxied,
        data: record.data,
        comment: record.comment,
        tags: record.tags,
        created_at: record.created_on,
        updated_at: record.modified_on,
    }
}

fn into_response<T, U>(page: CloudflarePage<T>, map: impl FnMut(T) -> U) -> PaginatedResponse<U> {
    PaginatedResponse::new(
        page.items.into_iter().map(map).collect(),
        page.page,
        page.per_page,
        page.total_count,
    )
}

fn record_context(zone_id: &str, record_id: Option<&str>, name: Option<&str>) -> ErrorContext {
    ErrorContext {
        record_name: name.map(ToString::to_string),
        record_id: record_id.map(ToString::to_string),
        domain: Some(zone_id.to_string()),
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self
            .get::<TokenVerification>("/user/tokens/verify", ErrorContext::default())
            .await
        {
            Ok(verification) => Ok(verification.status == "active"),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_domains(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProviderDomain>> {
        let params = params.validated(MAX_PAGE_SIZE_ZONES);
        let page = self
            .get_page::<CloudflareZone>(
                "/zones",
                params.page,
                params.page_size,
                ErrorContext::default(),
            )
            .await?;
        Ok(into_response(page, zone_to_domain))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<DnsRecord>> {
        let params = params.validated(MAX_PAGE_SIZE_RECORDS);
        let page = self
            .get_page::<CloudflareDnsRecord>(
                &format!("/zones/{zone_id}/dns_records"),
                params.page,
                params.page_size,
                record_context(zone_id, None, None),
            )
            .await?;
        Ok(into_response(page, |r| cf_record_to_dns_record(r, zone_id)))
    }

    async fn create_record(&self, zone_id: &str, payload: &DnsRecordPayload) -> Result<DnsRecord> {
        let record: CloudflareDnsRecord = self
            .post(
                &format!("/zones/{zone_id}/dns_records"),
                payload,
                record_context(zone_id, None, Some(&payload.name)),
            )
            .await?;
        Ok(cf_record_to_dns_record(record, zone_id))
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<DnsRecord> {
        let record: CloudflareDnsRecord = self
            .put(
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                payload,
                record_context(zone_id, Some(record_id), Some(&payload.name)),
            )
            .await?;
        Ok(cf_record_to_dns_record(record, zone_id))
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<bool> {
        self.delete::<DeletedRecord>(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            record_context(zone_id, Some(record_id), None),
        )
        .await
    }
}

//! Single-record management
//!
//! Thin pass-through to the provider for one-off edits outside a bulk run.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{DnsRecord, DnsRecordPayload};

/// DNS record service
pub struct DnsService {
    ctx: Arc<ServiceContext>,
}

impl DnsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List every record of a zone (all pages).
    pub async fn list_records(&self, zone_id: &str) -> CoreResult<Vec<DnsRecord>> {
        require("zone id", zone_id)?;
        match self.ctx.provider.list_all_records(zone_id).await {
            Ok(records) => Ok(records),
            Err(e) => Err(self.ctx.handle_provider_error("List records", e)),
        }
    }

    pub async fn create_record(
        &self,
        zone_id: &str,
        payload: &DnsRecordPayload,
    ) -> CoreResult<DnsRecord> {
        require("zone id", zone_id)?;
        check_payload(payload)?;
        match self.ctx.provider.create_record(zone_id, payload).await {
            Ok(record) => Ok(record),
            Err(e) => Err(self.ctx.handle_provider_error("Create record", e)),
        }
    }

    /// Replace a record with `payload`.
    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &DnsRecordPayload,
    ) -> CoreResult<DnsRecord> {
        require("zone id", zone_id)?;
        require("record id", record_id)?;
        check_payload(payload)?;
        match self
            .ctx
            .provider
            .update_record(zone_id, record_id, payload)
            .await
        {
            Ok(record) => Ok(record),
            Err(e) => Err(self.ctx.handle_provider_error("Update record", e)),
        }
    }

    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> CoreResult<bool> {
        require("zone id", zone_id)?;
        require("record id", record_id)?;
        match self.ctx.provider.delete_record(zone_id, record_id).await {
            Ok(deleted) => Ok(deleted),
            Err(e) => Err(self.ctx.handle_provider_error("Delete record", e)),
        }
    }
}

fn require(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_payload(payload: &DnsRecordPayload) -> CoreResult<()> {
    require("record name", &payload.name)?;
    require("record content", &payload.content)?;
    if payload.priority.is_some() && !payload.record_type.requires_priority() {
        return Err(CoreError::ValidationError(format!(
            "priority is not allowed on {} records",
            payload.record_type
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use dns_bulk_provider::{DnsRecordType, ProviderError};

    use super::*;
    use crate::test_utils::{create_test_context, payload, provider_with_zones, record};

    fn service() -> (DnsService, Arc<dns_bulk_provider::InMemoryProvider>) {
        let provider = provider_with_zones(vec![(
            "z1",
            "a.com",
            vec![record("z1", "r1", DnsRecordType::A, "www", "192.0.2.1", 3600)],
        )]);
        (DnsService::new(create_test_context(provider.clone())), provider)
    }

    #[tokio::test]
    async fn crud_round() {
        let (service, provider) = service();

        let created = service
            .create_record("z1", &payload(DnsRecordType::Txt, "_v", "token", 300))
            .await
            .unwrap();
        assert_eq!(created.zone_id, "z1");

        let updated = service
            .update_record("z1", "r1", &payload(DnsRecordType::A, "www", "192.0.2.9", 600))
            .await
            .unwrap();
        assert_eq!(updated.content, "192.0.2.9");

        assert!(service.delete_record("z1", &created.id).await.unwrap());

        let records = service.list_records("z1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(provider.calls().await.len(), 4);
    }

    #[tokio::test]
    async fn provider_errors_are_wrapped() {
        let (service, _) = service();
        let result = service.delete_record("z1", "missing").await;
        assert!(matches!(
            result,
            Err(CoreError::Provider(ProviderError::RecordNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn blank_ids_never_reach_the_provider() {
        let (service, provider) = service();

        assert!(matches!(
            service.list_records(" ").await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            service.delete_record("z1", "").await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(provider.calls().await.is_empty());
    }

    #[tokio::test]
    async fn priority_on_a_record_is_rejected() {
        let (service, _) = service();
        let mut bad = payload(DnsRecordType::A, "www", "192.0.2.1", 300);
        bad.priority = Some(10);

        let result = service.create_record("z1", &bad).await;

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }
}

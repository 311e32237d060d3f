use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, DnsRecordPayload, PaginatedResponse, PaginationParams, ProviderDomain};

/// Page size used when walking every page of a listing.
const WALK_PAGE_SIZE: u32 = 100;

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Context attached when mapping a raw error (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name (for `RecordExists`)
    pub record_name: Option<String>,
    /// Record ID (for `RecordNotFound`)
    pub record_id: Option<String>,
    /// Zone id (for `DomainNotFound`)
    pub domain: Option<String>,
}

/// Maps raw provider API errors onto [`ProviderError`] (internal use)
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS provider client.
///
/// Read and write primitives for zones and records. Implementations own no
/// business logic; every call is issued exactly once and failures are returned
/// as [`ProviderError`].
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Check that the credential is accepted by the provider
    async fn validate_credentials(&self) -> Result<bool>;

    /// List zones (one page)
    async fn list_domains(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProviderDomain>>;

    /// List the records of a zone (one page)
    async fn list_records(
        &self,
        zone_id: &str,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<DnsRecord>>;

    /// Create a record
    async fn create_record(&self, zone_id: &str, payload: &DnsRecordPayload) -> Result<DnsRecord>;

    /// Replace a record with the given payload
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<DnsRecord>;

    /// Delete a record, returning the provider's success flag
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<bool>;

    /// List every zone, walking all pages in provider order.
    async fn list_all_domains(&self) -> Result<Vec<ProviderDomain>> {
        let mut params = PaginationParams {
            page: 1,
            page_size: WALK_PAGE_SIZE,
        };
        let mut domains = Vec::new();
        loop {
            let page = self.list_domains(&params).await?;
            let exhausted = !page.has_more || page.items.is_empty();
            params = following_page(&page);
            domains.extend(page.items);
            if exhausted {
                return Ok(domains);
            }
        }
    }

    /// List every record of a zone, walking all pages in provider order.
    ///
    /// An empty zone yields an empty vector.
    async fn list_all_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let mut params = PaginationParams {
            page: 1,
            page_size: WALK_PAGE_SIZE,
        };
        let mut records = Vec::new();
        loop {
            let page = self.list_records(zone_id, &params).await?;
            let exhausted = !page.has_more || page.items.is_empty();
            params = following_page(&page);
            records.extend(page.items);
            if exhausted {
                log::debug!(
                    "[{}] Fetched {} record(s) for zone {zone_id}",
                    self.id(),
                    records.len()
                );
                return Ok(records);
            }
        }
    }
}

/// Next page to request, using the page size the provider actually applied.
fn following_page<T>(page: &PaginatedResponse<T>) -> PaginationParams {
    PaginationParams {
        page: page.page.saturating_add(1),
        page_size: page.page_size,
    }
}

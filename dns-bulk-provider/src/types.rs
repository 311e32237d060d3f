use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Pagination parameters for list operations.
///
/// Pages are 1-indexed.
///
/// # Default
///
/// The default is `page = 1, page_size = 20`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl PaginationParams {
    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
        }
    }
}

/// A paginated response wrapper.
///
/// Returned by all single-page list operations. Contains the current page of items
/// along with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let has_more = page.saturating_mul(page_size) < total_count;
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more,
        }
    }
}

// ============ Zone Types ============

/// Status of a zone within a DNS provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    /// Zone is active and resolving.
    Active,
    /// Zone is paused (not resolving).
    Paused,
    /// Zone is pending activation/verification.
    Pending,
    /// Status could not be determined.
    Unknown,
}

/// A zone managed by a DNS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDomain {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Zone name (e.g., `"example.com"`).
    pub name: String,
    /// Current zone status.
    pub status: DomainStatus,
    /// Number of DNS records in this zone, if known.
    #[serde(rename = "recordCount", skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u32>,
}

// ============ DNS Record Types ============

/// DNS record type.
///
/// Serialized as the upper-case type string (`"A"`, `"AAAA"`, `"CNAME"`, ...).
/// Types this crate does not model are kept verbatim in [`Other`](Self::Other)
/// so that records of any type can still be read and written back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Any other type, upper-cased.
    Other(String),
}

impl DnsRecordType {
    /// Parse a type string, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            other => Self::Other(other.to_string()),
        }
    }

    /// Upper-case wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Other(other) => other,
        }
    }

    /// Whether records of this type carry a priority (MX, SRV).
    pub fn requires_priority(&self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl From<String> for DnsRecordType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<DnsRecordType> for String {
    fn from(value: DnsRecordType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record as returned by a provider.
///
/// Records are snapshots: they are never modified in place, a later fetch supersedes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Zone identifier this record belongs to.
    pub zone_id: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record name as reported by the provider (e.g., `"www.example.com"`).
    pub name: String,
    /// Record content (address, target, text, ...).
    pub content: String,
    /// Time to live in seconds (`1` means "automatic" on Cloudflare).
    pub ttl: u32,
    /// Priority for MX/SRV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Whether Cloudflare CDN proxy is enabled (Cloudflare only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Structured record data (SRV, CAA, HTTPS, LOC, ...), written back verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Free-form note attached to the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Provider tags (`"name:value"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// When the record was created, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the record was last updated, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl DnsRecord {
    /// Build a write payload carrying every writable field of this record.
    ///
    /// Updates replace the whole record, so anything left out here is lost.
    pub fn to_payload(&self) -> DnsRecordPayload {
        DnsRecordPayload {
            record_type: self.record_type.clone(),
            name: self.name.clone(),
            content: self.content.clone(),
            ttl: self.ttl,
            priority: self.priority,
            proxied: self.proxied,
            data: self.data.clone(),
            comment: self.comment.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Body of a create or update request.
///
/// Serializes directly into the provider's wire format; absent optionals are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordPayload {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record name (`"www"`, `"@"` or a fully qualified name).
    pub name: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Priority, only meaningful for MX/SRV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Enable Cloudflare CDN proxy (Cloudflare only, ignored by other providers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Structured record data (SRV, CAA, HTTPS, LOC, ...), written back verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Free-form note attached to the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Provider tags (`"name:value"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// ============ Credential Types ============

/// Credentials used to construct a provider.
///
/// The credential is always an explicit value handed to
/// [`create_provider()`](crate::create_provider); nothing is looked up from ambient state.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "provider": "cloudflare", "credentials": { "api_token": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Cloudflare credentials. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token.
        api_token: String,
    },

    /// In-memory provider seeded with sample zones. Needs no secret.
    #[serde(rename = "memory")]
    InMemory,
}

impl ProviderCredentials {
    /// Identifier of the provider these credentials are for.
    pub fn provider_id(&self) -> &'static str {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => "cloudflare",
            Self::InMemory => "memory",
        }
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"<redacted>")
                .finish(),
            Self::InMemory => f.write_str("InMemory"),
        }
    }
}

//! Cloudflare API wire types

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Envelope wrapping every Cloudflare v4 response
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
    pub result_info: Option<CloudflareResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// DNS record as returned by the API
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: Option<bool>,
    /// Structured fields of SRV, CAA, HTTPS, LOC, ... records
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// `GET /user/tokens/verify` result
#[derive(Debug, Deserialize)]
pub struct TokenVerification {
    pub status: String,
}

/// `DELETE /zones/{zone}/dns_records/{id}` result
#[derive(Debug, Deserialize)]
pub struct DeletedRecord {
    #[allow(dead_code)]
    pub id: String,
}

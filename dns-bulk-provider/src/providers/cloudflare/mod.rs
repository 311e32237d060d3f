//! Cloudflare DNS provider (API v4, bearer token auth)

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
pub(crate) const PROVIDER_ID: &str = "cloudflare";
/// Largest page the Zones API serves
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Largest page the DNS Records API serves
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare DNS provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
}

impl CloudflareProvider {
    /// Create a provider authenticating with the given API token.
    ///
    /// No request is made; use
    /// [`validate_credentials`](crate::DnsProvider::validate_credentials) to check the token.
    pub fn new(api_token: String) -> Result<Self> {
        Ok(Self {
            client: create_http_client(PROVIDER_ID)?,
            api_token,
        })
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &mask_secret(&self.api_token))
            .finish_non_exhaustive()
    }
}

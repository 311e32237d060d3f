//! # dns-bulk-provider
//!
//! Thin DNS provider clients used by the bulk zone editing engine.
//!
//! A provider exposes the read and write primitives a bulk run needs: list
//! zones, list the records of a zone, create, replace and delete a record.
//! Every call is issued exactly once. Retrying, batching and reporting belong
//! to the caller.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//! | In-memory | *(always)* | none |
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)* — Enable the Cloudflare API v4 client.
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_bulk_provider::{create_provider, DnsProvider, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Cloudflare {
//!         api_token: "your-token".to_string(),
//!     })?;
//!
//!     if !provider.validate_credentials().await? {
//!         return Err("token rejected".into());
//!     }
//!
//!     for zone in provider.list_all_domains().await? {
//!         let records = provider.list_all_records(&zone.id).await?;
//!         println!("{} ({} records)", zone.name, records.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Throttling
//! surfaces as [`ProviderError::RateLimited`] and gateway failures as
//! [`ProviderError::NetworkError`]; neither is retried.

mod error;
mod factory;
#[cfg(feature = "cloudflare")]
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_provider;

pub use traits::DnsProvider;

pub use types::{
    DnsRecord, DnsRecordPayload, DnsRecordType, DomainStatus, PaginatedResponse,
    PaginationParams, ProviderCredentials, ProviderDomain,
};

pub use utils::datetime;

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;
pub use providers::{InMemoryProvider, ProviderCall};

//! DNS provider implementations

/// Shared utilities used by provider implementations.
#[cfg(feature = "cloudflare")]
pub mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;
mod memory;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;
pub use memory::{InMemoryProvider, ProviderCall};

//! Provider factory.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::InMemoryProvider;
use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;

/// Creates a [`DnsProvider`] from explicit credentials.
///
/// The concrete provider is picked by the [`ProviderCredentials`] variant and
/// returned as `Arc<dyn DnsProvider>` so it can be shared across tasks.
/// [`ProviderCredentials::InMemory`] yields a provider seeded with sample zones.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_bulk_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Cloudflare {
///     api_token: "your-token".to_string(),
/// })?;
/// # Ok::<(), dns_bulk_provider::ProviderError>(())
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    log::debug!("Creating provider: {}", credentials.provider_id());
    match credentials {
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { api_token } => {
            Ok(Arc::new(CloudflareProvider::new(api_token)?))
        }
        ProviderCredentials::InMemory => Ok(Arc::new(InMemoryProvider::with_sample_data())),
    }
}

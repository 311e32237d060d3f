//! Service layer

mod bulk;
mod dns_service;
mod domain_service;

pub use bulk::BulkOperationService;
pub use dns_service::DnsService;
pub use domain_service::DomainService;

use std::sync::Arc;

use dns_bulk_provider::{DnsProvider, ProviderError};

use crate::config::EngineConfig;
use crate::error::CoreError;

/// Service context - holds every dependency of the services.
///
/// The front-end builds the provider from explicit credentials and hands it in.
pub struct ServiceContext {
    /// Provider client
    pub provider: Arc<dyn DnsProvider>,
    /// Concurrency bounds of bulk runs
    pub config: EngineConfig,
}

impl ServiceContext {
    /// Create a context with the default engine configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    /// Create a context with explicit concurrency bounds (clamped).
    #[must_use]
    pub fn with_config(provider: Arc<dyn DnsProvider>, config: EngineConfig) -> Self {
        Self {
            provider,
            config: config.validated(),
        }
    }

    /// Log a provider error by severity and wrap it.
    pub fn handle_provider_error(&self, operation: &str, err: ProviderError) -> CoreError {
        if err.is_expected() {
            log::warn!("{operation} failed: {err}");
        } else {
            log::error!("{operation} failed: {err}");
        }
        CoreError::Provider(err)
    }
}

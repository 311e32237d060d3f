//! Zone listing and selector resolution

use std::sync::Arc;

use dns_bulk_provider::ProviderDomain;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::Domain;

/// Zone service
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List every zone of the account (all pages).
    pub async fn list_domains(&self) -> CoreResult<Vec<ProviderDomain>> {
        match self.ctx.provider.list_all_domains().await {
            Ok(domains) => Ok(domains),
            Err(e) => Err(self.ctx.handle_provider_error("List domains", e)),
        }
    }

    /// Every zone of the account as a bulk target, in provider order.
    pub async fn all_targets(&self) -> CoreResult<Vec<Domain>> {
        Ok(self
            .list_domains()
            .await?
            .into_iter()
            .map(Domain::from)
            .collect())
    }

    /// Map zone ids or names to targets, keeping the caller's order.
    ///
    /// Names match case-insensitively and ignore a trailing dot. An unknown
    /// selector fails the whole resolution with [`CoreError::DomainNotFound`].
    pub async fn resolve<S: AsRef<str>>(&self, selectors: &[S]) -> CoreResult<Vec<Domain>> {
        if selectors.is_empty() {
            return Ok(Vec::new());
        }
        let zones = self.list_domains().await?;
        selectors
            .iter()
            .map(|selector| {
                let selector = selector.as_ref();
                zones
                    .iter()
                    .find(|zone| matches_selector(zone, selector))
                    .map(|zone| Domain::new(zone.id.clone(), zone.name.clone()))
                    .ok_or_else(|| {
                        log::warn!("No zone matches '{selector}'");
                        CoreError::DomainNotFound(selector.to_string())
                    })
            })
            .collect()
    }
}

fn matches_selector(zone: &ProviderDomain, selector: &str) -> bool {
    let selector = selector.trim();
    zone.id == selector
        || zone
            .name
            .trim_end_matches('.')
            .eq_ignore_ascii_case(selector.trim_end_matches('.'))
}

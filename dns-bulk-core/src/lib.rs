//! Bulk DNS operation engine
//!
//! Applies one declarative change (set a TTL, add a record, rewrite matching
//! records) across many zones of a DNS provider and reports per-domain and
//! per-action outcomes:
//!
//! - [`BulkOperationService`](services::BulkOperationService): expand, dispatch, aggregate
//! - [`DomainService`](services::DomainService): zone listing and selector resolution
//! - [`DnsService`](services::DnsService): single-record edits
//!
//! The provider is injected through [`ServiceContext`]; the engine owns no
//! persistent state.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dns_bulk_core::services::BulkOperationService;
//! use dns_bulk_core::types::{Domain, OperationSpec};
//! use dns_bulk_core::ServiceContext;
//! use dns_bulk_provider::InMemoryProvider;
//!
//! # async fn demo() -> dns_bulk_core::CoreResult<()> {
//! let ctx = Arc::new(ServiceContext::new(Arc::new(InMemoryProvider::with_sample_data())));
//! let service = BulkOperationService::new(ctx);
//! let report = service
//!     .run(
//!         OperationSpec::UpdateTtl { ttl: 300 },
//!         &[Domain::new("mock-1", "example.com")],
//!     )
//!     .await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::EngineConfig;
pub use error::{BulkError, CoreError, CoreResult};
pub use services::ServiceContext;

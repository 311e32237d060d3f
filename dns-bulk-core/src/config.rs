//! Engine tuning

use serde::{Deserialize, Serialize};

/// Default number of provider calls in flight during dispatch
pub const DEFAULT_DISPATCH_CONCURRENCY: usize = 4;
/// Default number of domains read in parallel during expansion
pub const DEFAULT_EXPANSION_CONCURRENCY: usize = 4;

const MAX_CONCURRENCY: usize = 32;

/// Concurrency bounds of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Actions dispatched at once
    pub dispatch_concurrency: usize,
    /// Domains expanded at once
    pub expansion_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispatch_concurrency: DEFAULT_DISPATCH_CONCURRENCY,
            expansion_concurrency: DEFAULT_EXPANSION_CONCURRENCY,
        }
    }
}

impl EngineConfig {
    /// Clamp both bounds into `1..=32`.
    #[must_use]
    pub fn validated(self) -> Self {
        Self {
            dispatch_concurrency: self.dispatch_concurrency.clamp(1, MAX_CONCURRENCY),
            expansion_concurrency: self.expansion_concurrency.clamp(1, MAX_CONCURRENCY),
        }
    }

    /// Fully sequential run, one call at a time.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            dispatch_concurrency: 1,
            expansion_concurrency: 1,
        }
    }
}

//! Domain targeted by a bulk operation

use serde::{Deserialize, Serialize};

use dns_bulk_provider::ProviderDomain;

/// A provider zone targeted by an operation. Read-only within the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Provider zone id
    pub id: String,
    /// Zone name
    pub name: String,
}

impl Domain {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Name used in report lines; falls back to the zone id when the name is empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl From<ProviderDomain> for Domain {
    fn from(domain: ProviderDomain) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
        }
    }
}

//! Bulk operation intents
//!
//! An [`OperationSpec`] is what the user asks for ("set TTL 300 everywhere").
//! [`OperationSpec::validate`] is the only gate between caller input and the
//! engine: it rejects malformed specs before any provider call and returns a
//! normalised copy (defaults applied, empty strings turned into `None`).

use serde::{Deserialize, Serialize};

use dns_bulk_provider::DnsRecordType;

use crate::error::{CoreError, CoreResult};
use crate::types::Domain;

/// TTL value meaning "automatic" at the provider
pub const AUTO_TTL: u32 = 1;
/// Smallest explicit TTL accepted
pub const MIN_TTL: u32 = 60;
/// Largest TTL accepted
pub const MAX_TTL: u32 = 86_400;
/// Priority used for MX/SRV records created without one
pub const DEFAULT_PRIORITY: u16 = 10;

/// A user-declared bulk intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum OperationSpec {
    /// Set the TTL of every record of every domain.
    UpdateTtl {
        /// New TTL in seconds
        ttl: u32,
    },
    /// Create one record in every domain.
    AddRecord(AddRecordSpec),
    /// Override fields of the records matching a filter.
    UpdateRecord(UpdateRecordSpec),
}

/// Record created by [`OperationSpec::AddRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRecordSpec {
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    /// Only valid for types that carry a priority (MX, SRV)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Conjunctive record filter; an absent field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Exact type match
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
    /// Substring match on the record name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RecordFilter {
    /// Whether a record of `record_type` named `name` passes the filter.
    pub fn matches(&self, record_type: &DnsRecordType, name: &str) -> bool {
        let type_ok = self.record_type.as_ref().is_none_or(|t| t == record_type);
        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|needle| name.contains(needle));
        type_ok && name_ok
    }
}

/// Field overrides applied by [`OperationSpec::UpdateRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordSpec {
    #[serde(default)]
    pub filter: RecordFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_ttl: Option<u32>,
}

impl OperationSpec {
    /// Name shown in the report.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::UpdateTtl { .. } => "TTL Update",
            Self::AddRecord(_) => "Add Records",
            Self::UpdateRecord(_) => "Update Records",
        }
    }

    /// Check the spec and return its normalised form.
    pub fn validate(self) -> CoreResult<Self> {
        match self {
            Self::UpdateTtl { ttl } => {
                check_ttl(ttl)?;
                Ok(Self::UpdateTtl { ttl })
            }
            Self::AddRecord(spec) => spec.validate().map(Self::AddRecord),
            Self::UpdateRecord(spec) => spec.validate().map(Self::UpdateRecord),
        }
    }
}

impl AddRecordSpec {
    fn validate(self) -> CoreResult<Self> {
        let name = self.name.trim().to_string();
        let content = self.content.trim().to_string();
        if name.is_empty() {
            return Err(invalid("record name must not be empty"));
        }
        if content.is_empty() {
            return Err(invalid("record content must not be empty"));
        }
        check_ttl(self.ttl)?;

        let priority = match (self.record_type.requires_priority(), self.priority) {
            (true, priority) => Some(priority.unwrap_or(DEFAULT_PRIORITY)),
            (false, None) => None,
            (false, Some(_)) => {
                return Err(invalid(format!(
                    "priority is not allowed on {} records",
                    self.record_type
                )))
            }
        };

        Ok(Self {
            name,
            content,
            priority,
            ..self
        })
    }
}

impl UpdateRecordSpec {
    fn validate(self) -> CoreResult<Self> {
        let new_content = non_empty(self.new_content);
        let new_ttl = self.new_ttl.filter(|ttl| *ttl != 0);
        if new_content.is_none() && new_ttl.is_none() {
            return Err(invalid("at least one of new content or new TTL is required"));
        }
        if let Some(ttl) = new_ttl {
            check_ttl(ttl)?;
        }

        Ok(Self {
            filter: RecordFilter {
                record_type: self.filter.record_type,
                name: non_empty(self.filter.name),
            },
            new_content,
            new_ttl,
        })
    }
}

/// Check the target list of a run.
pub(crate) fn validate_domains(domains: &[Domain]) -> CoreResult<()> {
    if domains.is_empty() {
        return Err(invalid("no domains selected"));
    }
    if let Some(position) = domains.iter().position(|d| d.id.trim().is_empty()) {
        return Err(invalid(format!("domain {} has an empty id", position + 1)));
    }
    Ok(())
}

fn check_ttl(ttl: u32) -> CoreResult<()> {
    if ttl == AUTO_TTL || (MIN_TTL..=MAX_TTL).contains(&ttl) {
        Ok(())
    } else {
        Err(invalid(format!(
            "TTL must be {AUTO_TTL} (automatic) or between {MIN_TTL} and {MAX_TTL} seconds, got {ttl}"
        )))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::ValidationError(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(record_type: DnsRecordType, priority: Option<u16>) -> OperationSpec {
        OperationSpec::AddRecord(AddRecordSpec {
            record_type,
            name: "www".to_string(),
            content: "203.0.113.5".to_string(),
            ttl: 300,
            priority,
            proxied: None,
        })
    }

    #[test]
    fn ttl_bounds() {
        for ttl in [1, 60, 3600, 86_400] {
            assert!(OperationSpec::UpdateTtl { ttl }.validate().is_ok(), "{ttl}");
        }
        for ttl in [0, 2, 59, 86_401] {
            assert!(
                matches!(
                    OperationSpec::UpdateTtl { ttl }.validate(),
                    Err(CoreError::ValidationError(_))
                ),
                "{ttl}"
            );
        }
    }

    #[test]
    fn priority_rules() {
        assert!(add(DnsRecordType::Cname, Some(5)).validate().is_err());
        assert!(add(DnsRecordType::A, None).validate().is_ok());

        let mx = add(DnsRecordType::Mx, None).validate().unwrap();
        assert!(matches!(mx, OperationSpec::AddRecord(AddRecordSpec { priority: Some(10), .. })));

        let srv = add(DnsRecordType::Srv, Some(0)).validate().unwrap();
        assert!(matches!(srv, OperationSpec::AddRecord(AddRecordSpec { priority: Some(0), .. })));
    }

    #[test]
    fn add_record_requires_name_and_content() {
        let spec = OperationSpec::AddRecord(AddRecordSpec {
            record_type: DnsRecordType::Txt,
            name: "  ".to_string(),
            content: "v=spf1 -all".to_string(),
            ttl: 300,
            priority: None,
            proxied: None,
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn update_record_normalises_empty_overrides() {
        let spec = OperationSpec::UpdateRecord(UpdateRecordSpec {
            filter: RecordFilter {
                record_type: None,
                name: Some(String::new()),
            },
            new_content: Some(String::new()),
            new_ttl: Some(600),
        })
        .validate()
        .unwrap();
        let OperationSpec::UpdateRecord(spec) = spec else {
            unreachable!("variant is preserved");
        };
        assert_eq!(spec.new_content, None);
        assert_eq!(spec.new_ttl, Some(600));
        assert_eq!(spec.filter.name, None);
    }

    #[test]
    fn update_record_needs_an_override() {
        let spec = OperationSpec::UpdateRecord(UpdateRecordSpec {
            filter: RecordFilter::default(),
            new_content: Some(" ".to_string()),
            new_ttl: Some(0),
        });
        assert!(matches!(spec.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn filter_is_conjunctive() {
        let filter = RecordFilter {
            record_type: Some(DnsRecordType::A),
            name: Some("api".to_string()),
        };
        assert!(filter.matches(&DnsRecordType::A, "api.example.com"));
        assert!(!filter.matches(&DnsRecordType::Aaaa, "api.example.com"));
        assert!(!filter.matches(&DnsRecordType::A, "www.example.com"));
        assert!(RecordFilter::default().matches(&DnsRecordType::Txt, "anything"));
    }

    #[test]
    fn domain_list_checks() {
        assert!(validate_domains(&[]).is_err());
        assert!(validate_domains(&[Domain::new("", "a.com")]).is_err());
        assert!(validate_domains(&[Domain::new("z1", "a.com")]).is_ok());
    }

    #[test]
    fn spec_json_shape() {
        let spec: OperationSpec =
            serde_json::from_str(r#"{"operation":"updateRecord","filter":{"type":"A"},"newTtl":300}"#)
                .unwrap();
        assert_eq!(
            spec,
            OperationSpec::UpdateRecord(UpdateRecordSpec {
                filter: RecordFilter {
                    record_type: Some(DnsRecordType::A),
                    name: None,
                },
                new_content: None,
                new_ttl: Some(300),
            })
        );
        assert_eq!(spec.display_name(), "Update Records");
    }
}

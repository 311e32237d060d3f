//! Concrete provider actions and their outcomes

use serde::{Deserialize, Serialize};

use dns_bulk_provider::{DnsRecord, DnsRecordPayload};

/// An atomic create/update/delete request against one record.
///
/// Serialized as `{"type": "create" | "update" | "delete", "zoneId", "recordId"?, "payload"?}`,
/// so a list of actions can be loaded from a JSON file and applied as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Create {
        #[serde(rename = "zoneId")]
        zone_id: String,
        payload: DnsRecordPayload,
    },
    Update {
        #[serde(rename = "zoneId")]
        zone_id: String,
        #[serde(rename = "recordId")]
        record_id: String,
        payload: DnsRecordPayload,
    },
    Delete {
        #[serde(rename = "zoneId")]
        zone_id: String,
        #[serde(rename = "recordId")]
        record_id: String,
    },
}

impl Action {
    pub fn zone_id(&self) -> &str {
        match self {
            Self::Create { zone_id, .. }
            | Self::Update { zone_id, .. }
            | Self::Delete { zone_id, .. } => zone_id,
        }
    }

    /// Target record id; `None` for creates.
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::Create { .. } => None,
            Self::Update { record_id, .. } | Self::Delete { record_id, .. } => Some(record_id),
        }
    }

    /// Lower-case verb, as used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Value produced by a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutput {
    /// Created or updated record
    Record(Box<DnsRecord>),
    /// Delete confirmation flag
    Deleted(bool),
}

/// Outcome of one dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ActionOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn success(output: ActionOutput) -> Self {
        Self {
            ok: true,
            output: Some(output),
            error: None,
        }
    }

    /// Failed result; an empty message is stored as `None`.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            ok: false,
            output: None,
            error: (!message.is_empty()).then_some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns_bulk_provider::DnsRecordType;

    #[test]
    fn action_wire_shape() {
        let action = Action::Update {
            zone_id: "z1".to_string(),
            record_id: "r1".to_string(),
            payload: DnsRecordPayload {
                record_type: DnsRecordType::A,
                name: "www".to_string(),
                content: "192.0.2.1".to_string(),
                ttl: 300,
                priority: None,
                proxied: None,
                data: None,
                comment: None,
                tags: None,
            },
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "update");
        assert_eq!(json["zoneId"], "z1");
        assert_eq!(json["recordId"], "r1");
        assert_eq!(json["payload"]["type"], "A");
        assert!(json["payload"].get("priority").is_none());
    }

    #[test]
    fn delete_action_from_json() {
        let action: Action =
            serde_json::from_str(r#"{"type":"delete","zoneId":"z2","recordId":"r9"}"#).unwrap();
        assert_eq!(action.kind(), "delete");
        assert_eq!(action.zone_id(), "z2");
        assert_eq!(action.record_id(), Some("r9"));
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let parsed: Result<Action, _> =
            serde_json::from_str(r#"{"type":"upsert","zoneId":"z2"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_failure_message_becomes_none() {
        assert_eq!(ActionResult::failure("").error, None);
        assert_eq!(
            ActionResult::failure("boom").error.as_deref(),
            Some("boom")
        );
    }
}

//! Z-API wire types and the tagged call outcome.
//!
//! Every gateway call resolves to `GatewayResult<T>`: the data on success,
//! or a `{kind, message}` error the pipeline can match on instead of
//! probing loose fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a gateway call went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorKind {
    /// Request never produced an HTTP response.
    Transport,
    /// Non-2xx status without a parsable vendor message.
    Http,
    /// Vendor rejected the call and said why.
    Vendor,
    /// 2xx response with a body that did not match the expected shape.
    Payload,
}

impl std::fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayErrorKind::Transport => write!(f, "transport"),
            GatewayErrorKind::Http => write!(f, "http"),
            GatewayErrorKind::Vendor => write!(f, "vendor"),
            GatewayErrorKind::Payload => write!(f, "payload"),
        }
    }
}

/// One failed gateway call.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{kind} error: {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn into_app_error(self, operation: impl Into<String>) -> crate::error::AppError {
        crate::error::AppError::Gateway {
            operation: operation.into(),
            message: self.message,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Receipt returned by the message-sending endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceipt {
    pub message_id: String,
    #[serde(default)]
    pub zaap_id: Option<String>,
}

/// Entry of the instance's group listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSummary {
    pub phone: String,
    #[serde(default)]
    pub name: String,
}

/// Group details as reported by `group-metadata`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupMetadata {
    pub phone: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub phone: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_super_admin: bool,
}

impl ParticipantInfo {
    pub fn has_admin_role(&self) -> bool {
        self.is_admin || self.is_super_admin
    }
}

/// Error body the vendor returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct VendorErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_receipt_accepts_camel_case() {
        let receipt: MessageReceipt =
            serde_json::from_str(r#"{"messageId":"D241XXXX","zaapId":"39990"}"#).unwrap();
        assert_eq!(receipt.message_id, "D241XXXX");
        assert_eq!(receipt.zaap_id.as_deref(), Some("39990"));
    }

    #[test]
    fn group_metadata_defaults_missing_fields() {
        let metadata: GroupMetadata = serde_json::from_str(
            r#"{
                "phone": "120363025463428000-group",
                "participants": [
                    {"phone": "5511999990001", "isAdmin": true},
                    {"phone": "5511999990002", "isSuperAdmin": true},
                    {"phone": "5511999990003"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(metadata.name, "");
        assert_eq!(metadata.participants.len(), 3);
        assert!(metadata.participants[0].has_admin_role());
        assert!(metadata.participants[1].has_admin_role());
        assert!(!metadata.participants[2].has_admin_role());
    }

    #[test]
    fn gateway_error_displays_kind_and_message() {
        let err = GatewayError {
            kind: GatewayErrorKind::Vendor,
            message: "send-text rejected: invalid phone".to_string(),
        };
        assert_eq!(err.to_string(), "vendor error: send-text rejected: invalid phone");
    }

    #[test]
    fn gateway_error_round_trips_through_json() {
        let err = GatewayError {
            kind: GatewayErrorKind::Transport,
            message: "connection refused".to_string(),
        };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["kind"], "transport");
        let back: GatewayError = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind, GatewayErrorKind::Transport);
    }
}

//! Blacklist DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::BlacklistEntry;
use crate::utils::validate::validate_phone;

/// Request body for blacklisting a phone number.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "phone": "5511999998888",
    "reason": "Pediu para sair"
}))]
pub struct CreateBlacklistEntryRequest {
    /// Phone number; punctuation is stripped before storage.
    #[validate(custom(function = validate_phone, message = "Phone must have 8 to 15 digits"))]
    #[schema(example = "5511999998888")]
    pub phone: String,

    #[validate(length(max = 255, message = "Reason must be at most 255 characters"))]
    #[schema(example = "Pediu para sair")]
    pub reason: Option<String>,
}

/// Response body for blacklist entry data.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlacklistEntryResponse {
    pub id: Uuid,
    pub phone: String,
    pub reason: Option<String>,
    pub created_at: String,
}

impl From<BlacklistEntry> for BlacklistEntryResponse {
    fn from(entry: BlacklistEntry) -> Self {
        Self {
            id: entry.id,
            phone: entry.phone,
            reason: entry.reason,
            created_at: entry
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formatted_phone_passes_validation() {
        let request: CreateBlacklistEntryRequest = serde_json::from_value(json!({
            "phone": "+55 (11) 99999-8888"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn short_phone_fails_validation() {
        let request: CreateBlacklistEntryRequest =
            serde_json::from_value(json!({ "phone": "12345" })).unwrap();
        assert!(request.validate().is_err());
    }
}

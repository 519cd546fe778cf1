//! Gateway instance DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::UserInstance;

/// Request body for registering or replacing the caller's gateway
/// credentials.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "instance_id": "3C9A7D2E1B8F4A06",
    "instance_token": "A1B2C3D4E5F6A7B8C9D0",
    "client_token": "Fa1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6S"
}))]
pub struct UpsertInstanceRequest {
    #[validate(length(min = 1, max = 255, message = "Instance id must not be empty"))]
    #[schema(example = "3C9A7D2E1B8F4A06")]
    pub instance_id: String,

    #[validate(length(min = 1, max = 255, message = "Instance token must not be empty"))]
    pub instance_token: String,

    #[validate(length(min = 1, max = 255, message = "Client token must not be empty"))]
    pub client_token: String,
}

/// Response body for instance data. Tokens never leave the server; only
/// the instance id and timestamps are echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct InstanceResponse {
    pub id: Uuid,
    #[schema(example = "3C9A7D2E1B8F4A06")]
    pub instance_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserInstance> for InstanceResponse {
    fn from(instance: UserInstance) -> Self {
        Self {
            id: instance.id,
            instance_id: instance.instance_id,
            created_at: instance
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: instance
                .updated_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn response_omits_tokens() {
        let instance = UserInstance {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            instance_id: "3C9A7D2E1B8F4A06".to_string(),
            instance_token: "secret-token".to_string(),
            client_token: "secret-client".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let body = serde_json::to_value(InstanceResponse::from(instance)).unwrap();
        assert!(body.get("instance_token").is_none());
        assert!(body.get("client_token").is_none());
        assert_eq!(body["instance_id"], "3C9A7D2E1B8F4A06");
    }
}

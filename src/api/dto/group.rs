//! WhatsApp group DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::WhatsappGroup;
use crate::utils::validate::validate_phone;

/// Request body for adding, removing, promoting or demoting a participant.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({ "phone": "5511999998888" }))]
pub struct ParticipantRequest {
    #[validate(custom(function = validate_phone, message = "Phone must have 8 to 15 digits"))]
    #[schema(example = "5511999998888")]
    pub phone: String,
}

/// Request body for renaming a group or changing its description.
/// At least one field must be present.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({ "name": "Turma de sexta" }))]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Turma de sexta")]
    pub name: Option<String>,

    #[validate(length(max = 2048, message = "Description must be at most 2048 characters"))]
    pub description: Option<String>,
}

/// Response body for group data. Participant lists are parsed out of the
/// stored JSONB mirror.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "120363025463428000@g.us")]
    pub whatsapp_id: String,
    pub participants: Vec<String>,
    pub admins: Vec<String>,
    pub participant_count: usize,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<WhatsappGroup> for GroupResponse {
    fn from(group: WhatsappGroup) -> Self {
        let participants = group.participant_phones();
        let admins = group.admin_phones();
        Self {
            id: group.id,
            name: group.name,
            whatsapp_id: group.whatsapp_id,
            participant_count: participants.len(),
            participants,
            admins,
            is_active: group.is_active,
            created_at: group
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: group
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
    use serde_json::json;

    #[test]
    fn response_parses_membership_from_jsonb() {
        let group = WhatsappGroup {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Turma".to_string(),
            whatsapp_id: "120363025463428000@g.us".to_string(),
            participants: json!(["5511999990001", "5511999990002"]),
            admins: json!(["5511999990001"]),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response = GroupResponse::from(group);
        assert_eq!(response.participant_count, 2);
        assert_eq!(response.admins, vec!["5511999990001"]);
    }

    #[test]
    fn update_request_accepts_either_field() {
        let request: UpdateGroupRequest =
            serde_json::from_value(json!({ "description": "Avisos gerais" })).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.name.is_none());
    }
}

//! Contact DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Contact;
use crate::utils::validate::validate_phone;

/// Request body for creating a contact.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "name": "Maria Silva",
    "phone": "5511988887777"
}))]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Maria Silva")]
    pub name: String,

    #[validate(custom(function = validate_phone, message = "Phone must have 8 to 15 digits"))]
    #[schema(example = "5511988887777")]
    pub phone: String,
}

/// Response body for contact data.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone: contact.phone,
            created_at: contact
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}

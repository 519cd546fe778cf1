//! WhatsApp group models for database operations.
//!
//! Groups mirror the gateway's view of a group: `participants` and `admins`
//! are JSONB arrays of normalized phone numbers, refreshed by the monitor
//! sweep and patched locally after each participant operation.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::schema::whatsapp_groups;

/// WhatsappGroup query model for SELECT operations
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = whatsapp_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WhatsappGroup {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub whatsapp_id: String,
    pub participants: JsonValue,
    pub admins: JsonValue,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WhatsappGroup {
    /// Participant phone numbers parsed from the JSONB column.
    ///
    /// Malformed entries are dropped rather than failing the whole read;
    /// the monitor sweep rewrites the column on its next pass.
    pub fn participant_phones(&self) -> Vec<String> {
        parse_phone_array(&self.participants)
    }

    /// Admin phone numbers parsed from the JSONB column.
    pub fn admin_phones(&self) -> Vec<String> {
        parse_phone_array(&self.admins)
    }

    pub fn is_admin(&self, phone: &str) -> bool {
        self.admin_phones().iter().any(|p| p == phone)
    }

    pub fn admin_count(&self) -> usize {
        self.admin_phones().len()
    }
}

/// NewWhatsappGroup insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = whatsapp_groups)]
pub struct NewWhatsappGroup {
    pub user_id: Uuid,
    pub name: String,
    pub whatsapp_id: String,
    pub participants: JsonValue,
    pub admins: JsonValue,
    pub is_active: bool,
}

/// UpdateWhatsappGroup model for partial UPDATE operations
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = whatsapp_groups)]
pub struct UpdateWhatsappGroup {
    pub name: Option<String>,
    pub participants: Option<JsonValue>,
    pub admins: Option<JsonValue>,
    pub is_active: Option<bool>,
}

fn parse_phone_array(value: &JsonValue) -> Vec<String> {
    match value.as_array() {
        Some(entries) => entries
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        None => Vec::new(),
    }
}

/// Serializes a phone list back into the JSONB column representation.
pub fn phones_to_json(phones: &[String]) -> JsonValue {
    JsonValue::Array(phones.iter().cloned().map(JsonValue::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group_with(participants: JsonValue, admins: JsonValue) -> WhatsappGroup {
        WhatsappGroup {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Turma".to_string(),
            whatsapp_id: "120363025463428000@g.us".to_string(),
            participants,
            admins,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn participant_phones_parses_string_array() {
        let group = group_with(json!(["5511999990001", "5511999990002"]), json!([]));
        assert_eq!(
            group.participant_phones(),
            vec!["5511999990001", "5511999990002"]
        );
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let group = group_with(json!(["5511999990001", 42, null]), json!("not-an-array"));
        assert_eq!(group.participant_phones(), vec!["5511999990001"]);
        assert!(group.admin_phones().is_empty());
    }

    #[test]
    fn admin_membership_and_count() {
        let group = group_with(
            json!(["5511999990001", "5511999990002"]),
            json!(["5511999990001"]),
        );
        assert!(group.is_admin("5511999990001"));
        assert!(!group.is_admin("5511999990002"));
        assert_eq!(group.admin_count(), 1);
    }

    #[test]
    fn phones_round_trip_through_json() {
        let phones = vec!["5511999990001".to_string(), "5511999990002".to_string()];
        let value = phones_to_json(&phones);
        let group = group_with(value, json!([]));
        assert_eq!(group.participant_phones(), phones);
    }
}

//! Schedule DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CampaignSchedule, NewCampaignSchedule, UpdateCampaignSchedule};
use crate::utils::validate::{parse_time_of_day, validate_days_of_week, validate_time_of_day};

/// Request body for creating a schedule, standalone or inline on a
/// campaign create.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "start_time": "09:00",
    "days_of_week": "1,3,5",
    "is_active": true,
    "is_recurring": true
}))]
pub struct CreateScheduleRequest {
    /// Local wall-clock time, `HH:MM` or `HH:MM:SS`.
    #[validate(custom(function = validate_time_of_day, message = "Time must be HH:MM or HH:MM:SS"))]
    #[schema(example = "09:00")]
    pub start_time: String,

    /// Comma-separated weekday numbers, 0=Sunday through 6=Saturday.
    #[validate(custom(function = validate_days_of_week, message = "Days must be a comma-separated list of 0-6"))]
    #[schema(example = "1,3,5")]
    pub days_of_week: String,

    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_active: bool,

    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_recurring: bool,
}

fn default_true() -> bool {
    true
}

impl CreateScheduleRequest {
    pub fn into_new_schedule(self, campaign_id: Uuid) -> AppResult<NewCampaignSchedule> {
        let start_time =
            parse_time_of_day(&self.start_time).ok_or_else(|| AppError::Validation {
                field: "start_time".to_string(),
                reason: "Time must be HH:MM or HH:MM:SS".to_string(),
            })?;
        Ok(NewCampaignSchedule {
            campaign_id,
            start_time,
            days_of_week: normalize_days(&self.days_of_week),
            is_active: self.is_active,
            is_recurring: self.is_recurring,
        })
    }
}

/// Request body for updating a schedule. Absent fields are left as they are.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateScheduleRequest {
    #[validate(custom(function = validate_time_of_day, message = "Time must be HH:MM or HH:MM:SS"))]
    pub start_time: Option<String>,

    #[validate(custom(function = validate_days_of_week, message = "Days must be a comma-separated list of 0-6"))]
    pub days_of_week: Option<String>,

    pub is_active: Option<bool>,
    pub is_recurring: Option<bool>,
}

impl UpdateScheduleRequest {
    pub fn into_update_schedule(self) -> AppResult<UpdateCampaignSchedule> {
        let start_time = match self.start_time {
            Some(raw) => Some(parse_time_of_day(&raw).ok_or_else(|| AppError::Validation {
                field: "start_time".to_string(),
                reason: "Time must be HH:MM or HH:MM:SS".to_string(),
            })?),
            None => None,
        };
        Ok(UpdateCampaignSchedule {
            start_time,
            days_of_week: self.days_of_week.as_deref().map(normalize_days),
            is_active: self.is_active,
            is_recurring: self.is_recurring,
        })
    }
}

/// Strips whitespace around each entry so `"1, 3, 5"` is stored as `"1,3,5"`.
fn normalize_days(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(",")
}

/// Response body for schedule data.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    #[schema(example = "09:00:00")]
    pub start_time: String,
    #[schema(example = "1,3,5")]
    pub days_of_week: String,
    pub is_active: bool,
    pub is_recurring: bool,
    pub last_executed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CampaignSchedule> for ScheduleResponse {
    fn from(schedule: CampaignSchedule) -> Self {
        Self {
            id: schedule.id,
            campaign_id: schedule.campaign_id,
            start_time: schedule.start_time.format("%H:%M:%S").to_string(),
            days_of_week: schedule.days_of_week,
            is_active: schedule.is_active,
            is_recurring: schedule.is_recurring,
            last_executed_at: schedule
                .last_executed_at
                .map(|at| at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            created_at: schedule
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: schedule
                .updated_at
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
    fn minimal_payload_defaults_to_active_recurring() {
        let request: CreateScheduleRequest = serde_json::from_value(json!({
            "start_time": "09:00",
            "days_of_week": "1,3,5"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.is_active);
        assert!(request.is_recurring);
    }

    #[test]
    fn conversion_parses_time_and_normalizes_days() {
        let request: CreateScheduleRequest = serde_json::from_value(json!({
            "start_time": "09:30",
            "days_of_week": "1, 3, 5"
        }))
        .unwrap();
        let new_schedule = request.into_new_schedule(Uuid::new_v4()).unwrap();
        assert_eq!(new_schedule.start_time.format("%H:%M:%S").to_string(), "09:30:00");
        assert_eq!(new_schedule.days_of_week, "1,3,5");
    }

    #[test]
    fn bad_time_fails_validation() {
        let request: CreateScheduleRequest = serde_json::from_value(json!({
            "start_time": "9am",
            "days_of_week": "1"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_leaves_absent_fields_unset() {
        let request: UpdateScheduleRequest =
            serde_json::from_value(json!({ "is_active": false })).unwrap();
        let update = request.into_update_schedule().unwrap();
        assert!(update.start_time.is_none());
        assert!(update.days_of_week.is_none());
        assert_eq!(update.is_active, Some(false));
    }
}

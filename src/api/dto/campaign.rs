//! Campaign DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::dto::schedule::CreateScheduleRequest;
use crate::models::{
    Campaign, CampaignExecution, CampaignStatus, CampaignTarget, ExecutionStatus, MediaKind,
    NewCampaign, SendOrder, UpdateCampaign,
};
use crate::services::TargetRefs;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new campaign.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(schema(function = validate_media_pair))]
#[schema(example = json!({
    "name": "Friday promo",
    "message_text": "Nova promoção no ar!",
    "media_url": "https://cdn.example.com/promo.jpg",
    "media_kind": "image",
    "send_order": "text_first",
    "global_interval_seconds": 30,
    "group_ids": ["0b086c25-23bb-49b8-9cfc-33816fc8b7d5"],
    "schedules": [{ "start_time": "09:00", "days_of_week": "1,3,5" }]
}))]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Friday promo")]
    pub name: String,

    #[validate(length(min = 1, max = 4096, message = "Message must be between 1 and 4096 characters"))]
    #[schema(example = "Nova promoção no ar!")]
    pub message_text: String,

    #[validate(url(message = "Media URL must be a valid URL"))]
    #[schema(example = "https://cdn.example.com/promo.jpg")]
    pub media_url: Option<String>,

    pub media_kind: Option<MediaKind>,

    #[serde(default)]
    pub send_order: SendOrder,

    #[serde(default = "default_global_interval")]
    #[validate(range(min = 0, max = 3600, message = "Interval must be between 0 and 3600 seconds"))]
    #[schema(example = 30)]
    pub global_interval_seconds: i32,

    #[validate(range(min = 0, max = 3600, message = "Interval must be between 0 and 3600 seconds"))]
    pub group_interval_seconds: Option<i32>,

    #[serde(default)]
    pub group_ids: Vec<Uuid>,

    #[serde(default)]
    pub contact_ids: Vec<Uuid>,

    /// Schedules created together with the campaign.
    #[serde(default)]
    #[validate(nested)]
    pub schedules: Vec<CreateScheduleRequest>,
}

fn default_global_interval() -> i32 {
    30
}

fn validate_media_pair(request: &CreateCampaignRequest) -> Result<(), ValidationError> {
    if request.media_url.is_some() != request.media_kind.is_some() {
        return Err(ValidationError::new("media_pair")
            .with_message("media_url and media_kind must be provided together".into()));
    }
    Ok(())
}

impl CreateCampaignRequest {
    pub fn into_new_campaign(
        self,
        user_id: Uuid,
    ) -> (NewCampaign, TargetRefs, Vec<CreateScheduleRequest>) {
        let targets = TargetRefs {
            group_ids: self.group_ids,
            contact_ids: self.contact_ids,
        };
        let new_campaign = NewCampaign {
            user_id,
            name: self.name,
            message_text: self.message_text,
            media_url: self.media_url,
            media_kind: self.media_kind,
            send_order: self.send_order,
            status: CampaignStatus::Draft,
            global_interval_seconds: self.global_interval_seconds,
            group_interval_seconds: self.group_interval_seconds,
        };
        (new_campaign, targets, self.schedules)
    }
}

/// Request body for updating a campaign. Absent fields are left as they
/// are; `clear_media` drops both media columns.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 4096))]
    pub message_text: Option<String>,

    #[validate(url)]
    pub media_url: Option<String>,

    pub media_kind: Option<MediaKind>,

    #[serde(default)]
    pub clear_media: bool,

    pub send_order: Option<SendOrder>,
    pub status: Option<CampaignStatus>,

    #[validate(range(min = 0, max = 3600))]
    pub global_interval_seconds: Option<i32>,

    #[validate(range(min = 0, max = 3600))]
    pub group_interval_seconds: Option<i32>,

    /// When either list is present the whole target set is replaced.
    pub group_ids: Option<Vec<Uuid>>,
    pub contact_ids: Option<Vec<Uuid>>,
}

impl UpdateCampaignRequest {
    pub fn into_update_campaign(self) -> (UpdateCampaign, Option<TargetRefs>) {
        let target_refs = if self.group_ids.is_some() || self.contact_ids.is_some() {
            Some(TargetRefs {
                group_ids: self.group_ids.unwrap_or_default(),
                contact_ids: self.contact_ids.unwrap_or_default(),
            })
        } else {
            None
        };

        let (media_url, media_kind) = if self.clear_media {
            (Some(None), Some(None))
        } else {
            (self.media_url.map(Some), self.media_kind.map(Some))
        };

        let update = UpdateCampaign {
            name: self.name,
            message_text: self.message_text,
            media_url,
            media_kind,
            send_order: self.send_order,
            status: self.status,
            global_interval_seconds: self.global_interval_seconds,
            group_interval_seconds: self.group_interval_seconds.map(Some),
        };
        (update, target_refs)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for campaign data.
#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignResponse {
    pub id: Uuid,
    pub name: String,
    pub message_text: String,
    pub media_url: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub send_order: SendOrder,
    pub status: CampaignStatus,
    pub global_interval_seconds: i32,
    pub group_interval_seconds: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            message_text: campaign.message_text,
            media_url: campaign.media_url,
            media_kind: campaign.media_kind,
            send_order: campaign.send_order,
            status: campaign.status,
            global_interval_seconds: campaign.global_interval_seconds,
            group_interval_seconds: campaign.group_interval_seconds,
            created_at: campaign
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: campaign
                .updated_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}

/// Response body for campaign target data.
#[derive(Debug, Serialize, ToSchema)]
pub struct TargetResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub group_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub created_at: String,
}

impl From<CampaignTarget> for TargetResponse {
    fn from(target: CampaignTarget) -> Self {
        Self {
            id: target.id,
            campaign_id: target.campaign_id,
            group_id: target.group_id,
            contact_id: target.contact_id,
            created_at: target
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}

/// Query parameters for the execution history listing.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct ExecutionListQuery {
    /// Maximum number of executions to return
    #[serde(default = "default_execution_limit")]
    #[validate(range(min = 1, max = 200, message = "Limit must be between 1 and 200"))]
    #[param(minimum = 1, maximum = 200, example = 50)]
    pub limit: i64,

    /// Number of executions to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "Offset must not be negative"))]
    #[param(minimum = 0, example = 0)]
    pub offset: i64,
}

fn default_execution_limit() -> i64 {
    50
}

/// Response body for campaign execution data.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExecutionResponse {
    pub id: i64,
    pub campaign_id: Uuid,
    pub schedule_id: Option<Uuid>,
    pub status: ExecutionStatus,
    #[schema(example = "2026-08-21")]
    pub local_date: String,
    #[schema(value_type = Option<Object>)]
    pub result: Option<JsonValue>,
    pub error_message: Option<String>,
    pub started_at: String,
    pub completed_at: Option<String>,
}

impl From<CampaignExecution> for ExecutionResponse {
    fn from(execution: CampaignExecution) -> Self {
        Self {
            id: execution.id,
            campaign_id: execution.campaign_id,
            schedule_id: execution.schedule_id,
            status: execution.status,
            local_date: execution.local_date.format("%Y-%m-%d").to_string(),
            result: execution.result,
            error_message: execution.error_message,
            started_at: execution
                .started_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            completed_at: execution
                .completed_at
                .map(|at| at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_url_without_kind_fails_validation() {
        let request: CreateCampaignRequest = serde_json::from_value(json!({
            "name": "Promo",
            "message_text": "hi",
            "media_url": "https://cdn.example.com/a.jpg"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn defaults_apply_on_minimal_payload() {
        let request: CreateCampaignRequest = serde_json::from_value(json!({
            "name": "Promo",
            "message_text": "hi"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.global_interval_seconds, 30);
        assert_eq!(request.send_order, SendOrder::TextFirst);
        assert!(request.schedules.is_empty());

        let (new_campaign, targets, schedules) = request.into_new_campaign(Uuid::new_v4());
        assert_eq!(new_campaign.status, CampaignStatus::Draft);
        assert!(targets.is_empty());
        assert!(schedules.is_empty());
    }

    #[test]
    fn update_replaces_targets_only_when_ids_present() {
        let request: UpdateCampaignRequest =
            serde_json::from_value(json!({ "name": "Renamed" })).unwrap();
        let (update, targets) = request.into_update_campaign();
        assert_eq!(update.name.as_deref(), Some("Renamed"));
        assert!(targets.is_none());

        let request: UpdateCampaignRequest =
            serde_json::from_value(json!({ "group_ids": [] })).unwrap();
        let (_, targets) = request.into_update_campaign();
        assert!(targets.is_some());
        assert!(targets.unwrap().is_empty());
    }

    #[test]
    fn clear_media_nulls_both_columns() {
        let request: UpdateCampaignRequest =
            serde_json::from_value(json!({ "clear_media": true })).unwrap();
        let (update, _) = request.into_update_campaign();
        assert_eq!(update.media_url, Some(None));
        assert_eq!(update.media_kind, Some(None));
    }
}

//! Blocked date DTOs for API requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{BlockKind, CampaignBlockedDate, NewCampaignBlockedDate};

/// Request body for blocking a date on a campaign.
///
/// `specific` blocks take `blocked_date`, `day_of_week` blocks take
/// `blocked_weekday`; the service rejects mismatched pairs.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "block_kind": "specific",
    "blocked_date": "2026-12-25",
    "reason": "Natal"
}))]
pub struct CreateBlockedDateRequest {
    pub block_kind: BlockKind,

    #[schema(example = "2026-12-25")]
    pub blocked_date: Option<NaiveDate>,

    /// Weekday number, 0=Sunday through 6=Saturday.
    #[validate(range(min = 0, max = 6, message = "Weekday must be between 0 and 6"))]
    pub blocked_weekday: Option<i16>,

    #[validate(length(max = 255, message = "Reason must be at most 255 characters"))]
    #[schema(example = "Natal")]
    pub reason: Option<String>,
}

impl CreateBlockedDateRequest {
    pub fn into_new_blocked_date(self, campaign_id: Uuid) -> NewCampaignBlockedDate {
        NewCampaignBlockedDate {
            campaign_id,
            block_kind: self.block_kind,
            blocked_date: self.blocked_date,
            blocked_weekday: self.blocked_weekday,
            reason: self.reason,
        }
    }
}

/// Response body for blocked date data.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlockedDateResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub block_kind: BlockKind,
    pub blocked_date: Option<NaiveDate>,
    pub blocked_weekday: Option<i16>,
    pub reason: Option<String>,
    pub created_at: String,
}

impl From<CampaignBlockedDate> for BlockedDateResponse {
    fn from(blocked: CampaignBlockedDate) -> Self {
        Self {
            id: blocked.id,
            campaign_id: blocked.campaign_id,
            block_kind: blocked.block_kind,
            blocked_date: blocked.blocked_date,
            blocked_weekday: blocked.blocked_weekday,
            reason: blocked.reason,
            created_at: blocked
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
    fn weekday_block_deserializes_and_converts() {
        let request: CreateBlockedDateRequest = serde_json::from_value(json!({
            "block_kind": "day_of_week",
            "blocked_weekday": 0
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let new_blocked = request.into_new_blocked_date(Uuid::new_v4());
        assert_eq!(new_blocked.block_kind, BlockKind::DayOfWeek);
        assert_eq!(new_blocked.blocked_weekday, Some(0));
        assert!(new_blocked.blocked_date.is_none());
    }

    #[test]
    fn weekday_out_of_range_fails_validation() {
        let request: CreateBlockedDateRequest = serde_json::from_value(json!({
            "block_kind": "day_of_week",
            "blocked_weekday": 7
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}

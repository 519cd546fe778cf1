use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::campaigns;

// ============================================================================
// Enums
// ============================================================================

/// Campaign lifecycle status. Only `Active` campaigns are picked up by the
/// scheduler.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::CampaignStatus")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Paused => write!(f, "paused"),
            CampaignStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Order in which the text and media parts of a campaign message are sent
/// to each recipient.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::SendOrder")]
#[serde(rename_all = "snake_case")]
pub enum SendOrder {
    #[default]
    TextFirst,
    MediaFirst,
}

/// Kind of media attached to a campaign, when any.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::MediaKind")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
    Audio,
}

// ============================================================================
// Campaign Models (Query/Insert/Update)
// ============================================================================

/// Campaign query model for SELECT operations
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = campaigns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Campaign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub message_text: String,
    pub media_url: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub send_order: SendOrder,
    pub status: CampaignStatus,
    pub global_interval_seconds: i32,
    pub group_interval_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Whether the campaign carries a media attachment.
    pub fn has_media(&self) -> bool {
        self.media_url.is_some()
    }
}

/// NewCampaign insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = campaigns)]
pub struct NewCampaign {
    pub user_id: Uuid,
    pub name: String,
    pub message_text: String,
    pub media_url: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub send_order: SendOrder,
    pub status: CampaignStatus,
    pub global_interval_seconds: i32,
    pub group_interval_seconds: Option<i32>,
}

/// UpdateCampaign model for partial UPDATE operations
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = campaigns)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub message_text: Option<String>,
    pub media_url: Option<Option<String>>,
    pub media_kind: Option<Option<MediaKind>>,
    pub send_order: Option<SendOrder>,
    pub status: Option<CampaignStatus>,
    pub global_interval_seconds: Option<i32>,
    pub group_interval_seconds: Option<Option<i32>>,
}

impl UpdateCampaign {
    /// True when no column is changed. Diesel rejects empty changesets,
    /// and a target-only update carries none.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.message_text.is_none()
            && self.media_url.is_none()
            && self.media_kind.is_none()
            && self.send_order.is_none()
            && self.status.is_none()
            && self.global_interval_seconds.is_none()
            && self.group_interval_seconds.is_none()
    }
}

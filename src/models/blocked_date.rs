use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::campaign_blocked_dates;

// ============================================================================
// Enums
// ============================================================================

/// Kind of blocking rule. `Specific` pins one calendar date, `DayOfWeek`
/// recurs on a weekday (0=Sunday .. 6=Saturday).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::BlockKind")]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Specific,
    DayOfWeek,
}

// ============================================================================
// CampaignBlockedDate Models (Query/Insert)
// ============================================================================

/// CampaignBlockedDate query model for SELECT operations.
///
/// Exactly one of `blocked_date` / `blocked_weekday` is set, matching
/// `block_kind`; a CHECK constraint enforces this on the table.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = campaign_blocked_dates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CampaignBlockedDate {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub block_kind: BlockKind,
    pub blocked_date: Option<NaiveDate>,
    pub blocked_weekday: Option<i16>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// NewCampaignBlockedDate insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = campaign_blocked_dates)]
pub struct NewCampaignBlockedDate {
    pub campaign_id: Uuid,
    pub block_kind: BlockKind,
    pub blocked_date: Option<NaiveDate>,
    pub blocked_weekday: Option<i16>,
    pub reason: Option<String>,
}

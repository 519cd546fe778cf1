use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::campaign_targets;

/// CampaignTarget query model for SELECT operations.
///
/// Exactly one of `group_id` / `contact_id` is set; a CHECK constraint
/// enforces this on the table.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = campaign_targets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CampaignTarget {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub group_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// NewCampaignTarget insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = campaign_targets)]
pub struct NewCampaignTarget {
    pub campaign_id: Uuid,
    pub group_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
}

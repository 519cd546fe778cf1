use chrono::{DateTime, NaiveTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::campaign_schedules;

/// CampaignSchedule query model for SELECT operations.
///
/// `days_of_week` is a comma-separated list of weekday numbers in the
/// 0=Sunday .. 6=Saturday convention, e.g. `"1,3,5"`.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = campaign_schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CampaignSchedule {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub start_time: NaiveTime,
    pub days_of_week: String,
    pub is_active: bool,
    pub is_recurring: bool,
    pub last_executed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// NewCampaignSchedule insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = campaign_schedules)]
pub struct NewCampaignSchedule {
    pub campaign_id: Uuid,
    pub start_time: NaiveTime,
    pub days_of_week: String,
    pub is_active: bool,
    pub is_recurring: bool,
}

/// UpdateCampaignSchedule model for partial UPDATE operations
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = campaign_schedules)]
pub struct UpdateCampaignSchedule {
    pub start_time: Option<NaiveTime>,
    pub days_of_week: Option<String>,
    pub is_active: Option<bool>,
    pub is_recurring: Option<bool>,
}

impl UpdateCampaignSchedule {
    /// True when no column is changed. Diesel rejects empty changesets.
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.days_of_week.is_none()
            && self.is_active.is_none()
            && self.is_recurring.is_none()
    }
}

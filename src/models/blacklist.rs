use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::blacklist;

/// BlacklistEntry query model for SELECT operations.
///
/// Phones are stored normalized (digits only, country code included) so
/// membership checks are plain equality.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = blacklist)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlacklistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// NewBlacklistEntry insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = blacklist)]
pub struct NewBlacklistEntry {
    pub user_id: Uuid,
    pub phone: String,
    pub reason: Option<String>,
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::user_instances;

/// UserInstance query model for SELECT operations.
///
/// Deliberately not `Serialize`: instance and client tokens are gateway
/// credentials. API responses go through `api::dto::instance`, which redacts
/// them.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_instances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserInstance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub instance_id: String,
    pub instance_token: String,
    pub client_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// NewUserInstance insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = user_instances)]
pub struct NewUserInstance {
    pub user_id: Uuid,
    pub instance_id: String,
    pub instance_token: String,
    pub client_token: String,
}

/// UpdateUserInstance model for partial UPDATE operations
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = user_instances)]
pub struct UpdateUserInstance {
    pub instance_id: Option<String>,
    pub instance_token: Option<String>,
    pub client_token: Option<String>,
}

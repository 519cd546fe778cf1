use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::schema::campaign_executions;

// ============================================================================
// Enums
// ============================================================================

/// Execution status. A `Running` or `Completed` row claims the campaign's
/// local calendar date; `Failed` rows do not block a later retry that day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::ExecutionStatus")]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Running => write!(f, "running"),
            ExecutionStatus::Completed => write!(f, "completed"),
            ExecutionStatus::Failed => write!(f, "failed"),
        }
    }
}

// ============================================================================
// CampaignExecution Models (Query/Insert)
// ============================================================================

/// CampaignExecution query model for SELECT operations
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = campaign_executions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CampaignExecution {
    pub id: i64,
    pub campaign_id: Uuid,
    pub schedule_id: Option<Uuid>,
    pub status: ExecutionStatus,
    pub local_date: NaiveDate,
    pub result: Option<JsonValue>,
    pub error_message: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// NewCampaignExecution insert model for INSERT operations
#[derive(Debug, Insertable)]
#[diesel(table_name = campaign_executions)]
pub struct NewCampaignExecution {
    pub campaign_id: Uuid,
    pub schedule_id: Option<Uuid>,
    pub status: ExecutionStatus,
    pub local_date: NaiveDate,
}

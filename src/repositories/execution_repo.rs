//! Campaign execution repository for async database operations.
//!
//! Executions double as the once-per-day claim: a partial unique index on
//! `(campaign_id, local_date)` over non-failed rows makes the `running`
//! insert the atomic claim for the campaign's local calendar date.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{CampaignExecution, ExecutionStatus, NewCampaignExecution};
use crate::schema::campaign_executions;

#[derive(Clone)]
pub struct ExecutionRepository {
    pool: AsyncDbPool,
}

impl ExecutionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts the execution row that claims the campaign's local date.
    ///
    /// A concurrent tick that already claimed the date surfaces here as
    /// `AppError::Duplicate`; callers treat that as "skip", not failure
    /// (see `DatabaseErrorConverter::is_daily_claim_conflict`).
    pub async fn create(&self, execution: NewCampaignExecution) -> AppResult<CampaignExecution> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(campaign_executions::table)
            .values(&execution)
            .returning(CampaignExecution::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create campaign execution"))
    }

    pub async fn complete(
        &self,
        id: i64,
        status: ExecutionStatus,
        result: Option<JsonValue>,
        error_message: Option<String>,
    ) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::update(campaign_executions::table.find(id))
            .set((
                campaign_executions::completed_at.eq(diesel::dsl::now),
                campaign_executions::status.eq(status),
                campaign_executions::result.eq(result),
                campaign_executions::error_message.eq(error_message),
            ))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    /// Whether the campaign already has a completed execution for the given
    /// local calendar date. Failed executions do not count.
    pub async fn has_completed_on(
        &self,
        campaign_id: Uuid,
        local_date: NaiveDate,
    ) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let completed: i64 = campaign_executions::table
            .filter(campaign_executions::campaign_id.eq(campaign_id))
            .filter(campaign_executions::local_date.eq(local_date))
            .filter(campaign_executions::status.eq(ExecutionStatus::Completed))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(completed > 0)
    }

    pub async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<CampaignExecution>> {
        let mut conn = self.pool.get().await?;

        campaign_executions::table
            .filter(campaign_executions::campaign_id.eq(campaign_id))
            .order(campaign_executions::started_at.desc())
            .limit(limit)
            .offset(offset)
            .select(CampaignExecution::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

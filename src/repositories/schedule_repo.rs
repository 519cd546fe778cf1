//! Campaign schedule repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Campaign, CampaignSchedule, CampaignStatus, NewCampaignSchedule, UpdateCampaignSchedule,
};
use crate::schema::{campaign_schedules, campaigns};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: AsyncDbPool,
}

impl ScheduleRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, schedule: NewCampaignSchedule) -> AppResult<CampaignSchedule> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(campaign_schedules::table)
            .values(&schedule)
            .returning(CampaignSchedule::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CampaignSchedule> {
        let mut conn = self.pool.get().await?;

        campaign_schedules::table
            .find(id)
            .select(CampaignSchedule::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("campaign_schedule", id),
                _ => AppError::from(e),
            })
    }

    pub async fn list_by_campaign(&self, campaign_id: Uuid) -> AppResult<Vec<CampaignSchedule>> {
        let mut conn = self.pool.get().await?;

        campaign_schedules::table
            .filter(campaign_schedules::campaign_id.eq(campaign_id))
            .order(campaign_schedules::start_time.asc())
            .select(CampaignSchedule::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Loads every active recurring schedule together with its active
    /// campaign. This is the scheduler tick's single upstream query; ordering
    /// by start time keeps tick processing deterministic.
    pub async fn list_active_with_campaigns(
        &self,
    ) -> AppResult<Vec<(CampaignSchedule, Campaign)>> {
        let mut conn = self.pool.get().await?;

        campaign_schedules::table
            .inner_join(campaigns::table)
            .filter(campaign_schedules::is_active.eq(true))
            .filter(campaign_schedules::is_recurring.eq(true))
            .filter(campaigns::status.eq(CampaignStatus::Active))
            .order(campaign_schedules::start_time.asc())
            .select((CampaignSchedule::as_select(), Campaign::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateCampaignSchedule,
    ) -> AppResult<CampaignSchedule> {
        let mut conn = self.pool.get().await?;

        diesel::update(campaign_schedules::table.find(id))
            .set(&update)
            .returning(CampaignSchedule::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("campaign_schedule", id),
                _ => AppError::from(e),
            })
    }

    pub async fn touch_last_executed(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::update(campaign_schedules::table.find(id))
            .set(campaign_schedules::last_executed_at.eq(diesel::dsl::now))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(campaign_schedules::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        if deleted == 0 {
            Err(AppError::not_found("campaign_schedule", id))
        } else {
            Ok(())
        }
    }
}

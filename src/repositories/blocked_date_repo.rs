//! Blocked date repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CampaignBlockedDate, NewCampaignBlockedDate};
use crate::schema::campaign_blocked_dates;

#[derive(Clone)]
pub struct BlockedDateRepository {
    pool: AsyncDbPool,
}

impl BlockedDateRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        blocked_date: NewCampaignBlockedDate,
    ) -> AppResult<CampaignBlockedDate> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(campaign_blocked_dates::table)
            .values(&blocked_date)
            .returning(CampaignBlockedDate::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
    ) -> AppResult<Vec<CampaignBlockedDate>> {
        let mut conn = self.pool.get().await?;

        campaign_blocked_dates::table
            .filter(campaign_blocked_dates::campaign_id.eq(campaign_id))
            .order(campaign_blocked_dates::created_at.asc())
            .select(CampaignBlockedDate::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CampaignBlockedDate> {
        let mut conn = self.pool.get().await?;

        match campaign_blocked_dates::table
            .find(id)
            .select(CampaignBlockedDate::as_select())
            .first(&mut conn)
            .await
        {
            Ok(blocked_date) => Ok(blocked_date),
            Err(diesel::result::Error::NotFound) => {
                Err(AppError::not_found("campaign_blocked_date", id))
            }
            Err(e) => Err(AppError::from(e)),
        }
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(campaign_blocked_dates::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        if deleted == 0 {
            Err(AppError::not_found("campaign_blocked_date", id))
        } else {
            Ok(())
        }
    }
}

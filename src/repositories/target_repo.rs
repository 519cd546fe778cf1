//! Campaign target repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CampaignTarget, NewCampaignTarget};
use crate::schema::campaign_targets;

#[derive(Clone)]
pub struct TargetRepository {
    pool: AsyncDbPool,
}

impl TargetRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create_many(
        &self,
        targets: Vec<NewCampaignTarget>,
    ) -> AppResult<Vec<CampaignTarget>> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(campaign_targets::table)
            .values(&targets)
            .returning(CampaignTarget::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_by_campaign(&self, campaign_id: Uuid) -> AppResult<Vec<CampaignTarget>> {
        let mut conn = self.pool.get().await?;

        campaign_targets::table
            .filter(campaign_targets::campaign_id.eq(campaign_id))
            .order(campaign_targets::created_at.asc())
            .select(CampaignTarget::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Removes every target of a campaign. Used when the target set is
    /// replaced wholesale on campaign update.
    pub async fn delete_by_campaign(&self, campaign_id: Uuid) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            campaign_targets::table.filter(campaign_targets::campaign_id.eq(campaign_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }
}

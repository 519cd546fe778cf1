//! Campaign repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Campaign, CampaignStatus, NewCampaign, UpdateCampaign};
use crate::schema::campaigns;

/// Campaign repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: AsyncDbPool,
}

impl CampaignRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, campaign: NewCampaign) -> AppResult<Campaign> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(campaigns::table)
            .values(&campaign)
            .returning(Campaign::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Campaign> {
        let mut conn = self.pool.get().await?;

        campaigns::table
            .find(id)
            .select(Campaign::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("campaign", id),
                _ => AppError::from(e),
            })
    }

    /// Fetches a campaign only if it belongs to the given user.
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Campaign> {
        let mut conn = self.pool.get().await?;

        campaigns::table
            .find(id)
            .filter(campaigns::user_id.eq(user_id))
            .select(Campaign::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("campaign", id),
                _ => AppError::from(e),
            })
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Campaign>> {
        let mut conn = self.pool.get().await?;

        campaigns::table
            .filter(campaigns::user_id.eq(user_id))
            .order(campaigns::created_at.desc())
            .select(Campaign::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(&self, id: Uuid, update: UpdateCampaign) -> AppResult<Campaign> {
        let mut conn = self.pool.get().await?;

        diesel::update(campaigns::table.find(id))
            .set(&update)
            .returning(Campaign::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("campaign", id),
                _ => AppError::from(e),
            })
    }

    pub async fn set_status(&self, id: Uuid, status: CampaignStatus) -> AppResult<Campaign> {
        let mut conn = self.pool.get().await?;

        diesel::update(campaigns::table.find(id))
            .set(campaigns::status.eq(status))
            .returning(Campaign::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("campaign", id),
                _ => AppError::from(e),
            })
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(campaigns::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        if deleted == 0 {
            Err(AppError::not_found("campaign", id))
        } else {
            Ok(())
        }
    }
}

//! User instance repository for async database operations.
//!
//! Each user has at most one gateway instance (enforced by a unique
//! constraint on `user_id`), so writes are upserts.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUserInstance, UserInstance};
use crate::schema::user_instances;

#[derive(Clone)]
pub struct InstanceRepository {
    pool: AsyncDbPool,
}

impl InstanceRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, instance: NewUserInstance) -> AppResult<UserInstance> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(user_instances::table)
            .values(&instance)
            .on_conflict(user_instances::user_id)
            .do_update()
            .set((
                user_instances::instance_id.eq(&instance.instance_id),
                user_instances::instance_token.eq(&instance.instance_token),
                user_instances::client_token.eq(&instance.client_token),
            ))
            .returning(UserInstance::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<UserInstance>> {
        let mut conn = self.pool.get().await?;

        user_instances::table
            .filter(user_instances::user_id.eq(user_id))
            .select(UserInstance::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> AppResult<UserInstance> {
        self.find_by_user(user_id).await?.ok_or_else(|| AppError::NotFound {
            entity: "user_instance".to_string(),
            field: "user_id".to_string(),
            value: user_id.to_string(),
        })
    }

    /// Every stored credential set, for cross-user sweeps.
    pub async fn list_all(&self) -> AppResult<Vec<UserInstance>> {
        let mut conn = self.pool.get().await?;

        user_instances::table
            .order(user_instances::created_at.asc())
            .select(UserInstance::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

//! WhatsApp group repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewWhatsappGroup, UpdateWhatsappGroup, WhatsappGroup};
use crate::schema::whatsapp_groups;

#[derive(Clone)]
pub struct GroupRepository {
    pool: AsyncDbPool,
}

impl GroupRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a group or refreshes the mirrored fields when the user
    /// already tracks this WhatsApp id. Used by the monitor sweep.
    pub async fn upsert(&self, group: NewWhatsappGroup) -> AppResult<WhatsappGroup> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(whatsapp_groups::table)
            .values(&group)
            .on_conflict((whatsapp_groups::user_id, whatsapp_groups::whatsapp_id))
            .do_update()
            .set((
                whatsapp_groups::name.eq(&group.name),
                whatsapp_groups::participants.eq(&group.participants),
                whatsapp_groups::admins.eq(&group.admins),
                whatsapp_groups::is_active.eq(group.is_active),
            ))
            .returning(WhatsappGroup::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<WhatsappGroup> {
        let mut conn = self.pool.get().await?;

        whatsapp_groups::table
            .find(id)
            .select(WhatsappGroup::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("whatsapp_group", id),
                _ => AppError::from(e),
            })
    }

    /// Fetches a group only if it belongs to the given user.
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<WhatsappGroup> {
        let mut conn = self.pool.get().await?;

        whatsapp_groups::table
            .find(id)
            .filter(whatsapp_groups::user_id.eq(user_id))
            .select(WhatsappGroup::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("whatsapp_group", id),
                _ => AppError::from(e),
            })
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<WhatsappGroup>> {
        let mut conn = self.pool.get().await?;

        whatsapp_groups::table
            .filter(whatsapp_groups::user_id.eq(user_id))
            .order(whatsapp_groups::name.asc())
            .select(WhatsappGroup::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<WhatsappGroup>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        whatsapp_groups::table
            .filter(whatsapp_groups::id.eq_any(ids))
            .select(WhatsappGroup::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(&self, id: Uuid, update: UpdateWhatsappGroup) -> AppResult<WhatsappGroup> {
        let mut conn = self.pool.get().await?;

        diesel::update(whatsapp_groups::table.find(id))
            .set(&update)
            .returning(WhatsappGroup::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("whatsapp_group", id),
                _ => AppError::from(e),
            })
    }

    /// Marks mirrored groups the gateway no longer reports as inactive.
    /// `seen_whatsapp_ids` is the full id list of the latest sync pass.
    pub async fn deactivate_missing(
        &self,
        user_id: Uuid,
        seen_whatsapp_ids: &[String],
    ) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            whatsapp_groups::table
                .filter(whatsapp_groups::user_id.eq(user_id))
                .filter(whatsapp_groups::is_active.eq(true))
                .filter(whatsapp_groups::whatsapp_id.ne_all(seen_whatsapp_ids)),
        )
        .set(whatsapp_groups::is_active.eq(false))
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Rewrites the mirrored membership columns after a participant
    /// operation succeeds on the gateway.
    pub async fn set_membership(
        &self,
        id: Uuid,
        participants: JsonValue,
        admins: JsonValue,
    ) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::update(whatsapp_groups::table.find(id))
            .set((
                whatsapp_groups::participants.eq(participants),
                whatsapp_groups::admins.eq(admins),
            ))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}

//! Blacklist repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{BlacklistEntry, NewBlacklistEntry};
use crate::schema::blacklist;

#[derive(Clone)]
pub struct BlacklistRepository {
    pool: AsyncDbPool,
}

impl BlacklistRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a blacklist entry. A repeated phone for the same user hits
    /// the `(user_id, phone)` unique constraint and surfaces as
    /// `AppError::Duplicate`.
    pub async fn create(&self, entry: NewBlacklistEntry) -> AppResult<BlacklistEntry> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(blacklist::table)
            .values(&entry)
            .returning(BlacklistEntry::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create blacklist entry"))
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<BlacklistEntry>> {
        let mut conn = self.pool.get().await?;

        blacklist::table
            .filter(blacklist::user_id.eq(user_id))
            .order(blacklist::created_at.desc())
            .select(BlacklistEntry::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Normalized phone numbers blacklisted by the user, for recipient
    /// filtering before a send.
    pub async fn phones_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let mut conn = self.pool.get().await?;

        blacklist::table
            .filter(blacklist::user_id.eq(user_id))
            .select(blacklist::phone)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn is_blacklisted(&self, user_id: Uuid, phone: &str) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let found: i64 = blacklist::table
            .filter(blacklist::user_id.eq(user_id))
            .filter(blacklist::phone.eq(phone))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(found > 0)
    }

    /// Ownership is part of the filter, so another user's entry deletes
    /// zero rows and reads as not found.
    pub async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            blacklist::table
                .find(id)
                .filter(blacklist::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)?;

        if deleted == 0 {
            Err(AppError::not_found("blacklist_entry", id))
        } else {
            Ok(())
        }
    }
}

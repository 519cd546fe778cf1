//! Contact repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Contact, NewContact};
use crate::schema::contacts;

#[derive(Clone)]
pub struct ContactRepository {
    pool: AsyncDbPool,
}

impl ContactRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, contact: NewContact) -> AppResult<Contact> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(contacts::table)
            .values(&contact)
            .returning(Contact::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Contact>> {
        let mut conn = self.pool.get().await?;

        contacts::table
            .filter(contacts::user_id.eq(user_id))
            .order(contacts::name.asc())
            .select(Contact::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Contact>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        contacts::table
            .filter(contacts::id.eq_any(ids))
            .select(Contact::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Ownership is part of the filter, so another user's contact deletes
    /// zero rows and reads as not found.
    pub async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            contacts::table
                .find(id)
                .filter(contacts::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)?;

        if deleted == 0 {
            Err(AppError::not_found("contact", id))
        } else {
            Ok(())
        }
    }
}

//! Blocked-date API handlers.
//!
//! Blocks suppress eligible sends for a specific calendar date or a
//! recurring weekday without touching the campaign's schedules.

use crate::api::doc::SCHEDULE_TAG;
use crate::api::dto::{BlockedDateResponse, CreateBlockedDateRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates the campaign-scoped blocked-date routes.
///
/// Routes (merged under /api/campaigns):
/// - GET /:id/blocked-dates    - List campaign blocks
/// - POST /:id/blocked-dates   - Add a block to a campaign
pub fn campaign_blocked_date_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_blocked_dates))
        .routes(routes!(create_blocked_date))
}

/// Creates the standalone blocked-date routes.
///
/// Routes:
/// - DELETE /:id   - Delete block
pub fn blocked_date_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(delete_blocked_date))
}

/// GET /api/campaigns/:id/blocked-dates - List campaign blocks
#[utoipa::path(
    get,
    path = "/{id}/blocked-dates",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "List of blocked dates", body = Vec<BlockedDateResponse>),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn list_blocked_dates(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<BlockedDateResponse>>> {
    let blocks = state
        .services
        .campaigns
        .list_blocked_dates(auth_user.user_id, id)
        .await?;

    let responses: Vec<BlockedDateResponse> =
        blocks.into_iter().map(BlockedDateResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/campaigns/:id/blocked-dates - Add a block
#[utoipa::path(
    post,
    path = "/{id}/blocked-dates",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    request_body = CreateBlockedDateRequest,
    responses(
        (status = 201, description = "Block created", body = BlockedDateResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn create_blocked_date(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateBlockedDateRequest>,
) -> AppResult<(StatusCode, Json<BlockedDateResponse>)> {
    let new_block = payload.into_new_blocked_date(id);

    let block = state
        .services
        .campaigns
        .add_blocked_date(auth_user.user_id, new_block)
        .await?;
    Ok((StatusCode::CREATED, Json(BlockedDateResponse::from(block))))
}

/// DELETE /api/blocked-dates/:id - Delete block
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Blocked date ID")
    ),
    responses(
        (status = 204, description = "Block deleted"),
        (status = 404, description = "Block not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_blocked_date(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .campaigns
        .delete_blocked_date(auth_user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Schedule API handlers.
//!
//! Schedules are created and listed under their campaign, while updates
//! and deletions address the schedule row directly.

use crate::api::doc::SCHEDULE_TAG;
use crate::api::dto::{CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest};
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

/// Creates the campaign-scoped schedule routes.
///
/// Routes (merged under /api/campaigns):
/// - GET /:id/schedules    - List campaign schedules
/// - POST /:id/schedules   - Add a schedule to a campaign
pub fn campaign_schedule_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_schedules))
        .routes(routes!(create_schedule))
}

/// Creates the standalone schedule routes.
///
/// Routes:
/// - PUT /:id      - Update schedule
/// - DELETE /:id   - Delete schedule
pub fn schedule_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(update_schedule))
        .routes(routes!(delete_schedule))
}

/// GET /api/campaigns/:id/schedules - List campaign schedules
#[utoipa::path(
    get,
    path = "/{id}/schedules",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "List of schedules", body = Vec<ScheduleResponse>),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn list_schedules(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<ScheduleResponse>>> {
    let schedules = state
        .services
        .campaigns
        .list_schedules(auth_user.user_id, id)
        .await?;

    let responses: Vec<ScheduleResponse> =
        schedules.into_iter().map(ScheduleResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/campaigns/:id/schedules - Add a schedule
#[utoipa::path(
    post,
    path = "/{id}/schedules",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn create_schedule(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<ScheduleResponse>)> {
    let new_schedule = payload.into_new_schedule(id)?;

    let schedule = state
        .services
        .campaigns
        .add_schedule(auth_user.user_id, new_schedule)
        .await?;
    Ok((StatusCode::CREATED, Json(ScheduleResponse::from(schedule))))
}

/// PUT /api/schedules/:id - Update schedule
#[utoipa::path(
    put,
    path = "/{id}",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleResponse),
        (status = 404, description = "Schedule not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_schedule(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateScheduleRequest>,
) -> AppResult<Json<ScheduleResponse>> {
    let update = payload.into_update_schedule()?;

    let schedule = state
        .services
        .campaigns
        .update_schedule(auth_user.user_id, id, update)
        .await?;
    Ok(Json(ScheduleResponse::from(schedule)))
}

/// DELETE /api/schedules/:id - Delete schedule
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = SCHEDULE_TAG,
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_schedule(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .campaigns
        .delete_schedule(auth_user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

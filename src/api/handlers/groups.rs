//! WhatsApp group API handlers.
//!
//! Groups mirror gateway state. Membership operations call the gateway
//! first and persist the mirror only after it acknowledges, so a
//! gateway failure leaves the stored roster untouched.

use crate::api::doc::GROUP_TAG;
use crate::api::dto::{GroupResponse, ParticipantRequest, SweepResponse, UpdateGroupRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates group routes.
///
/// Routes:
/// - GET /                                     - List groups
/// - GET /:id                                  - Get group by ID
/// - PUT /:id                                  - Update group metadata
/// - POST /:id/participants                    - Add participant
/// - DELETE /:id/participants/:phone           - Remove participant
/// - POST /:id/participants/:phone/promote     - Promote to admin
/// - POST /:id/participants/:phone/demote      - Demote from admin
/// - POST /monitor                             - Run the monitoring sweep
pub fn group_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_groups))
        .routes(routes!(get_group))
        .routes(routes!(update_group))
        .routes(routes!(add_participant))
        .routes(routes!(remove_participant))
        .routes(routes!(promote_admin))
        .routes(routes!(demote_admin))
        .routes(routes!(run_monitor_sweep))
}

/// GET /api/groups - List groups
#[utoipa::path(
    get,
    path = "",
    tag = GROUP_TAG,
    responses(
        (status = 200, description = "List of groups", body = Vec<GroupResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_groups(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<GroupResponse>>> {
    let groups = state.services.groups.list_groups(auth_user.user_id).await?;

    let responses: Vec<GroupResponse> = groups.into_iter().map(GroupResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/groups/:id - Get group by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group found", body = GroupResponse),
        (status = 404, description = "Group not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_group(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GroupResponse>> {
    let group = state.services.groups.get_group(auth_user.user_id, id).await?;
    Ok(Json(GroupResponse::from(group)))
}

/// PUT /api/groups/:id - Update group metadata
///
/// Pushes the new name or description to the gateway and updates the
/// mirror on success.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "Group ID")
    ),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Group updated", body = GroupResponse),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Group not found"),
        (status = 502, description = "Gateway rejected the update")
    ),
    security(("bearerAuth" = []))
)]
async fn update_group(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateGroupRequest>,
) -> AppResult<Json<GroupResponse>> {
    let group = state
        .services
        .groups
        .update_group(auth_user.user_id, id, payload.name, payload.description)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// POST /api/groups/:id/participants - Add participant
#[utoipa::path(
    post,
    path = "/{id}/participants",
    tag = GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "Group ID")
    ),
    request_body = ParticipantRequest,
    responses(
        (status = 200, description = "Participant added", body = GroupResponse),
        (status = 404, description = "Group not found"),
        (status = 422, description = "Phone is blacklisted"),
        (status = 502, description = "Gateway rejected the change")
    ),
    security(("bearerAuth" = []))
)]
async fn add_participant(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ParticipantRequest>,
) -> AppResult<Json<GroupResponse>> {
    let group = state
        .services
        .groups
        .add_participant(auth_user.user_id, id, &payload.phone)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// DELETE /api/groups/:id/participants/:phone - Remove participant
///
/// Removing a participant also clears any admin grant they held.
#[utoipa::path(
    delete,
    path = "/{id}/participants/{phone}",
    tag = GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "Group ID"),
        ("phone" = String, Path, description = "Participant phone")
    ),
    responses(
        (status = 200, description = "Participant removed", body = GroupResponse),
        (status = 404, description = "Group or participant not found"),
        (status = 422, description = "Cannot remove the last admin"),
        (status = 502, description = "Gateway rejected the change")
    ),
    security(("bearerAuth" = []))
)]
async fn remove_participant(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id, phone)): Path<(Uuid, String)>,
) -> AppResult<Json<GroupResponse>> {
    let group = state
        .services
        .groups
        .remove_participant(auth_user.user_id, id, &phone)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// POST /api/groups/:id/participants/:phone/promote - Promote to admin
#[utoipa::path(
    post,
    path = "/{id}/participants/{phone}/promote",
    tag = GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "Group ID"),
        ("phone" = String, Path, description = "Participant phone")
    ),
    responses(
        (status = 200, description = "Participant promoted", body = GroupResponse),
        (status = 404, description = "Group or participant not found"),
        (status = 502, description = "Gateway rejected the change")
    ),
    security(("bearerAuth" = []))
)]
async fn promote_admin(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id, phone)): Path<(Uuid, String)>,
) -> AppResult<Json<GroupResponse>> {
    let group = state
        .services
        .groups
        .promote_admin(auth_user.user_id, id, &phone)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// POST /api/groups/:id/participants/:phone/demote - Demote from admin
#[utoipa::path(
    post,
    path = "/{id}/participants/{phone}/demote",
    tag = GROUP_TAG,
    params(
        ("id" = Uuid, Path, description = "Group ID"),
        ("phone" = String, Path, description = "Participant phone")
    ),
    responses(
        (status = 200, description = "Participant demoted", body = GroupResponse),
        (status = 404, description = "Group or admin not found"),
        (status = 422, description = "Cannot demote the last admin"),
        (status = 502, description = "Gateway rejected the change")
    ),
    security(("bearerAuth" = []))
)]
async fn demote_admin(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id, phone)): Path<(Uuid, String)>,
) -> AppResult<Json<GroupResponse>> {
    let group = state
        .services
        .groups
        .demote_admin(auth_user.user_id, id, &phone)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// POST /api/groups/monitor - Run the monitoring sweep
///
/// Refreshes every active group mirror from the gateway across all
/// users with stored credentials. Per-group failures are reported in
/// the result list without aborting the sweep.
#[utoipa::path(
    post,
    path = "/monitor",
    tag = GROUP_TAG,
    responses(
        (status = 200, description = "Sweep completed", body = SweepResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn run_monitor_sweep(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
) -> AppResult<Json<SweepResponse>> {
    let summary = state.services.monitor.run_sweep().await?;
    Ok(Json(SweepResponse::from(summary)))
}

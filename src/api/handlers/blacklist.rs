//! Blacklist API handlers.
//!
//! Blacklisted phones are skipped by the sender across every campaign
//! owned by the user.

use crate::api::doc::ACCOUNT_TAG;
use crate::api::dto::{BlacklistEntryResponse, CreateBlacklistEntryRequest};
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

/// Creates blacklist routes.
///
/// Routes:
/// - GET /         - List blacklist entries
/// - POST /        - Add a phone to the blacklist
/// - DELETE /:id   - Remove a blacklist entry
pub fn blacklist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_blacklist))
        .routes(routes!(create_blacklist_entry))
        .routes(routes!(delete_blacklist_entry))
}

/// GET /api/blacklist - List blacklist entries
#[utoipa::path(
    get,
    path = "",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "List of blacklist entries", body = Vec<BlacklistEntryResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_blacklist(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<BlacklistEntryResponse>>> {
    let entries = state.services.account.list_blacklist(auth_user.user_id).await?;

    let responses: Vec<BlacklistEntryResponse> = entries
        .into_iter()
        .map(BlacklistEntryResponse::from)
        .collect();
    Ok(Json(responses))
}

/// POST /api/blacklist - Add a phone to the blacklist
///
/// The phone is normalized to digits before storage, so formatted
/// variants of the same number share one entry.
#[utoipa::path(
    post,
    path = "",
    tag = ACCOUNT_TAG,
    request_body = CreateBlacklistEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = BlacklistEntryResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Phone already blacklisted")
    ),
    security(("bearerAuth" = []))
)]
async fn create_blacklist_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateBlacklistEntryRequest>,
) -> AppResult<(StatusCode, Json<BlacklistEntryResponse>)> {
    let entry = state
        .services
        .account
        .add_blacklist_entry(auth_user.user_id, &payload.phone, payload.reason)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(BlacklistEntryResponse::from(entry)),
    ))
}

/// DELETE /api/blacklist/:id - Remove a blacklist entry
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ACCOUNT_TAG,
    params(
        ("id" = Uuid, Path, description = "Blacklist entry ID")
    ),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_blacklist_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .account
        .remove_blacklist_entry(auth_user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

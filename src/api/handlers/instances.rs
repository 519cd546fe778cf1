//! Gateway credential API handlers.
//!
//! Each user stores one Z-API instance. Responses never echo the
//! stored tokens.

use crate::api::doc::ACCOUNT_TAG;
use crate::api::dto::{InstanceResponse, UpsertInstanceRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Extension, Json,
    extract::State,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates instance routes.
///
/// Routes:
/// - GET /     - Get the stored instance
/// - PUT /     - Create or replace the instance
pub fn instance_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_instance))
        .routes(routes!(upsert_instance))
}

/// GET /api/instances - Get the stored instance
#[utoipa::path(
    get,
    path = "",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Stored instance", body = InstanceResponse),
        (status = 404, description = "No instance configured")
    ),
    security(("bearerAuth" = []))
)]
async fn get_instance(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<InstanceResponse>> {
    let instance = state.services.account.get_instance(auth_user.user_id).await?;
    Ok(Json(InstanceResponse::from(instance)))
}

/// PUT /api/instances - Create or replace the instance
#[utoipa::path(
    put,
    path = "",
    tag = ACCOUNT_TAG,
    request_body = UpsertInstanceRequest,
    responses(
        (status = 200, description = "Instance stored", body = InstanceResponse),
        (status = 400, description = "Invalid request")
    ),
    security(("bearerAuth" = []))
)]
async fn upsert_instance(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpsertInstanceRequest>,
) -> AppResult<Json<InstanceResponse>> {
    let instance = state
        .services
        .account
        .upsert_instance(
            auth_user.user_id,
            payload.instance_id,
            payload.instance_token,
            payload.client_token,
        )
        .await?;
    Ok(Json(InstanceResponse::from(instance)))
}

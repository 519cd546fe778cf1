//! Campaign API handlers.
//!
//! CRUD plus the activate/pause lifecycle transitions and the read-only
//! target and execution listings.

use crate::api::doc::CAMPAIGN_TAG;
use crate::api::dto::{
    CampaignResponse, CreateCampaignRequest, ExecutionListQuery, ExecutionResponse, TargetResponse,
    UpdateCampaignRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates campaign routes.
///
/// Routes:
/// - GET /                 - List user's campaigns
/// - POST /                - Create campaign (with optional inline schedules)
/// - GET /:id              - Get campaign by ID
/// - PUT /:id              - Update campaign
/// - DELETE /:id           - Delete campaign
/// - POST /:id/activate    - Activate campaign
/// - POST /:id/pause       - Pause campaign
/// - GET /:id/targets      - List campaign targets
/// - GET /:id/executions   - List campaign executions
pub fn campaign_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_campaigns))
        .routes(routes!(create_campaign))
        .routes(routes!(get_campaign))
        .routes(routes!(update_campaign))
        .routes(routes!(delete_campaign))
        .routes(routes!(activate_campaign))
        .routes(routes!(pause_campaign))
        .routes(routes!(list_targets))
        .routes(routes!(list_executions))
}

/// GET /api/campaigns - List user's campaigns
#[utoipa::path(
    get,
    path = "",
    tag = CAMPAIGN_TAG,
    responses(
        (status = 200, description = "List of campaigns", body = Vec<CampaignResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_campaigns(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CampaignResponse>>> {
    let campaigns = state
        .services
        .campaigns
        .list_campaigns(auth_user.user_id)
        .await?;

    let responses: Vec<CampaignResponse> =
        campaigns.into_iter().map(CampaignResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/campaigns - Create campaign
///
/// Creates a campaign in `draft` status. Targets and inline schedules are
/// stored in the same call; activation is a separate transition.
#[utoipa::path(
    post,
    path = "",
    tag = CAMPAIGN_TAG,
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = CampaignResponse),
        (status = 400, description = "Invalid request")
    ),
    security(("bearerAuth" = []))
)]
async fn create_campaign(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateCampaignRequest>,
) -> AppResult<(StatusCode, Json<CampaignResponse>)> {
    let (new_campaign, target_refs, schedules) = payload.into_new_campaign(auth_user.user_id);

    let campaign = state
        .services
        .campaigns
        .create_campaign(new_campaign, target_refs)
        .await?;

    for schedule_request in schedules {
        let new_schedule = schedule_request.into_new_schedule(campaign.id)?;
        state
            .services
            .campaigns
            .add_schedule(auth_user.user_id, new_schedule)
            .await?;
    }

    Ok((StatusCode::CREATED, Json(CampaignResponse::from(campaign))))
}

/// GET /api/campaigns/:id - Get campaign by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign found", body = CampaignResponse),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_campaign(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CampaignResponse>> {
    let campaign = state
        .services
        .campaigns
        .get_campaign(auth_user.user_id, id)
        .await?;
    Ok(Json(CampaignResponse::from(campaign)))
}

/// PUT /api/campaigns/:id - Update campaign
///
/// Absent fields are left unchanged. When `group_ids` or `contact_ids`
/// is present the whole target set is replaced.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    request_body = UpdateCampaignRequest,
    responses(
        (status = 200, description = "Campaign updated", body = CampaignResponse),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn update_campaign(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCampaignRequest>,
) -> AppResult<Json<CampaignResponse>> {
    let (update, target_refs) = payload.into_update_campaign();

    let campaign = state
        .services
        .campaigns
        .update_campaign(auth_user.user_id, id, update, target_refs)
        .await?;
    Ok(Json(CampaignResponse::from(campaign)))
}

/// DELETE /api/campaigns/:id - Delete campaign
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_campaign(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .campaigns
        .delete_campaign(auth_user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/campaigns/:id/activate - Activate campaign
///
/// Requires at least one target; an empty campaign returns 422.
#[utoipa::path(
    post,
    path = "/{id}/activate",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign activated", body = CampaignResponse),
        (status = 404, description = "Campaign not found"),
        (status = 422, description = "Campaign has no targets")
    ),
    security(("bearerAuth" = []))
)]
async fn activate_campaign(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CampaignResponse>> {
    let campaign = state
        .services
        .campaigns
        .activate_campaign(auth_user.user_id, id)
        .await?;
    Ok(Json(CampaignResponse::from(campaign)))
}

/// POST /api/campaigns/:id/pause - Pause campaign
#[utoipa::path(
    post,
    path = "/{id}/pause",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign paused", body = CampaignResponse),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn pause_campaign(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CampaignResponse>> {
    let campaign = state
        .services
        .campaigns
        .pause_campaign(auth_user.user_id, id)
        .await?;
    Ok(Json(CampaignResponse::from(campaign)))
}

/// GET /api/campaigns/:id/targets - List campaign targets
#[utoipa::path(
    get,
    path = "/{id}/targets",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "List of targets", body = Vec<TargetResponse>),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn list_targets(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<TargetResponse>>> {
    let targets = state
        .services
        .campaigns
        .list_targets(auth_user.user_id, id)
        .await?;

    let responses: Vec<TargetResponse> = targets.into_iter().map(TargetResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/campaigns/:id/executions - List campaign executions
///
/// Returns the audit trail of scheduler-triggered runs, newest first.
#[utoipa::path(
    get,
    path = "/{id}/executions",
    tag = CAMPAIGN_TAG,
    params(
        ("id" = Uuid, Path, description = "Campaign ID"),
        ExecutionListQuery
    ),
    responses(
        (status = 200, description = "List of executions", body = Vec<ExecutionResponse>),
        (status = 404, description = "Campaign not found")
    ),
    security(("bearerAuth" = []))
)]
async fn list_executions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedQuery(query): ValidatedQuery<ExecutionListQuery>,
) -> AppResult<Json<Vec<ExecutionResponse>>> {
    let executions = state
        .services
        .campaigns
        .list_executions(auth_user.user_id, id, query.limit, query.offset)
        .await?;

    let responses: Vec<ExecutionResponse> =
        executions.into_iter().map(ExecutionResponse::from).collect();
    Ok(Json(responses))
}

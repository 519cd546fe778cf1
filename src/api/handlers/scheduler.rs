//! Scheduler trigger handler.
//!
//! The trigger endpoint is called by external cron infrastructure and
//! carries no bearer token, so it lives outside the auth layer. Its
//! error body is a fixed shape the cron caller matches on.

use crate::api::doc::SCHEDULER_TAG;
use crate::api::dto::TriggerResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates the scheduler trigger route.
///
/// Routes (merged under /api/campaigns):
/// - POST /scheduler   - Run one evaluation tick
pub fn scheduler_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(trigger_scheduler))
}

/// POST /api/campaigns/scheduler - Run one evaluation tick
///
/// Evaluates every active campaign against its schedules and runs the
/// due ones to completion before responding. Per-campaign failures are
/// reported inside `results`; only a tick that cannot run at all
/// produces the 500 body.
#[utoipa::path(
    post,
    path = "/scheduler",
    tag = SCHEDULER_TAG,
    responses(
        (status = 200, description = "Tick completed", body = TriggerResponse),
        (status = 500, description = "Tick could not run")
    )
)]
async fn trigger_scheduler(State(state): State<AppState>) -> Response {
    match state.evaluator.run_tick().await {
        Ok(summary) => Json(TriggerResponse::from(summary)).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Scheduler tick failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Erro interno do servidor"})),
            )
                .into_response()
        }
    }
}

//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, http::Method, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::config::Environment;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Every `/api` route except the scheduler trigger sits behind the
/// bearer-token auth layer. The trigger and the health probes are
/// reachable without credentials so cron infrastructure and load
/// balancers can call them. Swagger UI is served outside production
/// only.
///
/// Middleware is applied in reverse order of declaration (last added
/// runs first on the way in): request IDs are assigned before logging
/// opens its span, and the error handler shapes error bodies before
/// either sees the response.
pub fn create_router(state: AppState, environment: Environment) -> Router {
    let campaign_routes = handlers::campaigns::campaign_routes()
        .merge(handlers::schedules::campaign_schedule_routes())
        .merge(handlers::blocked_dates::campaign_blocked_date_routes());

    let protected = OpenApiRouter::new()
        .nest("/api/campaigns", campaign_routes)
        .nest("/api/schedules", handlers::schedules::schedule_routes())
        .nest(
            "/api/blocked-dates",
            handlers::blocked_dates::blocked_date_routes(),
        )
        .nest("/api/blacklist", handlers::blacklist::blacklist_routes())
        .nest("/api/contacts", handlers::contacts::contact_routes())
        .nest("/api/groups", handlers::groups::group_routes())
        .nest("/api/instances", handlers::instances::instance_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(protected)
        .nest("/api/campaigns", handlers::scheduler::scheduler_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let router = if environment == Environment::Production {
        router
    } else {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    };

    router
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer())
        .layer(CompressionLayer::new())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

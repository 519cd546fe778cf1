use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const CAMPAIGN_TAG: &str = "Campaigns";
pub const SCHEDULE_TAG: &str = "Schedules";
pub const GROUP_TAG: &str = "Groups";
pub const ACCOUNT_TAG: &str = "Account";
pub const SCHEDULER_TAG: &str = "Scheduler";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Disparo",
        description = "Campaign scheduling and WhatsApp group management API",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = CAMPAIGN_TAG, description = "Campaign management endpoints"),
        (name = SCHEDULE_TAG, description = "Schedule and blocked-date endpoints"),
        (name = GROUP_TAG, description = "WhatsApp group management endpoints"),
        (name = ACCOUNT_TAG, description = "Blacklist, contact and gateway credential endpoints"),
        (name = SCHEDULER_TAG, description = "Scheduler trigger endpoint"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}

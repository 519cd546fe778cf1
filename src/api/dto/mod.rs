//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `campaign` - Campaign CRUD plus target and execution read models
//! - `schedule` - Campaign schedule CRUD DTOs
//! - `blocked_date` - Campaign blocked date DTOs
//! - `group` - WhatsApp group and participant operation DTOs
//! - `blacklist` / `contact` - Per-user recipient book DTOs
//! - `instance` - Gateway credential DTOs (responses redact tokens)
//! - `scheduler` - Trigger and monitor sweep summaries
//! - `error` - Common error response DTOs
//! - `health` - Health check DTOs

mod blacklist;
mod blocked_date;
mod campaign;
mod contact;
mod error;
mod group;
mod health;
mod instance;
mod schedule;
mod scheduler;

pub use blacklist::{BlacklistEntryResponse, CreateBlacklistEntryRequest};
pub use blocked_date::{BlockedDateResponse, CreateBlockedDateRequest};
pub use campaign::{
    CampaignResponse, CreateCampaignRequest, ExecutionListQuery, ExecutionResponse, TargetResponse,
    UpdateCampaignRequest,
};
pub use contact::{ContactResponse, CreateContactRequest};
pub use error::ErrorResponse;
pub use group::{GroupResponse, ParticipantRequest, UpdateGroupRequest};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use instance::{InstanceResponse, UpsertInstanceRequest};
pub use schedule::{CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest};
pub use scheduler::{SweepResponse, SweepResultResponse, TickResultResponse, TriggerResponse};

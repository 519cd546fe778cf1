mod blacklist;
mod blocked_date;
mod campaign;
mod contact;
mod execution;
mod group;
mod instance;
mod schedule;
mod target;

pub use blacklist::{BlacklistEntry, NewBlacklistEntry};
pub use blocked_date::{BlockKind, CampaignBlockedDate, NewCampaignBlockedDate};
pub use campaign::{
    Campaign, CampaignStatus, MediaKind, NewCampaign, SendOrder, UpdateCampaign,
};
pub use contact::{Contact, NewContact};
pub use execution::{CampaignExecution, ExecutionStatus, NewCampaignExecution};
pub use group::{
    NewWhatsappGroup, UpdateWhatsappGroup, WhatsappGroup, phones_to_json,
};
pub use instance::{NewUserInstance, UpdateUserInstance, UserInstance};
pub use schedule::{CampaignSchedule, NewCampaignSchedule, UpdateCampaignSchedule};
pub use target::{CampaignTarget, NewCampaignTarget};

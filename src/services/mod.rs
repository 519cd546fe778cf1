//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the gateway client and handlers.

mod account;
mod campaign;
mod group;
mod monitor;

pub use account::AccountService;
pub use campaign::{CampaignService, TargetRefs};
pub use group::GroupService;
pub use monitor::{GroupSweepResult, MonitorService, SweepSummary};

use crate::external::zapi::ZapiClient;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub campaigns: CampaignService,
    pub groups: GroupService,
    pub monitor: MonitorService,
    pub account: AccountService,
}

impl Services {
    /// Creates a new Services instance from Repositories and the gateway
    /// client.
    pub fn new(repos: Repositories, gateway: ZapiClient) -> Self {
        Self {
            campaigns: CampaignService::new(
                repos.campaigns.clone(),
                repos.schedules.clone(),
                repos.blocked_dates.clone(),
                repos.targets.clone(),
                repos.executions.clone(),
                repos.groups.clone(),
                repos.contacts.clone(),
            ),
            groups: GroupService::new(
                repos.groups.clone(),
                repos.blacklist.clone(),
                repos.instances.clone(),
                gateway.clone(),
            ),
            monitor: MonitorService::new(
                repos.groups,
                repos.blacklist.clone(),
                repos.instances.clone(),
                gateway,
            ),
            account: AccountService::new(repos.blacklist, repos.contacts, repos.instances),
        }
    }
}

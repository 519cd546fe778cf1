//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities.

mod blacklist_repo;
mod blocked_date_repo;
mod campaign_repo;
mod contact_repo;
mod execution_repo;
mod group_repo;
mod instance_repo;
mod schedule_repo;
mod target_repo;

pub use blacklist_repo::BlacklistRepository;
pub use blocked_date_repo::BlockedDateRepository;
pub use campaign_repo::CampaignRepository;
pub use contact_repo::ContactRepository;
pub use execution_repo::ExecutionRepository;
pub use group_repo::GroupRepository;
pub use instance_repo::InstanceRepository;
pub use schedule_repo::ScheduleRepository;
pub use target_repo::TargetRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub campaigns: CampaignRepository,
    pub schedules: ScheduleRepository,
    pub executions: ExecutionRepository,
    pub blocked_dates: BlockedDateRepository,
    pub blacklist: BlacklistRepository,
    pub groups: GroupRepository,
    pub contacts: ContactRepository,
    pub instances: InstanceRepository,
    pub targets: TargetRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            campaigns: CampaignRepository::new(pool.clone()),
            schedules: ScheduleRepository::new(pool.clone()),
            executions: ExecutionRepository::new(pool.clone()),
            blocked_dates: BlockedDateRepository::new(pool.clone()),
            blacklist: BlacklistRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool.clone()),
            instances: InstanceRepository::new(pool.clone()),
            targets: TargetRepository::new(pool),
        }
    }
}

//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::{AuthConfig, GatewayConfig, SchedulerConfig};
use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::external::zapi::ZapiClient;
use crate::repositories::Repositories;
use crate::scheduler::ScheduleEvaluator;
use crate::sender::CampaignSender;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since the services and pool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// The campaign evaluation pipeline, shared with the internal ticker
    pub evaluator: Arc<ScheduleEvaluator>,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Token validation settings for the auth middleware
    pub auth: AuthConfig,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and config.
    ///
    /// Initializes the repositories, the gateway client, the services
    /// and the schedule evaluator from the provided pool. Fails only
    /// when the configured scheduler timezone does not parse.
    pub fn new(
        pool: AsyncDbPool,
        auth: AuthConfig,
        gateway: &GatewayConfig,
        scheduler: &SchedulerConfig,
    ) -> AppResult<Self> {
        let repos = Repositories::new(pool.clone());
        let gateway_client = ZapiClient::new(gateway);
        let services = Services::new(repos.clone(), gateway_client.clone());
        let sender = CampaignSender::new(repos.clone(), gateway_client);
        let evaluator = Arc::new(ScheduleEvaluator::new(repos, sender, scheduler)?);

        Ok(Self {
            services,
            evaluator,
            db_pool: pool,
            auth,
        })
    }
}

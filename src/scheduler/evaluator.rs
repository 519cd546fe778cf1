//! Scheduler tick orchestration.
//!
//! One tick walks every active recurring schedule of an active campaign
//! through the pipeline: eligibility, the execution claim, the send, and
//! the result write-back. Failures are isolated per schedule; only the
//! initial schedule fetch can fail the tick as a whole.

use std::sync::Arc;

use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Campaign, CampaignSchedule, ExecutionStatus, NewCampaignExecution};
use crate::repositories::Repositories;
use crate::scheduler::clock::{Clock, LocalParts, SystemClock, local_parts};
use crate::scheduler::eligibility::{self, Eligibility};
use crate::sender::CampaignSender;

/// Per-campaign entry in the tick summary.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignTickResult {
    pub campaign: String,
    pub success: bool,
    pub message: String,
}

/// Outcome of one scheduler tick. Schedules outside their time or day
/// window are left out; everything else that was considered shows up in
/// `results`, dispatched or not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickSummary {
    pub results: Vec<CampaignTickResult>,
}

impl TickSummary {
    pub fn dispatched(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

pub struct ScheduleEvaluator {
    repos: Repositories,
    sender: CampaignSender,
    clock: Arc<dyn Clock>,
    tz: Tz,
    tolerance_minutes: i64,
}

impl ScheduleEvaluator {
    pub fn new(
        repos: Repositories,
        sender: CampaignSender,
        config: &SchedulerConfig,
    ) -> AppResult<Self> {
        Self::with_clock(repos, sender, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        repos: Repositories,
        sender: CampaignSender,
        config: &SchedulerConfig,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let tz = config.tz()?;
        Ok(Self {
            repos,
            sender,
            clock,
            tz,
            tolerance_minutes: config.tolerance_minutes,
        })
    }

    /// Runs one tick of the scheduling pipeline.
    ///
    /// The only error that propagates is the upstream schedule fetch; every
    /// later failure is confined to its schedule's entry in the summary.
    pub async fn run_tick(&self) -> AppResult<TickSummary> {
        let candidates = self.repos.schedules.list_active_with_campaigns().await?;
        let at = local_parts(self.clock.now_utc(), self.tz);

        tracing::debug!(
            candidates = candidates.len(),
            date = %at.date,
            time = %at.time,
            weekday = at.weekday,
            "scheduler tick started"
        );

        let mut summary = TickSummary::default();
        for (schedule, campaign) in candidates {
            if !eligibility::is_time_match(&schedule, &at, self.tolerance_minutes)
                || !eligibility::is_day_match(&schedule, &at)
            {
                continue;
            }
            summary
                .results
                .push(self.process_candidate(&schedule, &campaign, &at).await);
        }

        tracing::info!(
            considered = summary.results.len(),
            dispatched = summary.dispatched(),
            "scheduler tick finished"
        );
        Ok(summary)
    }

    /// Pipeline for one schedule whose time and day window matched.
    /// Never returns an error: whatever happens lands in the result entry.
    async fn process_candidate(
        &self,
        schedule: &CampaignSchedule,
        campaign: &Campaign,
        at: &LocalParts,
    ) -> CampaignTickResult {
        let blocks = match self.repos.blocked_dates.list_by_campaign(campaign.id).await {
            Ok(blocks) => blocks,
            Err(e) => {
                tracing::error!(campaign = %campaign.name, error = %e, "failed to load blocked dates");
                return failure(campaign, format!("failed to load blocked dates: {e}"));
            }
        };

        let already_executed = match self
            .repos
            .executions
            .has_completed_on(campaign.id, at.date)
            .await
        {
            Ok(done) => done,
            Err(e) => {
                tracing::error!(campaign = %campaign.name, error = %e, "failed to check today's executions");
                return failure(campaign, format!("failed to check today's executions: {e}"));
            }
        };

        match eligibility::evaluate(schedule, &blocks, already_executed, at, self.tolerance_minutes)
        {
            Eligibility::Skip(reason) => {
                tracing::debug!(
                    campaign = %campaign.name,
                    schedule_id = %schedule.id,
                    reason = reason.message(),
                    "schedule skipped"
                );
                failure(campaign, reason.message().to_string())
            }
            Eligibility::Due => self.dispatch(schedule, campaign, at).await,
        }
    }

    /// Recorder, sender and writer for one eligible schedule.
    async fn dispatch(
        &self,
        schedule: &CampaignSchedule,
        campaign: &Campaign,
        at: &LocalParts,
    ) -> CampaignTickResult {
        let claim = NewCampaignExecution {
            campaign_id: campaign.id,
            schedule_id: Some(schedule.id),
            status: ExecutionStatus::Running,
            local_date: at.date,
        };

        let execution = match self.repos.executions.create(claim).await {
            Ok(execution) => execution,
            Err(e) if DatabaseErrorConverter::is_daily_claim_conflict(&e) => {
                // A concurrent tick won the insert race for this date.
                tracing::info!(campaign = %campaign.name, "daily execution already claimed");
                return failure(campaign, "daily execution already claimed".to_string());
            }
            Err(e) => {
                // No audit row, no dispatch.
                tracing::error!(campaign = %campaign.name, error = %e, "failed to record execution");
                return failure(campaign, format!("failed to record execution: {e}"));
            }
        };

        tracing::info!(
            campaign = %campaign.name,
            execution_id = execution.id,
            "dispatching campaign"
        );

        match self.sender.send_campaign(campaign).await {
            Ok(report) if report.all_failed() => {
                tracing::warn!(campaign = %campaign.name, "every recipient send failed");
                let payload = serde_json::to_value(&report).ok();
                self.finish(
                    execution.id,
                    schedule.id,
                    ExecutionStatus::Failed,
                    payload,
                    Some(report.summary()),
                )
                .await;
                failure(campaign, format!("send failed: {}", report.summary()))
            }
            Ok(report) => {
                let payload = serde_json::to_value(&report).ok();
                self.finish(
                    execution.id,
                    schedule.id,
                    ExecutionStatus::Completed,
                    payload,
                    None,
                )
                .await;
                CampaignTickResult {
                    campaign: campaign.name.clone(),
                    success: true,
                    message: report.summary(),
                }
            }
            Err(e) => {
                tracing::error!(campaign = %campaign.name, error = %e, "campaign send failed");
                self.finish(
                    execution.id,
                    schedule.id,
                    ExecutionStatus::Failed,
                    None,
                    Some(e.to_string()),
                )
                .await;
                failure(campaign, format!("send failed: {e}"))
            }
        }
    }

    /// Result writer: closes the execution row and stamps the schedule.
    /// Both writes are best-effort; a failure here cannot undo a send that
    /// already happened, so it is logged and the tick moves on.
    async fn finish(
        &self,
        execution_id: i64,
        schedule_id: Uuid,
        status: ExecutionStatus,
        result: Option<JsonValue>,
        error_message: Option<String>,
    ) {
        if let Err(e) = self
            .repos
            .executions
            .complete(execution_id, status, result, error_message)
            .await
        {
            tracing::error!(execution_id, error = %e, "failed to close execution record");
        }
        if let Err(e) = self.repos.schedules.touch_last_executed(schedule_id).await {
            tracing::error!(schedule_id = %schedule_id, error = %e, "failed to stamp schedule last execution");
        }
    }
}

fn failure(campaign: &Campaign, message: String) -> CampaignTickResult {
    CampaignTickResult {
        campaign: campaign.name.clone(),
        success: false,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatched_counts_only_successes() {
        let summary = TickSummary {
            results: vec![
                CampaignTickResult {
                    campaign: "A".to_string(),
                    success: true,
                    message: "sent 2 of 2 recipients (0 failed, 0 blacklisted)".to_string(),
                },
                CampaignTickResult {
                    campaign: "B".to_string(),
                    success: false,
                    message: "campaign already executed today".to_string(),
                },
            ],
        };
        assert_eq!(summary.dispatched(), 1);
    }

    #[test]
    fn results_serialize_with_the_trigger_contract_fields() {
        let result = CampaignTickResult {
            campaign: "Promo".to_string(),
            success: true,
            message: "sent 1 of 1 recipients (0 failed, 0 blacklisted)".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["campaign"], "Promo");
        assert_eq!(value["success"], true);
        assert!(value["message"].is_string());
    }
}

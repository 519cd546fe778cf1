//! Scheduler trigger and monitor sweep DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::scheduler::{CampaignTickResult, TickSummary};
use crate::services::{GroupSweepResult, SweepSummary};

/// Per-campaign outcome inside a trigger response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TickResultResponse {
    #[schema(example = "Friday promo")]
    pub campaign: String,
    pub success: bool,
    #[schema(example = "sent 12, failed 0, skipped 1 blacklisted")]
    pub message: String,
}

impl From<CampaignTickResult> for TickResultResponse {
    fn from(result: CampaignTickResult) -> Self {
        Self {
            campaign: result.campaign,
            success: result.success,
            message: result.message,
        }
    }
}

/// Response body for the scheduler trigger endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TriggerResponse {
    #[schema(example = "Verificação de agendamentos concluída")]
    pub message: String,
    pub results: Vec<TickResultResponse>,
}

impl From<TickSummary> for TriggerResponse {
    fn from(summary: TickSummary) -> Self {
        Self {
            message: "Verificação de agendamentos concluída".to_string(),
            results: summary.results.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-group outcome inside a monitor sweep response.
#[derive(Debug, Serialize, ToSchema)]
pub struct SweepResultResponse {
    #[schema(example = "Turma de sexta")]
    pub group: String,
    pub success: bool,
    #[schema(example = "removed 1 of 1 blacklisted participants")]
    pub message: String,
}

impl From<GroupSweepResult> for SweepResultResponse {
    fn from(result: GroupSweepResult) -> Self {
        Self {
            group: result.group,
            success: result.success,
            message: result.message,
        }
    }
}

/// Response body for the group monitor sweep endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct SweepResponse {
    #[schema(example = "Varredura de grupos concluída")]
    pub message: String,
    pub results: Vec<SweepResultResponse>,
}

impl From<SweepSummary> for SweepResponse {
    fn from(summary: SweepSummary) -> Self {
        Self {
            message: "Varredura de grupos concluída".to_string(),
            results: summary.results.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_response_keeps_result_order() {
        let summary = TickSummary {
            results: vec![
                CampaignTickResult {
                    campaign: "A".to_string(),
                    success: true,
                    message: "sent 3, failed 0".to_string(),
                },
                CampaignTickResult {
                    campaign: "B".to_string(),
                    success: false,
                    message: "send failed".to_string(),
                },
            ],
        };
        let response = TriggerResponse::from(summary);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].campaign, "A");
        assert!(!response.results[1].success);
    }
}

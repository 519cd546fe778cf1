//! Campaign send orchestration.
//!
//! `CampaignSender` resolves a campaign's recipients, walks them in a
//! sequential loop with pacing sleeps, and calls the gateway per message.
//! Per-recipient gateway failures are collected into the report; only
//! failures that prevent the send from starting at all (missing instance
//! credentials, no targets, resolution queries failing) surface as errors.

pub mod plan;

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::zapi::{GatewayError, GatewayResult, InstanceCredentials, ZapiClient};
use crate::models::{Campaign, SendOrder};
use crate::repositories::Repositories;

pub use plan::{Recipient, RecipientKind, SendPlan};

/// Outcome of one recipient's delivery attempt.
#[derive(Debug, Clone, Serialize)]
pub struct RecipientOutcome {
    pub recipient: String,
    pub phone: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GatewayError>,
}

/// Summary of one campaign send, stored as the execution's result payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendReport {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub blacklisted: usize,
    pub outcomes: Vec<RecipientOutcome>,
}

impl SendReport {
    pub fn summary(&self) -> String {
        format!(
            "sent {} of {} recipients ({} failed, {} blacklisted)",
            self.sent, self.total, self.failed, self.blacklisted
        )
    }

    /// Every attempted delivery failed. Partial delivery does not count:
    /// a single successful recipient keeps the execution completed.
    pub fn all_failed(&self) -> bool {
        self.sent == 0 && self.failed > 0
    }
}

#[derive(Clone)]
pub struct CampaignSender {
    repos: Repositories,
    gateway: ZapiClient,
}

impl CampaignSender {
    pub fn new(repos: Repositories, gateway: ZapiClient) -> Self {
        Self { repos, gateway }
    }

    /// Sends one campaign to its resolved recipients, sequentially.
    pub async fn send_campaign(&self, campaign: &Campaign) -> AppResult<SendReport> {
        let instance = self.repos.instances.get_by_user(campaign.user_id).await?;
        let creds = InstanceCredentials::from(&instance);

        let targets = self.repos.targets.list_by_campaign(campaign.id).await?;
        if targets.is_empty() {
            return Err(AppError::UnprocessableContent {
                message: format!("campaign '{}' has no targets", campaign.name),
            });
        }

        let group_ids: Vec<Uuid> = targets.iter().filter_map(|t| t.group_id).collect();
        let contact_ids: Vec<Uuid> = targets.iter().filter_map(|t| t.contact_id).collect();

        let groups = self.repos.groups.list_by_ids(&group_ids).await?;
        let contacts = self.repos.contacts.list_by_ids(&contact_ids).await?;
        let blacklist: HashSet<String> = self
            .repos
            .blacklist
            .phones_for_user(campaign.user_id)
            .await?
            .into_iter()
            .collect();

        let send_plan = plan::build_plan(&groups, &contacts, &blacklist);

        let mut report = SendReport {
            total: send_plan.resolved_total(),
            blacklisted: send_plan.blacklisted.len(),
            ..SendReport::default()
        };

        for excluded in &send_plan.blacklisted {
            tracing::debug!(
                campaign = %campaign.name,
                recipient = %excluded.name,
                "recipient excluded by blacklist"
            );
        }

        for (index, recipient) in send_plan.recipients.iter().enumerate() {
            let delay = plan::delay_before(
                recipient,
                index,
                campaign.global_interval_seconds,
                campaign.group_interval_seconds,
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.deliver(&creds, campaign, recipient).await {
                Ok(()) => {
                    report.sent += 1;
                    report.outcomes.push(RecipientOutcome {
                        recipient: recipient.name.clone(),
                        phone: recipient.phone.clone(),
                        success: true,
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        campaign = %campaign.name,
                        recipient = %recipient.name,
                        error = %e,
                        "message delivery failed"
                    );
                    report.failed += 1;
                    report.outcomes.push(RecipientOutcome {
                        recipient: recipient.name.clone(),
                        phone: recipient.phone.clone(),
                        success: false,
                        error: Some(e),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Delivers the text and media parts to one recipient in the campaign's
    /// configured order. Stops at the first failing part.
    async fn deliver(
        &self,
        creds: &InstanceCredentials,
        campaign: &Campaign,
        recipient: &Recipient,
    ) -> GatewayResult<()> {
        match campaign.send_order {
            SendOrder::TextFirst => {
                self.deliver_text(creds, campaign, recipient).await?;
                self.deliver_media(creds, campaign, recipient).await
            }
            SendOrder::MediaFirst => {
                self.deliver_media(creds, campaign, recipient).await?;
                self.deliver_text(creds, campaign, recipient).await
            }
        }
    }

    async fn deliver_text(
        &self,
        creds: &InstanceCredentials,
        campaign: &Campaign,
        recipient: &Recipient,
    ) -> GatewayResult<()> {
        let receipt = self
            .gateway
            .send_text(creds, &recipient.phone, &campaign.message_text)
            .await?;
        tracing::debug!(
            campaign = %campaign.name,
            recipient = %recipient.name,
            message_id = %receipt.message_id,
            "text message accepted"
        );
        Ok(())
    }

    async fn deliver_media(
        &self,
        creds: &InstanceCredentials,
        campaign: &Campaign,
        recipient: &Recipient,
    ) -> GatewayResult<()> {
        let (Some(media_url), Some(kind)) = (&campaign.media_url, campaign.media_kind) else {
            return Ok(());
        };
        let receipt = self
            .gateway
            .send_media(creds, &recipient.phone, media_url, kind)
            .await?;
        tracing::debug!(
            campaign = %campaign.name,
            recipient = %recipient.name,
            message_id = %receipt.message_id,
            "media message accepted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reports_every_counter() {
        let report = SendReport {
            total: 6,
            sent: 3,
            failed: 1,
            blacklisted: 2,
            outcomes: Vec::new(),
        };
        assert_eq!(
            report.summary(),
            "sent 3 of 6 recipients (1 failed, 2 blacklisted)"
        );
    }

    #[test]
    fn all_failed_requires_at_least_one_failure_and_zero_sends() {
        let mut report = SendReport {
            total: 2,
            sent: 0,
            failed: 2,
            blacklisted: 0,
            outcomes: Vec::new(),
        };
        assert!(report.all_failed());

        report.sent = 1;
        report.failed = 1;
        assert!(!report.all_failed());

        // Everything blacklisted: nothing attempted, nothing failed.
        report.sent = 0;
        report.failed = 0;
        report.blacklisted = 2;
        assert!(!report.all_failed());
    }

    #[test]
    fn failed_outcomes_serialize_the_tagged_error() {
        use crate::external::zapi::GatewayErrorKind;

        let outcome = RecipientOutcome {
            recipient: "Ana".to_string(),
            phone: "5511999990001".to_string(),
            success: false,
            error: Some(GatewayError {
                kind: GatewayErrorKind::Vendor,
                message: "send-text rejected: invalid phone".to_string(),
            }),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["error"]["kind"], "vendor");

        let ok = RecipientOutcome {
            recipient: "Bia".to_string(),
            phone: "5511999990002".to_string(),
            success: true,
            error: None,
        };
        let value = serde_json::to_value(&ok).unwrap();
        assert!(value.get("error").is_none());
    }
}

//! Campaign service for business logic operations.
//!
//! Coordinates campaigns with their schedules, blocked dates and targets.
//! Every operation takes the authenticated user's id and resolves rows
//! through ownership filters, so foreign rows surface as not found.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BlockKind, Campaign, CampaignBlockedDate, CampaignExecution, CampaignSchedule, CampaignStatus,
    CampaignTarget, NewCampaign, NewCampaignBlockedDate, NewCampaignSchedule, NewCampaignTarget,
    UpdateCampaign, UpdateCampaignSchedule,
};
use crate::repositories::{
    BlockedDateRepository, CampaignRepository, ContactRepository, ExecutionRepository,
    GroupRepository, ScheduleRepository, TargetRepository,
};

/// Replacement target set for a campaign, by referenced ids.
#[derive(Debug, Default, Clone)]
pub struct TargetRefs {
    pub group_ids: Vec<Uuid>,
    pub contact_ids: Vec<Uuid>,
}

impl TargetRefs {
    pub fn is_empty(&self) -> bool {
        self.group_ids.is_empty() && self.contact_ids.is_empty()
    }
}

#[derive(Clone)]
pub struct CampaignService {
    campaigns: CampaignRepository,
    schedules: ScheduleRepository,
    blocked_dates: BlockedDateRepository,
    targets: TargetRepository,
    executions: ExecutionRepository,
    groups: GroupRepository,
    contacts: ContactRepository,
}

impl CampaignService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        campaigns: CampaignRepository,
        schedules: ScheduleRepository,
        blocked_dates: BlockedDateRepository,
        targets: TargetRepository,
        executions: ExecutionRepository,
        groups: GroupRepository,
        contacts: ContactRepository,
    ) -> Self {
        Self {
            campaigns,
            schedules,
            blocked_dates,
            targets,
            executions,
            groups,
            contacts,
        }
    }

    /// Creates a campaign together with its initial target set.
    ///
    /// Target references are verified against the owner before anything is
    /// written. The campaign row and target rows are separate inserts; a
    /// target insert failure leaves a campaign without targets, which the
    /// activation guard keeps out of the dispatch path.
    pub async fn create_campaign(
        &self,
        new_campaign: NewCampaign,
        target_refs: TargetRefs,
    ) -> AppResult<Campaign> {
        let refs = self
            .verify_target_refs(new_campaign.user_id, target_refs)
            .await?;

        let campaign = self.campaigns.create(new_campaign).await?;
        if !refs.is_empty() {
            self.targets
                .create_many(build_targets(campaign.id, &refs))
                .await?;
        }
        Ok(campaign)
    }

    pub async fn get_campaign(&self, user_id: Uuid, id: Uuid) -> AppResult<Campaign> {
        self.campaigns.get_for_user(id, user_id).await
    }

    /// Lists the user's campaigns, newest first.
    pub async fn list_campaigns(&self, user_id: Uuid) -> AppResult<Vec<Campaign>> {
        self.campaigns.list_by_user(user_id).await
    }

    /// Updates campaign fields, optionally replacing the target set.
    pub async fn update_campaign(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: UpdateCampaign,
        target_refs: Option<TargetRefs>,
    ) -> AppResult<Campaign> {
        self.campaigns.get_for_user(id, user_id).await?;

        let refs = match target_refs {
            Some(refs) => Some(self.verify_target_refs(user_id, refs).await?),
            None => None,
        };

        let campaign = if update.is_empty() {
            self.campaigns.get_by_id(id).await?
        } else {
            self.campaigns.update(id, update).await?
        };

        if let Some(refs) = refs {
            self.targets.delete_by_campaign(id).await?;
            if !refs.is_empty() {
                self.targets.create_many(build_targets(id, &refs)).await?;
            }
        }
        Ok(campaign)
    }

    pub async fn delete_campaign(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        self.campaigns.get_for_user(id, user_id).await?;
        self.campaigns.delete(id).await
    }

    /// Activates a campaign. Requires at least one target, otherwise the
    /// scheduler would dispatch into an empty recipient set.
    pub async fn activate_campaign(&self, user_id: Uuid, id: Uuid) -> AppResult<Campaign> {
        let campaign = self.campaigns.get_for_user(id, user_id).await?;

        let targets = self.targets.list_by_campaign(campaign.id).await?;
        if targets.is_empty() {
            return Err(AppError::UnprocessableContent {
                message: format!("campaign '{}' has no targets to activate", campaign.name),
            });
        }

        self.campaigns
            .set_status(campaign.id, CampaignStatus::Active)
            .await
    }

    pub async fn pause_campaign(&self, user_id: Uuid, id: Uuid) -> AppResult<Campaign> {
        let campaign = self.campaigns.get_for_user(id, user_id).await?;
        self.campaigns
            .set_status(campaign.id, CampaignStatus::Paused)
            .await
    }

    pub async fn list_targets(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> AppResult<Vec<CampaignTarget>> {
        self.campaigns.get_for_user(campaign_id, user_id).await?;
        self.targets.list_by_campaign(campaign_id).await
    }

    // ------------------------------------------------------------------
    // Schedules
    // ------------------------------------------------------------------

    pub async fn add_schedule(
        &self,
        user_id: Uuid,
        new_schedule: NewCampaignSchedule,
    ) -> AppResult<CampaignSchedule> {
        self.campaigns
            .get_for_user(new_schedule.campaign_id, user_id)
            .await?;
        self.schedules.create(new_schedule).await
    }

    pub async fn list_schedules(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> AppResult<Vec<CampaignSchedule>> {
        self.campaigns.get_for_user(campaign_id, user_id).await?;
        self.schedules.list_by_campaign(campaign_id).await
    }

    pub async fn update_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        update: UpdateCampaignSchedule,
    ) -> AppResult<CampaignSchedule> {
        let schedule = self.schedules.get_by_id(schedule_id).await?;
        self.campaigns
            .get_for_user(schedule.campaign_id, user_id)
            .await?;
        if update.is_empty() {
            return Ok(schedule);
        }
        self.schedules.update(schedule_id, update).await
    }

    pub async fn delete_schedule(&self, user_id: Uuid, schedule_id: Uuid) -> AppResult<()> {
        let schedule = self.schedules.get_by_id(schedule_id).await?;
        self.campaigns
            .get_for_user(schedule.campaign_id, user_id)
            .await?;
        self.schedules.delete(schedule_id).await
    }

    // ------------------------------------------------------------------
    // Blocked dates
    // ------------------------------------------------------------------

    /// Adds a blocked date after checking kind consistency: a specific
    /// block carries a date and no weekday, a weekday block the reverse.
    /// The table's CHECK constraint backs the same rule.
    pub async fn add_blocked_date(
        &self,
        user_id: Uuid,
        new_blocked_date: NewCampaignBlockedDate,
    ) -> AppResult<CampaignBlockedDate> {
        self.campaigns
            .get_for_user(new_blocked_date.campaign_id, user_id)
            .await?;

        let consistent = match new_blocked_date.block_kind {
            BlockKind::Specific => {
                new_blocked_date.blocked_date.is_some() && new_blocked_date.blocked_weekday.is_none()
            }
            BlockKind::DayOfWeek => {
                new_blocked_date.blocked_date.is_none()
                    && matches!(new_blocked_date.blocked_weekday, Some(0..=6))
            }
        };
        if !consistent {
            return Err(AppError::Validation {
                field: "block_kind".to_string(),
                reason: "specific blocks need a date, weekday blocks a weekday between 0 and 6"
                    .to_string(),
            });
        }

        self.blocked_dates.create(new_blocked_date).await
    }

    pub async fn list_blocked_dates(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
    ) -> AppResult<Vec<CampaignBlockedDate>> {
        self.campaigns.get_for_user(campaign_id, user_id).await?;
        self.blocked_dates.list_by_campaign(campaign_id).await
    }

    pub async fn delete_blocked_date(&self, user_id: Uuid, blocked_date_id: Uuid) -> AppResult<()> {
        let blocked_date = self.blocked_dates.get_by_id(blocked_date_id).await?;
        self.campaigns
            .get_for_user(blocked_date.campaign_id, user_id)
            .await?;
        self.blocked_dates.delete(blocked_date_id).await
    }

    // ------------------------------------------------------------------
    // Executions
    // ------------------------------------------------------------------

    /// Execution history of a campaign, newest first.
    pub async fn list_executions(
        &self,
        user_id: Uuid,
        campaign_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<CampaignExecution>> {
        self.campaigns.get_for_user(campaign_id, user_id).await?;
        self.executions
            .list_by_campaign(campaign_id, limit, offset)
            .await
    }

    /// Dedupes the referenced ids and checks every one exists and belongs
    /// to the user.
    async fn verify_target_refs(&self, user_id: Uuid, refs: TargetRefs) -> AppResult<TargetRefs> {
        let group_ids: Vec<Uuid> = dedupe(refs.group_ids);
        let contact_ids: Vec<Uuid> = dedupe(refs.contact_ids);

        let groups = self.groups.list_by_ids(&group_ids).await?;
        if groups.len() != group_ids.len() || groups.iter().any(|g| g.user_id != user_id) {
            return Err(AppError::Validation {
                field: "group_ids".to_string(),
                reason: "unknown group id among campaign targets".to_string(),
            });
        }

        let contacts = self.contacts.list_by_ids(&contact_ids).await?;
        if contacts.len() != contact_ids.len() || contacts.iter().any(|c| c.user_id != user_id) {
            return Err(AppError::Validation {
                field: "contact_ids".to_string(),
                reason: "unknown contact id among campaign targets".to_string(),
            });
        }

        Ok(TargetRefs {
            group_ids,
            contact_ids,
        })
    }
}

fn dedupe(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn build_targets(campaign_id: Uuid, refs: &TargetRefs) -> Vec<NewCampaignTarget> {
    refs.group_ids
        .iter()
        .map(|&group_id| NewCampaignTarget {
            campaign_id,
            group_id: Some(group_id),
            contact_id: None,
        })
        .chain(refs.contact_ids.iter().map(|&contact_id| NewCampaignTarget {
            campaign_id,
            group_id: None,
            contact_id: Some(contact_id),
        }))
        .collect()
}

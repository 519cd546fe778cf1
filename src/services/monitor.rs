//! Group monitor sweep.
//!
//! Walks every user with stored gateway credentials, refreshes their group
//! mirrors from the gateway and removes participants whose phone is on the
//! owner's blacklist. Failures stay confined: a group's entry reports its
//! own outcome and the sweep moves on.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::external::zapi::{GroupMetadata, InstanceCredentials, ZapiClient};
use crate::models::{NewWhatsappGroup, phones_to_json};
use crate::repositories::{BlacklistRepository, GroupRepository, InstanceRepository};
use crate::services::group::is_last_admin;

/// Per-group entry in the sweep summary.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSweepResult {
    pub group: String,
    pub success: bool,
    pub message: String,
}

/// Outcome of one monitor sweep across all users with credentials.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepSummary {
    pub results: Vec<GroupSweepResult>,
}

#[derive(Clone)]
pub struct MonitorService {
    groups: GroupRepository,
    blacklist: BlacklistRepository,
    instances: InstanceRepository,
    gateway: ZapiClient,
}

impl MonitorService {
    pub fn new(
        groups: GroupRepository,
        blacklist: BlacklistRepository,
        instances: InstanceRepository,
        gateway: ZapiClient,
    ) -> Self {
        Self {
            groups,
            blacklist,
            instances,
            gateway,
        }
    }

    /// Runs one sweep. Only the credential listing can fail the sweep as
    /// a whole; everything past it is reported per group.
    pub async fn run_sweep(&self) -> AppResult<SweepSummary> {
        let instances = self.instances.list_all().await?;

        tracing::debug!(users = instances.len(), "group monitor sweep started");

        let mut summary = SweepSummary::default();
        for instance in instances {
            let user_id = instance.user_id;
            let creds = InstanceCredentials::from(&instance);

            let blacklisted: HashSet<String> =
                match self.blacklist.phones_for_user(user_id).await {
                    Ok(phones) => phones.into_iter().collect(),
                    Err(e) => {
                        tracing::error!(user_id = %user_id, error = %e, "failed to load blacklist, skipping user");
                        continue;
                    }
                };

            let gateway_groups = match self.gateway.list_groups(&creds).await {
                Ok(groups) => groups,
                Err(e) => {
                    tracing::error!(user_id = %user_id, error = %e, "failed to list groups, skipping user");
                    continue;
                }
            };

            let mut seen_ids = Vec::with_capacity(gateway_groups.len());
            for group in &gateway_groups {
                seen_ids.push(group.phone.clone());
                let name = if group.name.is_empty() {
                    group.phone.clone()
                } else {
                    group.name.clone()
                };
                summary
                    .results
                    .push(self.sweep_group(user_id, &creds, &group.phone, name, &blacklisted).await);
            }

            if let Err(e) = self.groups.deactivate_missing(user_id, &seen_ids).await {
                tracing::error!(user_id = %user_id, error = %e, "failed to deactivate vanished groups");
            }
        }

        tracing::info!(
            groups = summary.results.len(),
            "group monitor sweep finished"
        );
        Ok(summary)
    }

    /// Refreshes one group's mirror and removes its blacklisted members.
    async fn sweep_group(
        &self,
        user_id: Uuid,
        creds: &InstanceCredentials,
        whatsapp_id: &str,
        name: String,
        blacklisted: &HashSet<String>,
    ) -> GroupSweepResult {
        let metadata = match self.gateway.group_metadata(creds, whatsapp_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(group = %name, error = %e, "failed to fetch group metadata");
                return failure(name, format!("failed to fetch group metadata: {e}"));
            }
        };

        let (participants, admins) = split_membership(&metadata);

        if let Err(e) = self
            .groups
            .upsert(NewWhatsappGroup {
                user_id,
                name: name.clone(),
                whatsapp_id: whatsapp_id.to_string(),
                participants: phones_to_json(&participants),
                admins: phones_to_json(&admins),
                is_active: true,
            })
            .await
        {
            tracing::error!(group = %name, error = %e, "failed to store group mirror");
            return failure(name, format!("failed to store group mirror: {e}"));
        }

        let flagged: Vec<&String> = participants
            .iter()
            .filter(|p| blacklisted.contains(*p))
            .collect();
        if flagged.is_empty() {
            return GroupSweepResult {
                group: name,
                success: true,
                message: format!("{} participants, none blacklisted", participants.len()),
            };
        }

        let mut removed: Vec<String> = Vec::new();
        for phone in &flagged {
            if is_last_admin(&admins, phone) {
                tracing::warn!(group = %name, phone = %phone, "blacklisted phone is the last admin, not removing");
                continue;
            }
            match self.gateway.remove_participant(creds, whatsapp_id, phone).await {
                Ok(()) => removed.push((*phone).clone()),
                Err(e) => {
                    tracing::warn!(group = %name, phone = %phone, error = %e, "failed to remove blacklisted participant");
                }
            }
        }

        if !removed.is_empty() {
            let kept: Vec<String> = participants
                .iter()
                .filter(|p| !removed.contains(p))
                .cloned()
                .collect();
            let kept_admins: Vec<String> = admins
                .iter()
                .filter(|p| !removed.contains(p))
                .cloned()
                .collect();
            if let Err(e) = self
                .groups
                .upsert(NewWhatsappGroup {
                    user_id,
                    name: name.clone(),
                    whatsapp_id: whatsapp_id.to_string(),
                    participants: phones_to_json(&kept),
                    admins: phones_to_json(&kept_admins),
                    is_active: true,
                })
                .await
            {
                tracing::error!(group = %name, error = %e, "failed to update mirror after removals");
            }
        }

        GroupSweepResult {
            group: name,
            success: removed.len() == flagged.len(),
            message: format!(
                "removed {} of {} blacklisted participants",
                removed.len(),
                flagged.len()
            ),
        }
    }
}

fn split_membership(metadata: &GroupMetadata) -> (Vec<String>, Vec<String>) {
    let participants: Vec<String> = metadata
        .participants
        .iter()
        .map(|p| p.phone.clone())
        .collect();
    let admins: Vec<String> = metadata
        .participants
        .iter()
        .filter(|p| p.has_admin_role())
        .map(|p| p.phone.clone())
        .collect();
    (participants, admins)
}

fn failure(group: String, message: String) -> GroupSweepResult {
    GroupSweepResult {
        group,
        success: false,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::zapi::ParticipantInfo;

    #[test]
    fn split_membership_separates_admins() {
        let metadata = GroupMetadata {
            phone: "120363025463428000@g.us".to_string(),
            name: "Turma".to_string(),
            participants: vec![
                ParticipantInfo {
                    phone: "5511999990001".to_string(),
                    is_admin: true,
                    is_super_admin: false,
                },
                ParticipantInfo {
                    phone: "5511999990002".to_string(),
                    is_admin: false,
                    is_super_admin: false,
                },
                ParticipantInfo {
                    phone: "5511999990003".to_string(),
                    is_admin: false,
                    is_super_admin: true,
                },
            ],
        };

        let (participants, admins) = split_membership(&metadata);
        assert_eq!(participants.len(), 3);
        assert_eq!(admins, vec!["5511999990001", "5511999990003"]);
    }
}

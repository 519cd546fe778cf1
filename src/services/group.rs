//! Group service for participant management.
//!
//! Participant operations always run against the gateway first and only
//! then patch the mirrored membership columns, so the mirror never claims
//! a change the vendor refused. Group business rules live here: a
//! blacklisted phone cannot be added, and the last admin can neither be
//! removed nor demoted.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::zapi::{InstanceCredentials, ZapiClient};
use crate::models::{UpdateWhatsappGroup, WhatsappGroup, phones_to_json};
use crate::repositories::{BlacklistRepository, GroupRepository, InstanceRepository};
use crate::utils::phone::normalize_phone;

/// True when `phone` is the only admin left. Removal or demotion would
/// orphan the group.
pub(crate) fn is_last_admin(admins: &[String], phone: &str) -> bool {
    admins.len() == 1 && admins[0] == phone
}

#[derive(Clone)]
pub struct GroupService {
    groups: GroupRepository,
    blacklist: BlacklistRepository,
    instances: InstanceRepository,
    gateway: ZapiClient,
}

impl GroupService {
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

    pub async fn list_groups(&self, user_id: Uuid) -> AppResult<Vec<WhatsappGroup>> {
        self.groups.list_by_user(user_id).await
    }

    pub async fn get_group(&self, user_id: Uuid, id: Uuid) -> AppResult<WhatsappGroup> {
        self.groups.get_for_user(id, user_id).await
    }

    /// Adds a participant. Idempotent: a phone that is already a member
    /// returns the group unchanged without touching the gateway.
    pub async fn add_participant(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        raw_phone: &str,
    ) -> AppResult<WhatsappGroup> {
        let phone = normalize_phone(raw_phone);
        let group = self.groups.get_for_user(group_id, user_id).await?;

        if self.blacklist.is_blacklisted(user_id, &phone).await? {
            return Err(AppError::UnprocessableContent {
                message: format!(
                    "phone {} is blacklisted and cannot join group '{}'",
                    phone, group.name
                ),
            });
        }

        let mut participants = group.participant_phones();
        if participants.iter().any(|p| p == &phone) {
            return Ok(group);
        }

        let creds = self.credentials_for(user_id).await?;
        self.gateway
            .add_participant(&creds, &group.whatsapp_id, &phone)
            .await
            .map_err(|e| e.into_app_error("add participant"))?;

        participants.push(phone);
        self.groups
            .set_membership(group.id, phones_to_json(&participants), group.admins.clone())
            .await?;
        self.groups.get_by_id(group.id).await
    }

    pub async fn remove_participant(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        raw_phone: &str,
    ) -> AppResult<WhatsappGroup> {
        let phone = normalize_phone(raw_phone);
        let group = self.groups.get_for_user(group_id, user_id).await?;

        let participants = group.participant_phones();
        if !participants.iter().any(|p| p == &phone) {
            return Err(AppError::NotFound {
                entity: "group_participant".to_string(),
                field: "phone".to_string(),
                value: phone,
            });
        }

        let admins = group.admin_phones();
        if is_last_admin(&admins, &phone) {
            return Err(AppError::UnprocessableContent {
                message: format!("cannot remove the last admin of group '{}'", group.name),
            });
        }

        let creds = self.credentials_for(user_id).await?;
        self.gateway
            .remove_participant(&creds, &group.whatsapp_id, &phone)
            .await
            .map_err(|e| e.into_app_error("remove participant"))?;

        let participants: Vec<String> = participants.into_iter().filter(|p| p != &phone).collect();
        let admins: Vec<String> = admins.into_iter().filter(|p| p != &phone).collect();
        self.groups
            .set_membership(group.id, phones_to_json(&participants), phones_to_json(&admins))
            .await?;
        self.groups.get_by_id(group.id).await
    }

    /// Promotes a participant to admin. Idempotent for existing admins.
    pub async fn promote_admin(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        raw_phone: &str,
    ) -> AppResult<WhatsappGroup> {
        let phone = normalize_phone(raw_phone);
        let group = self.groups.get_for_user(group_id, user_id).await?;

        if !group.participant_phones().iter().any(|p| p == &phone) {
            return Err(AppError::NotFound {
                entity: "group_participant".to_string(),
                field: "phone".to_string(),
                value: phone,
            });
        }

        let mut admins = group.admin_phones();
        if admins.iter().any(|p| p == &phone) {
            return Ok(group);
        }

        let creds = self.credentials_for(user_id).await?;
        self.gateway
            .promote_admin(&creds, &group.whatsapp_id, &phone)
            .await
            .map_err(|e| e.into_app_error("promote admin"))?;

        admins.push(phone);
        self.groups
            .set_membership(group.id, group.participants.clone(), phones_to_json(&admins))
            .await?;
        self.groups.get_by_id(group.id).await
    }

    pub async fn demote_admin(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        raw_phone: &str,
    ) -> AppResult<WhatsappGroup> {
        let phone = normalize_phone(raw_phone);
        let group = self.groups.get_for_user(group_id, user_id).await?;

        let admins = group.admin_phones();
        if !admins.iter().any(|p| p == &phone) {
            return Err(AppError::NotFound {
                entity: "group_admin".to_string(),
                field: "phone".to_string(),
                value: phone,
            });
        }
        if is_last_admin(&admins, &phone) {
            return Err(AppError::UnprocessableContent {
                message: format!("cannot demote the last admin of group '{}'", group.name),
            });
        }

        let creds = self.credentials_for(user_id).await?;
        self.gateway
            .demote_admin(&creds, &group.whatsapp_id, &phone)
            .await
            .map_err(|e| e.into_app_error("demote admin"))?;

        let admins: Vec<String> = admins.into_iter().filter(|p| p != &phone).collect();
        self.groups
            .set_membership(group.id, group.participants.clone(), phones_to_json(&admins))
            .await?;
        self.groups.get_by_id(group.id).await
    }

    /// Renames a group and/or rewrites its description on the gateway.
    /// Only the name is mirrored locally; descriptions are not stored.
    pub async fn update_group(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<WhatsappGroup> {
        if name.is_none() && description.is_none() {
            return Err(AppError::BadRequest {
                message: "provide a name or a description to update".to_string(),
            });
        }

        let group = self.groups.get_for_user(group_id, user_id).await?;
        let creds = self.credentials_for(user_id).await?;

        if let Some(name) = &name {
            self.gateway
                .update_group_name(&creds, &group.whatsapp_id, name)
                .await
                .map_err(|e| e.into_app_error("update group name"))?;
            self.groups
                .update(
                    group.id,
                    UpdateWhatsappGroup {
                        name: Some(name.clone()),
                        ..Default::default()
                    },
                )
                .await?;
        }

        if let Some(description) = &description {
            self.gateway
                .update_group_description(&creds, &group.whatsapp_id, description)
                .await
                .map_err(|e| e.into_app_error("update group description"))?;
        }

        self.groups.get_by_id(group.id).await
    }

    async fn credentials_for(&self, user_id: Uuid) -> AppResult<InstanceCredentials> {
        let instance = self.instances.get_by_user(user_id).await?;
        Ok(InstanceCredentials::from(&instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_admin_detection() {
        let sole = vec!["5511999990001".to_string()];
        assert!(is_last_admin(&sole, "5511999990001"));
        assert!(!is_last_admin(&sole, "5511999990002"));

        let two = vec!["5511999990001".to_string(), "5511999990002".to_string()];
        assert!(!is_last_admin(&two, "5511999990001"));
        assert!(!is_last_admin(&[], "5511999990001"));
    }
}

//! Account-scoped resources: blacklist, contacts and gateway credentials.
//!
//! Phones are normalized on the way in, so blacklist matching at send time
//! is a plain string comparison.

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    BlacklistEntry, Contact, NewBlacklistEntry, NewContact, NewUserInstance, UserInstance,
};
use crate::repositories::{BlacklistRepository, ContactRepository, InstanceRepository};
use crate::utils::phone::normalize_phone;

#[derive(Clone)]
pub struct AccountService {
    blacklist: BlacklistRepository,
    contacts: ContactRepository,
    instances: InstanceRepository,
}

impl AccountService {
    pub fn new(
        blacklist: BlacklistRepository,
        contacts: ContactRepository,
        instances: InstanceRepository,
    ) -> Self {
        Self {
            blacklist,
            contacts,
            instances,
        }
    }

    /// Adds a phone to the user's blacklist. A phone already listed hits
    /// the `(user_id, phone)` unique constraint and surfaces as a
    /// duplicate.
    pub async fn add_blacklist_entry(
        &self,
        user_id: Uuid,
        raw_phone: &str,
        reason: Option<String>,
    ) -> AppResult<BlacklistEntry> {
        self.blacklist
            .create(NewBlacklistEntry {
                user_id,
                phone: normalize_phone(raw_phone),
                reason,
            })
            .await
    }

    pub async fn list_blacklist(&self, user_id: Uuid) -> AppResult<Vec<BlacklistEntry>> {
        self.blacklist.list_by_user(user_id).await
    }

    pub async fn remove_blacklist_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        self.blacklist.delete_for_user(id, user_id).await
    }

    pub async fn create_contact(
        &self,
        user_id: Uuid,
        name: String,
        raw_phone: &str,
    ) -> AppResult<Contact> {
        self.contacts
            .create(NewContact {
                user_id,
                name,
                phone: normalize_phone(raw_phone),
            })
            .await
    }

    pub async fn list_contacts(&self, user_id: Uuid) -> AppResult<Vec<Contact>> {
        self.contacts.list_by_user(user_id).await
    }

    pub async fn delete_contact(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        self.contacts.delete_for_user(id, user_id).await
    }

    /// Stores or replaces the user's gateway credentials.
    pub async fn upsert_instance(
        &self,
        user_id: Uuid,
        instance_id: String,
        instance_token: String,
        client_token: String,
    ) -> AppResult<UserInstance> {
        self.instances
            .upsert(NewUserInstance {
                user_id,
                instance_id,
                instance_token,
                client_token,
            })
            .await
    }

    pub async fn get_instance(&self, user_id: Uuid) -> AppResult<UserInstance> {
        self.instances.get_by_user(user_id).await
    }
}

//! Pure send planning: recipient resolution, blacklist partition, pacing.
//!
//! The sender gathers rows from the database and the plan built here decides
//! who actually receives the message and how long to wait between sends.
//! Keeping this free of IO is what makes the send policy testable.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;

use crate::models::{Contact, WhatsappGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    Group,
    Contact,
}

/// One resolved destination for a campaign message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Gateway address: the group's WhatsApp id or the contact's phone.
    pub phone: String,
    pub name: String,
    pub kind: RecipientKind,
}

/// The ordered send list plus everyone excluded by the blacklist.
#[derive(Debug, Clone, Default)]
pub struct SendPlan {
    pub recipients: Vec<Recipient>,
    pub blacklisted: Vec<Recipient>,
}

impl SendPlan {
    pub fn resolved_total(&self) -> usize {
        self.recipients.len() + self.blacklisted.len()
    }
}

/// Builds the send plan: groups first, then contacts, each in the order
/// given. Inactive groups are dropped entirely; recipients whose gateway
/// address appears in the blacklist are moved to `blacklisted`.
pub fn build_plan(
    groups: &[WhatsappGroup],
    contacts: &[Contact],
    blacklist: &HashSet<String>,
) -> SendPlan {
    let mut plan = SendPlan::default();

    let resolved = groups
        .iter()
        .filter(|group| group.is_active)
        .map(|group| Recipient {
            phone: group.whatsapp_id.clone(),
            name: group.name.clone(),
            kind: RecipientKind::Group,
        })
        .chain(contacts.iter().map(|contact| Recipient {
            phone: contact.phone.clone(),
            name: contact.name.clone(),
            kind: RecipientKind::Contact,
        }));

    for recipient in resolved {
        if blacklist.contains(&recipient.phone) {
            plan.blacklisted.push(recipient);
        } else {
            plan.recipients.push(recipient);
        }
    }

    plan
}

/// Pause before sending to the recipient at `index` in the plan.
///
/// The first send goes out immediately. Later sends wait the campaign's
/// global interval, or the per-group interval when the recipient is a
/// group and one is configured.
pub fn delay_before(
    recipient: &Recipient,
    index: usize,
    global_interval_seconds: i32,
    group_interval_seconds: Option<i32>,
) -> Duration {
    if index == 0 {
        return Duration::ZERO;
    }
    let seconds = match (recipient.kind, group_interval_seconds) {
        (RecipientKind::Group, Some(group_interval)) => group_interval,
        _ => global_interval_seconds,
    };
    Duration::from_secs(seconds.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn group(name: &str, whatsapp_id: &str, is_active: bool) -> WhatsappGroup {
        WhatsappGroup {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            whatsapp_id: whatsapp_id.to_string(),
            participants: json!([]),
            admins: json!([]),
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn contact(name: &str, phone: &str) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            phone: phone.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn groups_come_before_contacts_in_plan_order() {
        let groups = vec![group("Turma A", "111@g.us", true)];
        let contacts = vec![contact("Ana", "5511999990001")];
        let plan = build_plan(&groups, &contacts, &HashSet::new());

        let kinds: Vec<RecipientKind> = plan.recipients.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecipientKind::Group, RecipientKind::Contact]);
    }

    #[test]
    fn blacklisted_phones_are_partitioned_out() {
        let contacts = vec![
            contact("Ana", "5511999990001"),
            contact("Bia", "5511999990002"),
            contact("Caio", "5511999990003"),
        ];
        let blacklist: HashSet<String> = ["5511999990002".to_string()].into();
        let plan = build_plan(&[], &contacts, &blacklist);

        assert_eq!(plan.recipients.len(), 2);
        assert_eq!(plan.blacklisted.len(), 1);
        assert_eq!(plan.blacklisted[0].name, "Bia");
        assert_eq!(plan.resolved_total(), 3);
        assert!(plan.recipients.iter().all(|r| r.phone != "5511999990002"));
    }

    #[test]
    fn inactive_groups_are_dropped() {
        let groups = vec![
            group("Ativa", "111@g.us", true),
            group("Arquivada", "222@g.us", false),
        ];
        let plan = build_plan(&groups, &[], &HashSet::new());

        assert_eq!(plan.recipients.len(), 1);
        assert_eq!(plan.recipients[0].name, "Ativa");
        assert_eq!(plan.resolved_total(), 1);
    }

    #[test]
    fn first_send_has_no_delay() {
        let r = Recipient {
            phone: "5511999990001".to_string(),
            name: "Ana".to_string(),
            kind: RecipientKind::Contact,
        };
        assert_eq!(delay_before(&r, 0, 30, Some(60)), Duration::ZERO);
        assert_eq!(delay_before(&r, 1, 30, Some(60)), Duration::from_secs(30));
    }

    #[test]
    fn group_interval_overrides_global_for_groups_only() {
        let g = Recipient {
            phone: "111@g.us".to_string(),
            name: "Turma".to_string(),
            kind: RecipientKind::Group,
        };
        let c = Recipient {
            phone: "5511999990001".to_string(),
            name: "Ana".to_string(),
            kind: RecipientKind::Contact,
        };
        assert_eq!(delay_before(&g, 2, 30, Some(90)), Duration::from_secs(90));
        assert_eq!(delay_before(&g, 2, 30, None), Duration::from_secs(30));
        assert_eq!(delay_before(&c, 2, 30, Some(90)), Duration::from_secs(30));
    }

    #[test]
    fn negative_intervals_clamp_to_zero() {
        let r = Recipient {
            phone: "5511999990001".to_string(),
            name: "Ana".to_string(),
            kind: RecipientKind::Contact,
        };
        assert_eq!(delay_before(&r, 3, -5, None), Duration::ZERO);
    }
}

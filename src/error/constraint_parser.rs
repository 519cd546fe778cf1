use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Extracts structured (entity, field, value) information from constraint
/// names and error text so that violations surface as typed errors instead
/// of opaque database messages.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing, cached for reuse
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" pattern in PostgreSQL messages
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            // Matches column names in quotes
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            // Matches table names in quotes
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Table names this schema owns, longest first so that prefix matching on
/// constraint names resolves "campaign_executions_campaign_id_..." to the
/// table rather than to "campaign".
const KNOWN_TABLES: &[&str] = &[
    "campaign_blocked_dates",
    "campaign_executions",
    "campaign_schedules",
    "campaign_targets",
    "user_instances",
    "whatsapp_groups",
    "campaigns",
    "blacklist",
    "contacts",
];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique violation into (entity, field, value).
    ///
    /// Works for both unique constraints ("blacklist_user_id_phone_key") and
    /// unique indexes ("campaign_executions_campaign_id_local_date_idx"),
    /// which is how the daily execution claim is enforced.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name
            && let Some((entity, field)) = Self::parse_constraint_name(constraint)
        {
            if let Some(value) = Self::extract_value_from_message(message) {
                return Some((entity, field, value));
            }
            return Some((entity, field, "duplicate_value".to_string()));
        }

        // Fallback: parse field/value from the DETAIL line
        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a not-null violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .or_else(|| {
                    constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
                })
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Parses a foreign key violation into (entity, field, referenced_value).
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name
            && let Some((entity, field)) = Self::parse_foreign_key_constraint_name(constraint)
        {
            if let Some(value) = Self::extract_value_from_message(message) {
                return Some((entity, field, value));
            }
            return Some((entity, field, "invalid_reference".to_string()));
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a check violation into (entity, field).
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(constraint) = constraint_name
            && let Some((entity, field)) = Self::parse_constraint_name(constraint)
        {
            return Some((entity, field));
        }

        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Splits a constraint or index name into (entity, field).
    ///
    /// Strips the trailing kind marker (`_key`, `_idx`, `_check`, `_unique`)
    /// and matches the longest known table name prefix, so multi-word tables
    /// and multi-column fields both resolve:
    /// - "blacklist_user_id_phone_key" -> ("blacklist", "user_id_phone")
    /// - "campaign_executions_campaign_id_local_date_idx"
    ///   -> ("campaign_executions", "campaign_id_local_date")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = constraint_name
            .strip_suffix("_key")
            .or_else(|| constraint_name.strip_suffix("_idx"))
            .or_else(|| constraint_name.strip_suffix("_check"))
            .or_else(|| constraint_name.strip_suffix("_unique"))
            .unwrap_or(constraint_name);

        for table in KNOWN_TABLES {
            if let Some(rest) = stem.strip_prefix(*table)
                && let Some(field) = rest.strip_prefix('_')
                && !field.is_empty()
            {
                return Some(((*table).to_string(), field.to_string()));
            }
        }

        // Unknown table: fall back to first segment as entity
        let (entity, field) = stem.split_once('_')?;
        if field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Splits a foreign key constraint name like
    /// "campaign_schedules_campaign_id_fkey" into (entity, field).
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = constraint_name.strip_suffix("_fkey")?;

        for table in KNOWN_TABLES {
            if let Some(rest) = stem.strip_prefix(*table)
                && let Some(field) = rest.strip_prefix('_')
                && !field.is_empty()
            {
                return Some(((*table).to_string(), field.to_string()));
            }
        }

        let (entity, field) = stem.split_once('_')?;
        if field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Extracts a column name quoted in the error message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts a table name quoted in the error message.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts the (field, value) pair from a "Key (field)=(value)" DETAIL line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    /// Extracts just the value portion of a violation DETAIL line.
    pub fn extract_value_from_message(message: &str) -> Option<String> {
        Self::extract_key_value_from_message(message).map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_column_unique_constraint() {
        let message = "duplicate key value violates unique constraint \"whatsapp_groups_whatsapp_id_key\"\nDETAIL: Key (whatsapp_id)=(120363012345678901@g.us) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("whatsapp_groups_whatsapp_id_key"));
        assert_eq!(
            result,
            Some((
                "whatsapp_groups".to_string(),
                "whatsapp_id".to_string(),
                "120363012345678901@g.us".to_string()
            ))
        );
    }

    #[test]
    fn parses_multi_column_unique_constraint() {
        let message = "duplicate key value violates unique constraint \"blacklist_user_id_phone_key\"\nDETAIL: Key (user_id, phone)=(9f1c, 5511999990000) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("blacklist_user_id_phone_key"));
        assert_eq!(
            result,
            Some((
                "blacklist".to_string(),
                "user_id_phone".to_string(),
                "9f1c, 5511999990000".to_string()
            ))
        );
    }

    #[test]
    fn parses_daily_claim_unique_index() {
        let message = "duplicate key value violates unique constraint \"campaign_executions_campaign_id_local_date_idx\"\nDETAIL: Key (campaign_id, local_date)=(7b2e, 2025-07-14) already exists.";
        let result = ConstraintParser::parse_unique_violation(
            message,
            Some("campaign_executions_campaign_id_local_date_idx"),
        );
        assert_eq!(
            result,
            Some((
                "campaign_executions".to_string(),
                "campaign_id_local_date".to_string(),
                "7b2e, 2025-07-14".to_string()
            ))
        );
    }

    #[test]
    fn parses_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (phone)=(5511988887777) already exists, in table \"blacklist\".";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "blacklist".to_string(),
                "phone".to_string(),
                "5511988887777".to_string()
            ))
        );
    }

    #[test]
    fn parses_not_null_violation_from_message() {
        let message = "null value in column \"start_time\" of relation \"campaign_schedules\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(
            result,
            Some(("resource".to_string(), "start_time".to_string()))
        );
    }

    #[test]
    fn parses_foreign_key_violation() {
        let message = "insert or update on table \"campaign_schedules\" violates foreign key constraint \"campaign_schedules_campaign_id_fkey\"\nDETAIL: Key (campaign_id)=(111) is not present in table \"campaigns\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some("campaign_schedules_campaign_id_fkey"),
        );
        assert_eq!(
            result,
            Some((
                "campaign_schedules".to_string(),
                "campaign_id".to_string(),
                "111".to_string()
            ))
        );
    }

    #[test]
    fn parses_check_violation_by_constraint_name() {
        let message =
            "new row for relation \"campaign_targets\" violates check constraint \"campaign_targets_one_target_check\"";
        let result = ConstraintParser::parse_check_violation(
            message,
            Some("campaign_targets_one_target_check"),
        );
        assert_eq!(
            result,
            Some(("campaign_targets".to_string(), "one_target".to_string()))
        );
    }

    #[test]
    fn constraint_name_without_field_is_rejected() {
        assert_eq!(ConstraintParser::parse_constraint_name("campaigns_key"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("pkey"), None);
    }
}

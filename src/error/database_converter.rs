use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Converts Diesel database errors into structured AppError variants.
///
/// Constraint violations are parsed into typed errors so callers can react
/// to them: the scheduler relies on unique violations surfacing as
/// `AppError::Duplicate` to detect a lost daily-claim race.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging it with the failed operation.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                if let Some((entity, field, value)) =
                    ConstraintParser::parse_unique_violation(message, constraint_name)
                {
                    AppError::Duplicate {
                        entity,
                        field,
                        value,
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Unique constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                if let Some((entity, field)) =
                    ConstraintParser::parse_not_null_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Not null constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if let Some((entity, field, referenced_value)) =
                    ConstraintParser::parse_foreign_key_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference to {} with value '{}'",
                            entity, referenced_value
                        ),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Foreign key constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::CheckViolation => {
                if let Some((entity, field)) =
                    ConstraintParser::parse_check_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Check constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }

    /// True when the error is the unique violation raised by the daily
    /// execution claim index on (campaign_id, local_date).
    pub fn is_daily_claim_conflict(error: &AppError) -> bool {
        matches!(
            error,
            AppError::Duplicate { entity, field, .. }
                if entity == "campaign_executions" && field.contains("local_date")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(message: &str, constraint: &str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                constraint_name: Some(constraint.to_string()),
            }),
        )
    }

    #[test]
    fn not_found_maps_to_typed_variant() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            DieselError::NotFound,
            "find campaign",
        );

        match result {
            AppError::NotFound { entity, field, .. } => {
                assert_eq!(entity, "resource");
                assert_eq!(field, "id");
            }
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn blacklist_duplicate_maps_to_duplicate() {
        let error = unique_violation(
            "duplicate key value violates unique constraint \"blacklist_user_id_phone_key\"\nDETAIL: Key (user_id, phone)=(9f1c, 5511999990000) already exists.",
            "blacklist_user_id_phone_key",
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert blacklist entry");

        match result {
            AppError::Duplicate { entity, field, .. } => {
                assert_eq!(entity, "blacklist");
                assert_eq!(field, "user_id_phone");
            }
            other => panic!("expected Duplicate, got: {other:?}"),
        }
    }

    #[test]
    fn daily_claim_conflict_is_recognized() {
        let error = unique_violation(
            "duplicate key value violates unique constraint \"campaign_executions_campaign_id_local_date_idx\"\nDETAIL: Key (campaign_id, local_date)=(7b2e, 2025-07-14) already exists.",
            "campaign_executions_campaign_id_local_date_idx",
        );

        let converted =
            DatabaseErrorConverter::convert_diesel_error(error, "insert campaign execution");
        assert!(DatabaseErrorConverter::is_daily_claim_conflict(&converted));

        let unrelated = AppError::Duplicate {
            entity: "blacklist".to_string(),
            field: "user_id_phone".to_string(),
            value: "x".to_string(),
        };
        assert!(!DatabaseErrorConverter::is_daily_claim_conflict(&unrelated));
    }

    #[test]
    fn not_null_violation_maps_to_validation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation,
            Box::new(MockDatabaseErrorInfo {
                message: "null value in column \"start_time\" violates not-null constraint"
                    .to_string(),
                constraint_name: None,
            }),
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert schedule");

        match result {
            AppError::Validation { field, .. } => assert_eq!(field, "start_time"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn rollback_errors_stay_database_errors() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "claim execution",
        );

        match result {
            AppError::Database { operation, .. } => assert_eq!(operation, "claim execution"),
            other => panic!("expected Database, got: {other:?}"),
        }
    }
}

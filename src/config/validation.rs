//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{
    AuthConfig, DatabaseConfig, GatewayConfig, LoggerSettings, SchedulerConfig, ServerConfig,
    Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Maximum connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Minimum connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Minimum connections must not exceed maximum connections.",
            ));
        }

        Ok(())
    }
}

impl AuthConfig {
    /// Validate JWT verification configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::validation(
                "auth.jwt_secret",
                "JWT secret cannot be empty.",
            ));
        }

        if self.jwt_secret.len() < 32 {
            return Err(ConfigError::validation(
                "auth.jwt_secret",
                "JWT secret should be at least 32 characters for security.",
            ));
        }

        if self.audience.is_empty() {
            return Err(ConfigError::validation(
                "auth.audience",
                "Expected JWT audience cannot be empty.",
            ));
        }

        Ok(())
    }
}

impl SchedulerConfig {
    /// Validate scheduler configuration
    ///
    /// The timezone must parse as an IANA name and the tolerance must stay
    /// small: the once-per-minute trigger cadence makes anything above a few
    /// minutes fire the same schedule repeatedly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tz()?;

        if self.tolerance_minutes < 0 {
            return Err(ConfigError::validation(
                "scheduler.tolerance_minutes",
                "Tolerance must not be negative.",
            ));
        }

        if self.tolerance_minutes > 30 {
            return Err(ConfigError::validation(
                "scheduler.tolerance_minutes",
                "Tolerance above 30 minutes would match far too wide a window.",
            ));
        }

        if self.internal_ticker && self.tick_cron.trim().is_empty() {
            return Err(ConfigError::validation(
                "scheduler.tick_cron",
                "A cron expression is required when the internal ticker is enabled.",
            ));
        }

        Ok(())
    }
}

impl GatewayConfig {
    /// Validate gateway client configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::validation(
                "gateway.base_url",
                "Gateway base URL must start with http:// or https://",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "gateway.timeout_seconds",
                "Gateway timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.logger.validate()?;
        self.scheduler.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/disparo_test".to_string();
        settings.auth.jwt_secret = "a".repeat(48);
        settings
    }

    // ========================================================================
    // ServerConfig validation tests
    // ========================================================================

    #[test]
    fn test_server_config_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "server.port")
        );
    }

    #[test]
    fn test_server_config_invalid_request_timeout() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "server.request_timeout")
        );
    }

    // ========================================================================
    // DatabaseConfig validation tests
    // ========================================================================

    #[test]
    fn test_database_config_valid() {
        let config = DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_empty_url() {
        let err = DatabaseConfig::default().validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.url")
        );
    }

    #[test]
    fn test_database_config_rejects_non_postgres_url() {
        let config = DatabaseConfig {
            url: "mysql://localhost/db".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.url")
        );
    }

    #[test]
    fn test_database_config_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            max_connections: 5,
            min_connections: 10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "database.min_connections")
        );
    }

    // ========================================================================
    // AuthConfig validation tests
    // ========================================================================

    #[test]
    fn test_auth_config_empty_secret() {
        let err = AuthConfig::default().validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "auth.jwt_secret")
        );
    }

    #[test]
    fn test_auth_config_short_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, message } if field == "auth.jwt_secret" && message.contains("32 characters"))
        );
    }

    #[test]
    fn test_auth_config_valid() {
        let config = AuthConfig {
            jwt_secret: "a".repeat(32),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    // ========================================================================
    // SchedulerConfig validation tests
    // ========================================================================

    #[test]
    fn test_scheduler_config_valid() {
        assert!(SchedulerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_scheduler_config_invalid_timezone() {
        let config = SchedulerConfig {
            timezone: "Not/A_Zone".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "scheduler.timezone")
        );
    }

    #[test]
    fn test_scheduler_config_negative_tolerance() {
        let config = SchedulerConfig {
            tolerance_minutes: -1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "scheduler.tolerance_minutes")
        );
    }

    #[test]
    fn test_scheduler_config_excessive_tolerance() {
        let config = SchedulerConfig {
            tolerance_minutes: 60,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scheduler_config_ticker_requires_cron() {
        let config = SchedulerConfig {
            internal_ticker: true,
            tick_cron: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "scheduler.tick_cron")
        );
    }

    // ========================================================================
    // GatewayConfig validation tests
    // ========================================================================

    #[test]
    fn test_gateway_config_valid() {
        assert!(GatewayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_gateway_config_invalid_base_url() {
        let config = GatewayConfig {
            base_url: "ftp://api.z-api.io".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "gateway.base_url")
        );
    }

    // ========================================================================
    // LoggerSettings validation tests
    // ========================================================================

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.level")
        );
    }

    #[test]
    fn test_logger_settings_valid() {
        assert!(LoggerSettings::default().validate().is_ok());
    }

    // ========================================================================
    // Settings validation tests
    // ========================================================================

    #[test]
    fn test_settings_validate_all_sections() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_settings_validate_fails_without_database_url() {
        let mut settings = valid_settings();
        settings.database.url = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_validate_fails_with_bad_timezone() {
        let mut settings = valid_settings();
        settings.scheduler.timezone = "Local".to_string();
        assert!(settings.validate().is_err());
    }
}

//! Logger module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output with multiple formats (Full, Compact, JSON)
//! - Runtime log level changes through a reload handle

use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing_subscriber::{
    EnvFilter, Registry, fmt,
    layer::{Layer, SubscriberExt},
    reload,
    util::SubscriberInitExt,
};

/// Output format for file logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Default human-readable format
    Full,
    /// Condensed single-line format
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                other
            )),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub format: LogFormat,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/disparo.log"),
            format: LogFormat::Json,
        }
    }
}

/// Runtime logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Checks that the configuration can produce output at all.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.console.enabled && !self.file.enabled {
            anyhow::bail!("At least one output (console or file) must be enabled");
        }
        if self.file.enabled && self.file.path.as_os_str().is_empty() {
            anyhow::bail!("File logging requires a non-empty path");
        }
        Ok(())
    }
}

/// Handle for changing the active log level at runtime
#[derive(Clone)]
pub struct LogLevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Replace the active filter with one parsed from `level`.
    pub fn set_level(&self, level: &str) -> anyhow::Result<()> {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", level, e))?;
        self.handle
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("Failed to update log level: {}", e))?;
        Ok(())
    }
}

/// Initialize the logger with the given configuration
///
/// Returns a handle that can change the log level while the process runs.
/// Must be called at most once per process.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<LogLevelHandle> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    let registry = tracing_subscriber::registry().with(filter);

    let file_writer = if config.file.enabled {
        Some(open_log_file(&config.file)?)
    } else {
        None
    };

    let is_tty = std::io::stdout().is_terminal();
    let use_ansi = config.console.colored && is_tty;

    // File layer goes first so ANSI codes never leak into file output
    match (file_writer, config.console.enabled) {
        (Some(writer), console) => {
            let file_layer = match config.file.format {
                LogFormat::Full => fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(writer)
                    .boxed(),
                LogFormat::Compact => fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer)
                    .boxed(),
                LogFormat::Json => fmt::layer()
                    .with_ansi(false)
                    .json()
                    .with_writer(writer)
                    .boxed(),
            };

            let console_layer = if console {
                Some(
                    fmt::layer()
                        .with_ansi(use_ansi)
                        .with_target(true)
                        .with_level(true),
                )
            } else {
                None
            };

            registry.with(file_layer).with(console_layer).init();
        }
        (None, _) => {
            registry
                .with(
                    fmt::layer()
                        .with_ansi(use_ansi)
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }

    Ok(LogLevelHandle { handle })
}

fn open_log_file(config: &FileConfig) -> anyhow::Result<Arc<std::fs::File>> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create log directory {}: {}", parent.display(), e)
        })?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", config.path.display(), e))?;

    Ok(Arc::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_from_str() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn logger_config_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Json);
    }

    #[test]
    fn logger_config_rejects_all_outputs_disabled() {
        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn logger_config_rejects_empty_file_path() {
        let config = LoggerConfig {
            file: FileConfig {
                enabled: true,
                path: PathBuf::new(),
                format: LogFormat::Json,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MAILBOOK_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "debug";

/// Output format of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything but `json` is pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Event format.
    pub format: LogFormat,
    /// `EnvFilter` directive.
    pub directive: String,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            directive: DEFAULT_DIRECTIVE.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the config from file settings and the process environment.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::resolve(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Builds the config with an explicit environment lookup.
    ///
    /// Filter precedence: `--verbose`, `MAILBOOK_LOG`, `RUST_LOG`, the
    /// `level` setting, then `warn`.
    #[must_use]
    pub fn resolve(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let directive = if verbose {
            VERBOSE_DIRECTIVE.to_string()
        } else {
            [LOG_ENV, "RUST_LOG"]
                .into_iter()
                .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
                .or_else(|| settings.and_then(|s| s.level.clone()))
                .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
        };

        Self {
            format: settings
                .and_then(|s| s.format.as_deref())
                .map(LogFormat::parse)
                .unwrap_or_default(),
            directive,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

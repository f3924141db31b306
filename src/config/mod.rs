//! Configuration management.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `config.toml` (`--config`, `MAILBOOK_CONFIG_PATH`, or the platform config dir)
//! 3. Environment: `MAILBOOK_DATA_DIR`, `MAILBOOK_DB_PATH`
//!
//! ```toml
//! data_dir = "/home/me/.local/share/mailbook"
//! database_path = "/home/me/mail/templates.db"
//! list_limit = 50
//!
//! [logging]
//! format = "json"
//! level = "info"
//! file = "/tmp/mailbook.log"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "MAILBOOK_CONFIG_PATH";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MAILBOOK_DATA_DIR";
/// Environment variable overriding the database file.
pub const DB_PATH_ENV: &str = "MAILBOOK_DB_PATH";

const DATABASE_FILE: &str = "templates.db";

/// Main configuration for mailbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailbookConfig {
    /// Directory holding the database when no explicit path is set.
    pub data_dir: PathBuf,
    /// Explicit database file, overriding `data_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    /// Maximum rows printed by list and search commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_limit: Option<usize>,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Filter directive, e.g. `info` or `mailbook=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Append logs to this file instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Database file.
    pub database_path: Option<String>,
    /// List limit.
    pub list_limit: Option<usize>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for MailbookConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_path: None,
            list_limit: None,
            logging: LoggingSettings::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".mailbook"),
        |d| d.data_local_dir().join("mailbook"),
    )
}

impl MailbookConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not a valid config file.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = Self::default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable config file");
                Self::default()
            },
        }
    }

    /// Resolves the config file and applies environment overrides.
    ///
    /// An explicit path, or one named by `MAILBOOK_CONFIG_PATH`, must be
    /// readable. The default location is optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an explicitly named file cannot be loaded.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Platform config file location, `<config_dir>/mailbook/config.toml`.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|d| d.config_dir().join("mailbook").join("config.toml"))
    }

    /// Applies `MAILBOOK_DATA_DIR` and `MAILBOOK_DB_PATH` from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = non_empty(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = non_empty(DB_PATH_ENV) {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Converts a `ConfigFile` to `MailbookConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        config.database_path = file.database_path.map(PathBuf::from);
        config.list_limit = file.list_limit;
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Database file in effect.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATABASE_FILE))
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets an explicit database file.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MailbookConfig::default();
        assert!(config.database_path.is_none());
        assert!(config.database_path().ends_with("templates.db"));
        assert!(config.logging.format.is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = MailbookConfig::from_toml(
            r#"
            data_dir = "/srv/mail"
            list_limit = 25

            [logging]
            format = "json"
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/mail"));
        assert_eq!(config.database_path(), PathBuf::from("/srv/mail/templates.db"));
        assert_eq!(config.list_limit, Some(25));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            MailbookConfig::from_toml("data_dir = "),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            MailbookConfig::from_toml("unknown_key = 1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database_path = \"/tmp/t.db\"\n").unwrap();

        let config = MailbookConfig::load_from_file(&path).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/t.db"));

        let missing = dir.path().join("missing.toml");
        let err = MailbookConfig::load_from_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("missing.toml")));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(DATA_DIR_ENV, "/data"), (DB_PATH_ENV, "  ")]);
        let mut config = MailbookConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/data"));
        // Blank values are ignored
        assert!(config.database_path.is_none());

        config.apply_overrides(|k| (k == DB_PATH_ENV).then(|| "/x.db".to_string()));
        assert_eq!(config.database_path(), PathBuf::from("/x.db"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = MailbookConfig::default()
            .with_data_dir("/d")
            .with_database_path("/d/other.db");
        let text = config.to_toml().unwrap();
        assert_eq!(MailbookConfig::from_toml(&text).unwrap(), config);
    }
}

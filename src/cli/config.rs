//! Config CLI command.

use crate::config::MailbookConfig;

/// Prints the effective configuration as TOML.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn cmd_config(config: &MailbookConfig, show: bool) -> anyhow::Result<()> {
    if show {
        println!("# Effective configuration");
        println!("# database: {}", config.database_path().display());
        print!("{}", config.to_toml()?);
    } else {
        println!("Use --show to display configuration");
        if let Some(path) = MailbookConfig::default_config_path() {
            println!("Default config file: {}", path.display());
        }
    }
    Ok(())
}

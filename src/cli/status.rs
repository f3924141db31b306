//! Status CLI command.

use crate::config::MailbookConfig;
use crate::services::TemplateService;

/// Prints the database location and row counts.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn cmd_status(config: &MailbookConfig, service: &TemplateService) -> anyhow::Result<()> {
    let status = service.status()?;

    println!("Mailbook Status");
    println!("===============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Database: {}", config.database_path().display());
    println!("Categories: {}", status.categories);
    println!("Templates: {}", status.templates);
    Ok(())
}

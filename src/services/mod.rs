//! Business logic services.
//!
//! Services orchestrate the template store and provide high-level operations.

mod template;

pub use template::{ImportOptions, StoreStatus, TemplateFilter, TemplateService};

use crate::Result;
use crate::config::MailbookConfig;
use crate::storage::SqliteTemplateStore;

/// Opens the store at the configured database path.
///
/// # Errors
///
/// Returns a storage error if the database cannot be opened or migrated.
pub fn open_store(config: &MailbookConfig) -> Result<SqliteTemplateStore> {
    let path = config.database_path();
    tracing::debug!(path = %path.display(), "Opening template store");
    SqliteTemplateStore::new(path)
}

//! # Mailbook
//!
//! A local library of reusable email message templates.
//!
//! Templates are grouped into categories and kept in a single `SQLite`
//! database file. Each template body exists in two representations, plain
//! text and markup, and the editor can switch between them.
//!
//! ## Layout
//!
//! - [`storage`]: the template store (categories and templates)
//! - [`content`]: plain/markup conversion and transient style spans
//! - [`editor`]: editor session state and the command dispatcher
//! - [`services`]: search, import/export, and store construction
//! - [`config`], [`observability`]: configuration and logging
//!
//! ## Example
//!
//! ```rust
//! use mailbook::models::TemplateDraft;
//! use mailbook::storage::{SqliteTemplateStore, TemplateStore};
//!
//! let store = SqliteTemplateStore::in_memory()?;
//! store.create_category("Sales")?;
//! let id = store.save_template(None, &TemplateDraft::new("Welcome", "Sales", "Hello", ""))?;
//! let template = store.get_template(id)?;
//! assert_eq!(template.map(|t| t.category), Some("Sales".to_string()));
//! # Ok::<(), mailbook::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod content;
pub mod editor;
pub mod io;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::MailbookConfig;
pub use content::{DisplayMode, markup_to_plain, plain_to_markup};
pub use editor::{CommandOutcome, EditorCommand, EditorSession, dispatch};
pub use models::{Template, TemplateDraft, TemplateId, TemplateSummary};
pub use services::TemplateService;
pub use storage::{SqliteTemplateStore, TemplateStore};

/// Error type for mailbook operations.
///
/// No variant is fatal: every error is reported at the boundary of the user
/// action that triggered it and the application stays usable.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Validation` | Template saved without a name or category, malformed import file |
/// | `Duplicate` | Strict category creation hits an existing name |
/// | `NotFound` | Updating or exporting a template id that has no row |
/// | `Storage` | `SQLite`, filesystem, or serialization failures |
/// | `Config` | Configuration file cannot be read or parsed |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Required input was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniquely named entity already exists.
    #[error("already exists: {0}")]
    Duplicate(String),

    /// The referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying store failed.
    #[error("storage operation '{operation}' failed: {cause}")]
    Storage {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Builds a [`Error::Storage`] from an operation name and any displayable cause.
    pub fn storage(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Storage {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }

    /// Returns whether the application can continue after this error.
    ///
    /// Always `true`; kept as a method so callers state the check explicitly.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}

/// Result type alias for mailbook operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Template storage.
//!
//! Categories and templates live in two tables of one `SQLite` database:
//!
//! | Table | Key | Notes |
//! |-------|-----|-------|
//! | `categories` | `name` (unique) | Insertion order is the display order |
//! | `templates` | `id` (row id) | `category` is a plain string, no foreign key |
//!
//! Deleting a category removes its templates in the same transaction.

mod sqlite;
mod traits;

pub use sqlite::SqliteTemplateStore;
pub use traits::TemplateStore;

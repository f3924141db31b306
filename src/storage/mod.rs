//! Storage layer.
//!
//! - [`template`]: the [`TemplateStore`] trait and its `SQLite` implementation
//! - [`migrations`]: versioned schema
//! - [`sqlite`]: connection helpers shared by the above

// Dropping the connection guard early has no benefit for short statements.
#![allow(clippy::significant_drop_tightening)]

pub mod migrations;
pub mod sqlite;
pub mod template;

pub use template::{SqliteTemplateStore, TemplateStore};

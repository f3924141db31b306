//! Embedded schema migrations for the `SQLite` template store.
//!
//! The applied version is tracked in `PRAGMA user_version`. Each migration
//! runs in its own transaction together with the version bump, so a failed
//! migration leaves the schema at the previous version.
//!
//! ```rust,ignore
//! use mailbook::storage::migrations::{MIGRATIONS, MigrationRunner};
//!
//! MigrationRunner::new(&conn).run(MIGRATIONS)?;
//! ```

use crate::storage::sqlite::with_transaction;
use crate::{Error, Result};
use rusqlite::Connection;

/// A single migration with version and SQL.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Migration version (sequential, starting at 1).
    pub version: i32,
    /// Human-readable description.
    pub description: &'static str,
    /// SQL batch to apply.
    pub sql: &'static str,
}

/// Schema of the template store.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "categories and templates tables",
        sql: "CREATE TABLE IF NOT EXISTS categories (
                  id INTEGER PRIMARY KEY,
                  name TEXT NOT NULL UNIQUE
              );
              CREATE TABLE IF NOT EXISTS templates (
                  id INTEGER PRIMARY KEY,
                  name TEXT NOT NULL,
                  category TEXT NOT NULL,
                  content TEXT NOT NULL,
                  html_content TEXT NOT NULL DEFAULT '',
                  created_at INTEGER NOT NULL,
                  updated_at INTEGER NOT NULL
              );",
    },
    Migration {
        version: 2,
        description: "index templates by category",
        sql: "CREATE INDEX IF NOT EXISTS idx_templates_category ON templates(category);",
    },
];

/// Applies pending migrations to a connection.
pub struct MigrationRunner<'a> {
    conn: &'a Connection,
}

impl<'a> MigrationRunner<'a> {
    /// Creates a runner for the given connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the schema version recorded in the database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the pragma cannot be read.
    pub fn current_version(&self) -> Result<i32> {
        self.conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(|e| Error::storage("read_schema_version", e))
    }

    /// Applies every migration newer than the current version, in order.
    ///
    /// Returns the number of migrations applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if a migration fails; earlier migrations
    /// stay applied.
    pub fn run(&self, migrations: &[Migration]) -> Result<usize> {
        let current = self.current_version()?;
        let mut pending: Vec<&Migration> =
            migrations.iter().filter(|m| m.version > current).collect();
        pending.sort_by_key(|m| m.version);

        for migration in &pending {
            with_transaction(self.conn, |conn| {
                conn.execute_batch(migration.sql).map_err(|e| {
                    Error::storage(
                        format!("migration_v{}: {}", migration.version, migration.description),
                        e,
                    )
                })?;
                conn.pragma_update(None, "user_version", migration.version)
                    .map_err(|e| Error::storage("record_migration", e))
            })?;

            tracing::info!(
                version = migration.version,
                description = migration.description,
                "Applied migration"
            );
        }

        Ok(pending.len())
    }
}

/// Maximum version across a set of migrations.
#[must_use]
pub fn max_version(migrations: &[Migration]) -> i32 {
    migrations.iter().map(|m| m.version).max().unwrap_or(0)
}

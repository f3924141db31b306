//! `SQLite`-backed template store.
//!
//! Stores categories and templates in a single database file, by default
//! `<data_dir>/templates.db`.

use super::TemplateStore;
use crate::models::{
    Template, TemplateDraft, TemplateId, TemplateSummary, validate_category_name,
};
use crate::storage::migrations::{MIGRATIONS, MigrationRunner, max_version};
use crate::storage::sqlite::{
    acquire_lock, configure_connection, contains_pattern, record_operation_metrics, status_label,
    with_transaction,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::instrument;

const BACKEND: &str = "sqlite";

/// Raw template row as read from the `templates` table.
type TemplateRow = (i64, String, String, String, String, i64, i64);

/// `SQLite` template store.
pub struct SqliteTemplateStore {
    /// Connection held for the lifetime of the store.
    conn: Mutex<Connection>,
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteTemplateStore {
    /// Opens (creating if needed) the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the
    /// database cannot be opened or migrated.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::storage("create_data_dir", e))?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::storage("open_template_db", e))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };
        store.initialize()?;
        tracing::debug!(path = %store.db_path.display(), "Opened template store");
        Ok(store)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::storage("open_template_db_memory", e))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn)?;
        let runner = MigrationRunner::new(&conn);
        runner.run(MIGRATIONS)?;

        let version = runner.current_version()?;
        let known = max_version(MIGRATIONS);
        if version > known {
            tracing::warn!(
                version,
                known,
                "Database schema is newer than this build supports"
            );
        }
        Ok(())
    }

    /// Runs `op` with the connection and records metrics for it.
    fn timed<T>(&self, operation: &'static str, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let start = Instant::now();
        let result = {
            let conn = acquire_lock(&self.conn);
            op(&conn)
        };
        record_operation_metrics(BACKEND, operation, start, status_label(&result));
        if let Err(e) = &result {
            tracing::warn!(operation, error = %e, "Template store operation failed");
        }
        result
    }
}

fn timestamp_to_micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}

fn micros_to_timestamp(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| Error::storage("decode_timestamp", format!("out of range: {micros}")))
}

fn build_template(row: TemplateRow) -> Result<Template> {
    let (id, name, category, plain_content, markup_content, created_at, updated_at) = row;
    Ok(Template {
        id: TemplateId::new(id),
        name,
        category,
        plain_content,
        markup_content,
        created_at: micros_to_timestamp(created_at)?,
        updated_at: micros_to_timestamp(updated_at)?,
    })
}

fn query_summaries(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
    operation: &'static str,
) -> Result<Vec<TemplateSummary>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::storage(operation, e))?;

    let rows = stmt
        .query_map(params, |row| {
            Ok(TemplateSummary::new(
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
            ))
        })
        .map_err(|e| Error::storage(operation, e))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| Error::storage("read_template_row", e))
}

impl TemplateStore for SqliteTemplateStore {
    #[instrument(skip(self), fields(operation = "create_category", backend = BACKEND))]
    fn create_category(&self, name: &str) -> Result<bool> {
        validate_category_name(name)?;
        self.timed("create_category", |conn| {
            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
                    params![name],
                )
                .map_err(|e| Error::storage("create_category", e))?;
            Ok(inserted > 0)
        })
    }

    #[instrument(skip(self), fields(operation = "add_category", backend = BACKEND))]
    fn add_category(&self, name: &str) -> Result<()> {
        validate_category_name(name)?;
        self.timed("add_category", |conn| {
            conn.execute("INSERT INTO categories (name) VALUES (?1)", params![name])
                .map_err(|e| {
                    if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
                        Error::Duplicate(format!("category '{name}'"))
                    } else {
                        Error::storage("add_category", e)
                    }
                })?;
            Ok(())
        })
    }

    #[instrument(skip(self), fields(operation = "delete_category", backend = BACKEND))]
    fn delete_category(&self, name: &str) -> Result<usize> {
        self.timed("delete_category", |conn| {
            with_transaction(conn, |tx| {
                let removed = tx
                    .execute("DELETE FROM templates WHERE category = ?1", params![name])
                    .map_err(|e| Error::storage("delete_category_templates", e))?;
                tx.execute("DELETE FROM categories WHERE name = ?1", params![name])
                    .map_err(|e| Error::storage("delete_category", e))?;
                Ok(removed)
            })
        })
    }

    fn list_categories(&self) -> Result<Vec<String>> {
        self.timed("list_categories", |conn| {
            let mut stmt = conn
                .prepare("SELECT name FROM categories ORDER BY id")
                .map_err(|e| Error::storage("list_categories", e))?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| Error::storage("list_categories", e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::storage("read_category_row", e))
        })
    }

    fn list_templates(&self, category: Option<&str>) -> Result<Vec<TemplateSummary>> {
        self.timed("list_templates", |conn| match category {
            Some(category) => query_summaries(
                conn,
                "SELECT id, name FROM templates WHERE category = ?1 ORDER BY id",
                params![category],
                "list_templates",
            ),
            None => query_summaries(
                conn,
                "SELECT id, name FROM templates ORDER BY id",
                params![],
                "list_templates",
            ),
        })
    }

    #[instrument(skip(self), fields(operation = "get_template", backend = BACKEND, template.id = %id))]
    fn get_template(&self, id: TemplateId) -> Result<Option<Template>> {
        self.timed("get_template", |conn| {
            let row: Option<TemplateRow> = conn
                .query_row(
                    "SELECT id, name, category, content, html_content, created_at, updated_at
                     FROM templates WHERE id = ?1",
                    params![id.get()],
                    |row| {
                        Ok((
                            row.get(0)?,
                            row.get(1)?,
                            row.get(2)?,
                            row.get(3)?,
                            row.get(4)?,
                            row.get(5)?,
                            row.get(6)?,
                        ))
                    },
                )
                .optional()
                .map_err(|e| Error::storage("get_template", e))?;

            row.map(build_template).transpose()
        })
    }

    #[instrument(skip(self, draft), fields(operation = "save_template", backend = BACKEND, template.id = ?id))]
    fn save_template(&self, id: Option<TemplateId>, draft: &TemplateDraft) -> Result<TemplateId> {
        draft.validate()?;

        self.timed("save_template", |conn| {
            with_transaction(conn, |tx| {
                tx.execute(
                    "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
                    params![draft.category],
                )
                .map_err(|e| Error::storage("ensure_category", e))?;

                let Some(id) = id else {
                    let now = timestamp_to_micros(Utc::now());
                    tx.execute(
                        "INSERT INTO templates
                         (name, category, content, html_content, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                        params![
                            draft.name,
                            draft.category,
                            draft.plain_content,
                            draft.markup_content,
                            now,
                        ],
                    )
                    .map_err(|e| Error::storage("insert_template", e))?;
                    return Ok(TemplateId::new(tx.last_insert_rowid()));
                };

                let previous: Option<i64> = tx
                    .query_row(
                        "SELECT updated_at FROM templates WHERE id = ?1",
                        params![id.get()],
                        |row| row.get(0),
                    )
                    .optional()
                    .map_err(|e| Error::storage("read_template_version", e))?;
                let Some(previous) = previous else {
                    return Err(Error::NotFound(format!("template {id}")));
                };

                // updated_at must move forward even when the clock has not
                let now = timestamp_to_micros(Utc::now()).max(previous.saturating_add(1));
                tx.execute(
                    "UPDATE templates
                     SET name = ?1, category = ?2, content = ?3, html_content = ?4, updated_at = ?5
                     WHERE id = ?6",
                    params![
                        draft.name,
                        draft.category,
                        draft.plain_content,
                        draft.markup_content,
                        now,
                        id.get(),
                    ],
                )
                .map_err(|e| Error::storage("update_template", e))?;
                Ok(id)
            })
        })
    }

    #[instrument(skip(self), fields(operation = "delete_template", backend = BACKEND, template.id = %id))]
    fn delete_template(&self, id: TemplateId) -> Result<bool> {
        self.timed("delete_template", |conn| {
            let removed = conn
                .execute("DELETE FROM templates WHERE id = ?1", params![id.get()])
                .map_err(|e| Error::storage("delete_template", e))?;
            Ok(removed > 0)
        })
    }

    fn search_templates(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<Vec<TemplateSummary>> {
        let pattern = contains_pattern(query);
        self.timed("search_templates", |conn| match category {
            Some(category) => query_summaries(
                conn,
                "SELECT id, name FROM templates
                 WHERE (name LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\')
                   AND category = ?2
                 ORDER BY id",
                params![pattern, category],
                "search_templates",
            ),
            None => query_summaries(
                conn,
                "SELECT id, name FROM templates
                 WHERE name LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\'
                 ORDER BY id",
                params![pattern],
                "search_templates",
            ),
        })
    }
}

//! Connection handling for the `SQLite` template store.

use crate::{Error, Result};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const BUSY_TIMEOUT_MS: u64 = 5000;

/// Acquires the connection lock, recovering from poison.
///
/// A panic inside a previous critical section leaves the connection itself
/// usable, so the guard is taken back and a warning is logged.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Applies connection pragmas.
///
/// - `foreign_keys = ON`
/// - `journal_mode = WAL` (in-memory databases keep `memory`)
/// - `synchronous = NORMAL`
/// - `busy_timeout = 5000`
///
/// # Errors
///
/// Returns [`Error::Storage`] if foreign key enforcement cannot be enabled.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| Error::storage("configure_foreign_keys", e))?;
    // Tuning only; a store on a filesystem without WAL support still works
    let _ = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
        row.get::<_, String>(0)
    });
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS));

    Ok(())
}

/// Runs `body` inside `BEGIN IMMEDIATE` … `COMMIT`.
///
/// Any error from `body` rolls the transaction back and is returned as-is,
/// so callers observe either all of the writes or none of them.
///
/// # Errors
///
/// Returns the error produced by `body`, or [`Error::Storage`] if the
/// transaction cannot be opened or committed.
pub fn with_transaction<T>(
    conn: &Connection,
    body: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| Error::storage("begin_transaction", e))?;

    match body(conn) {
        Ok(value) => {
            if let Err(e) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(Error::storage("commit_transaction", e));
            }
            Ok(value)
        },
        Err(e) => {
            if let Err(rollback) = conn.execute_batch("ROLLBACK") {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn scratch_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL)")
            .unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_acquire_lock_concurrent() {
        let mutex = Arc::new(Mutex::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let mutex = Arc::clone(&mutex);
                thread::spawn(move || {
                    *acquire_lock(&mutex) += 1;
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*acquire_lock(&mutex), 8);
    }

    #[test]
    fn test_acquire_lock_recovers_from_poison() {
        let mutex = Arc::new(Mutex::new(1));
        let poisoner = Arc::clone(&mutex);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(mutex.is_poisoned());
        assert_eq!(*acquire_lock(&mutex), 1);
    }

    #[test]
    fn test_configure_connection() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        let foreign_keys: i32 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);

        let busy_timeout: i32 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(busy_timeout, 5000);
    }

    #[test]
    fn test_with_transaction_commits() {
        let conn = scratch_db();
        let value = with_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(|e| Error::storage("insert", e))?;
            tx.execute("INSERT INTO t (v) VALUES (2)", [])
                .map_err(|e| Error::storage("insert", e))?;
            Ok(42)
        })
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(count(&conn), 2);
    }

    #[test]
    fn test_with_transaction_rolls_back_on_error() {
        let conn = scratch_db();
        let result: Result<()> = with_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(|e| Error::storage("insert", e))?;
            Err(Error::Validation("abort".to_string()))
        });

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(count(&conn), 0);

        // The connection is usable again afterwards
        with_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (3)", [])
                .map_err(|e| Error::storage("insert", e))?;
            Ok(())
        })
        .unwrap();
        assert_eq!(count(&conn), 1);
    }
}

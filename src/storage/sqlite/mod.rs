//! Shared `SQLite` infrastructure for the template store.
//!
//! - `connection`: lock acquisition, pragmas, transaction scope
//! - `sql`: LIKE escaping
//! - `metrics`: per-operation metrics

mod connection;
mod metrics;
mod sql;

pub use connection::{acquire_lock, configure_connection, with_transaction};
pub use metrics::{record_operation_metrics, status_label};
pub use sql::{contains_pattern, escape_like_wildcards};

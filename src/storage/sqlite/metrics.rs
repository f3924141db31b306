//! Operation metrics for the `SQLite` template store.

use std::time::Instant;

/// Records a counter and a latency histogram for one store operation.
///
/// - `storage_operations_total{backend, operation, status}`
/// - `storage_operation_duration_ms{backend, operation, status}`
///
/// Without an installed recorder both calls are no-ops.
pub fn record_operation_metrics(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    status: &'static str,
) {
    metrics::counter!(
        "storage_operations_total",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

/// Maps a result to the `status` label used by [`record_operation_metrics`].
#[must_use]
pub const fn status_label<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() { "success" } else { "error" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation_metrics_without_recorder() {
        let start = Instant::now();
        record_operation_metrics("sqlite", "save_template", start, "success");
        record_operation_metrics("sqlite", "get_template", start, "error");
    }

    #[test]
    fn test_status_label() {
        let ok: Result<(), ()> = Ok(());
        let err: Result<(), ()> = Err(());
        assert_eq!(status_label(&ok), "success");
        assert_eq!(status_label(&err), "error");
    }
}

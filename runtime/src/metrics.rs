//! Metrics for store dispatch and history operations.
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op. Applications that export metrics install
//! a recorder of their choice and call [`describe_metrics`] once.

use metrics::{describe_counter, describe_gauge, describe_histogram};
use std::time::Duration;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Register all metric descriptions.
pub fn describe_metrics() {
    // Store Metrics
    describe_counter!(
        "store_actions_dispatched_total",
        "Total number of actions dispatched to the store"
    );
    describe_counter!(
        "store_broadcasts_total",
        "Total number of unscoped actions fanned out to every slice"
    );
    describe_counter!(
        "store_dispatch_errors_total",
        "Total number of dispatches that failed"
    );
    describe_counter!(
        "store_notifications_total",
        "Total number of subscriber invocations"
    );
    describe_histogram!(
        "store_dispatch_duration_seconds",
        "Time taken to reduce an action and notify subscribers"
    );

    // History Metrics
    describe_counter!(
        "history_commands_pushed_total",
        "Total number of commands recorded in the history"
    );
    describe_counter!(
        "history_pushes_suppressed_total",
        "Total number of pushes ignored while a command was replayed"
    );
    describe_counter!("history_undo_total", "Total number of undone commands");
    describe_counter!("history_redo_total", "Total number of redone commands");
    describe_gauge!("history_undo_depth", "Current number of undoable commands");
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record a successful dispatch.
    pub fn record_dispatch(duration: Duration, broadcast: bool) {
        counter!("store_actions_dispatched_total").increment(1);
        if broadcast {
            counter!("store_broadcasts_total").increment(1);
        }
        histogram!("store_dispatch_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record a failed dispatch.
    pub fn record_error() {
        counter!("store_dispatch_errors_total").increment(1);
    }

    /// Record subscriber invocations for one slice.
    pub fn record_notifications(count: usize) {
        counter!("store_notifications_total").increment(count as u64);
    }
}

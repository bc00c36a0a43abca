//! Linear undo/redo command history.
//!
//! A [`HistoryStack`] keeps two lists of [`HistoryCommand`]s:
//!
//! - the undo list, oldest first and most recent last;
//! - the redo list, most recently undone first.
//!
//! Recording a new command clears the redo list, so the history never
//! branches. While a command's undo or redo closure runs, recording is
//! suspended: closures that trigger code paths which would normally push a
//! new command (property setters, for instance) leave the history untouched.
//!
//! The stack uses interior mutability so that closures may hold an
//! `Arc<HistoryStack>` and call [`HistoryStack::push`] re-entrantly.
//!
//! # Example
//!
//! ```
//! use editor_state_core::history::HistoryStack;
//! use std::sync::{Arc, Mutex};
//!
//! let title = Arc::new(Mutex::new("Untitled".to_string()));
//! let history = HistoryStack::new();
//!
//! let target = Arc::clone(&title);
//! history.push_value_change(
//!     "Rename scene",
//!     move |value: &String| *target.lock().unwrap() = value.clone(),
//!     "Untitled".to_string(),
//!     "Level 1".to_string(),
//! );
//! *title.lock().unwrap() = "Level 1".to_string();
//!
//! history.undo();
//! assert_eq!(*title.lock().unwrap(), "Untitled");
//! history.redo();
//! assert_eq!(*title.lock().unwrap(), "Level 1");
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Closure = Box<dyn Fn() + Send + Sync>;

/// A named pair of inverse closures representing one reversible edit.
pub struct HistoryCommand {
    name: String,
    undo: Closure,
    redo: Closure,
}

impl HistoryCommand {
    /// Create a command from its display name and closures.
    pub fn new<U, R>(name: impl Into<String>, undo: U, redo: R) -> Self
    where
        U: Fn() + Send + Sync + 'static,
        R: Fn() + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            undo: Box::new(undo),
            redo: Box::new(redo),
        }
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Revert the edit.
    pub fn undo(&self) {
        (self.undo)();
    }

    /// Re-apply the edit.
    pub fn redo(&self) {
        (self.redo)();
    }
}

impl fmt::Debug for HistoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryCommand")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Lists {
    undo: Vec<Arc<HistoryCommand>>,
    redo: VecDeque<Arc<HistoryCommand>>,
}

/// Undo/redo command log with re-entrancy protection.
///
/// All operations take `&self`; share the stack as `Arc<HistoryStack>`.
/// Internally one mutex serializes list updates. It is never held while a
/// command closure runs.
pub struct HistoryStack {
    lists: Mutex<Lists>,
    recording: AtomicBool,
    limit: Option<usize>,
}

/// Re-enables recording when dropped, including on unwind.
struct RecordingPause<'a> {
    recording: &'a AtomicBool,
}

impl<'a> RecordingPause<'a> {
    fn start(recording: &'a AtomicBool) -> Self {
        recording.store(false, Ordering::Release);
        Self { recording }
    }
}

impl Drop for RecordingPause<'_> {
    fn drop(&mut self) {
        self.recording.store(true, Ordering::Release);
    }
}

impl HistoryStack {
    /// Create an empty, unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(Lists::default()),
            recording: AtomicBool::new(true),
            limit: None,
        }
    }

    /// Create an empty history keeping at most `limit` undoable commands.
    ///
    /// Pushing past the limit drops the oldest command. A limit of zero is
    /// treated as one.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    fn lists(&self) -> MutexGuard<'_, Lists> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a command.
    ///
    /// Appends to the undo list and clears the redo list. Does nothing
    /// while an undo or redo closure is running.
    pub fn push(&self, command: Arc<HistoryCommand>) {
        if !self.is_recording() {
            tracing::trace!(command = %command.name(), "Recording suspended, command ignored");
            metrics::counter!("history_pushes_suppressed_total").increment(1);
            return;
        }

        let mut lists = self.lists();
        lists.undo.push(command);
        lists.redo.clear();

        if let Some(limit) = self.limit {
            if lists.undo.len() > limit {
                let excess = lists.undo.len() - limit;
                lists.undo.drain(..excess);
                tracing::debug!(limit, dropped = excess, "History limit reached, dropping oldest");
            }
        }

        tracing::debug!(depth = lists.undo.len(), "Recorded history command");
        metrics::counter!("history_commands_pushed_total").increment(1);
        record_undo_depth(lists.undo.len());
    }

    /// Record a command built from a name and two closures.
    pub fn push_change<U, R>(&self, name: impl Into<String>, undo: U, redo: R)
    where
        U: Fn() + Send + Sync + 'static,
        R: Fn() + Send + Sync + 'static,
    {
        self.push(Arc::new(HistoryCommand::new(name, undo, redo)));
    }

    /// Record a value change applied through `setter`.
    ///
    /// Undo applies `old_value`, redo applies `new_value`. The caller is
    /// expected to have applied `new_value` already.
    pub fn push_value_change<V, F>(&self, name: impl Into<String>, setter: F, old_value: V, new_value: V)
    where
        V: Send + Sync + 'static,
        F: Fn(&V) + Send + Sync + 'static,
    {
        let setter = Arc::new(setter);
        let redo_setter = Arc::clone(&setter);
        self.push_change(
            name,
            move || setter(&old_value),
            move || redo_setter(&new_value),
        );
    }

    /// Revert the most recent command.
    ///
    /// Returns `false` without side effects when there is nothing to undo.
    pub fn undo(&self) -> bool {
        let Some(command) = self.lists().undo.pop() else {
            tracing::trace!("Nothing to undo");
            return false;
        };

        tracing::debug!(command = %command.name(), "Undo");
        {
            let _pause = RecordingPause::start(&self.recording);
            command.undo();
            self.lists().redo.push_front(command);
        }

        metrics::counter!("history_undo_total").increment(1);
        record_undo_depth(self.lists().undo.len());
        true
    }

    /// Re-apply the most recently undone command.
    ///
    /// Returns `false` without side effects when there is nothing to redo.
    pub fn redo(&self) -> bool {
        let Some(command) = self.lists().redo.pop_front() else {
            tracing::trace!("Nothing to redo");
            return false;
        };

        tracing::debug!(command = %command.name(), "Redo");
        {
            let _pause = RecordingPause::start(&self.recording);
            command.redo();
        }
        let depth = {
            let mut lists = self.lists();
            lists.undo.push(command);
            lists.undo.len()
        };

        metrics::counter!("history_redo_total").increment(1);
        record_undo_depth(depth);
        true
    }

    /// Forget every command, e.g. when a project is unloaded.
    pub fn clear(&self) {
        let mut lists = self.lists();
        lists.undo.clear();
        lists.redo.clear();
        tracing::debug!("History cleared");
        record_undo_depth(0);
    }

    /// Snapshot of the undo list, oldest first.
    #[must_use]
    pub fn undo_list(&self) -> Vec<Arc<HistoryCommand>> {
        self.lists().undo.clone()
    }

    /// Snapshot of the redo list, most recently undone first.
    #[must_use]
    pub fn redo_list(&self) -> Vec<Arc<HistoryCommand>> {
        self.lists().redo.iter().cloned().collect()
    }

    /// Whether [`undo`](Self::undo) would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.lists().undo.is_empty()
    }

    /// Whether [`redo`](Self::redo) would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.lists().redo.is_empty()
    }

    /// Whether pushes are currently recorded.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::Acquire)
    }

    /// The configured maximum undo depth, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lists = self.lists();
        f.debug_struct("HistoryStack")
            .field("undo", &lists.undo.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("redo", &lists.redo.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("recording", &self.is_recording())
            .field("limit", &self.limit)
            .finish()
    }
}

#[allow(clippy::cast_precision_loss)]
fn record_undo_depth(depth: usize) {
    metrics::gauge!("history_undo_depth").set(depth as f64);
}

//! The `History` slice.
//!
//! Exposes a shared [`HistoryStack`] through the store so that undo and redo
//! can be triggered by dispatching actions, and so that menus and toolbars can
//! subscribe to history changes like to any other slice.
//!
//! The slice state is an `Arc<HistoryStack>`. Its reducers mutate the stack
//! through its interior mutability and return the same `Arc`; subscribers are
//! notified after each dispatch regardless.
//!
//! # Example
//!
//! ```
//! use editor_state_core::{HistoryCommand, HistoryStack};
//! use editor_state_runtime::Store;
//! use editor_state_runtime::history_slice::{HistoryActions, register_history_slice};
//! use std::sync::Arc;
//!
//! let history = Arc::new(HistoryStack::new());
//! let mut store = Store::new();
//! register_history_slice(&mut store, Arc::clone(&history)).unwrap();
//!
//! let actions = HistoryActions::new().unwrap();
//! let command = Arc::new(HistoryCommand::new("Rename", || {}, || {}));
//! store.dispatch(actions.add.invoke_with(command)).unwrap();
//! assert!(history.can_undo());
//!
//! store.dispatch(actions.undo.invoke()).unwrap();
//! assert!(history.can_redo());
//! ```

use crate::store::{Slice, Store};
use crate::StoreError;
use editor_state_core::{ActionCreator, HistoryCommand, HistoryStack, StateError};
use std::sync::Arc;

/// Name of the history slice.
pub const HISTORY_SLICE: &str = "History";

/// State held by the history slice.
pub type SharedHistory = Arc<HistoryStack>;

/// Action creators of the history slice.
#[derive(Debug, Clone)]
pub struct HistoryActions {
    /// `History/Add`, carrying an `Arc<HistoryCommand>`
    pub add: ActionCreator<Arc<HistoryCommand>>,
    /// `History/Undo`
    pub undo: ActionCreator,
    /// `History/Redo`
    pub redo: ActionCreator,
    /// `History/Reset`
    pub reset: ActionCreator,
}

impl HistoryActions {
    /// Create the history action creators.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in names; the `Result` mirrors
    /// [`ActionCreator::parse`].
    pub fn new() -> Result<Self, StateError> {
        Ok(Self {
            add: ActionCreator::parse("History/Add")?,
            undo: ActionCreator::parse("History/Undo")?,
            redo: ActionCreator::parse("History/Redo")?,
            reset: ActionCreator::parse("History/Reset")?,
        })
    }
}

/// Register the `History` slice backed by `history`.
///
/// Registered actions:
///
/// | Action          | Effect                               |
/// |-----------------|--------------------------------------|
/// | `History/Add`   | [`HistoryStack::push`] the payload   |
/// | `History/Undo`  | [`HistoryStack::undo`]               |
/// | `History/Redo`  | [`HistoryStack::redo`]               |
/// | `History/Reset` | [`HistoryStack::clear`]              |
///
/// # Errors
///
/// Returns [`StoreError::DuplicateSlice`] if a `History` slice exists.
pub fn register_history_slice(
    store: &mut Store,
    history: SharedHistory,
) -> Result<Slice<SharedHistory>, StoreError> {
    store.create_slice(HISTORY_SLICE, history, |slice| {
        slice
            .add_payload("Add", |history: &SharedHistory, command: &Arc<HistoryCommand>| {
                history.push(Arc::clone(command));
                Arc::clone(history)
            })?
            .add("Undo", |history, _| {
                history.undo();
                Arc::clone(history)
            })?
            .add("Redo", |history, _| {
                history.redo();
                Arc::clone(history)
            })?
            .add("Reset", |history, _| {
                history.clear();
                Arc::clone(history)
            })?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn slice_exposes_history_actions() {
        let mut store = Store::new();
        let slice = register_history_slice(&mut store, Arc::new(HistoryStack::new())).unwrap();
        let actions = HistoryActions::new().unwrap();

        let types: Vec<String> = slice
            .action_creators()
            .iter()
            .map(|c| c.action_type().to_string())
            .collect();
        assert_eq!(types, ["History/Add", "History/Undo", "History/Redo", "History/Reset"]);
        assert_eq!(slice.action("Undo"), Some(&actions.undo));
    }

    #[test]
    fn registering_twice_fails() {
        let mut store = Store::new();
        register_history_slice(&mut store, Arc::new(HistoryStack::new())).unwrap();

        assert_eq!(
            register_history_slice(&mut store, Arc::new(HistoryStack::new())).err(),
            Some(StoreError::DuplicateSlice(HISTORY_SLICE.to_string()))
        );
    }

    #[test]
    fn add_without_command_fails() {
        let mut store = Store::new();
        register_history_slice(&mut store, Arc::new(HistoryStack::new())).unwrap();

        assert_eq!(
            store.dispatch_type("History/Add"),
            Err(StoreError::State(StateError::MissingPayload {
                action_type: "History/Add".to_string()
            }))
        );
    }

    #[test]
    fn reset_forgets_everything() {
        let history = Arc::new(HistoryStack::new());
        let mut store = Store::new();
        register_history_slice(&mut store, Arc::clone(&history)).unwrap();
        history.push_change("A", || {}, || {});
        history.push_change("B", || {}, || {});
        history.undo();

        store.dispatch_type("History/Reset").unwrap();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}

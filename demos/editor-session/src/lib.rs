//! # Editor Session Example
//!
//! A scene editor session demonstrating the slice store and the undo/redo
//! history working together.
//!
//! This example showcases:
//! - A `Scene` slice built with a slice builder and an extra reducer
//! - A bare `ProjectClosed` action broadcast to every slice
//! - Recorded edits replayed through a shared [`HistoryStack`]
//! - The `History` slice notified after the stack is mutated directly
//!
//! ## Architecture
//!
//! The session owns the store behind one mutex and the history behind an
//! `Arc`. Recorded edits dispatch through the store; their undo and redo
//! closures dispatch through the same store. Undo and redo therefore run
//! on the history directly, never from inside a dispatch, and the `History`
//! slice subscribers are refreshed with `notify_state_changed` afterwards.
//!
//! ## Example
//!
//! ```
//! use editor_session::EditorSession;
//!
//! let session = EditorSession::new().unwrap();
//! session.rename_scene("Level 1").unwrap();
//! session.spawn_entity("Player").unwrap();
//!
//! session.undo().unwrap();
//! assert!(session.scene().unwrap().entities.is_empty());
//! session.undo().unwrap();
//! assert_eq!(session.scene().unwrap().title, "Untitled");
//! ```

use editor_state_core::{Action, ActionCreator, HistoryStack, StateError, create_action, create_payload_action};
use editor_state_runtime::history_slice::{HISTORY_SLICE, SharedHistory, register_history_slice};
use editor_state_runtime::{Store, StoreError, Unsubscribe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Name of the scene slice.
pub const SCENE_SLICE: &str = "Scene";

/// Scene state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneState {
    /// Display title
    pub title: String,
    /// Entity names, in spawn order
    pub entities: Vec<String>,
    /// Index of the selected entity
    pub selection: Option<usize>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            entities: Vec::new(),
            selection: None,
        }
    }
}

/// Scene action creators
#[derive(Debug, Clone)]
pub struct SceneActions {
    /// `Scene/Rename`
    pub rename: ActionCreator<String>,
    /// `Scene/Spawn`
    pub spawn: ActionCreator<String>,
    /// `Scene/DespawnLast`
    pub despawn_last: ActionCreator,
    /// `Scene/Select`
    pub select: ActionCreator<Option<usize>>,
    /// `ProjectClosed`, broadcast to every slice
    pub project_closed: ActionCreator,
}

impl SceneActions {
    fn new() -> Result<Self, StateError> {
        Ok(Self {
            rename: create_payload_action("Scene/Rename")?,
            spawn: create_payload_action("Scene/Spawn")?,
            despawn_last: create_action("Scene/DespawnLast")?,
            select: create_payload_action("Scene/Select")?,
            project_closed: create_action("ProjectClosed")?,
        })
    }
}

fn rename(state: &SceneState, title: &str) -> SceneState {
    SceneState {
        title: title.to_string(),
        ..state.clone()
    }
}

fn spawn(state: &SceneState, name: &str) -> SceneState {
    let mut entities = state.entities.clone();
    entities.push(name.to_string());
    SceneState {
        entities,
        ..state.clone()
    }
}

fn despawn_last(state: &SceneState) -> SceneState {
    let mut entities = state.entities.clone();
    entities.pop();
    let selection = state.selection.filter(|&i| i < entities.len());
    SceneState {
        entities,
        selection,
        ..state.clone()
    }
}

fn select(state: &SceneState, index: Option<usize>) -> SceneState {
    SceneState {
        selection: index.filter(|&i| i < state.entities.len()),
        ..state.clone()
    }
}

fn lock(store: &Mutex<Store>) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One editing session: a store with `Scene` and `History` slices.
#[derive(Debug)]
pub struct EditorSession {
    store: Arc<Mutex<Store>>,
    history: SharedHistory,
    actions: SceneActions,
}

impl EditorSession {
    /// Create a session with an unbounded history
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slices cannot be registered.
    pub fn new() -> Result<Self, StoreError> {
        Self::with_history(HistoryStack::new())
    }

    /// Create a session around the given history
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slices cannot be registered.
    pub fn with_history(history: HistoryStack) -> Result<Self, StoreError> {
        let actions = SceneActions::new()?;
        let history = Arc::new(history);
        let mut store = Store::new();

        let closed = actions.project_closed.clone();
        store.create_slice_with_extra(
            SCENE_SLICE,
            SceneState::default(),
            |slice| {
                slice
                    .add_payload("Rename", |s, title: &String| rename(s, title))?
                    .add_payload("Spawn", |s, name: &String| spawn(s, name))?
                    .add("DespawnLast", |s, _| despawn_last(s))?
                    .add_payload("Select", |s, index: &Option<usize>| select(s, *index))?;
                Ok(())
            },
            |extra| {
                extra.add_case(&closed, |_: &SceneState, _| SceneState::default())?;
                Ok(())
            },
        )?;
        register_history_slice(&mut store, Arc::clone(&history))?;

        tracing::info!(slices = store.len(), "Editor session ready");
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            history,
            actions,
        })
    }

    /// Snapshot of the scene state
    ///
    /// Must not be called from a scene or history listener, see
    /// [`EditorSession::subscribe_scene`].
    ///
    /// # Errors
    ///
    /// Fails only if the scene slice is missing, which cannot happen for a
    /// session built by [`EditorSession::new`].
    pub fn scene(&self) -> Result<SceneState, StoreError> {
        lock(&self.store)
            .get_state::<SceneState>(SCENE_SLICE)
            .cloned()
    }

    /// The shared history
    #[must_use]
    pub const fn history(&self) -> &SharedHistory {
        &self.history
    }

    /// Scene action creators
    #[must_use]
    pub const fn actions(&self) -> &SceneActions {
        &self.actions
    }

    /// Listen to scene changes
    ///
    /// Listeners run while the session holds the store lock. They receive
    /// the new scene as argument and must not call back into the session
    /// (`scene`, edits, undo or redo), which would deadlock.
    ///
    /// # Errors
    ///
    /// Fails only if the scene slice is missing, which cannot happen for a
    /// session built by [`EditorSession::new`].
    pub fn subscribe_scene<F>(&self, listener: F) -> Result<Unsubscribe, StoreError>
    where
        F: Fn(&SceneState) + Send + Sync + 'static,
    {
        lock(&self.store).subscribe(SCENE_SLICE, listener)
    }

    /// Listen to history changes, e.g. to update undo/redo menu items
    ///
    /// The same locking rule as for [`EditorSession::subscribe_scene`]
    /// applies: read the history from the argument, never through the session.
    ///
    /// # Errors
    ///
    /// Fails only if the history slice is missing.
    pub fn subscribe_history<F>(&self, listener: F) -> Result<Unsubscribe, StoreError>
    where
        F: Fn(&SharedHistory) + Send + Sync + 'static,
    {
        lock(&self.store).subscribe(HISTORY_SLICE, listener)
    }

    /// Rename the scene, recording the edit
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the dispatch fails; nothing is recorded then.
    pub fn rename_scene(&self, title: &str) -> Result<(), StoreError> {
        let old_title = self.scene()?.title;
        let new_title = title.to_string();
        self.dispatch_scene(self.actions.rename.invoke_with(new_title.clone()))?;

        let store = Arc::clone(&self.store);
        let rename = self.actions.rename.clone();
        self.history.push_value_change(
            format!("Rename scene to '{new_title}'"),
            move |title: &String| replay(&store, rename.invoke_with(title.clone())),
            old_title,
            new_title,
        );
        self.history_changed()
    }

    /// Spawn an entity, recording the edit
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the dispatch fails; nothing is recorded then.
    pub fn spawn_entity(&self, name: &str) -> Result<(), StoreError> {
        self.dispatch_scene(self.actions.spawn.invoke_with(name.to_string()))?;

        let undo_store = Arc::clone(&self.store);
        let redo_store = Arc::clone(&self.store);
        let despawn = self.actions.despawn_last.clone();
        let spawn = self.actions.spawn.clone();
        let name = name.to_string();
        self.history.push_change(
            format!("Spawn '{name}'"),
            move || replay(&undo_store, despawn.invoke()),
            move || replay(&redo_store, spawn.invoke_with(name.clone())),
        );
        self.history_changed()
    }

    /// Change the selection; selection changes are not recorded
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the dispatch fails.
    pub fn select(&self, index: Option<usize>) -> Result<(), StoreError> {
        self.dispatch_scene(self.actions.select.invoke_with(index))
    }

    /// Undo the most recent edit
    ///
    /// Returns whether anything was undone.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if history subscribers cannot be notified.
    pub fn undo(&self) -> Result<bool, StoreError> {
        let undone = self.history.undo();
        if undone {
            self.history_changed()?;
        }
        Ok(undone)
    }

    /// Redo the most recently undone edit
    ///
    /// Returns whether anything was redone.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if history subscribers cannot be notified.
    pub fn redo(&self) -> Result<bool, StoreError> {
        let redone = self.history.redo();
        if redone {
            self.history_changed()?;
        }
        Ok(redone)
    }

    /// Close the project: every slice resets and the history is forgotten
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the broadcast fails.
    pub fn close_project(&self) -> Result<(), StoreError> {
        let mut store = lock(&self.store);
        store.dispatch(self.actions.project_closed.invoke())?;
        self.history.clear();
        store.notify_state_changed(HISTORY_SLICE)
    }

    fn dispatch_scene(&self, action: Action) -> Result<(), StoreError> {
        lock(&self.store).dispatch(action)
    }

    fn history_changed(&self) -> Result<(), StoreError> {
        lock(&self.store).notify_state_changed(HISTORY_SLICE)
    }
}

/// Dispatch from inside a history closure, where errors have nowhere to go.
fn replay(store: &Mutex<Store>, action: Action) {
    if let Err(error) = lock(store).dispatch(action) {
        tracing::error!(%error, "Replaying history command failed");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn despawn_clears_dangling_selection() {
        let state = SceneState {
            entities: vec!["A".to_string(), "B".to_string()],
            selection: Some(1),
            ..SceneState::default()
        };

        let next = despawn_last(&state);

        assert_eq!(next.entities, ["A"]);
        assert_eq!(next.selection, None);
    }

    #[test]
    fn select_out_of_range_clears_selection() {
        let state = SceneState {
            entities: vec!["A".to_string()],
            ..SceneState::default()
        };

        assert_eq!(select(&state, Some(0)).selection, Some(0));
        assert_eq!(select(&state, Some(3)).selection, None);
    }

    #[test]
    fn session_registers_both_slices() {
        let session = EditorSession::new().unwrap();
        let store = lock(&session.store);

        assert_eq!(store.slice_names().collect::<Vec<_>>(), [SCENE_SLICE, HISTORY_SLICE]);
    }

    #[test]
    fn scene_reports_a_missing_slice() {
        let session = EditorSession::new().unwrap();
        *lock(&session.store) = Store::new();

        assert_eq!(
            session.scene(),
            Err(StoreError::SliceNotFound(SCENE_SLICE.to_string()))
        );
        assert!(session.rename_scene("Level 1").is_err());
        assert!(session.history().undo_list().is_empty());
    }
}

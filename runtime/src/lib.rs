//! # Editor State Runtime
//!
//! The [`Store`] that owns every named slice of editor state.
//!
//! ## Core Components
//!
//! - **Store**: Holds one state value and one reducer per slice, routes actions, notifies subscribers
//! - **Slice**: The descriptor returned when a slice is registered (name, initial state, reducer, action creators)
//! - **History slice**: A slice whose state is a shared [`HistoryStack`](editor_state_core::HistoryStack)
//!
//! ## Routing
//!
//! - `Slice/Action` types go to exactly the named slice; an unknown slice is an error.
//! - Bare `Action` types are offered to every slice's reducer, in registration order.
//!
//! ## Example
//!
//! ```
//! use editor_state_runtime::Store;
//!
//! let mut store = Store::new();
//! store
//!     .create_slice("Counter", 0_i64, |slice| {
//!         slice.add("Increment", |n, _| n + 1)?;
//!         slice.add_payload("Set", |_, value: &i64| *value)?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! store.dispatch_type("Counter/Increment").unwrap();
//! assert_eq!(store.get_state::<i64>("Counter"), Ok(&1));
//!
//! store.dispatch_payload("Counter/Set", 40_i64).unwrap();
//! assert_eq!(store.get_state::<i64>("Counter"), Ok(&40));
//! ```

/// Metrics for store dispatch and history operations
pub mod metrics;

/// The `History` slice wrapping a shared undo/redo stack
pub mod history_slice;

/// Error types for the Store runtime
pub mod error {
    use editor_state_core::StateError;
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// All of them are programming errors reported synchronously to the
    /// caller. None are retried.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A slice with this name is already registered
        #[error("State slice '{0}' already exists")]
        DuplicateSlice(String),

        /// No slice with this name is registered
        #[error("State slice '{0}' does not exist")]
        SliceNotFound(String),

        /// A slice-scoped action names a slice that is not registered
        #[error("Reducer for action type '{0}' does not exist")]
        ReducerNotFound(String),

        /// A bare action was dispatched while broadcasting is disabled
        ///
        /// See [`StoreConfig::with_broadcast_unscoped_actions`](crate::StoreConfig::with_broadcast_unscoped_actions).
        #[error("Action type '{0}' is not scoped to a slice and broadcasting is disabled")]
        UnscopedAction(String),

        /// The slice holds a state of another type than requested
        #[error("State slice '{slice}' does not hold a {expected}")]
        StateTypeMismatch {
            /// Name of the slice
            slice: String,
            /// Name of the requested state type
            expected: &'static str,
        },

        /// Building or running a reducer failed
        #[error(transparent)]
        State(#[from] StateError),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use editor_state_runtime::{Store, StoreConfig};
///
/// let config = StoreConfig::default()
///     .with_broadcast_unscoped_actions(false);
///
/// let store = Store::with_config(config);
/// assert!(!store.config().broadcast_unscoped_actions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Whether a bare action is reduced by every slice (default `true`)
    ///
    /// When disabled, dispatching a bare action fails with
    /// [`StoreError::UnscopedAction`].
    pub broadcast_unscoped_actions: bool,
    /// Whether subscribers are notified after a broadcast (default `true`)
    pub notify_on_broadcast: bool,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_unscoped_actions: bool, notify_on_broadcast: bool) -> Self {
        Self {
            broadcast_unscoped_actions,
            notify_on_broadcast,
        }
    }

    /// Enable or disable fan-out of bare actions
    #[must_use]
    pub const fn with_broadcast_unscoped_actions(mut self, enabled: bool) -> Self {
        self.broadcast_unscoped_actions = enabled;
        self
    }

    /// Enable or disable subscriber notification after a broadcast
    #[must_use]
    pub const fn with_notify_on_broadcast(mut self, enabled: bool) -> Self {
        self.notify_on_broadcast = enabled;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_unscoped_actions: true,
            notify_on_broadcast: true,
        }
    }
}

/// Store implementation
pub mod store {
    use super::metrics::StoreMetrics;
    use super::{StoreConfig, StoreError};
    use editor_state_core::{
        Action, ActionCreator, ActionType, BoxedReducer, ReducerSwitchBuilder,
        SliceReducerBuilder, StateError, SwitchReducer, combine_reducers, create_reducer,
    };
    use std::any::{Any, type_name};
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
    use std::time::Instant;

    type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

    struct Subscribers<S> {
        next_id: u64,
        listeners: Vec<(u64, Listener<S>)>,
    }

    type SharedSubscribers<S> = Arc<Mutex<Subscribers<S>>>;

    fn lock<S>(subscribers: &Mutex<Subscribers<S>>) -> MutexGuard<'_, Subscribers<S>> {
        subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One registered slice, type-erased so the store can keep them in one list.
    trait SliceCell: Send {
        /// Returns whether any reducer case handled the action.
        fn reduce(&mut self, action: &Action) -> Result<bool, StateError>;
        fn notify(&self);
        fn as_any(&self) -> &dyn Any;
    }

    struct SliceEntry<S> {
        name: String,
        state: S,
        reducer: BoxedReducer<S>,
        subscribers: SharedSubscribers<S>,
    }

    impl<S> SliceCell for SliceEntry<S>
    where
        S: Send + Sync + 'static,
    {
        fn reduce(&mut self, action: &Action) -> Result<bool, StateError> {
            match self.reducer.reduce_handled(&self.state, action)? {
                Some(next) => {
                    self.state = next;
                    Ok(true)
                },
                None => {
                    tracing::trace!(slice = %self.name, "Action not handled, state unchanged");
                    Ok(false)
                },
            }
        }

        fn notify(&self) {
            // Listeners run without the lock held so they may unsubscribe
            let listeners: Vec<Listener<S>> = lock(&self.subscribers)
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            tracing::trace!(
                slice = %self.name,
                listeners = listeners.len(),
                "Notifying subscribers"
            );
            for listener in &listeners {
                listener(&self.state);
            }
            StoreMetrics::record_notifications(listeners.len());
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Descriptor of a registered slice
    ///
    /// Returned by [`Store::create_slice`]. It is a snapshot of the build
    /// result: later dispatches do not change it.
    #[derive(Clone)]
    pub struct Slice<S> {
        name: String,
        initial_state: S,
        reducer: SwitchReducer<S>,
        action_creators: Vec<ActionCreator>,
    }

    impl<S> Slice<S> {
        /// The slice name
        #[must_use]
        pub fn name(&self) -> &str {
            &self.name
        }

        /// The state the slice was registered with
        #[must_use]
        pub const fn initial_state(&self) -> &S {
            &self.initial_state
        }

        /// The slice's own reducer, without extra reducers
        #[must_use]
        pub const fn reducer(&self) -> &SwitchReducer<S> {
            &self.reducer
        }

        /// The slice's action creators, in registration order
        #[must_use]
        pub fn action_creators(&self) -> &[ActionCreator] {
            &self.action_creators
        }

        /// Look up an action creator by `Slice/Action` type or bare action name
        #[must_use]
        pub fn action(&self, name: &str) -> Option<&ActionCreator> {
            self.action_creators.iter().find(|creator| {
                let action_type = creator.action_type();
                action_type.as_str() == name || action_type.action_name() == name
            })
        }
    }

    impl<S: fmt::Debug> fmt::Debug for Slice<S> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Slice")
                .field("name", &self.name)
                .field("initial_state", &self.initial_state)
                .field("action_creators", &self.action_creators)
                .finish_non_exhaustive()
        }
    }

    /// Handle returned by [`Store::subscribe`]
    ///
    /// Dropping the handle keeps the listener registered; call
    /// [`unsubscribe`](Self::unsubscribe) to remove it.
    #[must_use = "dropping the handle keeps the listener subscribed forever"]
    pub struct Unsubscribe {
        remove: Box<dyn FnOnce() -> bool + Send>,
    }

    impl Unsubscribe {
        /// Remove exactly the listener this handle was created for
        ///
        /// Returns `false` if the store (or the listener) is already gone.
        #[allow(clippy::must_use_candidate)]
        pub fn unsubscribe(self) -> bool {
            (self.remove)()
        }
    }

    impl fmt::Debug for Unsubscribe {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Unsubscribe").finish_non_exhaustive()
        }
    }

    /// The Store - owner of every named state slice
    ///
    /// The Store manages:
    /// 1. One state value per slice, replaced wholesale on each reduction
    /// 2. One combined reducer per slice
    /// 3. One ordered subscriber list per slice
    ///
    /// All operations are synchronous. Mutating operations take `&mut self`,
    /// so concurrent use requires wrapping the store in a single mutex.
    ///
    /// # Example
    ///
    /// ```
    /// use editor_state_runtime::Store;
    /// use std::sync::{Arc, Mutex};
    ///
    /// #[derive(Clone, Debug, Default, PartialEq)]
    /// struct Selection {
    ///     entity: Option<u32>,
    /// }
    ///
    /// let mut store = Store::new();
    /// store
    ///     .create_slice("Selection", Selection::default(), |slice| {
    ///         slice.add_payload("Select", |_, id: &u32| Selection { entity: Some(*id) })?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    ///
    /// let seen = Arc::new(Mutex::new(None));
    /// let sink = Arc::clone(&seen);
    /// let handle = store
    ///     .subscribe("Selection", move |s: &Selection| *sink.lock().unwrap() = s.entity)
    ///     .unwrap();
    ///
    /// store.dispatch_payload("Selection/Select", 7_u32).unwrap();
    /// assert_eq!(*seen.lock().unwrap(), Some(7));
    /// assert!(handle.unsubscribe());
    /// ```
    pub struct Store {
        slices: Vec<Box<dyn SliceCell>>,
        names: Vec<String>,
        index: HashMap<String, usize>,
        config: StoreConfig,
    }

    impl Store {
        /// Create an empty store with default configuration
        #[must_use]
        pub fn new() -> Self {
            Self::with_config(StoreConfig::default())
        }

        /// Create an empty store with custom configuration
        #[must_use]
        pub fn with_config(config: StoreConfig) -> Self {
            Self {
                slices: Vec::new(),
                names: Vec::new(),
                index: HashMap::new(),
                config,
            }
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Register a slice named `name`
        ///
        /// `build` registers the slice's case reducers; every action type
        /// it adds is prefixed with `name/`.
        ///
        /// # Errors
        ///
        /// - [`StoreError::DuplicateSlice`] if `name` is already registered
        /// - [`StoreError::State`] if the name is not a word or `build` fails
        pub fn create_slice<S, B>(
            &mut self,
            name: &str,
            initial_state: S,
            build: B,
        ) -> Result<Slice<S>, StoreError>
        where
            S: Clone + Send + Sync + 'static,
            B: FnOnce(&mut SliceReducerBuilder<S>) -> Result<(), StateError>,
        {
            self.register_slice(name, initial_state, build, None)
        }

        /// Register a slice with additional reducers for foreign actions
        ///
        /// `extra` registers cases and matchers whose action types are not
        /// prefixed, letting the slice react to bare actions it receives by
        /// broadcast. Actions scoped to another slice never reach it. The
        /// slice reducer runs first, then the extra reducer.
        ///
        /// # Errors
        ///
        /// - [`StoreError::DuplicateSlice`] if `name` is already registered
        /// - [`StoreError::State`] if the name is not a word or a builder fails
        pub fn create_slice_with_extra<S, B, X>(
            &mut self,
            name: &str,
            initial_state: S,
            build: B,
            extra: X,
        ) -> Result<Slice<S>, StoreError>
        where
            S: Clone + Send + Sync + 'static,
            B: FnOnce(&mut SliceReducerBuilder<S>) -> Result<(), StateError>,
            X: FnOnce(&mut ReducerSwitchBuilder<S>) -> Result<(), StateError>,
        {
            self.ensure_vacant(name)?;
            let extra = create_reducer(extra)?;
            self.register_slice(name, initial_state, build, Some(extra))
        }

        fn ensure_vacant(&self, name: &str) -> Result<(), StoreError> {
            if self.index.contains_key(name) {
                return Err(StoreError::DuplicateSlice(name.to_string()));
            }
            Ok(())
        }

        fn register_slice<S, B>(
            &mut self,
            name: &str,
            initial_state: S,
            build: B,
            extra: Option<SwitchReducer<S>>,
        ) -> Result<Slice<S>, StoreError>
        where
            S: Clone + Send + Sync + 'static,
            B: FnOnce(&mut SliceReducerBuilder<S>) -> Result<(), StateError>,
        {
            self.ensure_vacant(name)?;

            let mut builder = SliceReducerBuilder::new(name)?;
            build(&mut builder)?;
            let slice_reducer = create_reducer(builder.build_reducers())?;

            let reducer: BoxedReducer<S> = match extra {
                Some(extra) => Arc::new(combine_reducers(vec![
                    Arc::new(slice_reducer.clone()) as BoxedReducer<S>,
                    Arc::new(extra),
                ])),
                None => Arc::new(slice_reducer.clone()),
            };

            let action_creators = builder.build_action_creators();
            tracing::debug!(
                slice = %name,
                actions = action_creators.len(),
                "Created state slice"
            );

            self.index.insert(name.to_string(), self.slices.len());
            self.names.push(name.to_string());
            self.slices.push(Box::new(SliceEntry {
                name: name.to_string(),
                state: initial_state.clone(),
                reducer,
                subscribers: Arc::new(Mutex::new(Subscribers {
                    next_id: 0,
                    listeners: Vec::new(),
                })),
            }));

            Ok(Slice {
                name: name.to_string(),
                initial_state,
                reducer: slice_reducer,
                action_creators,
            })
        }

        /// Whether a slice named `name` is registered
        #[must_use]
        pub fn contains_slice(&self, name: &str) -> bool {
            self.index.contains_key(name)
        }

        /// Registered slice names, in registration order
        pub fn slice_names(&self) -> impl Iterator<Item = &str> {
            self.names.iter().map(String::as_str)
        }

        /// Number of registered slices
        #[must_use]
        pub fn len(&self) -> usize {
            self.slices.len()
        }

        /// Whether no slice is registered
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.slices.is_empty()
        }

        fn cell(&self, name: &str) -> Result<&dyn SliceCell, StoreError> {
            self.index
                .get(name)
                .map(|&i| self.slices[i].as_ref())
                .ok_or_else(|| StoreError::SliceNotFound(name.to_string()))
        }

        fn entry<S: 'static>(&self, name: &str) -> Result<&SliceEntry<S>, StoreError> {
            self.cell(name)?
                .as_any()
                .downcast_ref::<SliceEntry<S>>()
                .ok_or_else(|| StoreError::StateTypeMismatch {
                    slice: name.to_string(),
                    expected: type_name::<S>(),
                })
        }

        /// Current state of slice `name`
        ///
        /// # Errors
        ///
        /// - [`StoreError::SliceNotFound`] if no such slice is registered
        /// - [`StoreError::StateTypeMismatch`] if the slice state is not an `S`
        pub fn get_state<S: 'static>(&self, name: &str) -> Result<&S, StoreError> {
            self.entry::<S>(name).map(|entry| &entry.state)
        }

        /// Dispatch an action
        ///
        /// A slice-scoped action is reduced by the slice named in its prefix.
        /// A bare action is reduced by every slice in registration order.
        /// Subscribers of every slice whose reducer handled the action are
        /// invoked before this returns. A slice with no matching case, matcher
        /// or default keeps its state and its subscribers stay silent.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ReducerNotFound`] if the prefix names no slice
        /// - [`StoreError::UnscopedAction`] for bare actions when broadcasting is disabled
        /// - [`StoreError::State`] if a reducer reports an invariant violation;
        ///   during a broadcast, slices reduced earlier keep their new state
        #[tracing::instrument(skip(self, action), fields(action = %action.action_type()), name = "store_dispatch")]
        pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
            let start = Instant::now();
            let broadcast = !action.action_type().is_slice();

            let result = if broadcast {
                self.broadcast(&action)
            } else {
                self.dispatch_slice(&action)
            };

            match &result {
                Ok(()) => StoreMetrics::record_dispatch(start.elapsed(), broadcast),
                Err(error) => {
                    tracing::warn!(error = %error, "Dispatch failed");
                    StoreMetrics::record_error();
                },
            }
            result
        }

        /// Dispatch a payload-less action of type `action_type`
        ///
        /// # Errors
        ///
        /// Fails like [`dispatch`](Self::dispatch), or with
        /// [`StateError::InvalidActionType`] if `action_type` is malformed.
        pub fn dispatch_type(&mut self, action_type: &str) -> Result<(), StoreError> {
            let action_type = ActionType::new(action_type)?;
            self.dispatch(Action::new(action_type))
        }

        /// Dispatch an action of type `action_type` carrying `payload`
        ///
        /// # Errors
        ///
        /// Fails like [`dispatch`](Self::dispatch), or with
        /// [`StateError::InvalidActionType`] if `action_type` is malformed.
        pub fn dispatch_payload<P>(&mut self, action_type: &str, payload: P) -> Result<(), StoreError>
        where
            P: Any + Send + Sync,
        {
            let action_type = ActionType::new(action_type)?;
            self.dispatch(Action::with_payload(action_type, payload))
        }

        fn dispatch_slice(&mut self, action: &Action) -> Result<(), StoreError> {
            let action_type = action.action_type();
            let Some(&index) = self.index.get(action_type.slice_prefix()) else {
                return Err(StoreError::ReducerNotFound(action_type.to_string()));
            };

            tracing::debug!(slice = %action_type.slice_prefix(), "Reducing slice action");
            let cell = &mut self.slices[index];
            if cell.reduce(action)? {
                cell.notify();
            }
            Ok(())
        }

        fn broadcast(&mut self, action: &Action) -> Result<(), StoreError> {
            if !self.config.broadcast_unscoped_actions {
                return Err(StoreError::UnscopedAction(action.action_type().to_string()));
            }

            tracing::debug!(slices = self.slices.len(), "Broadcasting unscoped action");
            for cell in &mut self.slices {
                if cell.reduce(action)? && self.config.notify_on_broadcast {
                    cell.notify();
                }
            }
            Ok(())
        }

        /// Register `listener` for state changes of slice `name`
        ///
        /// The listener receives the new state whenever the slice reducer
        /// handles an action and on [`notify_state_changed`](Self::notify_state_changed).
        /// Listeners run synchronously in subscription order, on the thread
        /// that dispatched.
        ///
        /// # Errors
        ///
        /// - [`StoreError::SliceNotFound`] if no such slice is registered
        /// - [`StoreError::StateTypeMismatch`] if the slice state is not an `S`
        pub fn subscribe<S, F>(&self, name: &str, listener: F) -> Result<Unsubscribe, StoreError>
        where
            S: Send + Sync + 'static,
            F: Fn(&S) + Send + Sync + 'static,
        {
            let entry = self.entry::<S>(name)?;

            let id = {
                let mut subscribers = lock(&entry.subscribers);
                let id = subscribers.next_id;
                subscribers.next_id += 1;
                subscribers.listeners.push((id, Arc::new(listener)));
                id
            };
            tracing::trace!(slice = %name, id, "Subscribed");

            let weak: Weak<Mutex<Subscribers<S>>> = Arc::downgrade(&entry.subscribers);
            Ok(Unsubscribe {
                remove: Box::new(move || {
                    let Some(subscribers) = weak.upgrade() else {
                        return false;
                    };
                    let mut subscribers = lock(&subscribers);
                    let before = subscribers.listeners.len();
                    subscribers.listeners.retain(|(listener_id, _)| *listener_id != id);
                    before != subscribers.listeners.len()
                }),
            })
        }

        /// Invoke every subscriber of slice `name` with its current state
        ///
        /// Used after the state was changed through a side channel, such as
        /// a shared container mutated outside of a dispatch.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::SliceNotFound`] if no such slice is registered.
        pub fn notify_state_changed(&self, name: &str) -> Result<(), StoreError> {
            self.cell(name)?.notify();
            Ok(())
        }
    }

    impl Default for Store {
        fn default() -> Self {
            Self::new()
        }
    }

    impl fmt::Debug for Store {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Store")
                .field("slices", &self.names)
                .field("config", &self.config)
                .finish()
        }
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]

        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[test]
        fn get_state_of_unknown_slice_fails() {
            let store = Store::new();

            assert_eq!(
                store.get_state::<String>("Slice"),
                Err(StoreError::SliceNotFound("Slice".to_string()))
            );
        }

        #[test]
        fn get_state_with_wrong_type_fails() {
            let mut store = Store::new();
            store.create_slice("Slice", 1_u8, |_| Ok(())).unwrap();

            assert!(matches!(
                store.get_state::<String>("Slice"),
                Err(StoreError::StateTypeMismatch { .. })
            ));
        }

        #[test]
        fn duplicate_slice_is_rejected() {
            let mut store = Store::new();
            store.create_slice("Slice", 0_u8, |_| Ok(())).unwrap();

            assert_eq!(
                store.create_slice("Slice", 0_u8, |_| Ok(())).err(),
                Some(StoreError::DuplicateSlice("Slice".to_string()))
            );
            assert_eq!(
                store
                    .create_slice_with_extra("Slice", 0_u8, |_| Ok(()), |_| Ok(()))
                    .err(),
                Some(StoreError::DuplicateSlice("Slice".to_string()))
            );
        }

        #[test]
        fn failed_build_leaves_store_unchanged() {
            let mut store = Store::new();
            let result = store.create_slice("Slice", 0_u8, |slice| {
                slice.add("Type", |s, _| *s)?;
                slice.add("Slice/Type", |s, _| *s)?;
                Ok(())
            });

            assert_eq!(
                result.err(),
                Some(StoreError::State(StateError::DuplicateActionType(
                    "Slice/Type".to_string()
                )))
            );
            assert!(!store.contains_slice("Slice"));
            assert!(store.is_empty());
        }

        #[test]
        fn notify_unknown_slice_fails() {
            let store = Store::new();

            assert_eq!(
                store.notify_state_changed("Missing"),
                Err(StoreError::SliceNotFound("Missing".to_string()))
            );
        }

        #[test]
        fn listener_can_be_removed_once() {
            let mut store = Store::new();
            store
                .create_slice("Counter", 0_u32, |slice| {
                    slice.add("Increment", |n, _| n + 1)?;
                    Ok(())
                })
                .unwrap();

            let calls = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&calls);
            let handle = store
                .subscribe("Counter", move |_: &u32| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();

            store.dispatch_type("Counter/Increment").unwrap();
            assert!(handle.unsubscribe());
            store.dispatch_type("Counter/Increment").unwrap();

            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn unsubscribe_after_store_dropped_is_harmless() {
            let mut store = Store::new();
            store.create_slice("Slice", 0_u8, |_| Ok(())).unwrap();
            let handle = store.subscribe("Slice", |_: &u8| {}).unwrap();

            drop(store);

            assert!(!handle.unsubscribe());
        }

        #[test]
        fn slice_names_keep_registration_order() {
            let mut store = Store::new();
            for name in ["Project", "Scene", "History"] {
                store.create_slice(name, (), |_| Ok(())).unwrap();
            }

            assert_eq!(store.slice_names().collect::<Vec<_>>(), ["Project", "Scene", "History"]);
            assert_eq!(store.len(), 3);
        }

        #[test]
        fn invalid_slice_name_is_rejected() {
            let mut store = Store::new();

            assert_eq!(
                store.create_slice("Bad/Name", 0_u8, |_| Ok(())).err(),
                Some(StoreError::State(StateError::InvalidSliceName(
                    "Bad/Name".to_string()
                )))
            );
        }
    }
}

pub use store::{Slice, Store, Unsubscribe};

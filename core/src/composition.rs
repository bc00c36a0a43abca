//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run several reducers over the same state, in order
//! - **`create_reducer`**: Build a [`SwitchReducer`] from a builder callback
//! - **`scope_reducer`**: Focus a reducer on a subset of state
//!
//! # Examples
//!
//! ```
//! use editor_state_core::action::create_action;
//! use editor_state_core::composition::{combine_reducers, create_reducer};
//! use editor_state_core::reducer::{BoxedReducer, Reducer};
//! use std::sync::Arc;
//!
//! let increment = create_action("Increment").unwrap();
//! let double = create_action("Double").unwrap();
//!
//! let counter = create_reducer(|b| {
//!     b.add_case(&increment, |n: &i32, _| n + 1)?;
//!     Ok(())
//! })
//! .unwrap();
//! let doubler = create_reducer(|b| {
//!     b.add_matcher(|_| true, |n: &i32, _| n * 2);
//!     Ok(())
//! })
//! .unwrap();
//!
//! let combined = combine_reducers(vec![
//!     Arc::new(counter) as BoxedReducer<i32>,
//!     Arc::new(doubler),
//! ]);
//! assert_eq!(combined.reduce(&1, &increment.invoke()), Ok(4));
//! assert_eq!(combined.reduce(&1, &double.invoke()), Ok(2));
//! ```

use crate::action::Action;
use crate::error::StateError;
use crate::reducer::{BoxedReducer, Reducer};
use crate::switch::{ReducerSwitchBuilder, SwitchReducer};
use std::fmt;
use std::marker::PhantomData;

/// Combines reducers that operate on the same state type.
///
/// Each reducer receives the output of the previous one, so the combined
/// reducer is a left fold over the list. An error stops the fold.
#[must_use]
pub fn combine_reducers<S>(reducers: Vec<BoxedReducer<S>>) -> CombinedReducer<S> {
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S> {
    reducers: Vec<BoxedReducer<S>>,
}

impl<S> Clone for CombinedReducer<S> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S> fmt::Debug for CombinedReducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S> Reducer<S> for CombinedReducer<S>
where
    S: Clone,
{
    fn reduce(&self, state: &S, action: &Action) -> Result<S, StateError> {
        let mut current = state.clone();
        for reducer in &self.reducers {
            current = reducer.reduce(&current, action)?;
        }
        Ok(current)
    }

    /// Handled if any of the combined reducers handled the action.
    fn reduce_handled(&self, state: &S, action: &Action) -> Result<Option<S>, StateError> {
        let mut next: Option<S> = None;
        for reducer in &self.reducers {
            let current = next.as_ref().unwrap_or(state);
            if let Some(state) = reducer.reduce_handled(current, action)? {
                next = Some(state);
            }
        }
        Ok(next)
    }
}

/// Builds a [`SwitchReducer`] by handing a fresh builder to `build`.
///
/// # Errors
///
/// Propagates any registration error returned by `build`.
pub fn create_reducer<S, F>(build: F) -> Result<SwitchReducer<S>, StateError>
where
    S: 'static,
    F: FnOnce(&mut ReducerSwitchBuilder<S>) -> Result<(), StateError>,
{
    let mut builder = ReducerSwitchBuilder::new();
    build(&mut builder)?;
    Ok(builder.build())
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// The parent state is cloned, the child state is reduced and written
/// back through `set_state`.
///
/// # Examples
///
/// ```
/// use editor_state_core::action::create_action;
/// use editor_state_core::composition::{create_reducer, scope_reducer};
/// use editor_state_core::reducer::Reducer;
///
/// #[derive(Clone, Default)]
/// struct Scene {
///     entity_count: u32,
///     title: String,
/// }
///
/// let spawn = create_action("Scene/Spawn").unwrap();
/// let counter = create_reducer(|b| {
///     b.add_case(&spawn, |n: &u32, _| n + 1)?;
///     Ok(())
/// })
/// .unwrap();
///
/// let scoped = scope_reducer(
///     counter,
///     |scene: &Scene| &scene.entity_count,
///     |scene: &mut Scene, count| scene.entity_count = count,
/// );
///
/// let scene = scoped.reduce(&Scene::default(), &spawn.invoke()).unwrap();
/// assert_eq!(scene.entity_count, 1);
/// ```
pub fn scope_reducer<S, SubS, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, R>
where
    R: Reducer<SubS>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R> {
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: PhantomData<fn() -> SubS>,
}

impl<S, SubS, R> Reducer<S> for ScopedReducer<S, SubS, R>
where
    S: Clone,
    R: Reducer<SubS>,
{
    fn reduce(&self, state: &S, action: &Action) -> Result<S, StateError> {
        let sub_state = self.reducer.reduce((self.get_state)(state), action)?;

        let mut next = state.clone();
        (self.set_state)(&mut next, sub_state);
        Ok(next)
    }

    fn reduce_handled(&self, state: &S, action: &Action) -> Result<Option<S>, StateError> {
        let Some(sub_state) = self.reducer.reduce_handled((self.get_state)(state), action)? else {
            return Ok(None);
        };

        let mut next = state.clone();
        (self.set_state)(&mut next, sub_state);
        Ok(Some(next))
    }
}

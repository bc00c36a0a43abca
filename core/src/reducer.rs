//! The reducer abstraction.
//!
//! Reducers are pure functions `(state, action) -> state`. The builders in
//! this crate turn many small case reducers into one [`Reducer`] per slice,
//! so the store only ever deals with a single callable shape per slice.

use crate::action::Action;
use crate::error::StateError;
use std::sync::Arc;

/// A state transition function for one slice.
///
/// Implementations must be total and deterministic: the same `(state,
/// action)` pair always yields the same result. A returned error is an
/// invariant violation that the store reports without retrying.
///
/// Closures of shape `Fn(&S, &Action) -> Result<S, StateError>` implement
/// this trait.
///
/// # Example
///
/// ```
/// use editor_state_core::action::{create_action, Action};
/// use editor_state_core::error::StateError;
/// use editor_state_core::reducer::Reducer;
///
/// let increment = create_action("Increment").unwrap();
/// let reducer = move |count: &u32, action: &Action| -> Result<u32, StateError> {
///     Ok(if increment.matches(action) { count + 1 } else { *count })
/// };
///
/// let action = create_action("Increment").unwrap().invoke();
/// assert_eq!(reducer.reduce(&1, &action), Ok(2));
/// ```
pub trait Reducer<S>: Send + Sync {
    /// Compute the next state.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] when the action violates an invariant the
    /// reducer relies on, such as a missing payload.
    fn reduce(&self, state: &S, action: &Action) -> Result<S, StateError>;

    /// Compute the next state, or `None` if no registered case handled the action.
    ///
    /// The store only notifies subscribers of a slice when this returns
    /// `Some`. Plain closures always handle the action.
    ///
    /// # Errors
    ///
    /// Same as [`reduce`](Self::reduce).
    fn reduce_handled(&self, state: &S, action: &Action) -> Result<Option<S>, StateError> {
        self.reduce(state, action).map(Some)
    }
}

impl<S, F> Reducer<S> for F
where
    F: Fn(&S, &Action) -> Result<S, StateError> + Send + Sync,
{
    fn reduce(&self, state: &S, action: &Action) -> Result<S, StateError> {
        self(state, action)
    }
}

/// A shared, type-erased reducer.
pub type BoxedReducer<S> = Arc<dyn Reducer<S>>;

/// A single registered case in a reducer table.
///
/// Both plain and payload case reducers are stored in this shape.
pub type CaseReducer<S> = Arc<dyn Fn(&S, &Action) -> Result<S, StateError> + Send + Sync>;

/// A predicate deciding whether a matcher reducer runs.
pub type ActionMatcher = Arc<dyn Fn(&Action) -> bool + Send + Sync>;

/// Wrap an infallible `(state, action)` function as a [`CaseReducer`].
pub fn case<S, F>(reducer: F) -> CaseReducer<S>
where
    F: Fn(&S, &Action) -> S + Send + Sync + 'static,
{
    Arc::new(move |state, action| Ok(reducer(state, action)))
}

/// Wrap a `(state, payload)` function as a [`CaseReducer`].
///
/// The resulting reducer fails with [`StateError::MissingPayload`] or
/// [`StateError::PayloadTypeMismatch`] when the action does not carry a `P`.
pub fn payload_case<S, P, F>(reducer: F) -> CaseReducer<S>
where
    P: 'static,
    F: Fn(&S, &P) -> S + Send + Sync + 'static,
{
    Arc::new(move |state, action| {
        let payload = action.require_payload::<P>()?;
        Ok(reducer(state, payload))
    })
}

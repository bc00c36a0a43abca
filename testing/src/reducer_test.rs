//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use editor_state_core::{Action, Reducer, StateError};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&StateError)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Actions given with [`when_action`](Self::when_action) are reduced in
/// order, each one receiving the state produced by the previous one.
///
/// # Example
///
/// ```
/// use editor_state_core::{create_action, create_reducer};
/// use editor_state_testing::ReducerTest;
///
/// let increment = create_action("Counter/Increment").unwrap();
/// let reducer = create_reducer(|b| {
///     b.add_case(&increment, |n: &u32, _| n + 1)?;
///     Ok(())
/// })
/// .unwrap();
///
/// ReducerTest::new(reducer)
///     .given_state(0)
///     .when_action(increment.invoke())
///     .when_action(increment.invoke())
///     .then_state(|count| assert_eq!(*count, 2))
///     .run();
/// ```
pub struct ReducerTest<R, S>
where
    R: Reducer<S>,
{
    reducer: R,
    initial_state: Option<S>,
    actions: Vec<Action>,
    state_assertions: Vec<StateAssertion<S>>,
    error_assertion: Option<ErrorAssertion>,
}

impl<R, S> ReducerTest<R, S>
where
    R: Reducer<S>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            error_assertion: None,
        }
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Expect one of the actions to fail, and check the error (Then)
    ///
    /// State assertions are skipped when an error is expected.
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&StateError) + 'static,
    {
        self.error_assertion = Some(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the initial state or no action is set, if a reducer fails
    /// unexpectedly (or succeeds when an error was expected), or if any
    /// assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        for action in &self.actions {
            match self.reducer.reduce(&state, action) {
                Ok(next) => state = next,
                Err(error) => match self.error_assertion {
                    Some(assertion) => {
                        assertion(&error);
                        return;
                    },
                    None => panic!("Reducing {action:?} failed: {error}"),
                },
            }
        }

        assert!(
            self.error_assertion.is_none(),
            "Expected a reducer error, but every action succeeded"
        );

        for assertion in self.state_assertions {
            assertion(&state);
        }
    }
}

/// Helper assertions for reducer results
pub mod assertions {
    use editor_state_core::{Action, Reducer, StateError};
    use std::fmt::Debug;

    /// Assert that `action` leaves `state` unchanged
    ///
    /// # Panics
    ///
    /// Panics if the reducer fails or returns a different state.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_unchanged<S, R>(reducer: &R, state: &S, action: &Action)
    where
        S: PartialEq + Debug,
        R: Reducer<S> + ?Sized,
    {
        match reducer.reduce(state, action) {
            Ok(next) => assert_eq!(&next, state, "Expected {action:?} to leave the state unchanged"),
            Err(error) => panic!("Expected {action:?} to be ignored, but it failed: {error}"),
        }
    }

    /// Assert that `action` fails with exactly `expected`
    ///
    /// # Panics
    ///
    /// Panics if the reducer succeeds or fails with another error.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_reduce_error<S, R>(reducer: &R, state: &S, action: &Action, expected: &StateError)
    where
        S: Debug,
        R: Reducer<S> + ?Sized,
    {
        match reducer.reduce(state, action) {
            Ok(next) => panic!("Expected {action:?} to fail with {expected}, but got {next:?}"),
            Err(error) => assert_eq!(&error, expected),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use editor_state_core::{ActionCreator, SwitchReducer, create_action, create_payload_action, create_reducer};

    #[derive(Clone, Debug, PartialEq)]
    struct TestState {
        count: i32,
    }

    fn counter() -> (ActionCreator, ActionCreator<i32>, SwitchReducer<TestState>) {
        let increment = create_action("Counter/Increment").unwrap();
        let set = create_payload_action::<i32>("Counter/Set").unwrap();
        let reducer = create_reducer(|b| {
            b.add_case(&increment, |s: &TestState, _| TestState { count: s.count + 1 })?;
            b.add_payload_case(&set, |_: &TestState, value: &i32| TestState { count: *value })?;
            Ok(())
        })
        .unwrap();
        (increment, set, reducer)
    }

    #[test]
    fn test_reducer_test_increment() {
        let (increment, _, reducer) = counter();

        ReducerTest::new(reducer)
            .given_state(TestState { count: 0 })
            .when_action(increment.invoke())
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_chains_actions() {
        let (increment, set, reducer) = counter();

        ReducerTest::new(reducer)
            .given_state(TestState { count: 0 })
            .when_action(set.invoke_with(5))
            .when_action(increment.invoke())
            .then_state(|state| {
                assert_eq!(state.count, 6);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_expected_error() {
        let (_, set, reducer) = counter();

        ReducerTest::new(reducer)
            .given_state(TestState { count: 0 })
            .when_action(set.untyped().invoke())
            .then_error(|error| {
                assert!(matches!(error, StateError::MissingPayload { .. }));
            })
            .run();
    }

    #[test]
    fn test_assertions_unchanged() {
        let (_, _, reducer) = counter();
        let other = create_action("Other/Thing").unwrap();

        assertions::assert_unchanged(&reducer, &TestState { count: 3 }, &other.invoke());
    }

    #[test]
    fn test_assertions_reduce_error() {
        let (_, set, reducer) = counter();

        assertions::assert_reduce_error(
            &reducer,
            &TestState { count: 3 },
            &set.untyped().invoke(),
            &StateError::MissingPayload {
                action_type: "Counter/Set".to_string(),
            },
        );
    }
}

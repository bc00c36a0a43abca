//! Reducer tables for a single state slice.
//!
//! A [`ReducerSwitchBuilder`] collects three kinds of registrations and
//! compiles them into one [`SwitchReducer`]. For every action:
//!
//! 1. the case registered for the exact action type runs, if any;
//! 2. every matcher whose predicate accepts the action runs, in
//!    registration order, each one folding over the previous output;
//! 3. the default case runs only when neither step matched.

use crate::action::{Action, ActionCreator, ActionType};
use crate::error::StateError;
use crate::reducer::{ActionMatcher, CaseReducer, Reducer, case, payload_case};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

/// Collects case, matcher and default reducers for one state type.
///
/// # Example
///
/// ```
/// use editor_state_core::action::create_action;
/// use editor_state_core::reducer::Reducer;
/// use editor_state_core::switch::ReducerSwitchBuilder;
///
/// let rename = create_action("Rename").unwrap();
///
/// let mut builder = ReducerSwitchBuilder::<String>::new();
/// builder
///     .add_case(&rename, |_, _| "renamed".to_string())
///     .unwrap()
///     .add_default_case(|state, _| state.clone());
/// let reducer = builder.build();
///
/// let state = reducer.reduce(&"scene".to_string(), &rename.invoke()).unwrap();
/// assert_eq!(state, "renamed");
/// ```
pub struct ReducerSwitchBuilder<S> {
    cases: HashMap<ActionType, CaseReducer<S>>,
    matchers: Vec<(ActionMatcher, CaseReducer<S>)>,
    default: Option<CaseReducer<S>>,
}

impl<S: 'static> ReducerSwitchBuilder<S> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cases: HashMap::new(),
            matchers: Vec::new(),
            default: None,
        }
    }

    /// Register a reducer for the creator's exact action type.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateActionType`] if a case for the same
    /// type is already registered.
    pub fn add_case<P, F>(
        &mut self,
        creator: &ActionCreator<P>,
        reducer: F,
    ) -> Result<&mut Self, StateError>
    where
        F: Fn(&S, &Action) -> S + Send + Sync + 'static,
    {
        self.insert_case(creator.action_type().clone(), case(reducer))
    }

    /// Register a reducer that reads the creator's typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateActionType`] if a case for the same
    /// type is already registered.
    pub fn add_payload_case<P, F>(
        &mut self,
        creator: &ActionCreator<P>,
        reducer: F,
    ) -> Result<&mut Self, StateError>
    where
        P: 'static,
        F: Fn(&S, &P) -> S + Send + Sync + 'static,
    {
        self.insert_case(creator.action_type().clone(), payload_case(reducer))
    }

    /// Register an already erased case reducer.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateActionType`] if a case for the same
    /// type is already registered.
    pub fn insert_case(
        &mut self,
        action_type: ActionType,
        reducer: CaseReducer<S>,
    ) -> Result<&mut Self, StateError> {
        match self.cases.entry(action_type) {
            Entry::Occupied(entry) => Err(StateError::DuplicateActionType(entry.key().to_string())),
            Entry::Vacant(entry) => {
                entry.insert(reducer);
                Ok(self)
            },
        }
    }

    /// Register a reducer gated by `matcher`.
    pub fn add_matcher<M, F>(&mut self, matcher: M, reducer: F) -> &mut Self
    where
        M: Fn(&Action) -> bool + Send + Sync + 'static,
        F: Fn(&S, &Action) -> S + Send + Sync + 'static,
    {
        self.matchers.push((Arc::new(matcher), case(reducer)));
        self
    }

    /// Register a payload reducer gated by `matcher`.
    pub fn add_payload_matcher<P, M, F>(&mut self, matcher: M, reducer: F) -> &mut Self
    where
        P: 'static,
        M: Fn(&Action) -> bool + Send + Sync + 'static,
        F: Fn(&S, &P) -> S + Send + Sync + 'static,
    {
        self.matchers.push((Arc::new(matcher), payload_case(reducer)));
        self
    }

    /// Set the reducer that runs when nothing else matched.
    ///
    /// A later call replaces an earlier default.
    pub fn add_default_case<F>(&mut self, reducer: F) -> &mut Self
    where
        F: Fn(&S, &Action) -> S + Send + Sync + 'static,
    {
        self.default = Some(case(reducer));
        self
    }

    /// Set a payload reducer that runs when nothing else matched.
    pub fn add_default_payload_case<P, F>(&mut self, reducer: F) -> &mut Self
    where
        P: 'static,
        F: Fn(&S, &P) -> S + Send + Sync + 'static,
    {
        self.default = Some(payload_case(reducer));
        self
    }

    /// Compile the registrations into one reducer.
    #[must_use]
    pub fn build(self) -> SwitchReducer<S> {
        SwitchReducer {
            cases: Arc::new(self.cases),
            matchers: Arc::from(self.matchers),
            default: self.default,
        }
    }
}

impl<S: 'static> Default for ReducerSwitchBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ReducerSwitchBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerSwitchBuilder")
            .field("cases", &self.cases.keys().collect::<Vec<_>>())
            .field("matchers", &self.matchers.len())
            .field("default", &self.default.is_some())
            .finish()
    }
}

/// The compiled reducer produced by [`ReducerSwitchBuilder::build`].
///
/// Holds no mutable state; cloning shares the same table.
pub struct SwitchReducer<S> {
    cases: Arc<HashMap<ActionType, CaseReducer<S>>>,
    matchers: Arc<[(ActionMatcher, CaseReducer<S>)]>,
    default: Option<CaseReducer<S>>,
}

impl<S> Clone for SwitchReducer<S> {
    fn clone(&self) -> Self {
        Self {
            cases: Arc::clone(&self.cases),
            matchers: Arc::clone(&self.matchers),
            default: self.default.clone(),
        }
    }
}

impl<S> fmt::Debug for SwitchReducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchReducer")
            .field("cases", &self.cases.len())
            .field("matchers", &self.matchers.len())
            .field("default", &self.default.is_some())
            .finish()
    }
}

impl<S> Reducer<S> for SwitchReducer<S>
where
    S: Clone,
{
    fn reduce(&self, state: &S, action: &Action) -> Result<S, StateError> {
        Ok(self
            .reduce_handled(state, action)?
            .unwrap_or_else(|| state.clone()))
    }

    fn reduce_handled(&self, state: &S, action: &Action) -> Result<Option<S>, StateError> {
        let mut next: Option<S> = None;

        if let Some(reducer) = self.cases.get(action.action_type()) {
            next = Some(reducer(state, action)?);
        }

        for (matcher, reducer) in self.matchers.iter() {
            if matcher(action) {
                let current = next.as_ref().unwrap_or(state);
                next = Some(reducer(current, action)?);
            }
        }

        match (next, &self.default) {
            (Some(next), _) => Ok(Some(next)),
            (None, Some(default)) => default(state, action).map(Some),
            (None, None) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::action::{create_action, create_payload_action};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        value1: String,
        value2: String,
    }

    fn with_value1(state: &TestState, value: &str) -> TestState {
        TestState {
            value1: value.to_string(),
            ..state.clone()
        }
    }

    #[test]
    fn case_runs_instead_of_default() {
        let case_action = create_action("Type").unwrap();
        let other = create_action("Other").unwrap();

        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder
            .add_case(&case_action, |s, _| with_value1(s, "Case"))
            .unwrap()
            .add_default_case(|s, _| with_value1(s, "Default"));
        let reducer = builder.build();

        let state = TestState::default();
        assert_eq!(reducer.reduce(&state, &case_action.invoke()).unwrap().value1, "Case");
        assert_eq!(reducer.reduce(&state, &other.invoke()).unwrap().value1, "Default");
    }

    #[test]
    fn duplicate_case_fails_at_registration() {
        let action = create_action("Type").unwrap();

        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder.add_case(&action, |s, _| s.clone()).unwrap();
        let duplicate = builder.add_payload_case(&action.with_payload::<String>(), |s, _| s.clone());

        assert_eq!(
            duplicate.err(),
            Some(StateError::DuplicateActionType("Type".to_string()))
        );
    }

    #[test]
    fn matchers_fold_in_registration_order() {
        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder
            .add_matcher(|_| true, |s: &TestState, _| with_value1(s, "M1"))
            .add_matcher(|_| true, |s: &TestState, _| with_value1(s, &format!("{}M2", s.value1)))
            .add_default_case(|s, _| with_value1(s, "Default"));
        let reducer = builder.build();

        let action = create_action("Anything").unwrap().invoke();
        let state = reducer.reduce(&TestState::default(), &action).unwrap();

        assert_eq!(state.value1, "M1M2");
    }

    #[test]
    fn case_runs_before_matchers() {
        let action = create_action("Type").unwrap();

        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder
            .add_matcher(|_| true, |s: &TestState, _| with_value1(s, &format!("{}Matcher", s.value1)))
            .add_case(&action, |s, _| with_value1(s, "Case"))
            .unwrap();
        let reducer = builder.build();

        let state = reducer.reduce(&TestState::default(), &action.invoke()).unwrap();

        assert_eq!(state.value1, "CaseMatcher");
    }

    #[test]
    fn rejecting_matcher_does_not_run() {
        let target = create_action("Slice/Target").unwrap();

        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        let matcher = target.clone();
        builder
            .add_matcher(move |a| matcher.matches(a), |s: &TestState, _| with_value1(s, "Matched"))
            .add_default_case(|s, _| TestState {
                value2: "Default".to_string(),
                ..s.clone()
            });
        let reducer = builder.build();

        let other = create_action("Slice/Other").unwrap().invoke();
        let state = reducer.reduce(&TestState::default(), &other).unwrap();
        assert_eq!(state.value1, "");
        assert_eq!(state.value2, "Default");

        let state = reducer.reduce(&TestState::default(), &target.invoke()).unwrap();
        assert_eq!(state.value1, "Matched");
        assert_eq!(state.value2, "");
    }

    #[test]
    fn payload_case_receives_payload() {
        let set = create_payload_action::<String>("Set").unwrap();

        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder
            .add_payload_case(&set, |s: &TestState, value: &String| with_value1(s, value))
            .unwrap();
        let reducer = builder.build();

        let state = reducer
            .reduce(&TestState::default(), &set.invoke_with("Payload".to_string()))
            .unwrap();
        assert_eq!(state.value1, "Payload");

        assert!(matches!(
            reducer.reduce(&TestState::default(), &set.invoke()),
            Err(StateError::MissingPayload { .. })
        ));
    }

    #[test]
    fn unmatched_action_without_default_keeps_state() {
        let reducer = ReducerSwitchBuilder::<TestState>::new().build();
        let state = TestState {
            value1: "kept".to_string(),
            value2: String::new(),
        };

        let next = reducer
            .reduce(&state, &create_action("Unknown").unwrap().invoke())
            .unwrap();

        assert_eq!(next, state);
    }

    #[test]
    fn reducer_is_pure_across_invocations() {
        let action = create_action("Type").unwrap();
        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder
            .add_case(&action, |s: &TestState, _| with_value1(s, &format!("{}x", s.value1)))
            .unwrap();
        let reducer = builder.build();

        let state = TestState::default();
        let first = reducer.reduce(&state, &action.invoke()).unwrap();
        let second = reducer.reduce(&state, &action.invoke()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn reduce_handled_reports_unmatched_actions() {
        let action = create_action("Type").unwrap();
        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder.add_case(&action, |s, _| with_value1(s, "Case")).unwrap();
        let reducer = builder.build();

        let state = TestState::default();
        let other = create_action("Other").unwrap().invoke();
        assert_eq!(reducer.reduce_handled(&state, &other).unwrap(), None);
        assert_eq!(
            reducer.reduce_handled(&state, &action.invoke()).unwrap(),
            Some(with_value1(&state, "Case"))
        );

        // A default case handles everything
        let mut builder = ReducerSwitchBuilder::<TestState>::new();
        builder.add_default_case(|s, _| s.clone());
        assert!(builder.build().reduce_handled(&state, &other).unwrap().is_some());
    }
}

//! Namespaced reducer registration for one named slice.
//!
//! Every action registered through a [`SliceReducerBuilder`] is prefixed
//! with the slice name, so `add("Rename", ..)` on the `Scene` slice
//! produces the `Scene/Rename` action type.

use crate::action::{Action, ActionCreator, ActionType, is_word};
use crate::error::StateError;
use crate::reducer::{CaseReducer, case, payload_case};
use crate::switch::ReducerSwitchBuilder;
use std::fmt;

struct SliceCase<S> {
    creator: ActionCreator,
    reducer: CaseReducer<S>,
}

impl<S> Clone for SliceCase<S> {
    fn clone(&self) -> Self {
        Self {
            creator: self.creator.clone(),
            reducer: self.reducer.clone(),
        }
    }
}

/// Registers case reducers under a slice namespace.
///
/// # Example
///
/// ```
/// use editor_state_core::slice::SliceReducerBuilder;
///
/// let mut builder = SliceReducerBuilder::<u32>::new("Counter").unwrap();
/// builder
///     .add("Increment", |count, _| count + 1)
///     .unwrap()
///     .add_payload("Counter/Set", |_, value: &u32| *value)
///     .unwrap();
///
/// let types: Vec<String> = builder
///     .build_action_creators()
///     .iter()
///     .map(|creator| creator.action_type().to_string())
///     .collect();
/// assert_eq!(types, ["Counter/Increment", "Counter/Set"]);
/// ```
pub struct SliceReducerBuilder<S> {
    name: String,
    cases: Vec<SliceCase<S>>,
}

impl<S: 'static> SliceReducerBuilder<S> {
    /// Create a builder for the slice called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidSliceName`] unless `name` is a single
    /// word, since actions of other slices could not be routed to it.
    pub fn new(name: impl Into<String>) -> Result<Self, StateError> {
        let name = name.into();
        if !is_word(&name) {
            return Err(StateError::InvalidSliceName(name));
        }

        Ok(Self {
            name,
            cases: Vec::new(),
        })
    }

    /// The slice name used as action prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a reducer for `action`, prefixing it with the slice name
    /// unless it already carries that prefix.
    ///
    /// # Errors
    ///
    /// - [`StateError::InvalidActionType`] if the prefixed type is malformed
    /// - [`StateError::DuplicateActionType`] if the type is already registered
    pub fn add<F>(&mut self, action: &str, reducer: F) -> Result<&mut Self, StateError>
    where
        F: Fn(&S, &Action) -> S + Send + Sync + 'static,
    {
        let action_type = self.action_type(action)?;
        self.push(action_type, case(reducer))
    }

    /// Register a payload reducer for `action`, prefixing it like [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// - [`StateError::InvalidActionType`] if the prefixed type is malformed
    /// - [`StateError::DuplicateActionType`] if the type is already registered
    pub fn add_payload<P, F>(&mut self, action: &str, reducer: F) -> Result<&mut Self, StateError>
    where
        P: 'static,
        F: Fn(&S, &P) -> S + Send + Sync + 'static,
    {
        let action_type = self.action_type(action)?;
        self.push(action_type, payload_case(reducer))
    }

    /// Register a reducer under its own name.
    ///
    /// `reducer_name` must be a bare word; it becomes `slice/reducer_name`.
    ///
    /// # Errors
    ///
    /// - [`StateError::InvalidReducerName`] if the name is not a bare word
    /// - [`StateError::DuplicateActionType`] if the type is already registered
    pub fn add_reducer<F>(&mut self, reducer_name: &str, reducer: F) -> Result<&mut Self, StateError>
    where
        F: Fn(&S, &Action) -> S + Send + Sync + 'static,
    {
        Self::check_reducer_name(reducer_name)?;
        self.add(reducer_name, reducer)
    }

    /// Register a payload reducer under its own name.
    ///
    /// # Errors
    ///
    /// - [`StateError::InvalidReducerName`] if the name is not a bare word
    /// - [`StateError::DuplicateActionType`] if the type is already registered
    pub fn add_payload_reducer<P, F>(
        &mut self,
        reducer_name: &str,
        reducer: F,
    ) -> Result<&mut Self, StateError>
    where
        P: 'static,
        F: Fn(&S, &P) -> S + Send + Sync + 'static,
    {
        Self::check_reducer_name(reducer_name)?;
        self.add_payload(reducer_name, reducer)
    }

    /// The creators of every registered action, in registration order.
    #[must_use]
    pub fn build_action_creators(&self) -> Vec<ActionCreator> {
        self.cases.iter().map(|c| c.creator.clone()).collect()
    }

    /// A callback replaying every registration into a [`ReducerSwitchBuilder`].
    ///
    /// The callback can be applied to several builders; each receives the
    /// cases in registration order.
    #[must_use]
    pub fn build_reducers(
        &self,
    ) -> impl Fn(&mut ReducerSwitchBuilder<S>) -> Result<(), StateError> + use<S> {
        let cases = self.cases.clone();
        move |builder| {
            for slice_case in &cases {
                builder.insert_case(
                    slice_case.creator.action_type().clone(),
                    slice_case.reducer.clone(),
                )?;
            }
            Ok(())
        }
    }

    fn check_reducer_name(reducer_name: &str) -> Result<(), StateError> {
        if is_word(reducer_name) {
            Ok(())
        } else {
            Err(StateError::InvalidReducerName(reducer_name.to_string()))
        }
    }

    fn action_type(&self, action: &str) -> Result<ActionType, StateError> {
        let prefixed = match action.strip_prefix(self.name.as_str()) {
            Some(rest) if rest.starts_with('/') => action.to_string(),
            _ => format!("{}/{action}", self.name),
        };

        ActionType::new(prefixed)
    }

    fn push(&mut self, action_type: ActionType, reducer: CaseReducer<S>) -> Result<&mut Self, StateError> {
        if self
            .cases
            .iter()
            .any(|c| c.creator.action_type() == &action_type)
        {
            return Err(StateError::DuplicateActionType(action_type.to_string()));
        }

        tracing::trace!(slice = %self.name, action = %action_type, "Registered slice case");
        self.cases.push(SliceCase {
            creator: ActionCreator::new(action_type),
            reducer,
        });
        Ok(self)
    }
}

impl<S> fmt::Debug for SliceReducerBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceReducerBuilder")
            .field("name", &self.name)
            .field(
                "actions",
                &self
                    .cases
                    .iter()
                    .map(|c| c.creator.action_type().as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::reducer::Reducer;

    fn types(builder: &SliceReducerBuilder<i32>) -> Vec<String> {
        builder
            .build_action_creators()
            .iter()
            .map(|c| c.action_type().to_string())
            .collect()
    }

    #[test]
    fn explicit_types_are_prefixed_once() {
        let mut builder = SliceReducerBuilder::<i32>::new("Slice").unwrap();
        builder
            .add("Type1", |s, _| *s)
            .unwrap()
            .add("Slice/Type2", |s, _| *s)
            .unwrap()
            .add_payload("Type3", |_, v: &i32| *v)
            .unwrap();

        assert_eq!(types(&builder), ["Slice/Type1", "Slice/Type2", "Slice/Type3"]);
    }

    #[test]
    fn foreign_prefix_is_rejected() {
        let mut builder = SliceReducerBuilder::<i32>::new("Slice").unwrap();

        assert_eq!(
            builder.add("Other/Type", |s, _| *s).err(),
            Some(StateError::InvalidActionType("Slice/Other/Type".to_string()))
        );
        // A slice whose name merely starts with ours is still foreign
        assert!(builder.add("SliceTwo/Type", |s, _| *s).is_err());
    }

    #[test]
    fn reducer_names_must_be_words() {
        let mut builder = SliceReducerBuilder::<i32>::new("Slice").unwrap();

        assert_eq!(
            builder.add_reducer("(x, y) => y", |s, _| *s).err(),
            Some(StateError::InvalidReducerName("(x, y) => y".to_string()))
        );
        assert_eq!(
            builder.add_payload_reducer("Slice/Set", |_, v: &i32| *v).err(),
            Some(StateError::InvalidReducerName("Slice/Set".to_string()))
        );

        builder.add_reducer("increment", |s, _| s + 1).unwrap();
        assert_eq!(types(&builder), ["Slice/increment"]);
    }

    #[test]
    fn duplicates_are_detected_after_prefixing() {
        let mut builder = SliceReducerBuilder::<i32>::new("Slice").unwrap();
        builder.add("Type", |s, _| *s).unwrap();

        assert_eq!(
            builder.add_payload("Slice/Type", |_, v: &i32| *v).err(),
            Some(StateError::DuplicateActionType("Slice/Type".to_string()))
        );
        // Case-sensitive
        builder.add("type", |s, _| *s).unwrap();
    }

    #[test]
    fn invalid_slice_name_is_rejected() {
        assert_eq!(
            SliceReducerBuilder::<i32>::new("My Slice").err(),
            Some(StateError::InvalidSliceName("My Slice".to_string()))
        );
    }

    #[test]
    fn build_reducers_replays_cases() {
        let mut builder = SliceReducerBuilder::<i32>::new("Counter").unwrap();
        builder
            .add("Increment", |s, _| s + 1)
            .unwrap()
            .add_payload("Set", |_, v: &i32| *v)
            .unwrap();
        let creators = builder.build_action_creators();
        let replay = builder.build_reducers();

        let mut switch = ReducerSwitchBuilder::new();
        replay(&mut switch).unwrap();
        let reducer = switch.build();

        assert_eq!(reducer.reduce(&1, &creators[0].invoke()).unwrap(), 2);
        assert_eq!(
            reducer
                .reduce(&1, &creators[1].with_payload::<i32>().invoke_with(10))
                .unwrap(),
            10
        );

        // Replaying into the same switch collides with itself
        let mut switch = ReducerSwitchBuilder::new();
        replay(&mut switch).unwrap();
        assert!(matches!(
            replay(&mut switch),
            Err(StateError::DuplicateActionType(_))
        ));
    }
}

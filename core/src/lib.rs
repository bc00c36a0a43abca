//! # Editor State Core
//!
//! Core types for a slice-based state store and an undo/redo history.
//!
//! ## Core Concepts
//!
//! - **Action**: An immutable event record, a validated [`ActionType`] plus an optional payload
//! - **Action creator**: A factory and matcher bound to one action type
//! - **Reducer**: Pure function `(&State, &Action) → State`
//! - **Reducer switch**: A table of exact-type cases, predicate matchers and a default case
//! - **Slice builder**: Registers cases under a slice namespace (`Slice/Action`)
//! - **History**: Linear undo/redo log of named inverse closure pairs
//!
//! The runtime crate assembles slices into a `Store` that routes dispatched
//! actions and notifies subscribers.
//!
//! ## Example
//!
//! ```
//! use editor_state_core::{ReducerSwitchBuilder, Reducer, SliceReducerBuilder};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct SceneState {
//!     title: String,
//!     entities: u32,
//! }
//!
//! let mut slice = SliceReducerBuilder::<SceneState>::new("Scene").unwrap();
//! slice
//!     .add("Spawn", |s, _| SceneState { entities: s.entities + 1, ..s.clone() })
//!     .unwrap()
//!     .add_payload("Rename", |s, title: &String| SceneState { title: title.clone(), ..s.clone() })
//!     .unwrap();
//!
//! let creators = slice.build_action_creators();
//! let mut switch = ReducerSwitchBuilder::new();
//! slice.build_reducers()(&mut switch).unwrap();
//! let reducer = switch.build();
//!
//! let state = reducer.reduce(&SceneState::default(), &creators[0].invoke()).unwrap();
//! assert_eq!(state.entities, 1);
//! ```

pub mod action;
pub mod composition;
pub mod error;
pub mod history;
pub mod reducer;
pub mod slice;
pub mod switch;

// Re-export commonly used types
pub use action::{Action, ActionCreator, ActionType, create_action, create_payload_action};
pub use composition::{combine_reducers, create_reducer, scope_reducer};
pub use error::StateError;
pub use history::{HistoryCommand, HistoryStack};
pub use reducer::{ActionMatcher, BoxedReducer, CaseReducer, Reducer};
pub use slice::SliceReducerBuilder;
pub use switch::{ReducerSwitchBuilder, SwitchReducer};

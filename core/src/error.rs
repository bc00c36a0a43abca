//! Error types for action and reducer construction.

use thiserror::Error;

/// Errors raised while building or running reducers.
///
/// Every variant describes a programming error rather than a transient
/// fault: they are reported synchronously to the caller and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The string does not match `^\w+$` or `^\w+/\w+$`.
    #[error("Invalid action type '{0}'")]
    InvalidActionType(String),

    /// A reducer name passed to a slice builder is not a bare word.
    #[error("Invalid reducer name '{0}'")]
    InvalidReducerName(String),

    /// A slice name is not a bare word, so its actions could not be routed.
    #[error("Invalid slice name '{0}'")]
    InvalidSliceName(String),

    /// The same action type was registered twice in one builder.
    #[error("Action type '{0}' already exists")]
    DuplicateActionType(String),

    /// A payload reducer received an action without a payload.
    #[error("Action '{action_type}' carries no payload")]
    MissingPayload {
        /// Type of the offending action
        action_type: String,
    },

    /// A payload reducer received a payload of another type.
    #[error("Action '{action_type}' payload is not a {expected}")]
    PayloadTypeMismatch {
        /// Type of the offending action
        action_type: String,
        /// Name of the payload type the reducer expects
        expected: &'static str,
    },
}

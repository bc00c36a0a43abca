//! Action primitives: validated action types, actions and action creators.
//!
//! An [`ActionType`] is either a bare word (`Reset`) or a slice-scoped pair
//! (`History/Undo`). The store routes scoped actions to the slice named by
//! the prefix and fans bare actions out to every slice.
//!
//! # Example
//!
//! ```
//! use editor_state_core::action::{ActionCreator, ActionType};
//!
//! let rename = ActionCreator::<String>::parse("Scene/Rename").unwrap();
//! let action = rename.invoke_with("Level 2".to_string());
//!
//! assert!(rename.matches(&action));
//! assert_eq!(action.action_type().slice_prefix(), "Scene");
//! assert_eq!(action.payload::<String>().map(String::as_str), Some("Level 2"));
//! ```

use crate::error::StateError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

#[allow(clippy::expect_used)]
static VALID_ACTION_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^\w+/\w+$)|(^\w+$)").expect("hardcoded action type pattern should always compile")
});

#[allow(clippy::expect_used)]
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("hardcoded word pattern should always compile"));

/// Returns `true` if `value` is a single non-empty word (`^\w+$`).
#[must_use]
pub fn is_word(value: &str) -> bool {
    WORD.is_match(value)
}

/// A validated action identifier.
///
/// Immutable once constructed. Equality, ordering and hashing use the
/// string value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionType {
    value: String,
    // Byte offset of the '/' separator for slice-scoped types
    separator: Option<usize>,
}

impl ActionType {
    /// Validate and wrap an action identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidActionType`] when `value` is empty, has a
    /// leading or trailing slash, contains more than one slash or contains a
    /// non-word character.
    pub fn new(value: impl Into<String>) -> Result<Self, StateError> {
        let value = value.into();
        if !VALID_ACTION_TYPE.is_match(&value) {
            return Err(StateError::InvalidActionType(value));
        }

        let separator = value.find('/');
        Ok(Self { value, separator })
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether this type is scoped to a slice (`slice/action`).
    #[must_use]
    pub const fn is_slice(&self) -> bool {
        self.separator.is_some()
    }

    /// The slice name before the `/`, or an empty string for bare types.
    #[must_use]
    pub fn slice_prefix(&self) -> &str {
        self.separator.map_or("", |index| &self.value[..index])
    }

    /// The action name after the `/`, or the whole value for bare types.
    #[must_use]
    pub fn action_name(&self) -> &str {
        self.separator
            .map_or(self.value.as_str(), |index| &self.value[index + 1..])
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ActionType {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl FromStr for ActionType {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ActionType {
    type Error = StateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ActionType {
    type Error = StateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionType> for String {
    fn from(action_type: ActionType) -> Self {
        action_type.value
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

type Payload = Arc<dyn Any + Send + Sync>;

/// An immutable event record: a type tag plus an optional payload.
///
/// The payload is type-erased and reference counted, so cloning an action
/// is cheap and one action value can be offered to several slices.
#[derive(Clone)]
pub struct Action {
    action_type: ActionType,
    payload: Option<Payload>,
}

impl Action {
    /// Create an action without payload.
    #[must_use]
    pub const fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            payload: None,
        }
    }

    /// Create an action carrying `payload`.
    #[must_use]
    pub fn with_payload<P>(action_type: ActionType, payload: P) -> Self
    where
        P: Any + Send + Sync,
    {
        Self {
            action_type,
            payload: Some(Arc::new(payload)),
        }
    }

    /// The action's type tag.
    #[must_use]
    pub const fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Whether a payload is attached.
    #[must_use]
    pub const fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// The payload, if present and of type `P`.
    #[must_use]
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<P>())
    }

    /// The payload as `P`, treating absence or a type mismatch as an error.
    ///
    /// # Errors
    ///
    /// - [`StateError::MissingPayload`] when no payload is attached
    /// - [`StateError::PayloadTypeMismatch`] when the payload is not a `P`
    pub fn require_payload<P: Any>(&self) -> Result<&P, StateError> {
        let payload = self
            .payload
            .as_deref()
            .ok_or_else(|| StateError::MissingPayload {
                action_type: self.action_type.to_string(),
            })?;

        payload
            .downcast_ref::<P>()
            .ok_or_else(|| StateError::PayloadTypeMismatch {
                action_type: self.action_type.to_string(),
                expected: type_name::<P>(),
            })
    }
}

// Manual Debug implementation since the payload is type-erased
impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("action_type", &self.action_type)
            .field("has_payload", &self.has_payload())
            .finish()
    }
}

/// A factory and matcher bound to one [`ActionType`].
///
/// `P` is the payload type produced by [`invoke_with`](Self::invoke_with);
/// creators for payload-less actions use the default `()`.
pub struct ActionCreator<P = ()> {
    action_type: ActionType,
    _payload: PhantomData<fn() -> P>,
}

impl<P> ActionCreator<P> {
    /// Bind a creator to an already validated type.
    #[must_use]
    pub const fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            _payload: PhantomData,
        }
    }

    /// Validate `raw` and bind a creator to it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidActionType`] if `raw` is not a valid type.
    pub fn parse(raw: &str) -> Result<Self, StateError> {
        ActionType::new(raw).map(Self::new)
    }

    /// The type produced and matched by this creator.
    #[must_use]
    pub const fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Create an action of this type without payload.
    #[must_use]
    pub fn invoke(&self) -> Action {
        Action::new(self.action_type.clone())
    }

    /// Whether `action` has this creator's type.
    #[must_use]
    pub fn matches(&self, action: &Action) -> bool {
        action.action_type == self.action_type
    }

    /// Drop the payload type, keeping the action type.
    #[must_use]
    pub fn untyped(&self) -> ActionCreator {
        ActionCreator::new(self.action_type.clone())
    }

    /// Re-bind the same action type to another payload type.
    #[must_use]
    pub fn with_payload<Q>(&self) -> ActionCreator<Q> {
        ActionCreator::new(self.action_type.clone())
    }
}

impl<P> ActionCreator<P>
where
    P: Any + Send + Sync,
{
    /// Create an action of this type carrying `payload`.
    #[must_use]
    pub fn invoke_with(&self, payload: P) -> Action {
        Action::with_payload(self.action_type.clone(), payload)
    }
}

impl<P> Clone for ActionCreator<P> {
    fn clone(&self) -> Self {
        Self::new(self.action_type.clone())
    }
}

impl<P> PartialEq for ActionCreator<P> {
    fn eq(&self, other: &Self) -> bool {
        self.action_type == other.action_type
    }
}

impl<P> Eq for ActionCreator<P> {}

impl<P> fmt::Debug for ActionCreator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("payload", &type_name::<P>())
            .finish()
    }
}

/// Create a payload-less action creator for `raw`.
///
/// # Errors
///
/// Returns [`StateError::InvalidActionType`] if `raw` is not a valid type.
pub fn create_action(raw: &str) -> Result<ActionCreator, StateError> {
    ActionCreator::parse(raw)
}

/// Create an action creator for `raw` whose actions carry a `P`.
///
/// # Errors
///
/// Returns [`StateError::InvalidActionType`] if `raw` is not a valid type.
pub fn create_payload_action<P>(raw: &str) -> Result<ActionCreator<P>, StateError>
where
    P: Any + Send + Sync,
{
    ActionCreator::parse(raw)
}

//! # Editor State Testing
//!
//! Testing utilities and helpers for the editor state store.
//!
//! This crate provides:
//! - A fluent Given-When-Then harness for reducers ([`ReducerTest`])
//! - Mock subscribers and history commands that record what happened to them
//! - Property-based testing strategies for action types
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```
//! use editor_state_runtime::Store;
//! use editor_state_testing::RecordingListener;
//!
//! let mut store = Store::new();
//! store
//!     .create_slice("Counter", 0_u32, |slice| {
//!         slice.add("Increment", |n, _| n + 1)?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let listener = RecordingListener::<u32>::new();
//! let _handle = store.subscribe("Counter", listener.callback()).unwrap();
//!
//! store.dispatch_type("Counter/Increment").unwrap();
//! store.dispatch_type("Counter/Increment").unwrap();
//! assert_eq!(listener.states(), [1, 2]);
//! ```

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock subscribers and history commands.
pub mod mocks {
    use editor_state_core::HistoryCommand;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Subscriber that records a clone of every state it is notified with
    ///
    /// Cloning the recorder shares the same log.
    #[derive(Debug)]
    pub struct RecordingListener<S> {
        states: Arc<Mutex<Vec<S>>>,
    }

    impl<S> Clone for RecordingListener<S> {
        fn clone(&self) -> Self {
            Self {
                states: Arc::clone(&self.states),
            }
        }
    }

    impl<S> Default for RecordingListener<S> {
        fn default() -> Self {
            Self {
                states: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl<S> RecordingListener<S>
    where
        S: Clone + Send + 'static,
    {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A listener to hand to `Store::subscribe`
        pub fn callback(&self) -> impl Fn(&S) + Send + Sync + 'static {
            let states = Arc::clone(&self.states);
            move |state: &S| {
                states
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(state.clone());
            }
        }

        /// Every state received so far, in notification order
        #[must_use]
        pub fn states(&self) -> Vec<S> {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of notifications received
        #[must_use]
        pub fn count(&self) -> usize {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// The most recent state, if any
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }
    }

    /// History command that counts how often it was undone and redone
    ///
    /// # Example
    ///
    /// ```
    /// use editor_state_core::HistoryStack;
    /// use editor_state_testing::CountingCommand;
    ///
    /// let history = HistoryStack::new();
    /// let counter = CountingCommand::new();
    /// history.push(counter.command("Move"));
    ///
    /// history.undo();
    /// history.redo();
    /// history.undo();
    /// assert_eq!((counter.undos(), counter.redos()), (2, 1));
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct CountingCommand {
        undos: Arc<AtomicUsize>,
        redos: Arc<AtomicUsize>,
    }

    impl CountingCommand {
        /// Create a counter with zero calls
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A command named `name` that increments this counter
        #[must_use]
        pub fn command(&self, name: &str) -> Arc<HistoryCommand> {
            let undos = Arc::clone(&self.undos);
            let redos = Arc::clone(&self.redos);
            Arc::new(HistoryCommand::new(
                name,
                move || {
                    undos.fetch_add(1, Ordering::SeqCst);
                },
                move || {
                    redos.fetch_add(1, Ordering::SeqCst);
                },
            ))
        }

        /// Number of undo calls
        #[must_use]
        pub fn undos(&self) -> usize {
            self.undos.load(Ordering::SeqCst)
        }

        /// Number of redo calls
        #[must_use]
        pub fn redos(&self) -> usize {
            self.redos.load(Ordering::SeqCst)
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use editor_state_core::HistoryCommand;
    use std::sync::Arc;

    /// Install a fmt subscriber honouring `RUST_LOG`, once per process
    ///
    /// Later calls (from other tests in the same binary) are no-ops.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }

    /// Names of `commands`, in list order
    #[must_use]
    pub fn command_names(commands: &[Arc<HistoryCommand>]) -> Vec<String> {
        commands.iter().map(|c| c.name().to_string()).collect()
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// A single `\w+` word
    pub fn word() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_]{1,12}"
    }

    /// A bare action type such as `Reset`
    pub fn bare_action_type() -> impl Strategy<Value = String> {
        word()
    }

    /// A slice-scoped action type such as `Scene/Rename`
    pub fn slice_action_type() -> impl Strategy<Value = String> {
        (word(), word()).prop_map(|(slice, action)| format!("{slice}/{action}"))
    }

    /// Either kind of valid action type
    pub fn action_type() -> impl Strategy<Value = String> {
        prop_oneof![bare_action_type(), slice_action_type()]
    }

    /// Strings that are not valid action types
    pub fn invalid_action_type() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("/".to_string()),
            word().prop_map(|w| format!("{w}/")),
            word().prop_map(|w| format!("/{w}")),
            (word(), word(), word()).prop_map(|(a, b, c)| format!("{a}/{b}/{c}")),
            (word(), word()).prop_map(|(a, b)| format!("{a} {b}")),
            (word(), word()).prop_map(|(a, b)| format!("{a}-{b}")),
        ]
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{CountingCommand, RecordingListener};

//! States of a labeled transition system.
//!
//! A state is nothing more than a name. Two states are the same state
//! exactly when their names are equal, so the same `State` value can be
//! shared by any number of systems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the component names of a composite state (`a/b`).
pub const STATE_NAME_SEPARATOR: &str = "/";

/// A named state.
///
/// Equality and hashing go through the name only.
///
/// # Example
///
/// ```rust
/// use lts_pullback::core::State;
///
/// let red = State::new("red");
/// let cross = State::new("cross");
///
/// assert_eq!(red, State::new("red"));
/// assert_eq!(State::combine(&red, &cross).name(), "red/cross");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    name: String,
}

impl State {
    /// Create a state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The state's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the composite state `left/right` used by pullbacks and
    /// coordination interfaces.
    ///
    /// Composite states are looked up again by this name, so the format is
    /// part of how those constructions find their own states.
    pub fn combine(left: &State, right: &State) -> State {
        State::new(format!(
            "{}{}{}",
            left.name, STATE_NAME_SEPARATOR, right.name
        ))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        State::new(name)
    }
}

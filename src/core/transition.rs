//! Labeled transitions between states.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved label of idle transitions, the self-loops meaning "no
/// observable change".
pub const IDLE_LABEL: &str = "*";

/// A directed, labeled edge from `source` to `target`.
///
/// Transitions are values: two transitions are equal when source, target
/// and label are all equal.
///
/// # Example
///
/// ```rust
/// use lts_pullback::core::{State, Transition};
///
/// let red = State::new("red");
/// let green = State::new("green");
/// let go = Transition::new(red.clone(), green, "go");
///
/// assert_eq!(go.to_string(), "red --go--> green");
/// assert!(Transition::idle(red).is_idle());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Transition {
    source: State,
    target: State,
    label: String,
}

impl Transition {
    /// Create a transition.
    pub fn new(source: State, target: State, label: impl Into<String>) -> Self {
        Self {
            source,
            target,
            label: label.into(),
        }
    }

    /// The idle self-loop at `state`.
    pub fn idle(state: State) -> Self {
        Self::new(state.clone(), state, IDLE_LABEL)
    }

    pub fn source(&self) -> &State {
        &self.source
    }

    pub fn target(&self) -> &State {
        &self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether source and target coincide.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Whether this is the idle self-loop of its source state.
    pub fn is_idle(&self) -> bool {
        self.is_self_loop() && self.label == IDLE_LABEL
    }

    /// Label of a transition that fires `left` and `right` together: `<left, right>`.
    pub fn combine_labels(left: &str, right: &str) -> String {
        format!("<{left}, {right}>")
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.source, self.label, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_equal_by_value() {
        let a = Transition::new(State::new("x"), State::new("y"), "t");
        let b = Transition::new(State::new("x"), State::new("y"), "t");
        let c = Transition::new(State::new("x"), State::new("y"), "u");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn idle_transition_is_labeled_self_loop() {
        let idle = Transition::idle(State::new("s"));

        assert_eq!(idle.source(), idle.target());
        assert_eq!(idle.label(), IDLE_LABEL);
        assert!(idle.is_idle());
    }

    #[test]
    fn self_loop_with_other_label_is_not_idle() {
        let looping = Transition::new(State::new("s"), State::new("s"), "tick");

        assert!(looping.is_self_loop());
        assert!(!looping.is_idle());
    }

    #[test]
    fn combine_labels_uses_angle_brackets() {
        assert_eq!(Transition::combine_labels("a", IDLE_LABEL), "<a, *>");
    }

    #[test]
    fn display_renders_arrow() {
        let t = Transition::new(State::new("1"), State::new("2"), "a");
        assert_eq!(t.to_string(), "1 --a--> 2");
    }
}

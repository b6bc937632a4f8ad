//! Immutable labeled transition systems.
//!
//! Systems are assembled with [`SystemBuilder`](crate::builder::SystemBuilder)
//! and never change afterwards. States and transitions keep their insertion
//! order, which makes derived names and the text rendering deterministic.

use super::state::State;
use super::transition::Transition;
use crate::builder::{BuildError, SystemBuilder};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A labeled transition system.
///
/// Invariants, upheld by the builder:
/// - the start state is one of the states
/// - both endpoints of every transition are states of the system
///
/// Only the empty system has no start state.
///
/// Equality compares start state, state set and transition set; insertion
/// order does not matter.
///
/// # Example
///
/// ```rust
/// use lts_pullback::builder::SystemBuilder;
/// use lts_pullback::core::{State, Transition};
///
/// let red = State::new("red");
/// let green = State::new("green");
///
/// let system = SystemBuilder::new()
///     .start_state(red.clone())
///     .add_transition(Transition::new(red, green, "go"))
///     .build()
///     .unwrap();
///
/// assert_eq!(system.to_string(), "States:[red, green]\nTransitions:\nred --go--> green");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "SystemParts")]
pub struct TransitionSystem {
    start_state: Option<State>,
    states: IndexSet<State>,
    transitions: IndexSet<Transition>,
}

impl TransitionSystem {
    pub(crate) fn from_parts(
        start_state: Option<State>,
        states: IndexSet<State>,
        transitions: IndexSet<Transition>,
    ) -> Self {
        Self {
            start_state,
            states,
            transitions,
        }
    }

    /// The system without states or transitions.
    ///
    /// It has no start state, so it can only serve as the source of a
    /// morphism that needs no mappings.
    pub fn empty() -> Self {
        Self::from_parts(None, IndexSet::new(), IndexSet::new())
    }

    /// Whether the system has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn start_state(&self) -> Option<&State> {
        self.start_state.as_ref()
    }

    pub fn states(&self) -> &IndexSet<State> {
        &self.states
    }

    pub fn transitions(&self) -> &IndexSet<Transition> {
        &self.transitions
    }

    pub fn contains_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    pub fn contains_transition(&self, transition: &Transition) -> bool {
        self.transitions.contains(transition)
    }

    /// The idle self-loop at `state`, if the system has one.
    pub fn idle_transition(&self, state: &State) -> Option<&Transition> {
        self.transitions.get(&Transition::idle(state.clone()))
    }
}

impl fmt::Display for TransitionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("States:[")?;
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{state}")?;
        }
        f.write_str("]\nTransitions:\n")?;
        for (i, transition) in self.transitions.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            write!(f, "{transition}")?;
        }
        Ok(())
    }
}

/// Wire shape of a system. Deserialized parts are replayed through the
/// builder so a decoded system satisfies the same invariants as a built one.
#[derive(Deserialize)]
struct SystemParts {
    start_state: Option<State>,
    #[serde(default)]
    states: Vec<State>,
    #[serde(default)]
    transitions: Vec<Transition>,
}

impl TryFrom<SystemParts> for TransitionSystem {
    type Error = BuildError;

    fn try_from(parts: SystemParts) -> Result<Self, Self::Error> {
        if parts.start_state.is_none() && parts.states.is_empty() && parts.transitions.is_empty()
        {
            return Ok(TransitionSystem::empty());
        }

        let mut builder = SystemBuilder::new();
        if let Some(start) = parts.start_state {
            builder = builder.start_state(start);
        }
        let builder = parts
            .states
            .into_iter()
            .fold(builder, SystemBuilder::add_state);
        parts
            .transitions
            .into_iter()
            .fold(builder, SystemBuilder::add_transition)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IDLE_LABEL;

    fn traffic_light() -> TransitionSystem {
        let red = State::new("red");
        let green = State::new("green");
        SystemBuilder::new()
            .start_state(red.clone())
            .add_transition(Transition::new(red.clone(), green.clone(), "go"))
            .add_transition(Transition::new(green, red, "stop"))
            .build_with_idle_transitions()
            .unwrap()
    }

    #[test]
    fn empty_system_has_nothing() {
        let empty = TransitionSystem::empty();

        assert!(empty.is_empty());
        assert!(empty.start_state().is_none());
        assert!(empty.transitions().is_empty());
        assert_eq!(empty, TransitionSystem::empty());
    }

    #[test]
    fn idle_transition_lookup() {
        let system = traffic_light();

        let idle = system.idle_transition(&State::new("green")).unwrap();
        assert_eq!(idle.label(), IDLE_LABEL);
        assert!(system.idle_transition(&State::new("blue")).is_none());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = State::new("a");
        let b = State::new("b");
        let forward = SystemBuilder::new()
            .start_state(a.clone())
            .add_state(b.clone())
            .build()
            .unwrap();
        let backward = SystemBuilder::new()
            .add_state(b)
            .start_state(a)
            .build()
            .unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn display_matches_canonical_rendering() {
        let system = traffic_light();

        assert_eq!(
            system.to_string(),
            "States:[red, green]\n\
             Transitions:\n\
             red --go--> green,\n\
             green --stop--> red,\n\
             red --*--> red,\n\
             green --*--> green"
        );
    }

    #[test]
    fn empty_system_renders_without_entries() {
        assert_eq!(TransitionSystem::empty().to_string(), "States:[]\nTransitions:\n");
    }

    #[test]
    fn system_serializes_correctly() {
        let system = traffic_light();

        let json = serde_json::to_string(&system).unwrap();
        let deserialized: TransitionSystem = serde_json::from_str(&json).unwrap();

        assert_eq!(system, deserialized);
        assert_eq!(system.to_string(), deserialized.to_string());
    }

    #[test]
    fn deserialization_registers_transition_endpoints() {
        let json = r#"{
            "start_state": "a",
            "transitions": [{"source": "a", "target": "b", "label": "x"}]
        }"#;

        let system: TransitionSystem = serde_json::from_str(json).unwrap();

        assert!(system.contains_state(&State::new("b")));
    }

    #[test]
    fn deserialization_rejects_missing_start_state() {
        let json = r#"{"start_state": null, "states": ["a"], "transitions": []}"#;

        let result: Result<TransitionSystem, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn empty_system_round_trips() {
        let json = serde_json::to_string(&TransitionSystem::empty()).unwrap();
        let deserialized: TransitionSystem = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, TransitionSystem::empty());
    }
}

//! Builder for constructing transition systems.

use crate::builder::error::BuildError;
use crate::core::{State, Transition, TransitionSystem};
use indexmap::IndexSet;

/// Builder for transition systems with a fluent API.
///
/// States and transitions are kept in insertion order. Adding a transition
/// registers both of its endpoints.
#[derive(Clone, Debug, Default)]
pub struct SystemBuilder {
    start: Option<State>,
    states: IndexSet<State>,
    transitions: IndexSet<Transition>,
}

impl SystemBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start state (required). The state is registered as well.
    pub fn start_state(mut self, state: State) -> Self {
        self.states.insert(state.clone());
        self.start = Some(state);
        self
    }

    /// Register a state. Adding a known state again has no effect.
    pub fn add_state(mut self, state: State) -> Self {
        self.states.insert(state);
        self
    }

    /// Add a transition together with its source and target states.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.states.insert(transition.source().clone());
        self.states.insert(transition.target().clone());
        self.transitions.insert(transition);
        self
    }

    /// States registered so far.
    pub fn states(&self) -> &IndexSet<State> {
        &self.states
    }

    /// Transitions registered so far.
    pub fn transitions(&self) -> &IndexSet<Transition> {
        &self.transitions
    }

    /// Build the transition system.
    /// Returns an error if no start state was set.
    pub fn build(self) -> Result<TransitionSystem, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;
        Ok(TransitionSystem::from_parts(
            Some(start),
            self.states,
            self.transitions,
        ))
    }

    /// Add an idle self-loop to every registered state, then build.
    pub fn build_with_idle_transitions(mut self) -> Result<TransitionSystem, BuildError> {
        let idle: Vec<Transition> = self.states.iter().cloned().map(Transition::idle).collect();
        self.transitions.extend(idle);
        self.build()
    }
}

impl From<&TransitionSystem> for SystemBuilder {
    /// Start from the contents of an existing system.
    fn from(system: &TransitionSystem) -> Self {
        Self {
            start: system.start_state().cloned(),
            states: system.states().clone(),
            transitions: system.transitions().clone(),
        }
    }
}

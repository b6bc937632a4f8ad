//! Structure-preserving maps between transition systems.
//!
//! A morphism maps every state and every transition of its source into its
//! target so that each transition's image starts at the image of its source
//! state and ends at the image of its target state.

use super::error::{Endpoint, MorphismError};
use super::state::State;
use super::system::TransitionSystem;
use super::transition::Transition;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Validation outcome listing every violated morphism law.
pub type MorphismValidation = Validation<(), NonEmptyVec<MorphismError>>;

/// Check the morphism laws, accumulating ALL violations.
///
/// Violations are reported in this order: mapping keys outside the source,
/// totality (states, then transitions), images outside the target, and
/// commuting-square violations in transition-mapping order.
pub fn validate(
    source: &TransitionSystem,
    target: &TransitionSystem,
    state_mapping: &IndexMap<State, State>,
    transition_mapping: &IndexMap<Transition, Transition>,
) -> MorphismValidation {
    let mut checks: Vec<MorphismValidation> = Vec::new();

    for state in state_mapping.keys() {
        if !source.contains_state(state) {
            checks.push(Validation::fail(MorphismError::StateNotInSource {
                state: state.clone(),
            }));
        }
    }

    for transition in transition_mapping.keys() {
        if !source.contains_transition(transition) {
            checks.push(Validation::fail(MorphismError::TransitionNotInSource {
                transition: transition.clone(),
            }));
        }
    }

    for state in source.states() {
        if !state_mapping.contains_key(state) {
            checks.push(Validation::fail(MorphismError::NonTotalStateMapping {
                state: state.clone(),
            }));
        }
    }

    for transition in source.transitions() {
        if !transition_mapping.contains_key(transition) {
            checks.push(Validation::fail(MorphismError::NonTotalTransitionMapping {
                transition: transition.clone(),
            }));
        }
    }

    for (state, image) in state_mapping {
        if !target.contains_state(image) {
            checks.push(Validation::fail(MorphismError::StateImageNotInTarget {
                state: state.clone(),
                image: image.clone(),
            }));
        }
    }

    for (transition, image) in transition_mapping {
        if !target.contains_transition(image) {
            checks.push(Validation::fail(MorphismError::TransitionImageNotInTarget {
                transition: transition.clone(),
                image: image.clone(),
            }));
        }
    }

    for (transition, image) in transition_mapping {
        let ends = [
            (Endpoint::Source, transition.source(), image.source()),
            (Endpoint::Target, transition.target(), image.target()),
        ];
        for (endpoint, state, image_state) in ends {
            // unmapped endpoints are already reported as totality violations
            if let Some(expected) = state_mapping.get(state) {
                if expected != image_state {
                    checks.push(Validation::fail(MorphismError::MappingMismatch {
                        transition: transition.clone(),
                        image: image.clone(),
                        endpoint,
                        expected: expected.clone(),
                    }));
                }
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// A validated morphism between two transition systems.
///
/// Both systems are shared behind `Arc`, so many morphisms can point at the
/// same system without copying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morphism {
    source: Arc<TransitionSystem>,
    target: Arc<TransitionSystem>,
    state_mapping: IndexMap<State, State>,
    transition_mapping: IndexMap<Transition, Transition>,
}

impl Morphism {
    /// Construct a morphism, failing on the first violated law.
    ///
    /// Mapping keys must belong to `source` and images to `target`.
    ///
    /// Use [`validate`] to see every violation at once.
    pub fn new(
        source: Arc<TransitionSystem>,
        target: Arc<TransitionSystem>,
        state_mapping: IndexMap<State, State>,
        transition_mapping: IndexMap<Transition, Transition>,
    ) -> Result<Self, MorphismError> {
        if let Validation::Failure(errors) =
            validate(&source, &target, &state_mapping, &transition_mapping)
        {
            if let Some(first) = errors.iter().next() {
                return Err(first.clone());
            }
        }

        Ok(Self {
            source,
            target,
            state_mapping,
            transition_mapping,
        })
    }

    pub fn source(&self) -> &TransitionSystem {
        &self.source
    }

    pub fn target(&self) -> &TransitionSystem {
        &self.target
    }

    /// Shared handle to the source system.
    pub fn shared_source(&self) -> Arc<TransitionSystem> {
        Arc::clone(&self.source)
    }

    pub fn state_mapping(&self) -> &IndexMap<State, State> {
        &self.state_mapping
    }

    pub fn transition_mapping(&self) -> &IndexMap<Transition, Transition> {
        &self.transition_mapping
    }

    pub fn map_state(&self, state: &State) -> Option<&State> {
        self.state_mapping.get(state)
    }

    pub fn map_transition(&self, transition: &Transition) -> Option<&Transition> {
        self.transition_mapping.get(transition)
    }

    /// Image of `state`, or [`MorphismError::UnmappedState`] if it is not in the source.
    pub fn try_map_state(&self, state: &State) -> Result<&State, MorphismError> {
        self.map_state(state)
            .ok_or_else(|| MorphismError::UnmappedState {
                state: state.clone(),
            })
    }

    /// Image of `transition`, or [`MorphismError::UnmappedTransition`].
    pub fn try_map_transition(&self, transition: &Transition) -> Result<&Transition, MorphismError> {
        self.map_transition(transition)
            .ok_or_else(|| MorphismError::UnmappedTransition {
                transition: transition.clone(),
            })
    }
}

impl fmt::Display for Morphism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From:\n{}\nTo:\n{}", self.source, self.target)?;
        f.write_str("\nState mapping:")?;
        for (from, to) in &self.state_mapping {
            write!(f, "\n{from} -> {to}")?;
        }
        f.write_str("\nTransition mapping:")?;
        for (from, to) in &self.transition_mapping {
            write!(f, "\n({from}) -> ({to})")?;
        }
        Ok(())
    }
}

//! Morphism validation errors.

use super::state::State;
use super::transition::Transition;
use std::fmt;
use thiserror::Error;

/// End of a transition that failed the commuting-square check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Violations of the morphism laws.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MorphismError {
    #[error("State mapping must be total: state '{state}' has no image")]
    NonTotalStateMapping { state: State },

    #[error("Transition mapping must be total: transition '{transition}' has no image")]
    NonTotalTransitionMapping { transition: Transition },

    #[error(
        "State and transition mapping do not match for the {endpoint} state of '{transition}': \
         the transition is mapped to '{image}' but the {endpoint} state to '{expected}'"
    )]
    MappingMismatch {
        transition: Transition,
        image: Transition,
        endpoint: Endpoint,
        expected: State,
    },

    #[error("State mapping has key '{state}' which is not a state of the source")]
    StateNotInSource { state: State },

    #[error("Transition mapping has key '{transition}' which is not a transition of the source")]
    TransitionNotInSource { transition: Transition },

    #[error("State '{state}' is mapped to '{image}' which is not a state of the target")]
    StateImageNotInTarget { state: State, image: State },

    #[error(
        "Transition '{transition}' is mapped to '{image}' which is not a transition of the target"
    )]
    TransitionImageNotInTarget {
        transition: Transition,
        image: Transition,
    },

    #[error("State '{state}' is not part of the state mapping")]
    UnmappedState { state: State },

    #[error("Transition '{transition}' is not part of the transition mapping")]
    UnmappedTransition { transition: Transition },
}

//! Build errors for system and morphism builders.

use crate::core::{MorphismError, State, Transition};
use std::fmt;
use thiserror::Error;

/// Which side of a morphism under construction an element was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemRole {
    Source,
    Target,
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors that can occur when building transition systems and morphisms.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Start state not specified. Call .start_state(state) before .build()")]
    MissingStartState,

    #[error("Source system not specified. Call .source(system) before adding mappings")]
    MissingSource,

    #[error("Target system not specified. Call .target(system) before adding mappings")]
    MissingTarget,

    #[error("State '{state}' is not part of the {role} system")]
    UnknownState { state: State, role: SystemRole },

    #[error("Transition '{transition}' is not part of the {role} system")]
    UnknownTransition {
        transition: Transition,
        role: SystemRole,
    },

    #[error("State '{state}' is already mapped to '{existing}', cannot map it to '{requested}'")]
    InconsistentStateMapping {
        state: State,
        existing: State,
        requested: State,
    },

    #[error(
        "Transition '{transition}' is already mapped to '{existing}', cannot map it to '{requested}'"
    )]
    InconsistentTransitionMapping {
        transition: Transition,
        existing: Transition,
        requested: Transition,
    },

    #[error("No idle transition at state '{state}' in the {role} system")]
    NoIdleTransition { state: State, role: SystemRole },

    #[error(
        "Start states have to be mapped to start states: '{state}' is mapped to '{mapped}' \
         instead of '{expected}'"
    )]
    StartStateMismatch {
        state: State,
        mapped: State,
        expected: State,
    },

    #[error(transparent)]
    Morphism(#[from] MorphismError),
}

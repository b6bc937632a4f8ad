//! Pullback and coordination-interface errors.

use crate::builder::BuildError;
use crate::core::{MorphismError, State, Transition};
use std::fmt;
use thiserror::Error;

/// The two independent systems of a coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors raised while forming cospans, pullbacks and coordination interfaces.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PullbackError {
    #[error("Cospan morphisms must share their target system")]
    CospanTargetMismatch,

    #[error("Pullback projections must share their source system")]
    ProjectionSourceMismatch,

    #[error(
        "Start state mappings do not match in pullback calculation: \
         '{left}' and '{right}' have different images"
    )]
    NoCommonStartState { left: State, right: State },

    #[error(
        "Composite state name '{name}' of '{left}' and '{right}' is already taken by another pair"
    )]
    AmbiguousCompositeName {
        name: String,
        left: State,
        right: State,
    },

    #[error("Composite state '{name}' was never constructed")]
    MissingCompositeState { name: String },

    #[error("Interaction transition '{transition}' is not part of the {side} system")]
    TransitionNotInSystem { transition: Transition, side: Side },

    #[error("Transition '{transition}' of the {side} system takes part in more than one interaction")]
    DuplicateInteraction { transition: Transition, side: Side },

    #[error(
        "Incompatible mapping detected: '{first}' is mapped to '{first_image}' \
         but '{second}' to '{second_image}'"
    )]
    IncompatibleStateMerge {
        first: State,
        second: State,
        first_image: State,
        second_image: State,
    },

    #[error(
        "Equivalence propagation made no progress on the {side} system, \
         {} transitions cannot reach a mapped state", .unmapped.len()
    )]
    StuckClosure {
        side: Side,
        unmapped: Vec<Transition>,
    },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Morphism(#[from] MorphismError),
}

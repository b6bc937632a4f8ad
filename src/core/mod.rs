//! Core value types of labeled transition systems.
//!
//! This module contains the frozen entities:
//! - `State` and `Transition`, plain values compared by content
//! - `TransitionSystem`, an immutable start state, state set and transition set
//! - `Morphism`, a validated structure-preserving map between two systems
//!
//! Nothing here mutates after construction. Incremental assembly lives in
//! [`crate::builder`].

mod error;
pub mod morphism;
mod state;
mod system;
mod transition;

pub use error::{Endpoint, MorphismError};
pub use morphism::{Morphism, MorphismValidation};
pub use state::{State, STATE_NAME_SEPARATOR};
pub use system::TransitionSystem;
pub use transition::{Transition, IDLE_LABEL};

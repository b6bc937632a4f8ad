//! Labeled transition systems, their morphisms and pullbacks.
//!
//! A transition system is a start state, a set of states and a set of labeled
//! transitions. Morphisms map one system into another while preserving the
//! transition structure. Two morphisms into a shared interface form a cospan;
//! its pullback is the synchronized product of the two systems, in which
//! paired transitions fire together and everything else interleaves.
//!
//! # Core Concepts
//!
//! - **State / Transition**: plain values compared by name, endpoints and label
//! - **TransitionSystem**: immutable, built through [`builder::SystemBuilder`]
//! - **Morphism**: total, structure-preserving maps, built through
//!   [`builder::MorphismBuilder`]
//! - **Pullback**: [`pullback::PullbackResult::calculate`] over a
//!   [`pullback::Cospan`]
//! - **Coordination**: [`pullback::calc_coordination_interface`] derives the
//!   interface from explicit handshakes
//!
//! # Example
//!
//! ```rust
//! use lts_pullback::core::{State, Transition};
//! use lts_pullback::pullback::{calc_coordination_interface, PullbackResult};
//! use lts_pullback::transition_system;
//!
//! let client = transition_system! {
//!     idle start: "idle";
//!     "idle" => "waiting" : "request",
//!     "waiting" => "idle" : "response",
//! }?;
//! let server = transition_system! {
//!     idle start: "ready";
//!     "ready" => "busy" : "accept",
//!     "busy" => "ready" : "reply",
//! }?;
//!
//! let request = Transition::new(State::new("idle"), State::new("waiting"), "request");
//! let accept = Transition::new(State::new("ready"), State::new("busy"), "accept");
//! let response = Transition::new(State::new("waiting"), State::new("idle"), "response");
//! let reply = Transition::new(State::new("busy"), State::new("ready"), "reply");
//!
//! let cospan = calc_coordination_interface(
//!     client,
//!     server,
//!     [(&request, &accept), (&response, &reply)],
//! )?;
//! let product = PullbackResult::calculate(&cospan)?;
//!
//! assert!(product.commutes_over(&cospan));
//! assert_eq!(product.system().states().len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod pullback;

// Re-export commonly used types
pub use builder::{BuildError, MorphismBuilder, SystemBuilder};
pub use core::{Morphism, MorphismError, State, Transition, TransitionSystem};
pub use pullback::{calc_coordination_interface, Cospan, PullbackError, PullbackResult};

//! Cospans, pullbacks and coordination interfaces.
//!
//! A [`Cospan`] `A --i1--> Z <--i2-- B` relates two systems through a shared
//! interface `Z`. Its pullback is the system `P` of all pairs of states and
//! transitions of `A` and `B` that agree in `Z`, together with the
//! projections `m1: P -> A` and `m2: P -> B`.
//!
//! [`calc_coordination_interface`] goes the other way: given two systems and
//! the pairs of transitions that must fire together, it synthesizes `Z` and
//! the cospan.
//!
//! # Example
//!
//! ```rust
//! use lts_pullback::builder::MorphismBuilder;
//! use lts_pullback::core::{State, Transition};
//! use lts_pullback::pullback::{Cospan, PullbackResult};
//! use lts_pullback::transition_system;
//!
//! let left = transition_system! { start: "l"; "l" => "l" : "tick" }?;
//! let right = transition_system! { start: "r"; "r" => "r" : "tock" }?;
//! let shared = transition_system! { start: "z"; "z" => "z" : "beat" }?;
//!
//! let beat = Transition::new(State::new("z"), State::new("z"), "beat");
//! let tick = Transition::new(State::new("l"), State::new("l"), "tick");
//! let tock = Transition::new(State::new("r"), State::new("r"), "tock");
//!
//! let i1 = MorphismBuilder::new().source(left).target(shared.clone())
//!     .add_transition_mapping(&tick, &beat)?.build()?;
//! let i2 = MorphismBuilder::new().source(right).target(shared)
//!     .add_transition_mapping(&tock, &beat)?.build()?;
//!
//! let result = PullbackResult::calculate(&Cospan::new(i1, i2)?)?;
//! assert_eq!(
//!     result.system().to_string(),
//!     "States:[l/r]\nTransitions:\nl/r --<tick, tock>--> l/r"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod coordination;
pub mod error;

pub use coordination::calc_coordination_interface;
pub use error::{PullbackError, Side};

use crate::builder::{MorphismBuilder, SystemBuilder};
use crate::core::{Morphism, State, Transition, TransitionSystem};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Two morphisms `i1: A -> Z` and `i2: B -> Z` into the same system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cospan {
    i1: Morphism,
    i2: Morphism,
}

impl Cospan {
    /// Pair two morphisms. Fails if their targets differ.
    pub fn new(i1: Morphism, i2: Morphism) -> Result<Self, PullbackError> {
        if i1.target() != i2.target() {
            return Err(PullbackError::CospanTargetMismatch);
        }
        Ok(Self { i1, i2 })
    }

    pub fn i1(&self) -> &Morphism {
        &self.i1
    }

    pub fn i2(&self) -> &Morphism {
        &self.i2
    }

    /// The shared target system `Z`.
    pub fn target(&self) -> &TransitionSystem {
        self.i1.target()
    }
}

/// The pullback system `P` with its projections `m1: P -> A` and `m2: P -> B`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PullbackResult {
    m1: Morphism,
    m2: Morphism,
}

impl PullbackResult {
    /// Pair two projections. Fails if their sources differ.
    pub fn new(m1: Morphism, m2: Morphism) -> Result<Self, PullbackError> {
        if m1.source() != m2.source() {
            return Err(PullbackError::ProjectionSourceMismatch);
        }
        Ok(Self { m1, m2 })
    }

    pub fn m1(&self) -> &Morphism {
        &self.m1
    }

    pub fn m2(&self) -> &Morphism {
        &self.m2
    }

    /// The pullback system `P`.
    pub fn system(&self) -> &TransitionSystem {
        self.m1.source()
    }

    /// Compute the pullback of `cospan`.
    ///
    /// States of `P` are the pairs `a/b` with `i1(a) == i2(b)`; transitions
    /// are the pairs `<l1, l2>` with `i1(t1) == i2(t2)`. Both cross joins run
    /// in insertion order, `A` outer, so names and rendering are stable.
    ///
    /// If either leg starts at the empty system the pullback is the empty
    /// system. Otherwise the pair of start states has to be part of `P`.
    pub fn calculate(cospan: &Cospan) -> Result<Self, PullbackError> {
        let (i1, i2) = (cospan.i1(), cospan.i2());
        let (left, right) = (i1.source(), i2.source());

        let (Some(left_start), Some(right_start)) = (left.start_state(), right.start_state())
        else {
            debug!("cospan has an empty leg, pullback is the empty system");
            return Self::empty(cospan);
        };

        debug!(
            left_states = left.states().len(),
            right_states = right.states().len(),
            left_transitions = left.transitions().len(),
            right_transitions = right.transitions().len(),
            "calculating pullback"
        );

        let mut builder = SystemBuilder::new();
        let mut left_states = IndexMap::new();
        let mut right_states = IndexMap::new();
        let mut start = None;

        for a in left.states() {
            let a_image = i1.try_map_state(a)?;
            for b in right.states() {
                if a_image != i2.try_map_state(b)? {
                    continue;
                }
                let combined = State::combine(a, b);
                // each pair is visited once, so a known name belongs to another pair
                if left_states.contains_key(&combined) {
                    return Err(PullbackError::AmbiguousCompositeName {
                        name: combined.name().to_string(),
                        left: a.clone(),
                        right: b.clone(),
                    });
                }
                trace!(state = %combined, image = %a_image, "pullback state");
                if start.is_none() && a == left_start && b == right_start {
                    start = Some(combined.clone());
                }
                left_states.insert(combined.clone(), a.clone());
                right_states.insert(combined.clone(), b.clone());
                builder = builder.add_state(combined);
            }
        }

        let start = start.ok_or_else(|| PullbackError::NoCommonStartState {
            left: left_start.clone(),
            right: right_start.clone(),
        })?;
        builder = builder.start_state(start);

        let mut left_transitions = IndexMap::new();
        let mut right_transitions = IndexMap::new();

        for t1 in left.transitions() {
            let t1_image = i1.try_map_transition(t1)?;
            for t2 in right.transitions() {
                if t1_image != i2.try_map_transition(t2)? {
                    continue;
                }
                let source = composite_state(&builder, t1.source(), t2.source())?;
                let target = composite_state(&builder, t1.target(), t2.target())?;
                let transition = Transition::new(
                    source,
                    target,
                    Transition::combine_labels(t1.label(), t2.label()),
                );
                trace!(%transition, image = %t1_image, "pullback transition");
                left_transitions.insert(transition.clone(), t1.clone());
                right_transitions.insert(transition.clone(), t2.clone());
                builder = builder.add_transition(transition);
            }
        }

        let system = Arc::new(builder.build()?);
        debug!(
            states = system.states().len(),
            transitions = system.transitions().len(),
            "pullback calculated"
        );

        let m1 = projection(&system, i1.shared_source(), &left_states, &left_transitions)?;
        let m2 = projection(&system, i2.shared_source(), &right_states, &right_transitions)?;
        Self::new(m1, m2)
    }

    /// Whether the square over `cospan` commutes on every state and
    /// transition of the pullback.
    pub fn commutes_over(&self, cospan: &Cospan) -> bool {
        let states_commute = self.system().states().iter().all(|p| {
            let via_left = self.m1.map_state(p).and_then(|a| cospan.i1().map_state(a));
            let via_right = self.m2.map_state(p).and_then(|b| cospan.i2().map_state(b));
            via_left.is_some() && via_left == via_right
        });
        let transitions_commute = self.system().transitions().iter().all(|t| {
            let via_left = self
                .m1
                .map_transition(t)
                .and_then(|t1| cospan.i1().map_transition(t1));
            let via_right = self
                .m2
                .map_transition(t)
                .and_then(|t2| cospan.i2().map_transition(t2));
            via_left.is_some() && via_left == via_right
        });
        states_commute && transitions_commute
    }

    fn empty(cospan: &Cospan) -> Result<Self, PullbackError> {
        let system = Arc::new(TransitionSystem::empty());
        let m1 = MorphismBuilder::new()
            .source(Arc::clone(&system))
            .target(cospan.i1().shared_source())
            .build()?;
        let m2 = MorphismBuilder::new()
            .source(system)
            .target(cospan.i2().shared_source())
            .build()?;
        Self::new(m1, m2)
    }
}

/// Find the already constructed composite state `left/right` by name.
fn composite_state(
    builder: &SystemBuilder,
    left: &State,
    right: &State,
) -> Result<State, PullbackError> {
    let combined = State::combine(left, right);
    builder
        .states()
        .get(&combined)
        .cloned()
        .ok_or_else(|| PullbackError::MissingCompositeState {
            name: combined.name().to_string(),
        })
}

fn projection(
    system: &Arc<TransitionSystem>,
    target: Arc<TransitionSystem>,
    states: &IndexMap<State, State>,
    transitions: &IndexMap<Transition, Transition>,
) -> Result<Morphism, PullbackError> {
    let mut builder = MorphismBuilder::new()
        .source(Arc::clone(system))
        .target(target);
    for (from, to) in states {
        builder = builder.add_state_mapping(from, to)?;
    }
    for (from, to) in transitions {
        builder = builder.add_transition_mapping(from, to)?;
    }
    Ok(builder.build()?)
}

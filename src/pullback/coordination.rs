//! Synthesis of coordination interfaces.
//!
//! Two systems synchronize on explicitly paired transitions (handshakes).
//! Every handshake becomes one interface transition; the endpoints of paired
//! transitions are merged into interface states. All other transitions are
//! autonomous: they keep the interface where it is, so their endpoints inherit
//! the interface state of a neighbour until nothing is left to propagate.

use super::error::{PullbackError, Side};
use super::Cospan;
use crate::builder::{BuildError, MorphismBuilder, SystemBuilder};
use crate::core::{Morphism, State, Transition, TransitionSystem};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Build the coordination interface of `ts1` and `ts2` as a cospan
/// `ts1 --m1--> C <--m2-- ts2`.
///
/// `interactions` pairs transitions of `ts1` with transitions of `ts2` that
/// fire together. Each transition may take part in at most one interaction.
/// The pairs are processed in iteration order, which fixes the names and
/// the order of the interface states.
///
/// Both systems need idle transitions; the resulting morphisms map every
/// autonomous transition to an idle transition of `C`.
///
/// # Example
///
/// ```rust
/// use lts_pullback::core::{State, Transition};
/// use lts_pullback::pullback::{calc_coordination_interface, PullbackResult};
/// use lts_pullback::transition_system;
///
/// let sender = transition_system! { idle start: "ready"; "ready" => "sent" : "send" }?;
/// let receiver = transition_system! { idle start: "waiting"; "waiting" => "got" : "receive" }?;
///
/// let send = Transition::new(State::new("ready"), State::new("sent"), "send");
/// let receive = Transition::new(State::new("waiting"), State::new("got"), "receive");
///
/// let cospan = calc_coordination_interface(sender, receiver, [(&send, &receive)])?;
/// let interface = cospan.target();
///
/// assert!(interface.contains_state(&State::new("sent/got")));
/// assert_eq!(PullbackResult::calculate(&cospan)?.system().states().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn calc_coordination_interface<'a, I>(
    ts1: impl Into<Arc<TransitionSystem>>,
    ts2: impl Into<Arc<TransitionSystem>>,
    interactions: I,
) -> Result<Cospan, PullbackError>
where
    I: IntoIterator<Item = (&'a Transition, &'a Transition)>,
{
    let ts1 = ts1.into();
    let ts2 = ts2.into();
    let interactions = checked_interactions(&ts1, &ts2, interactions)?;

    let left_start = ts1.start_state().ok_or(BuildError::MissingStartState)?;
    let right_start = ts2.start_state().ok_or(BuildError::MissingStartState)?;
    let mut synthesis = Synthesis::new(left_start, right_start);

    for (t1, t2) in &interactions {
        synthesis.synchronize(t1, t2)?;
    }

    let left_pending: Vec<Transition> = ts1
        .transitions()
        .iter()
        .filter(|t| !synthesis.left_transitions.contains_key(*t))
        .cloned()
        .collect();
    close(left_pending, &mut synthesis.left_states, Side::Left)?;

    let right_pending: Vec<Transition> = ts2
        .transitions()
        .iter()
        .filter(|t| !synthesis.right_transitions.contains_key(*t))
        .cloned()
        .collect();
    close(right_pending, &mut synthesis.right_states, Side::Right)?;

    let interface = Arc::new(synthesis.interface()?);
    debug!(
        interactions = interactions.len(),
        states = interface.states().len(),
        transitions = interface.transitions().len(),
        "coordination interface synthesized"
    );

    let m1 = seeded_morphism(
        ts1,
        Arc::clone(&interface),
        &synthesis.left_states,
        &synthesis.left_transitions,
    )?;
    let m2 = seeded_morphism(
        ts2,
        interface,
        &synthesis.right_states,
        &synthesis.right_transitions,
    )?;
    Cospan::new(m1, m2)
}

/// Check that every pair belongs to the claimed systems and that no
/// transition is paired twice.
fn checked_interactions<'a, I>(
    ts1: &TransitionSystem,
    ts2: &TransitionSystem,
    interactions: I,
) -> Result<Vec<(Transition, Transition)>, PullbackError>
where
    I: IntoIterator<Item = (&'a Transition, &'a Transition)>,
{
    let mut seen_left = IndexSet::new();
    let mut seen_right = IndexSet::new();
    let mut pairs = Vec::new();

    for (t1, t2) in interactions {
        if !ts1.contains_transition(t1) {
            return Err(PullbackError::TransitionNotInSystem {
                transition: t1.clone(),
                side: Side::Left,
            });
        }
        if !ts2.contains_transition(t2) {
            return Err(PullbackError::TransitionNotInSystem {
                transition: t2.clone(),
                side: Side::Right,
            });
        }
        if !seen_left.insert(t1) {
            return Err(PullbackError::DuplicateInteraction {
                transition: t1.clone(),
                side: Side::Left,
            });
        }
        if !seen_right.insert(t2) {
            return Err(PullbackError::DuplicateInteraction {
                transition: t2.clone(),
                side: Side::Right,
            });
        }
        pairs.push((t1.clone(), t2.clone()));
    }

    Ok(pairs)
}

/// Interface under construction plus the equivalence maps from each side
/// into it.
struct Synthesis {
    start: State,
    states: IndexSet<State>,
    transitions: IndexSet<Transition>,
    left_states: IndexMap<State, State>,
    right_states: IndexMap<State, State>,
    left_transitions: IndexMap<Transition, Transition>,
    right_transitions: IndexMap<Transition, Transition>,
}

impl Synthesis {
    fn new(left_start: &State, right_start: &State) -> Self {
        let start = State::combine(left_start, right_start);
        Self {
            states: IndexSet::from([start.clone()]),
            transitions: IndexSet::new(),
            left_states: IndexMap::from([(left_start.clone(), start.clone())]),
            right_states: IndexMap::from([(right_start.clone(), start.clone())]),
            left_transitions: IndexMap::new(),
            right_transitions: IndexMap::new(),
            start,
        }
    }

    fn synchronize(&mut self, t1: &Transition, t2: &Transition) -> Result<(), PullbackError> {
        let source = self.merge(t1.source(), t2.source())?;
        let target = self.merge(t1.target(), t2.target())?;
        let handshake = Transition::new(
            source,
            target,
            Transition::combine_labels(t1.label(), t2.label()),
        );
        trace!(%handshake, "interface transition");

        self.transitions.insert(handshake.clone());
        self.left_transitions.insert(t1.clone(), handshake.clone());
        self.right_transitions.insert(t2.clone(), handshake);
        Ok(())
    }

    /// Put `left` and `right` into the same interface state and return it.
    fn merge(&mut self, left: &State, right: &State) -> Result<State, PullbackError> {
        let left_image = self.left_states.get(left).cloned();
        let right_image = self.right_states.get(right).cloned();

        match (left_image, right_image) {
            (None, None) => {
                let combined = State::combine(left, right);
                // neither side is mapped yet, so a known name belongs to another pair
                if self.states.contains(&combined) {
                    return Err(PullbackError::AmbiguousCompositeName {
                        name: combined.name().to_string(),
                        left: left.clone(),
                        right: right.clone(),
                    });
                }
                self.left_states.insert(left.clone(), combined.clone());
                self.right_states.insert(right.clone(), combined.clone());
                self.states.insert(combined.clone());
                Ok(combined)
            }
            (Some(left_image), Some(right_image)) if left_image != right_image => {
                Err(PullbackError::IncompatibleStateMerge {
                    first: left.clone(),
                    second: right.clone(),
                    first_image: left_image,
                    second_image: right_image,
                })
            }
            (Some(image), Some(_)) => Ok(image),
            (Some(image), None) => {
                self.right_states.insert(right.clone(), image.clone());
                Ok(image)
            }
            (None, Some(image)) => {
                self.left_states.insert(left.clone(), image.clone());
                Ok(image)
            }
        }
    }

    fn interface(&self) -> Result<TransitionSystem, BuildError> {
        let builder = self
            .states
            .iter()
            .cloned()
            .fold(
                SystemBuilder::new().start_state(self.start.clone()),
                SystemBuilder::add_state,
            );
        self.transitions
            .iter()
            .cloned()
            .fold(builder, SystemBuilder::add_transition)
            .build_with_idle_transitions()
    }
}

/// Propagate interface states along autonomous transitions until every
/// pending transition has both endpoints mapped to the same interface state.
fn close(
    mut pending: Vec<Transition>,
    mapping: &mut IndexMap<State, State>,
    side: Side,
) -> Result<(), PullbackError> {
    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::new();

        for transition in pending {
            let source_image = mapping.get(transition.source()).cloned();
            let target_image = mapping.get(transition.target()).cloned();
            match (source_image, target_image) {
                (Some(source_image), Some(target_image)) if source_image != target_image => {
                    return Err(PullbackError::IncompatibleStateMerge {
                        first: transition.source().clone(),
                        second: transition.target().clone(),
                        first_image: source_image,
                        second_image: target_image,
                    });
                }
                (Some(_), Some(_)) => {}
                (Some(image), None) => {
                    trace!(%transition, %image, "propagating to target");
                    mapping.insert(transition.target().clone(), image);
                }
                (None, Some(image)) => {
                    trace!(%transition, %image, "propagating to source");
                    mapping.insert(transition.source().clone(), image);
                }
                (None, None) => waiting.push(transition),
            }
        }

        if waiting.len() == before {
            return Err(PullbackError::StuckClosure {
                side,
                unmapped: waiting,
            });
        }
        pending = waiting;
    }
    Ok(())
}

fn seeded_morphism(
    source: Arc<TransitionSystem>,
    interface: Arc<TransitionSystem>,
    states: &IndexMap<State, State>,
    transitions: &IndexMap<Transition, Transition>,
) -> Result<Morphism, PullbackError> {
    let mut builder = MorphismBuilder::new().source(source).target(interface);
    for (from, to) in states {
        builder = builder.add_state_mapping(from, to)?;
    }
    for (from, to) in transitions {
        builder = builder.add_transition_mapping(from, to)?;
    }
    Ok(builder.build_with_idle_transitions()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pullback::PullbackResult;
    use crate::transition_system;

    fn t(source: &str, target: &str, label: &str) -> Transition {
        Transition::new(State::new(source), State::new(target), label)
    }

    fn traffic_light() -> TransitionSystem {
        transition_system! {
            idle start: "red";
            "red" => "red-amber" : "turn red-amber",
            "red-amber" => "green" : "turn green",
            "green" => "amber" : "turn amber",
            "amber" => "red" : "turn red",
        }
        .unwrap()
    }

    fn pedestrian_light() -> TransitionSystem {
        transition_system! {
            idle start: "cross";
            "wait" => "cross" : "switch to cross",
            "cross" => "wait" : "switch to wait",
        }
        .unwrap()
    }

    fn traffic_interactions() -> IndexMap<Transition, Transition> {
        IndexMap::from([
            (
                t("red", "red-amber", "turn red-amber"),
                t("cross", "wait", "switch to wait"),
            ),
            (
                t("amber", "red", "turn red"),
                t("wait", "cross", "switch to cross"),
            ),
        ])
    }

    #[test]
    fn traffic_lights_interface() {
        let cospan =
            calc_coordination_interface(traffic_light(), pedestrian_light(), &traffic_interactions())
                .unwrap();
        let interface = cospan.target();

        let names: IndexSet<&str> = interface.states().iter().map(State::name).collect();
        assert_eq!(names, IndexSet::from(["red/cross", "red-amber/wait"]));
        assert_eq!(interface.transitions().len(), 4);
        assert!(interface.contains_transition(&t(
            "red/cross",
            "red-amber/wait",
            "<turn red-amber, switch to wait>"
        )));
        assert!(interface.contains_transition(&t(
            "red-amber/wait",
            "red/cross",
            "<turn red, switch to cross>"
        )));

        let m1 = cospan.i1();
        for (state, image) in [
            ("red", "red/cross"),
            ("red-amber", "red-amber/wait"),
            ("green", "red-amber/wait"),
            ("amber", "red-amber/wait"),
        ] {
            assert_eq!(m1.map_state(&State::new(state)), Some(&State::new(image)));
        }
        let m2 = cospan.i2();
        assert_eq!(
            m2.map_state(&State::new("cross")),
            Some(&State::new("red/cross"))
        );
        assert_eq!(
            m2.map_state(&State::new("wait")),
            Some(&State::new("red-amber/wait"))
        );
    }

    #[test]
    fn autonomous_transitions_map_to_idle() {
        let cospan =
            calc_coordination_interface(traffic_light(), pedestrian_light(), &traffic_interactions())
                .unwrap();

        let image = cospan
            .i1()
            .map_transition(&t("green", "amber", "turn amber"))
            .unwrap();
        assert!(image.is_idle());
        assert_eq!(image.source(), &State::new("red-amber/wait"));
    }

    #[test]
    fn interface_feeds_pullback() {
        let cospan =
            calc_coordination_interface(traffic_light(), pedestrian_light(), &traffic_interactions())
                .unwrap();

        let result = PullbackResult::calculate(&cospan).unwrap();

        assert_eq!(result.system().states().len(), 4);
        assert_eq!(result.system().transitions().len(), 8);
        assert!(result.commutes_over(&cospan));
    }

    #[test]
    fn foreign_interaction_is_rejected() {
        let foreign = t("red", "blue", "paint");
        let switch = t("cross", "wait", "switch to wait");

        let result =
            calc_coordination_interface(traffic_light(), pedestrian_light(), [(&foreign, &switch)]);

        assert_eq!(
            result,
            Err(PullbackError::TransitionNotInSystem {
                transition: foreign,
                side: Side::Left,
            })
        );
    }

    #[test]
    fn duplicate_interaction_is_rejected() {
        let first = t("red", "red-amber", "turn red-amber");
        let second = t("amber", "red", "turn red");
        let switch = t("cross", "wait", "switch to wait");

        let result = calc_coordination_interface(
            traffic_light(),
            pedestrian_light(),
            [(&first, &switch), (&second, &switch)],
        );

        assert!(matches!(
            result,
            Err(PullbackError::DuplicateInteraction {
                side: Side::Right,
                ..
            })
        ));
    }

    #[test]
    fn incompatible_merge_is_rejected() {
        // both handshakes start in the left start state but at different
        // right states
        let left = transition_system! {
            idle start: "a";
            "a" => "b" : "x",
            "a" => "c" : "y",
        }
        .unwrap();
        let right = transition_system! {
            idle start: "p";
            "p" => "q" : "x",
            "q" => "r" : "y",
        }
        .unwrap();
        let x1 = t("a", "b", "x");
        let y1 = t("a", "c", "y");
        let x2 = t("p", "q", "x");
        let y2 = t("q", "r", "y");

        let result = calc_coordination_interface(left, right, [(&x1, &x2), (&y1, &y2)]);

        assert_eq!(
            result,
            Err(PullbackError::IncompatibleStateMerge {
                first: State::new("a"),
                second: State::new("q"),
                first_image: State::new("a/p"),
                second_image: State::new("b/q"),
            })
        );
    }

    #[test]
    fn colliding_interface_names_are_rejected() {
        let left = transition_system! { idle start: "x"; "x" => "x/y" : "a" }.unwrap();
        let right = transition_system! { idle start: "y/z"; "y/z" => "z" : "b" }.unwrap();
        let a = t("x", "x/y", "a");
        let b = t("y/z", "z", "b");

        let result = calc_coordination_interface(left, right, [(&a, &b)]);

        // the start state x/y/z already carries the name of the target pair
        assert_eq!(
            result,
            Err(PullbackError::AmbiguousCompositeName {
                name: "x/y/z".to_string(),
                left: State::new("x/y"),
                right: State::new("z"),
            })
        );
    }

    #[test]
    fn disconnected_component_gets_stuck() {
        let left = transition_system! {
            idle start: "a";
            "a" => "b" : "x",
            "island" => "shore" : "drift",
        }
        .unwrap();
        let right = transition_system! { idle start: "p"; "p" => "q" : "x" }.unwrap();
        let x1 = t("a", "b", "x");
        let x2 = t("p", "q", "x");

        let result = calc_coordination_interface(left, right, [(&x1, &x2)]);

        match result {
            Err(PullbackError::StuckClosure { side, unmapped }) => {
                assert_eq!(side, Side::Left);
                assert!(unmapped.contains(&t("island", "shore", "drift")));
            }
            other => panic!("Expected stuck closure, got {other:?}"),
        }
    }

    #[test]
    fn autonomous_transition_between_synchronized_states_is_rejected() {
        let left = transition_system! {
            idle start: "a";
            "a" => "b" : "x",
            "b" => "a" : "back",
        }
        .unwrap();
        let right = transition_system! { idle start: "p"; "p" => "q" : "x" }.unwrap();
        let x1 = t("a", "b", "x");
        let x2 = t("p", "q", "x");

        let result = calc_coordination_interface(left, right, [(&x1, &x2)]);

        assert!(matches!(
            result,
            Err(PullbackError::IncompatibleStateMerge { .. })
        ));
    }

    #[test]
    fn empty_interactions_collapse_to_start_state() {
        let cospan = calc_coordination_interface(
            traffic_light(),
            pedestrian_light(),
            std::iter::empty::<(&Transition, &Transition)>(),
        )
        .unwrap();

        let interface = cospan.target();
        assert_eq!(interface.states().len(), 1);
        assert_eq!(interface.start_state(), Some(&State::new("red/cross")));
        assert!(cospan
            .i1()
            .state_mapping()
            .values()
            .all(|image| image == &State::new("red/cross")));
    }
}

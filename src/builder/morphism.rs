//! Builder for constructing morphisms between transition systems.

use crate::builder::error::{BuildError, SystemRole};
use crate::core::{Morphism, State, Transition, TransitionSystem};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::trace;

/// Builder for morphisms with a fluent API.
///
/// Set `source` and `target` first, then add mappings. Every mapping is
/// checked against both systems as it is added; the morphism laws are checked
/// once more when the morphism is built.
///
/// # Example
///
/// ```rust
/// use lts_pullback::builder::{MorphismBuilder, SystemBuilder};
/// use lts_pullback::core::{State, Transition};
///
/// let (s1, s2) = (State::new("s1"), State::new("s2"));
/// let step = Transition::new(s1.clone(), s2, "a");
/// let source = SystemBuilder::new()
///     .start_state(s1)
///     .add_transition(step.clone())
///     .build()?;
///
/// let t = State::new("t");
/// let target = SystemBuilder::new().start_state(t.clone()).build_with_idle_transitions()?;
///
/// let morphism = MorphismBuilder::new()
///     .source(source)
///     .target(target)
///     .add_transition_mapping_to_idle(&step, &t)?
///     .build()?;
///
/// assert_eq!(morphism.map_state(&State::new("s2")), Some(&t));
/// # Ok::<(), lts_pullback::builder::BuildError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MorphismBuilder {
    source: Option<Arc<TransitionSystem>>,
    target: Option<Arc<TransitionSystem>>,
    state_mapping: IndexMap<State, State>,
    transition_mapping: IndexMap<Transition, Transition>,
}

impl MorphismBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source system (required).
    pub fn source(mut self, system: impl Into<Arc<TransitionSystem>>) -> Self {
        self.source = Some(system.into());
        self
    }

    /// Set the target system (required).
    pub fn target(mut self, system: impl Into<Arc<TransitionSystem>>) -> Self {
        self.target = Some(system.into());
        self
    }

    /// Map `from` in the source to `to` in the target.
    ///
    /// Mapping a state again to the same image is allowed; mapping it to a
    /// different image is an error.
    pub fn add_state_mapping(mut self, from: &State, to: &State) -> Result<Self, BuildError> {
        self.insert_state_mapping(from, to)?;
        Ok(self)
    }

    /// Map transition `from` to `to`, mapping their endpoints along the way.
    pub fn add_transition_mapping(
        mut self,
        from: &Transition,
        to: &Transition,
    ) -> Result<Self, BuildError> {
        self.insert_transition_mapping(from, to)?;
        Ok(self)
    }

    /// Map `from` to the idle transition at `idle_state` in the target.
    ///
    /// The target must carry idle transitions (see
    /// [`SystemBuilder::build_with_idle_transitions`](crate::builder::SystemBuilder::build_with_idle_transitions)).
    pub fn add_transition_mapping_to_idle(
        mut self,
        from: &Transition,
        idle_state: &State,
    ) -> Result<Self, BuildError> {
        let (_, target) = self.systems()?;
        let idle = idle_in(&target, idle_state, SystemRole::Target)?;
        self.insert_transition_mapping(from, &idle)?;
        Ok(self)
    }

    /// Build the morphism from exactly the mappings added so far.
    /// Returns an error if the mappings are not total or do not commute.
    pub fn build(self) -> Result<Morphism, BuildError> {
        let (source, target) = self.systems()?;
        Ok(Morphism::new(
            source,
            target,
            self.state_mapping,
            self.transition_mapping,
        )?)
    }

    /// Complete the mappings with idle transitions, then build.
    ///
    /// 1. The source start state is mapped to the target start state.
    /// 2. The idle transition of every mapped state is mapped to the idle
    ///    transition of its image.
    /// 3. Every transition still unmapped goes to the idle transition at
    ///    the image of its source state.
    pub fn build_with_idle_transitions(mut self) -> Result<Morphism, BuildError> {
        let (source, target) = self.systems()?;

        // the empty system has no start state and nothing to complete
        if let Some(start) = source.start_state() {
            let target_start = target
                .start_state()
                .ok_or(BuildError::MissingStartState)?;
            match self.state_mapping.get(start) {
                None => self.insert_state_mapping(start, target_start)?,
                Some(mapped) if mapped != target_start => {
                    return Err(BuildError::StartStateMismatch {
                        state: start.clone(),
                        mapped: mapped.clone(),
                        expected: target_start.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        let mapped_states: Vec<(State, State)> = self
            .state_mapping
            .iter()
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();
        for (from, to) in &mapped_states {
            let idle = idle_in(&source, from, SystemRole::Source)?;
            if self.transition_mapping.contains_key(&idle) {
                continue;
            }
            let image = idle_in(&target, to, SystemRole::Target)?;
            self.transition_mapping.insert(idle, image);
        }

        for transition in source.transitions() {
            if self.transition_mapping.contains_key(transition) {
                continue;
            }
            // unmapped source states surface as a totality error on build
            let Some(image_state) = self.state_mapping.get(transition.source()) else {
                continue;
            };
            let image = idle_in(&target, image_state, SystemRole::Target)?;
            trace!(%transition, %image, "mapping transition to idle");
            self.transition_mapping.insert(transition.clone(), image);
        }

        self.build()
    }

    fn systems(&self) -> Result<(Arc<TransitionSystem>, Arc<TransitionSystem>), BuildError> {
        let source = self.source.clone().ok_or(BuildError::MissingSource)?;
        let target = self.target.clone().ok_or(BuildError::MissingTarget)?;
        Ok((source, target))
    }

    fn insert_state_mapping(&mut self, from: &State, to: &State) -> Result<(), BuildError> {
        let (source, target) = self.systems()?;
        if !source.contains_state(from) {
            return Err(BuildError::UnknownState {
                state: from.clone(),
                role: SystemRole::Source,
            });
        }
        if !target.contains_state(to) {
            return Err(BuildError::UnknownState {
                state: to.clone(),
                role: SystemRole::Target,
            });
        }

        match self.state_mapping.get(from) {
            Some(existing) if existing != to => Err(BuildError::InconsistentStateMapping {
                state: from.clone(),
                existing: existing.clone(),
                requested: to.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.state_mapping.insert(from.clone(), to.clone());
                Ok(())
            }
        }
    }

    fn insert_transition_mapping(
        &mut self,
        from: &Transition,
        to: &Transition,
    ) -> Result<(), BuildError> {
        let (source, target) = self.systems()?;
        if !source.contains_transition(from) {
            return Err(BuildError::UnknownTransition {
                transition: from.clone(),
                role: SystemRole::Source,
            });
        }
        if !target.contains_transition(to) {
            return Err(BuildError::UnknownTransition {
                transition: to.clone(),
                role: SystemRole::Target,
            });
        }
        if let Some(existing) = self.transition_mapping.get(from) {
            if existing != to {
                return Err(BuildError::InconsistentTransitionMapping {
                    transition: from.clone(),
                    existing: existing.clone(),
                    requested: to.clone(),
                });
            }
        }

        self.insert_state_mapping(from.source(), to.source())?;
        self.insert_state_mapping(from.target(), to.target())?;
        self.transition_mapping.insert(from.clone(), to.clone());
        Ok(())
    }
}

fn idle_in(
    system: &TransitionSystem,
    state: &State,
    role: SystemRole,
) -> Result<Transition, BuildError> {
    system
        .idle_transition(state)
        .cloned()
        .ok_or_else(|| BuildError::NoIdleTransition {
            state: state.clone(),
            role,
        })
}

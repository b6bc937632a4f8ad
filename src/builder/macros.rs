//! Macros for ergonomic transition system construction.

/// Build a [`TransitionSystem`](crate::core::TransitionSystem) from a list of
/// `"source" => "target" : "label"` entries.
///
/// Prefix the start state with `idle` to complete the system with idle
/// transitions. Expands to a `Result<TransitionSystem, BuildError>`.
///
/// # Example
///
/// ```
/// use lts_pullback::transition_system;
///
/// let light = transition_system! {
///     idle start: "red";
///     "red" => "green" : "go",
///     "green" => "red" : "stop",
/// }
/// .unwrap();
///
/// assert_eq!(light.states().len(), 2);
/// assert_eq!(light.transitions().len(), 4);
/// ```
#[macro_export]
macro_rules! transition_system {
    (
        start: $start:expr;
        $($source:literal => $target:literal : $label:literal),* $(,)?
    ) => {
        $crate::transition_system!(@builder $start; $($source => $target : $label),*)
            .build()
    };
    (
        idle start: $start:expr;
        $($source:literal => $target:literal : $label:literal),* $(,)?
    ) => {
        $crate::transition_system!(@builder $start; $($source => $target : $label),*)
            .build_with_idle_transitions()
    };
    (
        @builder $start:expr;
        $($source:literal => $target:literal : $label:literal),*
    ) => {
        $crate::builder::SystemBuilder::new()
            .start_state($crate::core::State::new($start))
            $(
                .add_transition($crate::core::Transition::new(
                    $crate::core::State::new($source),
                    $crate::core::State::new($target),
                    $label,
                ))
            )*
    };
}

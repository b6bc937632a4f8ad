//! Handshake Pullback
//!
//! This demo computes the pullback of two systems that share one step.
//!
//! Key concepts:
//! - A hand-written interface with idle transitions
//! - Morphisms that send private steps to idle transitions
//! - Interleaving of private steps in the pullback
//!
//! Run with: cargo run --example handshake

use lts_pullback::builder::MorphismBuilder;
use lts_pullback::core::{State, Transition};
use lts_pullback::pullback::{Cospan, PullbackResult};
use lts_pullback::transition_system;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Handshake Pullback ===\n");

    let left = transition_system! {
        idle start: "1";
        "1" => "2" : "a",
        "2" => "3" : "b",
    }?;
    let right = transition_system! {
        idle start: "2";
        "2" => "3" : "b",
        "3" => "4" : "c",
    }?;
    let shared = Arc::new(transition_system! { idle start: "2"; "2" => "3" : "b" }?);

    let step = |from: &str, to: &str, label: &str| {
        Transition::new(State::new(from), State::new(to), label)
    };

    let i1 = MorphismBuilder::new()
        .source(left)
        .target(Arc::clone(&shared))
        .add_transition_mapping_to_idle(&step("1", "2", "a"), &State::new("2"))?
        .add_transition_mapping(&step("2", "3", "b"), &step("2", "3", "b"))?
        .build_with_idle_transitions()?;
    let i2 = MorphismBuilder::new()
        .source(right)
        .target(shared)
        .add_transition_mapping_to_idle(&step("3", "4", "c"), &State::new("3"))?
        .add_transition_mapping(&step("2", "3", "b"), &step("2", "3", "b"))?
        .build_with_idle_transitions()?;

    println!("Left leg:\n{i1}\n");
    println!("Right leg:\n{i2}\n");

    let cospan = Cospan::new(i1, i2)?;
    let result = PullbackResult::calculate(&cospan)?;

    println!("Pullback:\n{}\n", result.system());
    println!("Square commutes: {}", result.commutes_over(&cospan));

    println!("\n=== Demo Complete ===");
    Ok(())
}

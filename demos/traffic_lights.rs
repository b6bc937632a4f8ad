//! Traffic Light Coordination
//!
//! This demo synchronizes a car traffic light with a pedestrian light.
//!
//! Key concepts:
//! - Two independent cyclic systems with idle transitions
//! - Handshakes pair the transitions that must fire together
//! - The coordination interface is synthesized from the handshakes
//! - The pullback is the coordinated system
//!
//! Run with: cargo run --example traffic_lights

use lts_pullback::core::{State, Transition};
use lts_pullback::pullback::{calc_coordination_interface, PullbackResult};
use lts_pullback::transition_system;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Traffic Light Coordination ===\n");

    let cars = transition_system! {
        idle start: "red";
        "red" => "red-amber" : "turn red-amber",
        "red-amber" => "green" : "turn green",
        "green" => "amber" : "turn amber",
        "amber" => "red" : "turn red",
    }?;
    let pedestrians = transition_system! {
        idle start: "cross";
        "wait" => "cross" : "switch to cross",
        "cross" => "wait" : "switch to wait",
    }?;

    println!("Car light:\n{cars}\n");
    println!("Pedestrian light:\n{pedestrians}\n");

    let turn_red_amber = Transition::new(State::new("red"), State::new("red-amber"), "turn red-amber");
    let switch_to_wait = Transition::new(State::new("cross"), State::new("wait"), "switch to wait");
    let turn_red = Transition::new(State::new("amber"), State::new("red"), "turn red");
    let switch_to_cross = Transition::new(State::new("wait"), State::new("cross"), "switch to cross");

    println!("Handshakes:");
    println!("  {turn_red_amber}  with  {switch_to_wait}");
    println!("  {turn_red}  with  {switch_to_cross}\n");

    let cospan = calc_coordination_interface(
        cars,
        pedestrians,
        [(&turn_red_amber, &switch_to_wait), (&turn_red, &switch_to_cross)],
    )?;
    println!("Coordination interface:\n{}\n", cospan.target());

    let coordinated = PullbackResult::calculate(&cospan)?;
    println!("Coordinated system:\n{}\n", coordinated.system());

    println!("Pedestrians may cross while the car light shows:");
    let cross = State::new("cross");
    for state in coordinated.system().states() {
        if coordinated.m2().map_state(state) == Some(&cross) {
            if let Some(car) = coordinated.m1().map_state(state) {
                println!("  {car}");
            }
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}

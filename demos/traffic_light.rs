//! Traffic Light State Machine
//!
//! A cyclic machine ticked once per simulated frame. Each light stays lit
//! for a fixed number of frames, counted by its update hook.
//!
//! Run with: cargo run --example traffic_light

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tickbus::builder::{StateMachineBuilder, TransitionBuilder};
use tickbus::machine::Hooks;
use tickbus::state_enum;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

/// Frames spent in the current light.
fn timer_hooks(frames: &Arc<AtomicU32>, label: &'static str) -> Hooks {
    let reset = Arc::clone(frames);
    let tick = Arc::clone(frames);
    Hooks::new()
        .on_enter(move || {
            reset.store(0, Ordering::Relaxed);
            println!("  -> {label}");
        })
        .on_update(move || {
            tick.fetch_add(1, Ordering::Relaxed);
        })
}

fn after(frames: &Arc<AtomicU32>, limit: u32) -> impl Fn() -> bool + Send + Sync + 'static {
    let frames = Arc::clone(frames);
    move || frames.load(Ordering::Relaxed) >= limit
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("=== Traffic Light State Machine ===\n");

    let frames = Arc::new(AtomicU32::new(0));
    let mut light = StateMachineBuilder::new()
        .initial(TrafficLight::Red)
        .transition(
            TransitionBuilder::new()
                .from(TrafficLight::Red)
                .to(TrafficLight::Green)
                .when(after(&frames, 4)),
        )?
        .transition(
            TransitionBuilder::new()
                .from(TrafficLight::Green)
                .to(TrafficLight::Yellow)
                .when(after(&frames, 3)),
        )?
        .transition(
            TransitionBuilder::new()
                .from(TrafficLight::Yellow)
                .to(TrafficLight::Red)
                .when(after(&frames, 1)),
        )?
        .state(TrafficLight::Red, timer_hooks(&frames, "Stop"))
        .state(TrafficLight::Green, timer_hooks(&frames, "Go!"))
        .state(TrafficLight::Yellow, timer_hooks(&frames, "Caution"))
        .build()?;

    println!("Initial state: {:?}\n", light.current_state());

    for _ in 0..20 {
        let tick = light.update()?;
        if let Some(fired) = tick.fired {
            println!("frame {:>2}: {:?} -> {:?}", tick.tick, fired.from, fired.to);
        }
    }

    println!("\nPath over the last {} transitions:", light.history().len());
    for state in light.history().get_path() {
        println!("  {state:?}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

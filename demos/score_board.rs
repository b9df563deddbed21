//! Score Board Event Bus
//!
//! Independent modules exchange events by name: a scorer broadcasts
//! points, a HUD and an achievement tracker listen, and a difficulty
//! query collects answers from responders.
//!
//! Run with: cargo run --example score_board

use parking_lot::Mutex;
use std::sync::Arc;
use tickbus::bus::{BroadcastMode, BusConfig, EventBus, FailurePolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("=== Score Board Event Bus ===\n");

    let bus = EventBus::with_config(BusConfig {
        failure_policy: FailurePolicy::RemoveAfter(2),
        ..BusConfig::default()
    });
    let scores = bus.messenger::<(u32, String)>();

    let total = Arc::new(Mutex::new(0u32));
    let hud_total = Arc::clone(&total);
    scores.listen("score_changed", move |points, player| {
        let mut total = hud_total.lock();
        *total += points;
        println!("HUD: {player} +{points} (total {})", *total);
        Ok(())
    })?;

    // Fails on every call; the failure policy drops it after two broadcasts.
    scores.listen("score_changed", |_, _| Err("achievement server unreachable".into()))?;

    for (points, player) in [(10, "ada"), (25, "lin"), (5, "ada")] {
        let report = scores.broadcast("score_changed", points, player.to_string())?;
        println!(
            "  delivered {} failed {} removed {}",
            report.delivered,
            report.failures.len(),
            report.removed
        );
    }

    let difficulty = bus.messenger::<(u32,)>();
    difficulty.respond("difficulty", |score| score / 10)?;
    difficulty.respond("difficulty", |score| if *score > 30 { 5_u32 } else { 1 })?;

    let mut votes = Vec::new();
    difficulty.broadcast_collect("difficulty", *total.lock(), |vote: u32| {
        votes.push(vote);
        Ok(())
    })?;
    println!("\nDifficulty votes: {votes:?}");

    // Optional event with nobody listening.
    bus.messenger::<()>()
        .broadcast_with_mode("level_complete", BroadcastMode::DontRequireListener)?;

    println!("\nChannels: {:?}", bus.channel_names());
    bus.clear();
    println!("After clear: {:?}", bus.channel_names());

    println!("\n=== Example Complete ===");
    Ok(())
}

//! State machines driven frame by frame, wired to an event bus.

mod common;

use common::capture;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tickbus::builder::{StateMachineBuilder, TransitionBuilder};
use tickbus::bus::{BroadcastMode, EventBus};
use tickbus::machine::{HookKind, Hooks, MachineConfig, MachineError};
use tickbus::state_enum;
use tracing::Level;

state_enum! {
    enum Sentry {
        Patrol,
        Investigate,
        Chase,
        Stunned,
    }
}

#[test]
fn enemy_reacts_to_broadcast_events() {
    let bus = Arc::new(EventBus::new());
    let noise = Arc::new(AtomicBool::new(false));
    let spotted = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&noise);
    bus.messenger::<(f32,)>()
        .listen("noise", move |_volume| {
            flag.store(true, Ordering::Relaxed);
            Ok(())
        })
        .unwrap();

    let alerts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&alerts);
    bus.messenger::<(String,)>()
        .listen("alert", move |who| {
            sink.lock().push(who.clone());
            Ok(())
        })
        .unwrap();

    let heard = Arc::clone(&noise);
    let seen = Arc::clone(&spotted);
    let announcer = Arc::clone(&bus);
    let mut sentry = StateMachineBuilder::new()
        .initial(Sentry::Patrol)
        .transition(
            TransitionBuilder::new()
                .from(Sentry::Patrol)
                .to(Sentry::Investigate)
                .when(move || heard.load(Ordering::Relaxed)),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from(Sentry::Investigate)
                .to(Sentry::Chase)
                .when(move || seen.load(Ordering::Relaxed)),
        )
        .unwrap()
        .state(
            Sentry::Chase,
            Hooks::new().try_on_enter(move || {
                announcer
                    .messenger::<(String,)>()
                    .broadcast("alert", "sentry-1".to_string())?;
                Ok(())
            }),
        )
        .build()
        .unwrap();

    sentry.update().unwrap();
    assert_eq!(sentry.current_state(), &Sentry::Patrol);

    bus.messenger::<(f32,)>().broadcast("noise", 0.8).unwrap();
    sentry.update().unwrap();
    assert_eq!(sentry.current_state(), &Sentry::Investigate);

    spotted.store(true, Ordering::Relaxed);
    let tick = sentry.update().unwrap();
    assert_eq!(sentry.current_state(), &Sentry::Chase);
    assert_eq!(tick.tick, 3);
    assert_eq!(*alerts.lock(), vec!["sentry-1"]);

    let path: Vec<_> = sentry.history().get_path().into_iter().copied().collect();
    assert_eq!(path, vec![Sentry::Patrol, Sentry::Investigate, Sentry::Chase]);
}

#[test]
fn ambiguous_tick_warns_once_and_takes_first() {
    let mut sentry = StateMachineBuilder::new()
        .initial(Sentry::Patrol)
        .transition(TransitionBuilder::new().from(Sentry::Patrol).to(Sentry::Chase))
        .unwrap()
        .transition(TransitionBuilder::new().from(Sentry::Patrol).to(Sentry::Investigate))
        .unwrap()
        .build()
        .unwrap();

    let (tick, logs) = capture(Level::WARN, || sentry.update().unwrap());

    assert!(tick.was_ambiguous());
    assert_eq!(sentry.current_state(), &Sentry::Chase);
    assert_eq!(
        logs.matches("More than one state transition available")
            .count(),
        1
    );
}

#[test]
fn hooks_run_in_exit_enter_update_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let record = |label: &'static str| {
        let order = Arc::clone(&order);
        move || order.lock().push(label)
    };

    let mut sentry = StateMachineBuilder::new()
        .initial(Sentry::Chase)
        .transition(TransitionBuilder::new().from(Sentry::Chase).to(Sentry::Stunned))
        .unwrap()
        .state(
            Sentry::Chase,
            Hooks::new()
                .on_exit(record("exit chase"))
                .on_update(record("update chase")),
        )
        .state(
            Sentry::Stunned,
            Hooks::new()
                .on_enter(record("enter stunned"))
                .on_update(record("update stunned")),
        )
        .build()
        .unwrap();

    sentry.update().unwrap();

    assert_eq!(
        *order.lock(),
        vec!["exit chase", "enter stunned", "update stunned"]
    );
    assert!(sentry.supports(&Sentry::Chase, HookKind::Exit));
    assert!(!sentry.supports(&Sentry::Chase, HookKind::Enter));
}

#[test]
fn update_hook_runs_every_tick_without_transition() {
    let updates = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&updates);

    let mut sentry = StateMachineBuilder::new()
        .initial(Sentry::Patrol)
        .state(
            Sentry::Patrol,
            Hooks::new().on_update(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            }),
        )
        .build()
        .unwrap();

    for _ in 0..5 {
        let tick = sentry.update().unwrap();
        assert!(tick.fired.is_none());
    }

    assert_eq!(updates.load(Ordering::Relaxed), 5);
    assert_eq!(sentry.current_state(), &Sentry::Patrol);
}

#[test]
fn failing_enter_hook_surfaces_as_error() {
    let bus = Arc::new(EventBus::new());
    let announcer = Arc::clone(&bus);

    // Nobody listens on "alert", so the required broadcast fails.
    let mut sentry = StateMachineBuilder::new()
        .initial(Sentry::Investigate)
        .transition(TransitionBuilder::new().from(Sentry::Investigate).to(Sentry::Chase))
        .unwrap()
        .state(
            Sentry::Chase,
            Hooks::new().try_on_enter(move || {
                announcer.messenger::<()>().broadcast("alert")?;
                Ok(())
            }),
        )
        .build()
        .unwrap();

    let err = sentry.update().unwrap_err();

    match &err {
        MachineError::Hook { state, hook, .. } => {
            assert_eq!(state, "Chase");
            assert_eq!(*hook, HookKind::Enter);
        }
        other => panic!("Expected hook error, got {other:?}"),
    }
    assert!(err.to_string().contains("no listener found"));
    assert_eq!(sentry.current_state(), &Sentry::Chase);

    bus.messenger::<()>()
        .broadcast_with_mode("alert", BroadcastMode::DontRequireListener)
        .unwrap();
}

#[test]
fn config_controls_history_and_warnings() {
    let config: MachineConfig =
        serde_json::from_str(r#"{ "warn_on_ambiguous": false, "history_limit": 2 }"#).unwrap();

    let mut sentry = StateMachineBuilder::new()
        .initial(Sentry::Patrol)
        .transition(TransitionBuilder::new().from(Sentry::Patrol).to(Sentry::Investigate))
        .unwrap()
        .transition(TransitionBuilder::new().from(Sentry::Patrol).to(Sentry::Chase))
        .unwrap()
        .transition(TransitionBuilder::new().from(Sentry::Investigate).to(Sentry::Patrol))
        .unwrap()
        .config(config)
        .build()
        .unwrap();

    let (_, logs) = capture(Level::WARN, || {
        for _ in 0..6 {
            sentry.update().unwrap();
        }
    });

    assert!(logs.is_empty());
    assert_eq!(sentry.history().len(), 2);
    assert_eq!(sentry.ticks(), 6);
}

//! Scripted emulator sessions in virtual time.
//!
//! Run with: cargo test -p firmware --features emulator --test emulator_sessions

#![cfg(feature = "emulator")]
#![allow(clippy::arithmetic_side_effects)]

use firmware::emulator::{run_virtual, Script};
use interaction::{FeedbackKind, InteractionConfig};
use platform::{ButtonState, HostCommand, Rgb};

fn run(script: Script, duration_ms: u64) -> firmware::emulator::Session {
    run_virtual(InteractionConfig::default(), script, duration_ms).unwrap()
}

#[test]
fn decrease_decrease_click_then_decay() {
    let script = Script::new().rotate_at(0, -1).rotate_at(10, -1).click_at(20);
    let session = run(script, 1_000);

    let events: Vec<_> = session.events().collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].1.kind, FeedbackKind::Decrease);
    assert_eq!(events[0].1.level.magnitude(), 1);
    assert_eq!(events[1].1.level.magnitude(), 2);
    assert_eq!(events[2].1.kind, FeedbackKind::Mute);
    assert_eq!(events[2].1.level.get(), 9);

    assert_eq!(
        session.host.commands(),
        &[HostCommand::VolumeDown, HostCommand::VolumeDown, HostCommand::Mute]
    );
    // Last input at 20 ms: haptic off after 30 ms, ring off after 600 ms.
    assert_eq!(session.haptic_off_at(), Some(51));
    assert_eq!(session.lights_off_at(), Some(621));
    assert_eq!(session.light.current(), Some((Rgb::BLACK, 0)));
}

#[test]
fn haptic_window_leaves_ring_lit() {
    let session = run(Script::new().rotate_at(0, 1), 300);

    assert_eq!(session.haptic_off_at(), Some(31));
    assert_eq!(session.lights_off_at(), None);
    assert!(session.light.is_lit());
    assert!(!session.haptic.is_on());
}

#[test]
fn ten_increases_saturate() {
    let mut script = Script::new();
    for i in 0..12 {
        script = script.rotate_at(i * 5, 1);
    }
    let session = run(script, 100);

    let levels: Vec<i8> = session.events().map(|(_, e)| e.level.get()).collect();
    assert_eq!(levels.len(), 12);
    assert_eq!(levels[9], 10);
    assert!(levels.iter().all(|&l| l <= 10));
    assert_eq!(session.host.commands(), &[HostCommand::VolumeUp; 12]);
}

#[test]
fn rotation_and_click_in_same_tick_defers_click() {
    let script = Script::new().rotate_at(5, 1).click_at(5);
    let session = run(script, 50);

    let times: Vec<u64> = session.events().map(|(at, _)| at).collect();
    assert_eq!(times, vec![5, 6]);
    assert_eq!(
        session.host.commands(),
        &[HostCommand::VolumeUp, HostCommand::Mute]
    );
}

#[test]
fn held_and_double_click_are_ignored() {
    let script = Script::new()
        .button_at(0, ButtonState::Held)
        .button_at(10, ButtonState::Released)
        .button_at(20, ButtonState::DoubleClicked);
    let session = run(script, 100);

    assert_eq!(session.events().count(), 0);
    assert!(session.host.commands().is_empty());
    assert_eq!(session.haptic.pulses(), 0);
}

#[test]
fn motor_pulses_once_per_burst() {
    let script = Script::new()
        .rotate_at(0, 1)
        .rotate_at(10, 1)
        .rotate_at(200, -1);
    let session = run(script, 400);

    // The second step lands inside the first pulse; the third after it ended.
    assert_eq!(session.haptic.pulses(), 2);
}

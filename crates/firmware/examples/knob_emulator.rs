//! Volume Knob Emulator
//!
//! Replays a scripted session against the real interaction core and logs
//! every ring, motor and host update.
//! Run with: cargo run --example knob_emulator --features emulator
//!
//! Pass `--realtime` to tick against the wall clock instead of virtual time.

use embassy_time::Duration;
use firmware::emulator::{init_logging, run_realtime, run_virtual, Script, Session};
use interaction::InteractionConfig;
use platform::config;

/// The six reference interactions, back to back.
fn scenarios() -> Script {
    Script::new()
        // A: one step down from rest
        .rotate_at(0, -1)
        // B: another step down
        .rotate_at(50, -1)
        // C: click
        .click_at(100)
        // D: haptic window closes (~130 ms), ring stays lit
        // E: ring goes dark and intensity resets (~700 ms)
        // F: ten steps up saturate at full intensity
        .rotate_at(1_000, 1)
        .rotate_at(1_010, 1)
        .rotate_at(1_020, 1)
        .rotate_at(1_030, 1)
        .rotate_at(1_040, 1)
        .rotate_at(1_050, 1)
        .rotate_at(1_060, 1)
        .rotate_at(1_070, 1)
        .rotate_at(1_080, 1)
        .rotate_at(1_090, 1)
        .rotate_at(1_100, 1)
}

fn print_summary(session: &Session) {
    println!("\nEvents:");
    for (at_ms, event) in session.events() {
        println!(
            "  {at_ms:>5} ms  {:<8} level {:>3}  net {:+}",
            event.kind.as_str(),
            event.level.get(),
            event.net_change
        );
    }
    println!("\nDecay:");
    for report in &session.reports {
        if report.report.step.haptic_off {
            println!("  {:>5} ms  haptic off", report.at_ms);
        }
        if report.report.step.lights_off {
            println!("  {:>5} ms  ring off, level reset", report.at_ms);
        }
    }
    println!(
        "\nHost received {} commands, motor pulsed {} times, ring lit at end: {}",
        session.host.commands().len(),
        session.haptic.pulses(),
        session.light.is_lit()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    println!("{} v{} - Emulator", config::APP_NAME, config::APP_VERSION);

    let script = scenarios();
    let duration_ms = script.last_event_ms().saturating_add(1_000);
    let config = InteractionConfig::default();

    let session = if std::env::args().any(|a| a == "--realtime") {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        rt.block_on(run_realtime(config, script, Duration::from_millis(duration_ms)))?
    } else {
        run_virtual(config, script, duration_ms)?
    };

    print_summary(&session);
    Ok(())
}

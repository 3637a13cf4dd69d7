//! Build the hardware firmware and hand it to the probe-rs runner.
//!
//! `.cargo/config.toml` sets probe-rs as the runner for the embedded target,
//! so `cargo run` flashes the knob and then streams its defmt log over RTT
//! until interrupted.

use crate::cargo::{self, TARGET};
use anyhow::{Context, Result};
use colored::Colorize;
use platform::config;
use std::process::Command;

/// Cargo arguments shared by the build and run steps.
fn firmware_args(subcommand: &str, release: bool) -> Vec<&str> {
    let mut args = vec![
        subcommand,
        "-p",
        "firmware",
        "--target",
        TARGET,
        "--features",
        "hardware",
    ];
    if release {
        args.push("--release");
    }
    args
}

pub fn run(release: bool) -> Result<()> {
    let mode = if release { "release" } else { "debug" };
    println!();
    println!(
        "{}",
        format!("🔨 {} v{} ({mode})", config::APP_NAME, config::APP_VERSION)
            .cyan()
            .bold()
    );
    println!();

    // Build separately so compile errors show without a probe attached.
    cargo::step("Firmware build", &firmware_args("build", release))?;

    println!("{}", "📡 Flashing via probe-rs, Ctrl-C to detach".cyan().bold());
    let status = Command::new("cargo")
        .args(firmware_args("run", release))
        .status()
        .context("Failed to run probe-rs. Is it installed? (cargo install probe-rs-tools)")?;

    if !status.success() {
        anyhow::bail!("Flash failed: check that the probe is connected and the knob is powered");
    }
    Ok(())
}

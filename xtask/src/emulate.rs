use anyhow::{Context, Result};
use colored::Colorize;
use platform::config;
use std::process::Command;

pub fn run(realtime: bool, log: &str) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🎛  {} v{} emulator", config::APP_NAME, config::APP_VERSION)
            .cyan()
            .bold()
    );
    println!();

    let mut cmd = Command::new("cargo");
    cmd.args([
        "run",
        "-p",
        "firmware",
        "--example",
        "knob_emulator",
        "--features",
        "emulator",
    ])
    .env("RUST_LOG", log);
    if realtime {
        cmd.args(["--", "--realtime"]);
    }

    // Inherit stdio so the session log streams live.
    let status = cmd.status().context("Failed to launch the emulator")?;
    if !status.success() {
        anyhow::bail!("Emulator exited with {status}");
    }
    Ok(())
}

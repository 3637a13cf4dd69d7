use crate::cargo::{self, TARGET};
use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking firmware builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    cargo::step(
        "Hardware target (STM32H7)",
        &["check", "-p", "firmware", "--target", TARGET, "--features", "hardware"],
    )?;
    cargo::step(
        "Emulator target (host)",
        &["check", "-p", "firmware", "--features", "emulator", "--all-targets"],
    )?;
    // The core must build for the MCU without std or any logging backend.
    cargo::step(
        "Interaction core (no_std)",
        &["check", "-p", "interaction", "--target", TARGET, "--no-default-features"],
    )?;

    println!("{}", "  Running clippy lints...".cyan());
    let clippy = cargo::output(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    if clippy.status.success() {
        println!("{}", "  ✓ Clippy passed".green());
    } else {
        eprintln!("{}", "  ⚠ Clippy warnings found".yellow().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&clippy.stderr));
    }
    println!();

    let fmt = cargo::output(&["fmt", "--all", "--check"])?;
    if fmt.status.success() {
        println!("{}", "  ✓ Formatting check passed".green());
    } else {
        eprintln!("{}", "  ⚠ Formatting issues found".yellow().bold());
        eprintln!("     Run 'cargo fmt --all' to fix");
    }
    println!();

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}

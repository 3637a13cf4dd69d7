//! Shared helpers for shelling out to cargo.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Embedded target triple for the STM32H743.
pub const TARGET: &str = "thumbv7em-none-eabihf";

/// Run `cargo <args>` and capture its output.
pub fn output(args: &[&str]) -> Result<Output> {
    Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))
}

/// Run one named step; fail with its stderr if cargo does.
pub fn step(label: &str, args: &[&str]) -> Result<Output> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();
    let out = output(args)?;

    if !out.status.success() {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&out.stderr));
        anyhow::bail!("{label} failed");
    }

    println!(
        "{}",
        format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
    );
    println!();
    Ok(out)
}

/// Pull "N passed; M failed; ..." out of libtest output.
pub fn test_summary(stdout: &str) -> String {
    let mut passed = 0u32;
    let mut failed = 0u32;
    for line in stdout.lines() {
        let Some(summary) = line.split("test result:").nth(1) else {
            continue;
        };
        for part in summary.split(';') {
            let mut words = part.split_whitespace().rev();
            let (Some(kind), Some(count)) = (words.next(), words.next()) else {
                continue;
            };
            let Ok(count) = count.trim_start_matches("ok.").trim().parse::<u32>() else {
                continue;
            };
            match kind {
                "passed" => passed = passed.saturating_add(count),
                "failed" => failed = failed.saturating_add(count),
                _ => {}
            }
        }
    }
    format!("({passed} passed, {failed} failed)")
}

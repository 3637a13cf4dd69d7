use crate::cargo;
use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();
    let mut args = vec!["doc", "--workspace", "--no-deps", "--document-private-items"];
    if open {
        args.push("--open");
    }

    let output = cargo::output(&args)?;
    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!("✓ Documentation built in {:.2}s", start.elapsed().as_secs_f64()).green()
    );

    if !open {
        println!();
        // The control loop lives in the interaction crate; start there.
        println!(
            "   {}",
            "Open target/doc/interaction/index.html in your browser".dimmed()
        );
    }
    println!();

    Ok(())
}

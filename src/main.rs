// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so it never mixes with results on stdout)
// 3. Run the checker from the library
// 4. Print one diagnostic per broken link
// 5. Exit with proper code (0 = all links OK, 1 = broken links, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use link_warden::{check_pages, CheckerConfig, Outcome, Report};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Contract violations and I/O problems end up here
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()
        .and_then(|dir| dir.canonicalize())
        .context("cannot determine the current directory")?;
    let config = build_config(&cli, &cwd)?;

    // File arguments are relative to where we were invoked, not to --root
    let files: Vec<_> = cli.files.iter().map(|file| cwd.join(file)).collect();
    let report = check_pages(&files, &config).await?;

    print_report(&report, cli.json)?;
    Ok(report.outcome.exit_code())
}

fn build_config(cli: &Cli, cwd: &Path) -> Result<CheckerConfig> {
    let root = match &cli.root {
        Some(root) => cwd
            .join(root)
            .canonicalize()
            .with_context(|| format!("invalid --root {}", root.display()))?,
        None => cwd.to_path_buf(),
    };

    let mut config = CheckerConfig::new(root);
    config.skip_external = cli.skip_external;
    config.max_redirects = cli.max_redirects;
    config.timeout = match cli.timeout {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    Ok(config)
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Prints the report either as plain diagnostic lines or JSON
fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }

    // The summary goes to stderr: stdout stays one block per broken link
    let (internal, external) = report.broken_counts();
    match report.outcome {
        Outcome::Pass => eprintln!(
            "✅ {} page(s), {} internal link(s), {} external URL(s): all OK",
            report.pages_scanned, report.internal_links_checked, report.external_urls_checked
        ),
        Outcome::InternalFailures => eprintln!(
            "❌ {} broken internal link(s), external links not checked",
            internal
        ),
        Outcome::ExternalFailures => eprintln!(
            "❌ {} broken external link(s) across {} URL(s)",
            external, report.external_urls_checked
        ),
    }
    Ok(())
}

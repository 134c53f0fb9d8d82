//! Schedtrace CLI
//!
//! Thin driver around the library core: loads one trace document, builds
//! the trace context, and prints its diagnostic summary.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use schedtrace::model::TraceContext;
use schedtrace::parser::load_trace_file;

/// Schedtrace - trace model construction for scheduling simulator traces
#[derive(Parser, Debug)]
#[command(name = "schedtrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace document to analyze (JSON, one per invocation)
    trace: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let events = load_trace_file(&cli.trace)
        .with_context(|| format!("failed to load trace {}", cli.trace.display()))?;

    let ctx = TraceContext::from_raw_events(events).context("failed to build trace context")?;

    println!("{}", ctx.describe());
    Ok(())
}

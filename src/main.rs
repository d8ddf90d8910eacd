//! # hangpack CLI
//!
//! Command-line interface for the hangpack library.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use hangpack::HangpackError;
use hangpack::cli::Args;
use hangpack::config::ExportConfig;
use hangpack::export::export_archive;
use hangpack::parsing::parse_archive;
use hangpack::progress::{Progress, ProgressCallback};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), HangpackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let config = ExportConfig::new().with_order(args.order());

    println!("hangpack v{}", env!("CARGO_PKG_VERSION"));
    println!("Input:  {}", args.archive.display());
    println!("Order:  {}", config.order);
    println!();

    println!("Loading data from {} (this may take some time)...", args.archive.display());
    let parse_start = Instant::now();
    let archive = parse_archive(&args.archive)?;
    println!(
        "   Found {} conversations, {} events ({:.2}s)",
        archive.conversations.len(),
        archive.event_count(),
        parse_start.elapsed().as_secs_f64()
    );
    println!();

    let callback: ProgressCallback = Arc::new(|progress: Progress| {
        let file = progress
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "[{:>3.0}%] Wrote conversation '{}' ({}/{}) to {}: {} rows",
            progress.percentage(),
            progress.conversation,
            progress.index,
            progress.total,
            file,
            progress.rows
        );
    });

    let summary = export_archive(&archive, &config, Some(&callback))?;

    println!();
    println!("Finished");
    println!("   Conversations: {}", summary.stats.conversations);
    println!("   Events:        {}", summary.stats.events);
    println!("   Avg per conv:  {:.1}", summary.stats.average_events());
    println!("   Total time:    {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

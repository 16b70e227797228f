//! perldoc: generate wiki pages from Perl XS binding sources.
//!
//! Scans a fixed list of binding files for `Perl_croak` usage strings and
//! event exports, then writes one page per scope, function and event into
//! the output directory plus a YAML sample manifest.
//!
//! `perldoc` run from `utils/doc_scripts/perlparse` needs no arguments.

mod config;
mod error;
mod group;
mod model;
mod naming;
mod parser;
mod render;
mod summary;
mod writer;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(
    name = "perldoc",
    about = "Generate wiki pages and a sample manifest from Perl XS binding sources"
)]
struct Cli {
    /// Server source tree the binding paths are relative to
    #[arg(long, default_value = "../../..")]
    root: PathBuf,

    /// Output directory for generated pages
    #[arg(short = 'o', long, default_value = "out")]
    output: PathBuf,

    /// Path of the YAML sample manifest
    #[arg(long, default_value = "perlsample.yml")]
    manifest: PathBuf,

    /// Skip event scanning and the event dispatcher file
    #[arg(long)]
    no_events: bool,

    /// Timestamp for page footers (RFC3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    generated_on: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_settings(self) -> config::Settings {
        config::Settings {
            source_root: self.root,
            output_dir: self.output,
            manifest_path: self.manifest,
            events: !self.no_events,
            generated_on: self
                .generated_on
                .unwrap_or_else(|| Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

/// Accept only RFC3339 timestamps, kept exactly as written.
fn parse_timestamp(value: &str) -> std::result::Result<String, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("not an RFC3339 timestamp: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli.into_settings())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("perldoc={level}"))),
        )
        .with_target(false)
        .init();
}

/// Scan every target, group the results and write all pages.
fn run(settings: &config::Settings) -> Result<()> {
    let start = Instant::now();

    let writer = writer::Writer::create(&settings.output_dir, &settings.generated_on)
        .context("failed to prepare output")?;

    let lookups = config::Lookups::default();
    let parser = parser::Parser::new(
        &lookups,
        parser::ParseOptions {
            events: settings.events,
        },
    )?;

    let mut functions = Vec::new();
    let mut events = Vec::new();
    for target in settings.targets() {
        let scan = parser
            .parse_file(&target, &settings.source_root)
            .with_context(|| format!("failed to read {} file", target.scope))?;
        debug!(
            "{}: {} functions, {} events, {} argument names",
            target.scope,
            scan.functions.len(),
            scan.events.len(),
            scan.argument_uses.len()
        );
        functions.extend(scan.functions);
        events.extend(scan.events);
    }
    info!("loaded {} functions", functions.len());

    group::sort_by_name(&mut functions, &mut events);
    let grouped = group::group(&functions, &events, &lookups);

    let stats = writer
        .write_all(&grouped, &events, &settings.manifest_path)
        .context("failed to write wiki pages")?;
    info!("wrote {} pages", stats.written);
    if stats.failed > 0 {
        warn!("{} pages failed to write", stats.failed);
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}

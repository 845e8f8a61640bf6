//! `discover-abstractions`: discover SEQ/CON/CHC abstractions from a text log.
//!
//! Reads one trace per line (from a file or stdin) and prints a stage-by-stage report.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use process_abstraction::{
    discover, import_text_log, import_text_log_file, report::text_report::write_text_report,
    DiscoveryConfig, PostAbstractionOrder, TextImportOptions,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug` or `process_abstraction=info`)
const LOG_ENV: &str = "PROCESS_ABSTRACTION_LOG";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Stage-by-stage text report
    Text,
    /// Complete discovery result as JSON
    Json,
}

/// Discover a hierarchy of SEQ/CON/CHC abstractions from a log of action sequences.
#[derive(Debug, Parser)]
#[command(name = "discover-abstractions", version)]
struct Args {
    /// Log file with one trace per line (`.gz` files are decompressed); reads stdin if omitted
    input: Option<PathBuf>,

    /// JSON file with discovery parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Character separating the actions of a line
    #[arg(long, default_value_t = ',')]
    separator: char,

    /// Skip empty lines instead of treating the first one as end of input
    #[arg(long)]
    skip_empty_lines: bool,

    /// Re-sort traces and merge identical ones after every abstraction step
    #[arg(long)]
    resort_after_abstraction: bool,

    /// Fail if the log contains more distinct traces than this
    #[arg(long)]
    max_distinct_traces: Option<usize>,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let separator = u8::try_from(args.separator)
        .with_context(|| format!("separator {:?} is not a single byte", args.separator))?;
    let options = TextImportOptions {
        separator,
        stop_at_empty_line: !args.skip_empty_lines,
        max_distinct_traces: args.max_distinct_traces,
    };

    let mut config = match &args.config {
        Some(path) => DiscoveryConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DiscoveryConfig::default(),
    };
    if args.resort_after_abstraction {
        config.post_abstraction_order = PostAbstractionOrder::ResortAndMerge;
    }

    let store = match &args.input {
        Some(path) => import_text_log_file(path, options)
            .with_context(|| format!("importing log {}", path.display()))?,
        None => import_text_log(io::stdin().lock(), options).context("importing log from stdin")?,
    };

    tracing::info!(
        distinct_traces = store.distinct_traces(),
        total_traces = store.total_traces(),
        "log imported"
    );
    let result = discover(store, config);

    let mut out = BufWriter::new(io::stdout().lock());
    match args.format {
        OutputFormat::Text => write_text_report(&mut out, &result)?,
        OutputFormat::Json => writeln!(out, "{}", result.to_json()?)?,
    }
    out.flush()?;
    Ok(())
}

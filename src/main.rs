//! HHP-CLI: Hand History Parser Command Line Interface
//!
//! Processes poker hand-history logs into per-player JSON Lines records.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use std::path::PathBuf;

use hhp_cli::{process_log_file, AllInScope, BatchOptions, ParseOptions};

/// Hand History Parser CLI
///
/// Extracts positions, actions, all-ins, outcomes and balances for every
/// player of every hand in a hand-history log.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Input hand-history log (newest hand first)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output JSON Lines file, one record per player per hand
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Keep raw chip amounts instead of big blinds
    #[arg(long, default_value_t = false)]
    no_normalize: bool,

    /// Only flag an all-in on lines that start with the player's name
    #[arg(long, default_value_t = false)]
    line_scoped_all_in: bool,

    /// Drop the last hand block, as the legacy export does
    #[arg(long, default_value_t = false)]
    skip_last_block: bool,

    /// Enable verbose logging (use -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of worker threads for parallel processing (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0, value_name = "N")]
    threads: usize,

    /// Dry run - parse input but don't write output
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

impl Args {
    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            parse: ParseOptions {
                normalize: !self.no_normalize,
                all_in_scope: if self.line_scoped_all_in {
                    AllInScope::Line
                } else {
                    AllInScope::Section
                },
            },
            skip_last_block: self.skip_last_block,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging based on verbosity level
    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let options = args.batch_options();

    info!("HHP-CLI v{}", env!("CARGO_PKG_VERSION"));
    debug!("Input: {:?}", args.input);
    debug!("Output: {:?}", args.output);
    debug!("Options: {:?}", options);
    debug!("Threads: {}", args.threads);

    if !args.input.exists() {
        error!("Input file not found: {:?}", args.input);
        anyhow::bail!("Input file not found: {:?}", args.input);
    }

    info!("Processing {:?}...", args.input);

    let stats = process_log_file(
        &args.input,
        &args.output,
        &options,
        args.threads,
        args.dry_run,
    )
    .context("Failed to process hand-history log")?;

    info!(
        "Parsed {} of {} hands, {} player records",
        stats.hands_parsed, stats.hands_found, stats.records_written
    );

    if stats.errors > 0 {
        error!("{} hands had errors", stats.errors);
    }

    if stats.balance_mismatches > 0 {
        warn!("{} hands do not balance to zero", stats.balance_mismatches);
    }

    if stats.balance_indeterminate > 0 {
        info!(
            "{} hands could not be balance-checked",
            stats.balance_indeterminate
        );
    }

    if args.dry_run {
        info!("Dry run complete - no output written");
    } else {
        info!("Output written to {:?}", args.output);
    }

    Ok(())
}

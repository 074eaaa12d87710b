//! Batch processor for hand-history logs
//!
//! Handles splitting a log file into hand blocks, parsing the hands in
//! parallel, and writing one JSON record per player per line.

use crate::error::{HhpError, HhpResult};
use crate::hand::{parse_hand, BalanceStatus, ParseOptions, ParsedHand};
use lazy_static::lazy_static;
use log::{debug, error, info, warn};
use rayon::prelude::*;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

lazy_static! {
    static ref HAND_SEPARATOR: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Statistics from batch processing
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub hands_found: usize,
    pub hands_parsed: usize,
    pub records_written: usize,
    pub errors: usize,
    pub balance_mismatches: usize,
    pub balance_indeterminate: usize,
}

/// Options for a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub parse: ParseOptions,
    /// Drop the final block after reordering (legacy export behavior)
    pub skip_last_block: bool,
}

/// A hand block that could not be parsed
#[derive(Debug)]
pub struct HandFailure {
    /// Zero-based position of the block in chronological order
    pub index: usize,
    pub error: HhpError,
}

/// Parsed hands in input order, plus what went wrong along the way
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub hands: Vec<ParsedHand>,
    pub failures: Vec<HandFailure>,
    pub balance_mismatches: usize,
    pub balance_indeterminate: usize,
}

impl BatchOutcome {
    pub fn record_count(&self) -> usize {
        self.hands.iter().map(|hand| hand.players.len()).sum()
    }
}

/// Split a log into hand blocks, oldest first
///
/// The client writes the newest hand first, so file order is reversed.
pub fn split_hands(log: &str) -> Vec<&str> {
    let mut blocks: Vec<&str> = HAND_SEPARATOR
        .split(log)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();
    blocks.reverse();
    blocks
}

/// Parse every block, in parallel, keeping input order
pub fn process_hands(blocks: &[&str], options: &BatchOptions) -> BatchOutcome {
    let results: Vec<HhpResult<ParsedHand>> = blocks
        .par_iter()
        .map(|block| parse_hand(block, &options.parse))
        .collect();

    let mut outcome = BatchOutcome::default();

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(hand) => {
                let hand_id = hand.info.header.hand_id.as_deref().unwrap_or("?");
                match hand.balance.status {
                    BalanceStatus::Balanced => {}
                    BalanceStatus::Mismatch => {
                        outcome.balance_mismatches += 1;
                        warn!(
                            "Hand {} (#{}): balances sum to {} instead of zero",
                            index + 1,
                            hand_id,
                            hand.balance.total
                        );
                    }
                    BalanceStatus::Indeterminate => {
                        outcome.balance_indeterminate += 1;
                        debug!(
                            "Hand {} (#{}): balance check skipped, amounts missing",
                            index + 1,
                            hand_id
                        );
                    }
                }
                outcome.hands.push(hand);
            }
            Err(e) => {
                error!("Hand {}: {}", index + 1, e);
                outcome.failures.push(HandFailure { index, error: e });
            }
        }
    }

    outcome
}

/// Write one JSON object per player record per line
///
/// Returns the number of records written.
pub fn write_records<W: Write>(mut writer: W, hands: &[ParsedHand]) -> HhpResult<usize> {
    let mut written = 0;

    for record in hands.iter().flat_map(|hand| hand.players.iter()) {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// Process a hand-history log, writing player records as JSON Lines
///
/// # Arguments
///
/// * `input_path` - Path to the hand-history log
/// * `output_path` - Path to the JSON Lines output
/// * `options` - Parse and splitting options
/// * `threads` - Number of worker threads (0 keeps the rayon default)
/// * `dry_run` - If true, don't write output file
///
/// # Returns
///
/// Processing statistics including hands parsed, records written and errors.
pub fn process_log_file(
    input_path: &Path,
    output_path: &Path,
    options: &BatchOptions,
    threads: usize,
    dry_run: bool,
) -> HhpResult<ProcessingStats> {
    let mut stats = ProcessingStats::default();

    if threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!("Could not configure {} worker threads: {}", threads, e);
        }
    }

    info!("Reading hand history: {:?}", input_path);
    let log = fs::read_to_string(input_path)?;

    let mut blocks = split_hands(&log);
    if options.skip_last_block && blocks.pop().is_some() {
        debug!("Skipping the last block");
    }
    stats.hands_found = blocks.len();
    info!("Found {} hands in input file", blocks.len());

    let outcome = process_hands(&blocks, options);
    stats.hands_parsed = outcome.hands.len();
    stats.errors = outcome.failures.len();
    stats.balance_mismatches = outcome.balance_mismatches;
    stats.balance_indeterminate = outcome.balance_indeterminate;

    if !dry_run {
        info!("Writing output to {:?}", output_path);
        let writer = BufWriter::new(File::create(output_path)?);
        stats.records_written = write_records(writer, &outcome.hands)?;
    }

    Ok(stats)
}

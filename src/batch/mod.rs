//! Batch processing of hand-history logs

mod processor;

pub use processor::{
    process_hands, process_log_file, split_hands, write_records, BatchOptions, BatchOutcome,
    HandFailure, ProcessingStats,
};

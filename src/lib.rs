//! HHP-CLI Library
//!
//! This library provides the core functionality for the Hand History Parser
//! CLI. It turns poker hand-history transcripts into per-player records:
//! positions, stacks, actions per street, all-in events, outcomes and net
//! balances in big blinds.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │   Rust CLI      │────▶│  batch           │────▶│  hand           │
//! │   (hhp-cli)     │     │ (split, rayon)   │     │ (one hand text) │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │  JSON Lines      │  (one record per player)
//!                         └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`hand`] - Single-hand extraction engine
//! - [`batch`] - Batch processing for hand-history logs
//! - [`error`] - Error types

pub mod batch;
pub mod error;
pub mod hand;

pub use batch::{process_log_file, BatchOptions, ProcessingStats};
pub use error::{HhpError, HhpResult};
pub use hand::{parse_hand, AllInScope, Outcome, ParseOptions, ParsedHand, PlayerRecord};

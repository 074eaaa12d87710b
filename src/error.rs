//! Error types for HHP-CLI

use thiserror::Error;

/// Main error type for hand-history parsing operations
#[derive(Error, Debug)]
pub enum HhpError {
    /// Hand text has no header line
    #[error("Hand text is empty")]
    EmptyHand,

    /// No `Seat <n>: <name> (<stack> in chips)` lines in the hand
    #[error("No seated players in hand {0}")]
    NoPlayers(String),

    /// A seat line whose seat number or stack cannot be read
    #[error("Malformed seat line: {0}")]
    MalformedSeat(String),

    /// The seat listing names a seat or a player twice
    #[error("Duplicate seat listing entry: {0}")]
    DuplicatePlayer(String),

    /// A name outside the seat listing was referenced by the hand body
    #[error("Player {0} is not seated at this table")]
    UnknownPlayer(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Record serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for hand-history operations
pub type HhpResult<T> = Result<T, HhpError>;

//! Single-hand extraction engine
//!
//! A hand block flows through the stages below; each stage reads the
//! immutable [`HandContext`] and the output of the stages before it.
//!
//! ```text
//! header ─▶ seating ─▶ streets ─▶ actions / all-in ─▶ outcome ─▶ balance
//! ```

pub mod actions;
pub mod balance;
pub mod header;
pub mod outcome;
mod patterns;
pub mod record;
pub mod seating;
pub mod stake;
pub mod streets;

#[cfg(test)]
pub(crate) mod fixtures;

pub use actions::{Action, AllInFlags, AllInScope, StreetActions};
pub use balance::{BalanceGap, BalanceReport, BalanceResult, BalanceStatus};
pub use header::{HandContext, HandHeader};
pub use outcome::Outcome;
pub use record::{parse_hand, HandInfo, ParseOptions, ParsedHand, PlayerRecord};
pub use seating::{Player, Position};
pub use stake::{normalize, Blinds};
pub use streets::{Board, Street};

//! Net balance per player and the per-hand zero-sum check
//!
//! The balance is a cross-check on the extracted actions, not an authority
//! over the outcome. Calls are increments; bets and raises are read as the
//! player's total for the street, so only the part above what they already
//! put in that street is charged. Preflop that includes the posted blind.

use std::fmt;

use serde::Serialize;

use super::actions::{Action, StreetActions};
use super::header::HandContext;
use super::patterns::{COLLECTED, UNCALLED_RETURNED};
use super::seating::Player;
use super::stake::{parse_amount, round2};
use super::streets::Street;

/// Largest per-hand sum still treated as zero, in normalized units
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Why a balance could only be partially computed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BalanceGap {
    /// A call, bet or raise on this street has no readable amount
    MissingActionAmount { street: Street },
    /// A collected or returned amount could not be parsed
    UnparsableAmount { context: String },
}

impl fmt::Display for BalanceGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceGap::MissingActionAmount { street } => {
                write!(f, "action without amount on {:?}", street)
            }
            BalanceGap::UnparsableAmount { context } => {
                write!(f, "unparsable amount in {}", context)
            }
        }
    }
}

/// Net result of a hand for one player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BalanceResult {
    Computed { value: f64 },
    /// Terms that could not be read are left out of `partial`
    Degraded { partial: f64, reason: BalanceGap },
}

impl BalanceResult {
    /// Balance when every term was read
    pub fn value(&self) -> Option<f64> {
        match self {
            BalanceResult::Computed { value } => Some(*value),
            BalanceResult::Degraded { .. } => None,
        }
    }

    /// Best available figure, partial when degraded
    pub fn partial(&self) -> f64 {
        match self {
            BalanceResult::Computed { value } => *value,
            BalanceResult::Degraded { partial, .. } => *partial,
        }
    }

    /// Figure as the legacy dataset reports it: 0.0 whenever degraded
    pub fn legacy_value(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, BalanceResult::Degraded { .. })
    }
}

/// Net balance of `player` given their four street action tri-states
///
/// `-(ante + chips put in on each street) + collected + uncalled bets returned`
pub fn player_balance(
    ctx: &HandContext<'_>,
    player: &Player,
    streets: &[StreetActions; 4],
) -> BalanceResult {
    let text = ctx.text();
    let normalizer = ctx.normalizer();
    let mut gap: Option<BalanceGap> = None;
    let mut balance = -player.posted_ante;

    for (street, actions) in Street::ALL.iter().zip(streets) {
        let opening = if *street == Street::Preflop {
            player.posted_blind
        } else {
            0.0
        };
        let (chips, complete) = street_contribution(opening, actions.actions());
        balance -= chips;
        if !complete {
            gap.get_or_insert(BalanceGap::MissingActionAmount { street: *street });
        }
    }

    for caps in COLLECTED.captures_iter(text) {
        if &caps[1] != player.name {
            continue;
        }
        match parse_amount(&caps[2]) {
            Some(amount) => balance += normalizer.apply(amount),
            None => {
                gap.get_or_insert(BalanceGap::UnparsableAmount {
                    context: caps[0].to_string(),
                });
            }
        }
    }

    for caps in UNCALLED_RETURNED.captures_iter(text) {
        if &caps[2] != player.name {
            continue;
        }
        match parse_amount(&caps[1]) {
            Some(amount) => balance += normalizer.apply(amount),
            None => {
                gap.get_or_insert(BalanceGap::UnparsableAmount {
                    context: caps[0].to_string(),
                });
            }
        }
    }

    let balance = round2(balance);
    match gap {
        None => BalanceResult::Computed { value: balance },
        Some(reason) => BalanceResult::Degraded {
            partial: balance,
            reason,
        },
    }
}

/// Chips a player put in on one street, starting from `opening` already in
///
/// A bet or raise moves the street total up to its amount; a call adds to
/// it. The flag is false when an amount could not be read and was skipped.
fn street_contribution(opening: f64, actions: &[Action]) -> (f64, bool) {
    let mut committed = opening;
    let mut complete = true;

    for action in actions {
        match (action, action.amount()) {
            (Action::Call(_), Some(amount)) => committed += amount,
            (Action::Bet(_) | Action::Raise(_), Some(amount)) => {
                committed = committed.max(amount);
            }
            (_, None) if action.is_contribution() => complete = false,
            _ => {}
        }
    }

    (committed, complete)
}

/// Outcome of the zero-sum check for one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Balanced,
    Mismatch,
    /// At least one balance was degraded, so the sum proves nothing
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceReport {
    pub status: BalanceStatus,
    /// Sum of (partial) balances, rounded to two decimals
    pub total: f64,
}

impl BalanceReport {
    pub fn from_balances<'b>(balances: impl IntoIterator<Item = &'b BalanceResult>) -> Self {
        let mut total = 0.0;
        let mut degraded = false;
        for balance in balances {
            total += balance.partial();
            degraded |= balance.is_degraded();
        }
        let total = round2(total);

        let status = if degraded {
            BalanceStatus::Indeterminate
        } else if total.abs() <= BALANCE_TOLERANCE + f64::EPSILON {
            BalanceStatus::Balanced
        } else {
            BalanceStatus::Mismatch
        };

        Self { status, total }
    }

    pub fn is_mismatch(&self) -> bool {
        self.status == BalanceStatus::Mismatch
    }
}

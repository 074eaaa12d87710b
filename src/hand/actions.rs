//! Per-street action extraction and all-in detection

use regex::Regex;
use serde::Serialize;

use super::patterns::{
    captured_amount, BETS_AMOUNT, CALLS_AMOUNT, RAISE_TO_SHORTHAND, TO_AMOUNT,
};
use super::seating::Player;
use super::stake::Normalizer;
use super::streets::{Street, StreetSegments};

const ALL_IN_MARKER: &str = "all-in";

/// One recorded action. Amounts are normalized, or `None` when the amount
/// text could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call(Option<f64>),
    Bet(Option<f64>),
    Raise(Option<f64>),
    /// Unrecognized line, labelled by its first word
    Unknown(String),
}

impl Action {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Action::Call(amount) | Action::Bet(amount) | Action::Raise(amount) => *amount,
            Action::Fold | Action::Check | Action::Unknown(_) => None,
        }
    }

    /// Whether the action puts chips in the pot
    pub fn is_contribution(&self) -> bool {
        matches!(self, Action::Call(_) | Action::Bet(_) | Action::Raise(_))
    }
}

/// What a player did on one street
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreetActions {
    /// The hand never reached this street
    StreetAbsent,
    /// The street happened but the player has no line on it
    NoActions,
    Actions(Vec<Action>),
}

impl StreetActions {
    pub fn actions(&self) -> &[Action] {
        match self {
            StreetActions::Actions(actions) => actions,
            StreetActions::StreetAbsent | StreetActions::NoActions => &[],
        }
    }
}

/// Classify the remainder of a `<name>:` line.
///
/// Rules apply in order and the first hit wins. The `N to M` shorthand is
/// read as a bet of `M`, not a raise.
pub fn classify_action(remainder: &str, normalizer: &Normalizer) -> Action {
    let content = remainder.trim().to_lowercase();
    let amount = |re: &Regex| normalizer.apply_opt(captured_amount(re, &content));

    if RAISE_TO_SHORTHAND.is_match(&content) {
        Action::Bet(amount(&*TO_AMOUNT))
    } else if content.contains("raises") && content.contains("to") {
        Action::Raise(amount(&*TO_AMOUNT))
    } else if content.contains("bets") {
        Action::Bet(amount(&*BETS_AMOUNT))
    } else if content.contains("calls") {
        Action::Call(amount(&*CALLS_AMOUNT))
    } else if content.contains("folds") {
        Action::Fold
    } else if content.contains("checks") {
        Action::Check
    } else {
        let label = content.split_whitespace().next().unwrap_or_default();
        Action::Unknown(label.to_string())
    }
}

/// Ordered actions of `name` on `street`
pub fn extract_street_actions(
    segments: &StreetSegments<'_>,
    street: Street,
    name: &str,
    normalizer: &Normalizer,
) -> StreetActions {
    let Some(section) = segments.section(street) else {
        return StreetActions::StreetAbsent;
    };

    let prefix = format!("{}:", name);
    let actions: Vec<Action> = section
        .trim()
        .lines()
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|remainder| classify_action(remainder, normalizer))
        .collect();

    if actions.is_empty() {
        StreetActions::NoActions
    } else {
        StreetActions::Actions(actions)
    }
}

/// How far the all-in marker may sit from the player's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllInScope {
    /// `<name>:` anywhere in the section, followed on the same line by the
    /// marker. Can fire for a player whose name ends another player's name.
    #[default]
    Section,
    /// Only lines that start with `<name>:`
    Line,
}

/// Whether `name` went all-in on `street`
pub fn street_all_in(
    segments: &StreetSegments<'_>,
    street: Street,
    name: &str,
    scope: AllInScope,
) -> bool {
    let Some(section) = segments.section(street) else {
        return false;
    };
    let tag = format!("{}:", name);

    match scope {
        AllInScope::Section => section.lines().any(|line| {
            line.find(tag.as_str())
                .is_some_and(|at| line[at + tag.len()..].contains(ALL_IN_MARKER))
        }),
        AllInScope::Line => section.lines().any(|line| {
            line.trim_start().starts_with(tag.as_str()) && line.contains(ALL_IN_MARKER)
        }),
    }
}

/// All-in facts for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllInFlags {
    pub ante: bool,
    pub preflop: bool,
    pub flop: bool,
    pub turn: bool,
    pub river: bool,
}

impl AllInFlags {
    pub fn detect(segments: &StreetSegments<'_>, player: &Player, scope: AllInScope) -> Self {
        let on = |street| street_all_in(segments, street, &player.name, scope);
        Self {
            ante: player.ante_all_in,
            preflop: on(Street::Preflop),
            flop: on(Street::Flop),
            turn: on(Street::Turn),
            river: on(Street::River),
        }
    }

    pub fn any(&self) -> bool {
        self.earliest().is_some()
    }

    /// First street the player was all-in on; an ante all-in counts as preflop
    pub fn earliest(&self) -> Option<Street> {
        if self.ante || self.preflop {
            Some(Street::Preflop)
        } else if self.flop {
            Some(Street::Flop)
        } else if self.turn {
            Some(Street::Turn)
        } else if self.river {
            Some(Street::River)
        } else {
            None
        }
    }
}

//! Outcome classification
//!
//! Rules are tried in a fixed order and the first one that applies decides:
//! folded, won, split, lost at showdown, eliminated, lost.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Serialize, Serializer};

use super::actions::AllInFlags;
use super::patterns::{mentions, COLLECTED, FOLDED};
use super::stake::parse_amount;
use super::streets::{Street, StreetSegments};
use crate::error::{HhpError, HhpResult};

const UNCALLED_BET: &str = "Uncalled bet";

/// How a hand ended for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    FoldedPreFlop,
    FoldedFlop,
    FoldedTurn,
    FoldedRiver,
    WonPreFlop,
    WonFlop,
    WonTurn,
    WonRiver,
    WonShowdown,
    SplitMain,
    SplitSecondary,
    Split,
    LostAtShowdown,
    EliminatedPreFlop,
    EliminatedFlop,
    EliminatedTurn,
    EliminatedRiver,
    Lost,
}

impl Outcome {
    pub const ALL: [Outcome; 18] = [
        Outcome::FoldedPreFlop,
        Outcome::FoldedFlop,
        Outcome::FoldedTurn,
        Outcome::FoldedRiver,
        Outcome::WonPreFlop,
        Outcome::WonFlop,
        Outcome::WonTurn,
        Outcome::WonRiver,
        Outcome::WonShowdown,
        Outcome::SplitMain,
        Outcome::SplitSecondary,
        Outcome::Split,
        Outcome::LostAtShowdown,
        Outcome::EliminatedPreFlop,
        Outcome::EliminatedFlop,
        Outcome::EliminatedTurn,
        Outcome::EliminatedRiver,
        Outcome::Lost,
    ];

    /// Dataset label
    pub fn label(self) -> &'static str {
        match self {
            Outcome::FoldedPreFlop => "Folded Pre Flop",
            Outcome::FoldedFlop => "Folded On The Flop",
            Outcome::FoldedTurn => "Folded On The Turn",
            Outcome::FoldedRiver => "Folded On The River",
            Outcome::WonPreFlop => "Won Pre Flop",
            Outcome::WonFlop => "Won At The Flop",
            Outcome::WonTurn => "Won At The Turn",
            Outcome::WonRiver => "Won At The River",
            Outcome::WonShowdown => "Won At Showdown",
            Outcome::SplitMain => "Split Main Pot",
            Outcome::SplitSecondary => "Split Secondary Pot",
            Outcome::Split => "Split",
            Outcome::LostAtShowdown => "Lost At Showdown",
            Outcome::EliminatedPreFlop => "Eliminated Pre Flop",
            Outcome::EliminatedFlop => "Eliminated On The Flop",
            Outcome::EliminatedTurn => "Eliminated On The Turn",
            Outcome::EliminatedRiver => "Eliminated On The River",
            Outcome::Lost => "Lost",
        }
    }

    pub fn folded_on(street: Street) -> Self {
        match street {
            Street::Preflop => Outcome::FoldedPreFlop,
            Street::Flop => Outcome::FoldedFlop,
            Street::Turn => Outcome::FoldedTurn,
            Street::River => Outcome::FoldedRiver,
        }
    }

    pub fn eliminated_on(street: Street) -> Self {
        match street {
            Street::Preflop => Outcome::EliminatedPreFlop,
            Street::Flop => Outcome::EliminatedFlop,
            Street::Turn => Outcome::EliminatedTurn,
            Street::River => Outcome::EliminatedRiver,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Hand-wide facts the outcome rules consult, gathered once per hand
#[derive(Debug, Clone)]
pub struct OutcomeRules<'a> {
    text: &'a str,
    segments: StreetSegments<'a>,
    /// Summary fold lines, first per player
    folds: HashMap<String, Street>,
    /// Everyone with a `collected <n>` line anywhere in the hand
    collectors: HashSet<String>,
    /// Showdown collectors with their summed amounts, in order of appearance;
    /// `None` once any of a collector's amounts is unreadable
    showdown_totals: Vec<(String, Option<f64>)>,
    /// Text after the last uncalled-bet line
    after_uncalled: Option<&'a str>,
}

impl<'a> OutcomeRules<'a> {
    /// Gather the facts for one hand.
    ///
    /// Every collector and every summary folder must pass `is_seated`;
    /// anyone else is an [`HhpError::UnknownPlayer`].
    pub fn new(
        text: &'a str,
        segments: StreetSegments<'a>,
        is_seated: impl Fn(&str) -> bool,
    ) -> HhpResult<Self> {
        let mut folds = HashMap::new();
        for caps in FOLDED.captures_iter(segments.summary()) {
            let street = match &caps[2] {
                "before Flop" => Street::Preflop,
                "on the Flop" => Street::Flop,
                "on the Turn" => Street::Turn,
                _ => Street::River,
            };
            folds.entry(caps[1].to_string()).or_insert(street);
        }

        let mut collectors = HashSet::new();
        for caps in COLLECTED.captures_iter(text) {
            let name = &caps[1];
            if !is_seated(name) {
                return Err(HhpError::UnknownPlayer(name.to_string()));
            }
            collectors.insert(name.to_string());
        }

        let mut showdown_totals: Vec<(String, Option<f64>)> = Vec::new();
        for caps in COLLECTED.captures_iter(segments.showdown()) {
            let amount = parse_amount(&caps[2]);
            match showdown_totals.iter_mut().find(|(n, _)| n == &caps[1]) {
                Some((_, total)) => *total = total.zip(amount).map(|(a, b)| a + b),
                None => showdown_totals.push((caps[1].to_string(), amount)),
            }
        }

        for name in folds.keys() {
            if !is_seated(name) {
                return Err(HhpError::UnknownPlayer(name.clone()));
            }
        }

        Ok(Self {
            text,
            segments,
            folds,
            collectors,
            showdown_totals,
            after_uncalled: text
                .rfind(UNCALLED_BET)
                .map(|at| &text[at + UNCALLED_BET.len()..]),
        })
    }

    /// Outcome for one seated player
    pub fn classify(&self, name: &str, all_in: &AllInFlags) -> Outcome {
        if let Some(street) = self.folds.get(name) {
            return Outcome::folded_on(*street);
        }

        if self.collectors.contains(name) && self.showdown_totals.len() == 1 {
            return self.won(name);
        }

        if let Some(outcome) = self.split(name) {
            return outcome;
        }

        if self.segments.reached(Street::River)
            && !all_in.any()
            && !mentions(self.segments.showdown(), name)
            && mentions(self.text, name)
        {
            return Outcome::LostAtShowdown;
        }

        match all_in.earliest() {
            Some(street) => Outcome::eliminated_on(street),
            None => Outcome::Lost,
        }
    }

    /// Uncontested winner, by the last street the hand reached
    fn won(&self, name: &str) -> Outcome {
        if !self.segments.reached(Street::Flop) {
            Outcome::WonPreFlop
        } else if !self.segments.reached(Street::Turn) {
            Outcome::WonFlop
        } else if !self.segments.reached(Street::River) {
            Outcome::WonTurn
        } else if self.after_uncalled.is_some_and(|tail| mentions(tail, name)) {
            Outcome::WonRiver
        } else {
            Outcome::WonShowdown
        }
    }

    /// Share of a pot divided between several showdown collectors
    ///
    /// `None` leaves the player to the later rules: not a collector, an
    /// unreadable amount, or a share strictly between the smallest and
    /// largest totals.
    fn split(&self, name: &str) -> Option<Outcome> {
        let (_, total) = self.showdown_totals.iter().find(|(n, _)| n == name)?;
        if self.showdown_totals.len() == 1 {
            return Some(Outcome::WonShowdown);
        }

        let total = (*total)?;
        let totals: Vec<f64> = self
            .showdown_totals
            .iter()
            .map(|(_, t)| *t)
            .collect::<Option<Vec<f64>>>()?;
        let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if totals.iter().filter(|t| **t == total).count() > 1 {
            Some(Outcome::Split)
        } else if total == min {
            Some(Outcome::SplitMain)
        } else if total == max {
            Some(Outcome::SplitSecondary)
        } else {
            None
        }
    }
}

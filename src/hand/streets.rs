//! Street segmentation and board cards

use serde::Serialize;

use super::patterns::{split_cards, FLOP_CARDS, RIVER_CARD, TURN_CARD};

const SECTION_DELIMITER: &str = "***";
pub const SHOWDOWN_MARKER: &str = "*** SHOWDOWN ***";
pub const SUMMARY_MARKER: &str = "*** SUMMARY ***";

/// Betting round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Section marker that opens this street
    pub fn marker(self) -> &'static str {
        match self {
            Street::Preflop => "*** HOLE CARDS ***",
            Street::Flop => "*** FLOP ***",
            Street::Turn => "*** TURN ***",
            Street::River => "*** RIVER ***",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Text after `marker` up to the next `***` or the end of the text.
///
/// `None` when the marker does not occur; `Some("")` when it occurs with
/// nothing behind it.
pub fn find_section<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find(SECTION_DELIMITER).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// The body of one hand cut into its street, showdown and summary sections
#[derive(Debug, Clone, Copy)]
pub struct StreetSegments<'a> {
    streets: [Option<&'a str>; 4],
    showdown: Option<&'a str>,
    summary: &'a str,
}

impl<'a> StreetSegments<'a> {
    pub fn split(text: &'a str) -> Self {
        let streets = Street::ALL.map(|street| find_section(text, street.marker()));
        let summary = text
            .rsplit_once(SUMMARY_MARKER)
            .map(|(_, tail)| tail)
            .unwrap_or(text);

        Self {
            streets,
            showdown: find_section(text, SHOWDOWN_MARKER),
            summary,
        }
    }

    /// Section for `street`, or `None` when the hand never reached it
    pub fn section(&self, street: Street) -> Option<&'a str> {
        self.streets[street.index()]
    }

    pub fn reached(&self, street: Street) -> bool {
        self.section(street).is_some()
    }

    /// Showdown section, empty when the hand has none
    pub fn showdown(&self) -> &'a str {
        self.showdown.unwrap_or("")
    }

    /// Text after the last summary marker, or the whole hand without one
    pub fn summary(&self) -> &'a str {
        self.summary
    }
}

/// Community cards as they stood on each street
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    pub flop: Vec<String>,
    pub turn: Vec<String>,
    pub river: Vec<String>,
}

impl Board {
    /// Accumulate flop, turn and river; a missing street stops accumulation
    pub fn extract(text: &str) -> Self {
        let mut board = Board::default();

        let Some(flop) = FLOP_CARDS.captures(text) else {
            return board;
        };
        board.flop = split_cards(&flop[1]);

        let Some(turn) = TURN_CARD.captures(text) else {
            return board;
        };
        board.turn = board.flop.clone();
        board.turn.push(turn[1].trim().to_string());

        let Some(river) = RIVER_CARD.captures(text) else {
            return board;
        };
        board.river = board.turn.clone();
        board.river.push(river[1].trim().to_string());

        board
    }
}

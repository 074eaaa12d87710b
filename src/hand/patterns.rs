//! Precompiled extraction patterns and the small matching helpers built on them
//!
//! Patterns never embed a player name. Rules that concern one player capture
//! the name with `(\w+)` and compare it, so `Bob` never matches `JimBob`.

use lazy_static::lazy_static;
use regex::Regex;

use super::stake::parse_amount;

lazy_static! {
    // Header line
    pub static ref MODALITY: Regex = Regex::new(r"Tournament #\d+, (.+?) - Level").unwrap();
    pub static ref BUY_IN: Regex = Regex::new(r"\((\d+)\+(\d+)\+\d+\)").unwrap();
    pub static ref TOURNAMENT_ID: Regex = Regex::new(r"Tournament (#\d+)").unwrap();
    pub static ref HAND_ID: Regex = Regex::new(r"Poker Hand #tour_(\d+)").unwrap();
    pub static ref LOCAL_TIME: Regex =
        Regex::new(r" - (\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2})").unwrap();
    pub static ref LEVEL: Regex = Regex::new(r"-( Level\d+)").unwrap();
    pub static ref CHIP_BLINDS: Regex = Regex::new(r"\(([\d,]+)/([\d,]+)\)").unwrap();
    pub static ref CASH_BLINDS: Regex = Regex::new(r"\(\$([\d,.]+)/\$([\d,.]+)\)").unwrap();

    // Hand-wide facts read from the body
    pub static ref TABLE_SIZE: Regex =
        Regex::new(r"Table '' (.+?) Seat #\d+ is the button").unwrap();
    pub static ref ANTE: Regex = Regex::new(r"posts the ante (\d{1,3}(?:,\d{3})*)").unwrap();

    // Seating
    pub static ref SEAT: Regex = Regex::new(r"Seat (\d+): (\w+) \(([\d,]+) in chips\)").unwrap();
    pub static ref POSTED_ANTE: Regex = Regex::new(r"(\w+):\s+posts the ante ([\d,]+)").unwrap();
    pub static ref POSTED_BLIND: Regex =
        Regex::new(r"(\w+):\s+posts (?:small|big) blind ([\d,]+)").unwrap();
    pub static ref HERO_HAND: Regex = Regex::new(r"Dealt to Hero \[(.*?)\]").unwrap();
    pub static ref SHOWS: Regex = Regex::new(r"(\w+): shows \[(.*?)\]").unwrap();
    pub static ref ACTION_LINE: Regex = Regex::new(r"(?m)^[ \t]*(\w+):").unwrap();

    // Action lines (matched against the lowercased remainder)
    pub static ref RAISE_TO_SHORTHAND: Regex = Regex::new(r"^[\d,]+\s+to\s+[\d,]+").unwrap();
    pub static ref TO_AMOUNT: Regex = Regex::new(r"to\s+([\d,]+)").unwrap();
    pub static ref BETS_AMOUNT: Regex = Regex::new(r"bets\s+([\d,]+)").unwrap();
    pub static ref CALLS_AMOUNT: Regex = Regex::new(r"calls\s+([\d,]+)").unwrap();

    // Board
    pub static ref FLOP_CARDS: Regex = Regex::new(r"\*\*\* FLOP \*\*\* \[(.*?)\]").unwrap();
    pub static ref TURN_CARD: Regex = Regex::new(r"\*\*\* TURN \*\*\* \[.*?\] \[(.*?)\]").unwrap();
    pub static ref RIVER_CARD: Regex =
        Regex::new(r"\*\*\* RIVER \*\*\* \[.*?\] \[(.*?)\]").unwrap();

    // Results
    pub static ref FOLDED: Regex = Regex::new(
        r"(\w+)(?:\s*\([^)]*\))?\s+folded (before Flop|on the Flop|on the Turn|on the River)"
    )
    .unwrap();
    pub static ref COLLECTED: Regex = Regex::new(r"(\w+)\s+collected\s+([\d,]+)").unwrap();
    pub static ref UNCALLED_RETURNED: Regex =
        Regex::new(r"Uncalled bet \(([\d,]+)\) returned to (\w+)").unwrap();
}

/// Parse the amount in capture group 1 of the first match of `re`.
///
/// `None` covers both "no match" and "matched but not a number".
pub fn captured_amount(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_amount(m.as_str()))
}

/// Split the contents of a bracketed card group into card tokens
pub fn split_cards(group: &str) -> Vec<String> {
    group.split_whitespace().map(str::to_string).collect()
}

/// Whole-word search for a player name
pub fn mentions(haystack: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    haystack.match_indices(name).any(|(at, _)| {
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + name.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_is_word_bounded() {
        assert!(mentions("Uncalled bet (200) returned to Bob", "Bob"));
        assert!(mentions("Bob: shows [Ah Kh]", "Bob"));
        assert!(!mentions("JimBob collected 400", "Bob"));
        assert!(!mentions("Bobby folds", "Bob"));
        assert!(!mentions("anything", ""));
    }

    #[test]
    fn test_captured_amount() {
        assert_eq!(captured_amount(&BETS_AMOUNT, "bets 1,250"), Some(1250.0));
        assert_eq!(captured_amount(&BETS_AMOUNT, "bets ,"), None);
        assert_eq!(captured_amount(&BETS_AMOUNT, "checks"), None);
    }

    #[test]
    fn test_folded_pattern_accepts_role() {
        let caps = FOLDED
            .captures("Seat 1: Alice (small blind) folded before Flop")
            .unwrap();
        assert_eq!(&caps[1], "Alice");
        assert_eq!(&caps[2], "before Flop");

        let caps = FOLDED.captures("Carol folded on the Turn").unwrap();
        assert_eq!(&caps[1], "Carol");
        assert_eq!(&caps[2], "on the Turn");
    }
}

//! Seating and position resolution
//!
//! The seat listing is the universe of names for a hand. Acting order comes
//! from the order of ante postings, never from seat numbers.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Serialize, Serializer};

use super::header::HandContext;
use super::patterns::{
    split_cards, ACTION_LINE, HERO_HAND, POSTED_ANTE, POSTED_BLIND, SEAT, SHOWS,
};
use super::stake::parse_amount;
use super::streets::{Street, StreetSegments};
use crate::error::{HhpError, HhpResult};

/// Table position of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGunPlusOne,
    Middle,
    MiddlePlusOne,
    Hijack,
    Cutoff,
    Button,
    /// Acting-order slot at tables with more than nine players (zero-indexed)
    Ordinal(usize),
    /// Fallback for a player missing from the ante-posting order
    Seat(u32),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::SmallBlind => write!(f, "SB"),
            Position::BigBlind => write!(f, "BB"),
            Position::UnderTheGun => write!(f, "UTG"),
            Position::UnderTheGunPlusOne => write!(f, "UTG+1"),
            Position::Middle => write!(f, "MP"),
            Position::MiddlePlusOne => write!(f, "MP+1"),
            Position::Hijack => write!(f, "HJ"),
            Position::Cutoff => write!(f, "CO"),
            Position::Button => write!(f, "BTN"),
            Position::Ordinal(slot) => write!(f, "Seat {}", slot),
            Position::Seat(seat) => write!(f, "Seat {}", seat),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canonical acting order for a table of `count` players
pub fn positions_order(count: usize) -> Vec<Position> {
    use Position::*;

    match count {
        2 => vec![SmallBlind, Button],
        3 => vec![SmallBlind, BigBlind, Button],
        4 => vec![SmallBlind, BigBlind, UnderTheGun, Button],
        5 => vec![SmallBlind, BigBlind, UnderTheGun, Cutoff, Button],
        6 => vec![
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGunPlusOne,
            Cutoff,
            Button,
        ],
        7 => vec![
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGunPlusOne,
            Hijack,
            Cutoff,
            Button,
        ],
        8 => vec![
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGunPlusOne,
            Middle,
            Hijack,
            Cutoff,
            Button,
        ],
        9 => vec![
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGunPlusOne,
            Middle,
            MiddlePlusOne,
            Hijack,
            Cutoff,
            Button,
        ],
        _ => (0..count).map(Ordinal).collect(),
    }
}

/// A seated player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub seat: u32,
    pub name: String,
    pub stack: f64,
    pub position: Position,
    pub posted_ante: f64,
    pub posted_blind: f64,
    /// The ante took the whole stack, decided on raw chip amounts
    pub ante_all_in: bool,
}

/// Names in ante-posting order, zipped onto the canonical positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    slots: Vec<(String, Position)>,
}

impl PositionMap {
    /// Map an acting order onto the canonical list for its length
    pub fn from_order(order: &[String]) -> Self {
        let slots = order
            .iter()
            .cloned()
            .zip(positions_order(order.len()))
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|(n, _)| n == name)
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, position)| *position)
    }

    /// True when every name maps to a distinct label and every canonical
    /// label for this table size is used exactly once
    pub fn is_bijective(&self) -> bool {
        let names: HashSet<&str> = self.slots.iter().map(|(n, _)| n.as_str()).collect();
        let labels: HashSet<Position> = self.slots.iter().map(|(_, p)| *p).collect();
        let canonical: HashSet<Position> = positions_order(self.slots.len()).into_iter().collect();
        names.len() == self.slots.len() && labels == canonical
    }
}

/// Players of one hand in display order, with their position assignment
#[derive(Debug, Clone)]
pub struct Seating {
    players: Vec<Player>,
    positions: PositionMap,
}

impl Seating {
    pub fn resolve(ctx: &HandContext<'_>) -> HhpResult<Self> {
        let mut players = extract_players(ctx)?;
        let order = ante_order(ctx.text(), &players)?;
        let positions = PositionMap::from_order(&order);
        if positions.is_empty() {
            debug!("No ante postings, positions fall back to seat labels");
        }

        for player in players.iter_mut() {
            player.position = positions
                .position_of(&player.name)
                .unwrap_or(Position::Seat(player.seat));
        }

        // Stable: unmapped players keep their listing order at the end
        players.sort_by_key(|p| positions.slot_of(&p.name).unwrap_or(usize::MAX));

        debug!(
            "Seated {} players, {} with known acting order",
            players.len(),
            positions.len()
        );

        Ok(Self { players, positions })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    /// Every `<name>:` action line on a street must belong to a seated player
    pub fn verify_actors(&self, segments: &StreetSegments<'_>) -> HhpResult<()> {
        for street in Street::ALL {
            let Some(section) = segments.section(street) else {
                continue;
            };
            for caps in ACTION_LINE.captures_iter(section) {
                if !self.contains(&caps[1]) {
                    return Err(HhpError::UnknownPlayer(caps[1].to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Parse the seat listing in text order
///
/// Stacks, posted antes and posted blinds are normalized. Positions are left
/// at the seat fallback; [`Seating::resolve`] assigns the real ones. A blind
/// posted by someone outside the listing is an [`HhpError::UnknownPlayer`].
pub fn extract_players(ctx: &HandContext<'_>) -> HhpResult<Vec<Player>> {
    let text = ctx.text();
    let normalizer = ctx.normalizer();
    let mut players: Vec<Player> = Vec::new();

    for caps in SEAT.captures_iter(text) {
        let seat: u32 = caps[1]
            .parse()
            .map_err(|_| HhpError::MalformedSeat(caps[0].to_string()))?;
        let name = caps[2].to_string();
        let stack =
            parse_amount(&caps[3]).ok_or_else(|| HhpError::MalformedSeat(caps[0].to_string()))?;

        if players.iter().any(|p| p.seat == seat || p.name == name) {
            return Err(HhpError::DuplicatePlayer(caps[0].to_string()));
        }

        let ante = posted_amount(&POSTED_ANTE, text, &name);
        players.push(Player {
            seat,
            posted_ante: normalizer.apply(ante),
            posted_blind: normalizer.apply(posted_amount(&POSTED_BLIND, text, &name)),
            stack: normalizer.apply(stack),
            position: Position::Seat(seat),
            ante_all_in: ante > 0.0 && ante >= stack,
            name,
        });
    }

    if players.is_empty() {
        return Err(HhpError::NoPlayers(ctx.header().to_string()));
    }

    for caps in POSTED_BLIND.captures_iter(text) {
        if !players.iter().any(|p| p.name == &caps[1]) {
            return Err(HhpError::UnknownPlayer(caps[1].to_string()));
        }
    }

    Ok(players)
}

/// First posting by `name` matched by `re`; zero when the player never posted
fn posted_amount(re: &regex::Regex, text: &str, name: &str) -> f64 {
    re.captures_iter(text)
        .filter(|caps| &caps[1] == name)
        .find_map(|caps| parse_amount(&caps[2]))
        .unwrap_or(0.0)
}

/// Names in the order they posted the ante, first posting only
pub fn ante_order(text: &str, players: &[Player]) -> HhpResult<Vec<String>> {
    let mut order: Vec<String> = Vec::new();

    for caps in POSTED_ANTE.captures_iter(text) {
        let name = &caps[1];
        if !players.iter().any(|p| p.name == name) {
            return Err(HhpError::UnknownPlayer(name.to_string()));
        }
        if !order.iter().any(|n| n == name) {
            order.push(name.to_string());
        }
    }

    Ok(order)
}

/// Hole cards from the `Dealt to Hero [..]` line
pub fn extract_hero_hand(text: &str) -> Vec<String> {
    HERO_HAND
        .captures(text)
        .map(|caps| split_cards(&caps[1]))
        .unwrap_or_default()
}

/// Cards the player turned over, from their `shows [..]` line
pub fn extract_showdown_cards(text: &str, name: &str) -> Vec<String> {
    SHOWS
        .captures_iter(text)
        .find(|caps| &caps[1] == name)
        .map(|caps| split_cards(&caps[2]))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAND: &str = "Poker Hand #tour_1: Tournament #9, Turbo - Level1 (100/200) - 2024/05/01 20:15:42
Table '' 4-max Seat #1 is the button
Seat 4: Dave (6,000 in chips)
Seat 1: Alice (4,000 in chips)
Seat 2: Bob (2,000 in chips)
Seat 3: Carol (20 in chips)
Bob: posts the ante 20
Carol: posts the ante 20
Alice: posts the ante 20
Bob: posts small blind 100
*** HOLE CARDS ***
Dealt to Hero [Qs Qd]
*** SHOWDOWN ***
Bob: shows [Ah Kh]
Bob collected 500 from pot";

    fn names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_extract_players_in_text_order() {
        let ctx = HandContext::new(HAND, true).unwrap();
        let players = extract_players(&ctx).unwrap();
        assert_eq!(names(&players), vec!["Dave", "Alice", "Bob", "Carol"]);
        assert_eq!(players[0].seat, 4);
        assert_eq!(players[0].stack, 30.0);
        assert_eq!(players[2].posted_ante, 0.1);
        assert_eq!(players[2].posted_blind, 0.5);
        assert_eq!(players[0].posted_ante, 0.0);
    }

    #[test]
    fn test_positions_follow_ante_order() {
        let ctx = HandContext::new(HAND, false).unwrap();
        let seating = Seating::resolve(&ctx).unwrap();
        let players = seating.players();

        // Three posters map onto the 3-handed list; Dave never posted
        assert_eq!(names(players), vec!["Bob", "Carol", "Alice", "Dave"]);
        assert_eq!(players[0].position, Position::SmallBlind);
        assert_eq!(players[1].position, Position::BigBlind);
        assert_eq!(players[2].position, Position::Button);
        assert_eq!(players[3].position, Position::Seat(4));
        assert_eq!(players[3].position.to_string(), "Seat 4");
        assert!(seating.positions().is_bijective());
    }

    #[test]
    fn test_positions_fall_back_without_antes() {
        let text: String = HAND
            .lines()
            .filter(|line| !line.contains("posts the ante"))
            .collect::<Vec<_>>()
            .join("\n");
        let ctx = HandContext::new(&text, false).unwrap();
        let seating = Seating::resolve(&ctx).unwrap();

        assert!(seating.positions().is_empty());
        for player in seating.players() {
            assert_eq!(player.position, Position::Seat(player.seat));
        }
    }

    #[test]
    fn test_positions_bijective_for_all_table_sizes() {
        for count in 2..=9 {
            let order: Vec<String> = (0..count).map(|i| format!("p{}", i)).collect();
            let map = PositionMap::from_order(&order);
            assert_eq!(map.len(), count);
            assert!(map.is_bijective(), "table of {}", count);
            for (slot, name) in order.iter().enumerate() {
                assert_eq!(map.position_of(name), Some(positions_order(count)[slot]));
            }
        }
    }

    #[test]
    fn test_positions_order_labels() {
        let labels: Vec<String> = positions_order(9).iter().map(|p| p.to_string()).collect();
        assert_eq!(
            labels,
            vec!["SB", "BB", "UTG", "UTG+1", "MP", "MP+1", "HJ", "CO", "BTN"]
        );
        let labels: Vec<String> = positions_order(10).iter().map(|p| p.to_string()).collect();
        assert_eq!(labels[0], "Seat 0");
        assert_eq!(labels[9], "Seat 9");
    }

    #[test]
    fn test_unknown_ante_poster_is_rejected() {
        let text = format!("{}\nMallory: posts the ante 20", HAND);
        let ctx = HandContext::new(&text, true).unwrap();
        assert!(matches!(
            Seating::resolve(&ctx),
            Err(HhpError::UnknownPlayer(name)) if name == "Mallory"
        ));
    }

    #[test]
    fn test_ante_all_in_uses_chip_amounts() {
        // One chip behind is 0.003 bb, which rounds away once normalized
        let text = HAND
            .replace("(100/200)", "(150/300)")
            .replace("Carol (20 in chips)", "Carol (301 in chips)")
            .replace("Carol: posts the ante 20", "Carol: posts the ante 300");
        for normalize in [true, false] {
            let ctx = HandContext::new(&text, normalize).unwrap();
            let players = extract_players(&ctx).unwrap();
            assert!(!players[3].ante_all_in, "normalize = {}", normalize);
        }

        let ctx = HandContext::new(HAND, true).unwrap();
        let players = extract_players(&ctx).unwrap();
        assert!(players[3].ante_all_in);
        assert!(!players[2].ante_all_in);
    }

    #[test]
    fn test_unknown_blind_poster_is_rejected() {
        let text = format!("{}\nMallory: posts big blind 200", HAND);
        let ctx = HandContext::new(&text, true).unwrap();
        assert!(matches!(
            extract_players(&ctx),
            Err(HhpError::UnknownPlayer(name)) if name == "Mallory"
        ));
    }

    #[test]
    fn test_unknown_actor_is_rejected() {
        let ctx = HandContext::new(HAND, true).unwrap();
        let seating = Seating::resolve(&ctx).unwrap();
        assert!(seating.verify_actors(&StreetSegments::split(HAND)).is_ok());

        let text = HAND.replace("Dealt to Hero [Qs Qd]", "Dealt to Hero [Qs Qd]\nMallory: calls 200");
        assert!(matches!(
            seating.verify_actors(&StreetSegments::split(&text)),
            Err(HhpError::UnknownPlayer(name)) if name == "Mallory"
        ));
    }

    #[test]
    fn test_duplicate_seat_is_rejected() {
        let text = HAND.replace("Seat 3: Carol", "Seat 2: Carol");
        let ctx = HandContext::new(&text, true).unwrap();
        assert!(matches!(
            extract_players(&ctx),
            Err(HhpError::DuplicatePlayer(_))
        ));
    }

    #[test]
    fn test_no_players() {
        let ctx = HandContext::new("Poker Hand #tour_1: nothing", true).unwrap();
        assert!(matches!(extract_players(&ctx), Err(HhpError::NoPlayers(_))));
    }

    #[test]
    fn test_hero_and_showdown_cards() {
        assert_eq!(extract_hero_hand(HAND), vec!["Qs", "Qd"]);
        assert_eq!(extract_showdown_cards(HAND, "Bob"), vec!["Ah", "Kh"]);
        assert!(extract_showdown_cards(HAND, "Alice").is_empty());
    }
}

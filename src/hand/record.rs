//! One hand in, one structured record per seated player out

use log::{debug, trace};
use serde::Serialize;

use super::actions::{extract_street_actions, AllInFlags, AllInScope, StreetActions};
use super::balance::{player_balance, BalanceReport, BalanceResult, BalanceStatus};
use super::header::{HandContext, HandHeader};
use super::outcome::{Outcome, OutcomeRules};
use super::seating::{extract_hero_hand, extract_showdown_cards, Position, Seating};
use super::streets::{Board, Street, StreetSegments};
use crate::error::HhpResult;

/// Per-hand parse switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Express amounts in big blinds
    pub normalize: bool,
    pub all_in_scope: AllInScope,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            all_in_scope: AllInScope::default(),
        }
    }
}

/// Hand-wide part of every player record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandInfo {
    #[serde(flatten)]
    pub header: HandHeader,
    pub board: Board,
    pub hero_hand: Vec<String>,
    pub player_count: usize,
}

/// Everything known about one player in one hand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    #[serde(flatten)]
    pub hand: HandInfo,
    pub player: String,
    pub seat: u32,
    pub posted_ante: f64,
    pub posted_blind: f64,
    pub position: Position,
    pub stack: f64,
    pub preflop_actions: StreetActions,
    pub flop_actions: StreetActions,
    pub turn_actions: StreetActions,
    pub river_actions: StreetActions,
    pub all_in: AllInFlags,
    pub showdown_cards: Vec<String>,
    pub outcome: Outcome,
    pub balance: BalanceResult,
}

impl PlayerRecord {
    pub fn actions(&self, street: Street) -> &StreetActions {
        match street {
            Street::Preflop => &self.preflop_actions,
            Street::Flop => &self.flop_actions,
            Street::Turn => &self.turn_actions,
            Street::River => &self.river_actions,
        }
    }
}

/// Result of parsing one hand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedHand {
    pub info: HandInfo,
    /// Display order: acting order first, unresolved players last
    pub players: Vec<PlayerRecord>,
    pub balance: BalanceReport,
}

impl ParsedHand {
    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|record| record.player == name)
    }
}

/// Parse one hand block into per-player records
///
/// Fails when the block has no header, no valid seat listing, or names a
/// player outside the seat listing. A balance that does not sum to zero is
/// reported in [`ParsedHand::balance`], never as an error.
pub fn parse_hand(text: &str, options: &ParseOptions) -> HhpResult<ParsedHand> {
    let ctx = HandContext::new(text, options.normalize)?;
    let text = ctx.text();
    let seating = Seating::resolve(&ctx)?;
    let segments = StreetSegments::split(text);
    seating.verify_actors(&segments)?;
    let rules = OutcomeRules::new(text, segments, |name| seating.contains(name))?;

    let info = HandInfo {
        header: HandHeader::parse(&ctx),
        board: Board::extract(text),
        hero_hand: extract_hero_hand(text),
        player_count: seating.players().len(),
    };

    let players: Vec<PlayerRecord> = seating
        .players()
        .iter()
        .map(|player| {
            let streets = Street::ALL.map(|street| {
                extract_street_actions(&segments, street, &player.name, ctx.normalizer())
            });
            let all_in = AllInFlags::detect(&segments, player, options.all_in_scope);
            let balance = player_balance(&ctx, player, &streets);
            let outcome = rules.classify(&player.name, &all_in);
            trace!("{} ({}): {}", player.name, player.position, outcome);

            let [preflop_actions, flop_actions, turn_actions, river_actions] = streets;
            PlayerRecord {
                hand: info.clone(),
                player: player.name.clone(),
                seat: player.seat,
                posted_ante: player.posted_ante,
                posted_blind: player.posted_blind,
                position: player.position,
                stack: player.stack,
                preflop_actions,
                flop_actions,
                turn_actions,
                river_actions,
                all_in,
                showdown_cards: extract_showdown_cards(text, &player.name),
                outcome,
                balance,
            }
        })
        .collect();

    let balance = BalanceReport::from_balances(players.iter().map(|record| &record.balance));
    if balance.status != BalanceStatus::Balanced {
        debug!(
            "Hand {}: balances sum to {} ({:?})",
            info.header.hand_id.as_deref().unwrap_or("?"),
            balance.total,
            balance.status
        );
    }

    Ok(ParsedHand {
        info,
        players,
        balance,
    })
}

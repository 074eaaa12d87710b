//! Hand context and header metadata
//!
//! Each header field is extracted on its own and degrades to `None` when its
//! pattern does not match; a missing buy-in never blocks the blinds.

use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;

use super::patterns::{
    captured_amount, ANTE, BUY_IN, CASH_BLINDS, CHIP_BLINDS, HAND_ID, LEVEL, LOCAL_TIME,
    MODALITY, TABLE_SIZE, TOURNAMENT_ID,
};
use super::stake::{parse_amount, Blinds, Normalizer};
use crate::error::{HhpError, HhpResult};

const LOCAL_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Immutable per-hand input: the text, its header line and the stake scaling
#[derive(Debug, Clone, Copy)]
pub struct HandContext<'a> {
    text: &'a str,
    header: &'a str,
    blinds: Blinds,
    normalizer: Normalizer,
}

impl<'a> HandContext<'a> {
    /// Build the context for one hand block.
    ///
    /// Fails with [`HhpError::EmptyHand`] when the block has no header line.
    pub fn new(text: &'a str, normalize: bool) -> HhpResult<Self> {
        let text = text.trim();
        let header = text
            .lines()
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or(HhpError::EmptyHand)?;
        let blinds = extract_blinds(header);
        let normalizer = Normalizer::new(normalize, blinds);
        if normalize && !normalizer.is_active() {
            debug!("No usable big blind in {:?}, amounts stay in chips", header);
        }

        Ok(Self {
            text,
            header,
            blinds,
            normalizer,
        })
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn header(&self) -> &'a str {
        self.header
    }

    pub fn blinds(&self) -> Blinds {
        self.blinds
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

/// Tournament buy-in as printed in the header, e.g. `(9+1+0)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyIn {
    pub entry_fee: u64,
    pub total: u64,
}

/// Stake and tournament metadata for one hand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandHeader {
    pub modality: Option<String>,
    pub table_size: Option<String>,
    pub buy_in: Option<BuyIn>,
    pub tournament_id: Option<String>,
    pub hand_id: Option<String>,
    pub local_time: Option<NaiveDateTime>,
    pub level: Option<String>,
    pub ante: Option<f64>,
    pub blinds: Blinds,
}

impl HandHeader {
    pub fn parse(ctx: &HandContext<'_>) -> Self {
        let header = ctx.header();
        Self {
            modality: extract_modality(header),
            table_size: extract_table_size(ctx.text()),
            buy_in: extract_buy_in(header),
            tournament_id: extract_tournament_id(header),
            hand_id: extract_hand_id(header),
            local_time: extract_local_time(header),
            level: extract_level(header),
            ante: ctx.normalizer().apply_opt(extract_ante(ctx.text())),
            blinds: ctx.blinds(),
        }
    }
}

fn first_group(re: &regex::Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

pub fn extract_modality(header: &str) -> Option<String> {
    first_group(&MODALITY, header)
}

/// Table size label, e.g. `6-max`; it sits on the table line, not the header
pub fn extract_table_size(text: &str) -> Option<String> {
    first_group(&TABLE_SIZE, text)
}

pub fn extract_buy_in(header: &str) -> Option<BuyIn> {
    let caps = BUY_IN.captures(header)?;
    Some(BuyIn {
        entry_fee: caps[1].parse().ok()?,
        total: caps[2].parse().ok()?,
    })
}

pub fn extract_tournament_id(header: &str) -> Option<String> {
    first_group(&TOURNAMENT_ID, header)
}

pub fn extract_hand_id(header: &str) -> Option<String> {
    first_group(&HAND_ID, header)
}

pub fn extract_local_time(header: &str) -> Option<NaiveDateTime> {
    let stamp = first_group(&LOCAL_TIME, header)?;
    NaiveDateTime::parse_from_str(&stamp, LOCAL_TIME_FORMAT).ok()
}

pub fn extract_level(header: &str) -> Option<String> {
    first_group(&LEVEL, header)
}

/// Raw ante from the first ante posting in the hand
pub fn extract_ante(text: &str) -> Option<f64> {
    captured_amount(&ANTE, text)
}

/// Blind pair: tournament chips `(N/N)` first, then currency `($N/$N)`
pub fn extract_blinds(header: &str) -> Blinds {
    for re in [&*CHIP_BLINDS, &*CASH_BLINDS] {
        if let Some(caps) = re.captures(header) {
            return Blinds {
                small: parse_amount(&caps[1]),
                big: parse_amount(&caps[2]),
            };
        }
    }
    Blinds::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const HEADER: &str = "Poker Hand #tour_555001: Tournament #4242, Sunday Grind (9+1+0) Hold'em No Limit - Level5 (150/300) - 2024/05/01 20:15:42";

    #[test]
    fn test_header_fields() {
        assert_eq!(
            extract_modality(HEADER).as_deref(),
            Some("Sunday Grind (9+1+0) Hold'em No Limit")
        );
        assert_eq!(
            extract_buy_in(HEADER),
            Some(BuyIn {
                entry_fee: 9,
                total: 1
            })
        );
        assert_eq!(extract_tournament_id(HEADER).as_deref(), Some("#4242"));
        assert_eq!(extract_hand_id(HEADER).as_deref(), Some("555001"));
        assert_eq!(extract_level(HEADER).as_deref(), Some("Level5"));

        let ts = extract_local_time(HEADER).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 5, 1));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (20, 15, 42));
    }

    #[test]
    fn test_tournament_blinds() {
        let blinds = extract_blinds(HEADER);
        assert_eq!(blinds, Blinds::new(150.0, 300.0));
    }

    #[test]
    fn test_cash_blinds() {
        let header = "Poker Hand #RC100: Hold'em No Limit ($0.25/$0.50) - 2024/05/01 20:15:42";
        assert_eq!(extract_blinds(header), Blinds::new(0.25, 0.5));
    }

    #[test]
    fn test_missing_fields_are_independent() {
        let header = "Poker Hand #tour_7: Tournament #1, Turbo - Level2 (1,000/2,000)";
        assert_eq!(extract_buy_in(header), None);
        assert_eq!(extract_local_time(header), None);
        assert_eq!(extract_blinds(header), Blinds::new(1000.0, 2000.0));
        assert_eq!(extract_blinds("no stakes here"), Blinds::default());
    }

    #[test]
    fn test_context_rejects_empty_hand() {
        assert!(matches!(
            HandContext::new("  \n \n", true),
            Err(HhpError::EmptyHand)
        ));
    }

    #[test]
    fn test_context_without_blinds_keeps_chips() {
        let ctx = HandContext::new("Poker Hand #tour_3: Tournament #1, Turbo - Level1", true).unwrap();
        assert!(!ctx.normalizer().is_active());
        assert_eq!(ctx.normalizer().apply(450.0), 450.0);
    }

    #[test]
    fn test_header_ante_is_normalized() {
        let text = format!("{}\nAlice: posts the ante 1,500\n", HEADER);
        let ctx = HandContext::new(&text, true).unwrap();
        assert_eq!(HandHeader::parse(&ctx).ante, Some(5.0));

        let ctx = HandContext::new(&text, false).unwrap();
        assert_eq!(HandHeader::parse(&ctx).ante, Some(1500.0));
    }
}

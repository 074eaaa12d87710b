//! Stake normalization
//!
//! Every monetary value the engine surfaces (stacks, antes, blind postings,
//! action amounts, collections, returned bets) passes through a
//! [`Normalizer`] exactly once.

use serde::Serialize;

/// Blind pair from the header; either side may be unknown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Blinds {
    pub small: Option<f64>,
    pub big: Option<f64>,
}

impl Blinds {
    pub fn new(small: f64, big: f64) -> Self {
        Self {
            small: Some(small),
            big: Some(big),
        }
    }
}

/// Scales raw chip amounts to big-blind units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    enabled: bool,
    big_blind: Option<f64>,
}

impl Normalizer {
    pub fn new(enabled: bool, blinds: Blinds) -> Self {
        Self {
            enabled,
            big_blind: blinds.big,
        }
    }

    /// Whether amounts are actually rescaled (enabled and a usable big blind)
    pub fn is_active(&self) -> bool {
        self.enabled && self.big_blind.is_some_and(|bb| bb != 0.0)
    }

    pub fn apply(&self, amount: f64) -> f64 {
        match self.big_blind {
            Some(bb) if self.enabled && bb != 0.0 => round2(amount / bb),
            _ => amount,
        }
    }

    pub fn apply_opt(&self, amount: Option<f64>) -> Option<f64> {
        amount.map(|a| self.apply(a))
    }
}

/// Normalize `amount` against `blinds`.
///
/// Identity when `enabled` is false, the amount is absent, or the big blind
/// is absent or zero. Otherwise `round(amount / big_blind, 2)`.
pub fn normalize(amount: Option<f64>, blinds: Blinds, enabled: bool) -> Option<f64> {
    Normalizer::new(enabled, blinds).apply_opt(amount)
}

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a chip or currency amount, allowing `,` thousands separators
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_to_big_blinds() {
        let blinds = Blinds::new(150.0, 300.0);
        assert_eq!(normalize(Some(450.0), blinds, true), Some(1.5));
        assert_eq!(normalize(Some(100.0), blinds, true), Some(0.33));
    }

    #[test]
    fn test_normalize_identity_cases() {
        let blinds = Blinds::new(150.0, 300.0);
        assert_eq!(normalize(Some(450.0), blinds, false), Some(450.0));
        assert_eq!(normalize(None, blinds, true), None);
        assert_eq!(normalize(Some(450.0), Blinds::default(), true), Some(450.0));
        assert_eq!(normalize(Some(450.0), Blinds::new(0.0, 0.0), true), Some(450.0));
    }

    #[test]
    fn test_normalize_recovers_amount() {
        let blinds = Blinds::new(25.0, 50.0);
        for raw in [0.0, 1.0, 37.0, 50.0, 1_234.0, 98_765.0] {
            let scaled = normalize(Some(raw), blinds, true).unwrap();
            // Rounding to cents of a big blind loses at most half a cent of one
            assert!((scaled * 50.0 - raw).abs() <= 0.005 * 50.0 + 1e-9);
        }
    }

    #[test]
    fn test_normalizer_activity() {
        assert!(Normalizer::new(true, Blinds::new(1.0, 2.0)).is_active());
        assert!(!Normalizer::new(false, Blinds::new(1.0, 2.0)).is_active());
        assert!(!Normalizer::new(true, Blinds::default()).is_active());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,350"), Some(1350.0));
        assert_eq!(parse_amount("2.50"), Some(2.5));
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount(""), None);
    }
}

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Decimal places kept on monetary amounts
pub const DEFAULT_AMOUNT_PRECISION: u32 = 2;

/// Decimal places kept on percentage multipliers (7.5% -> 0.075).
///
/// Four places keep fractional tax rates exact. Set `RATE_PRECISION=2` for
/// two-place multipliers, where 7.5% rounds to 0.08.
pub const DEFAULT_RATE_PRECISION: u32 = 4;

/// Rounding rules shared by every computation in the engine.
///
/// Passed by value to whichever component needs it. Amounts are rounded
/// half away from zero and padded to `amount_precision` fractional digits,
/// so `100` is reported as `100.00`.
///
/// The default keeps tax multipliers at four places. Whole-number tax rates
/// give identical totals at two places; only fractional rates differ, and
/// `PrecisionPolicy::new(2, 2)` (or `RATE_PRECISION=2`) reproduces the
/// two-place behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionPolicy {
    amount_precision: u32,
    rate_precision: u32,
}

impl PrecisionPolicy {
    pub fn new(amount_precision: u32, rate_precision: u32) -> Self {
        Self {
            amount_precision,
            rate_precision,
        }
    }

    /// Decimal places for monetary amounts
    pub fn amount_precision(&self) -> u32 {
        self.amount_precision
    }

    /// Decimal places for percentage multipliers
    pub fn rate_precision(&self) -> u32 {
        self.rate_precision
    }

    /// Rounds a monetary amount to the policy's amount precision
    pub fn round(&self, value: Decimal) -> Decimal {
        round_to(value, self.amount_precision)
    }

    /// Converts a percentage (10 for 10%) into its decimal multiplier (0.1)
    pub fn percentage_to_decimal(&self, value: Decimal) -> Decimal {
        percentage_to_decimal_with(value, self.rate_precision)
    }

    /// Smallest representable monetary step (0.01 at two places)
    pub fn smallest_unit(&self) -> Decimal {
        Decimal::new(1, self.amount_precision)
    }
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT_PRECISION, DEFAULT_RATE_PRECISION)
    }
}

/// Rounds `value` to `precision` places, midpoint away from zero, and fixes
/// the scale at exactly `precision` digits.
pub fn round_to(value: Decimal, precision: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);
    rounded
}

/// `round_to(value / 100, precision)`
pub fn percentage_to_decimal_with(value: Decimal, precision: u32) -> Decimal {
    round_to(value / Decimal::ONE_HUNDRED, precision)
}

/// Parses a numeric field as typed by a user.
///
/// Anything that is not a number (empty text, a lone "-", letters) becomes 0
/// so a half-edited row still renders.
pub fn parse_input(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

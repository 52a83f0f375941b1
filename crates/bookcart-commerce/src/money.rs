//! Money type for representing naira amounts.
//!
//! Uses kobo-based integer representation so totals never pick up
//! floating-point rounding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Naira sign, prefixed to formatted amounts on the cart page and modal.
pub const CURRENCY_SYMBOL: &str = "\u{20a6}";

/// An amount in kobo (1/100 naira).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Kobo(u64);

impl Kobo {
    pub const ZERO: Kobo = Kobo(0);

    /// Create an amount from kobo.
    pub const fn new(kobo: u64) -> Self {
        Self(kobo)
    }

    /// Amount in kobo.
    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Kobo) -> Option<Kobo> {
        self.0.checked_add(other.0).map(Kobo)
    }

    /// Checked multiplication by a quantity.
    pub fn checked_mul(self, qty: u32) -> Option<Kobo> {
        self.0.checked_mul(u64::from(qty)).map(Kobo)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn try_sum(iter: impl IntoIterator<Item = Kobo>) -> Option<Kobo> {
        iter.into_iter()
            .try_fold(Kobo::ZERO, |acc, k| acc.checked_add(k))
    }

    /// Format without symbol (e.g. "1,234.56").
    pub fn display_amount(self) -> String {
        format_kobo(self.0)
    }

    /// Format with the naira sign (e.g. "₦1,234.56").
    pub fn display(self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, format_kobo(self.0))
    }
}

impl fmt::Display for Kobo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<u64> for Kobo {
    fn from(kobo: u64) -> Self {
        Self(kobo)
    }
}

impl FromStr for Kobo {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Kobo)
    }
}

/// Format a kobo amount as naira with two decimals and comma thousands
/// separators: `123456` becomes `"1,234.56"`.
pub fn format_kobo(kobo: u64) -> String {
    let major = (kobo / 100).to_string();
    let minor = kobo % 100;

    let mut grouped = String::with_capacity(major.len() + major.len() / 3 + 3);
    for (i, digit) in major.chars().enumerate() {
        if i > 0 && (major.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}.{:02}", grouped, minor)
}

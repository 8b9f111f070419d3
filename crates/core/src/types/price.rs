//! Type-safe price representation using decimal arithmetic.
//!
//! Every component that renders a price goes through [`Money`] and
//! [`SalePricing`]. Sale-price derivation in particular lives here and
//! nowhere else, so discount badges round the same way on every page.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing platform price data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount string was not a valid decimal.
    #[error("invalid decimal amount: {0:?}")]
    InvalidAmount(String),
}

/// A monetary amount with its ISO 4217 currency code.
///
/// The commerce platform encodes amounts as decimal strings
/// (`{"amount": "34.99", "currencyCode": "USD"}`); the serde representation
/// here matches that wire shape, so platform money objects deserialize
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Parse a platform amount string.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidAmount`] if the string is not a decimal.
    pub fn parse(amount: &str, currency_code: impl Into<String>) -> Result<Self, PriceError> {
        let parsed = amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::InvalidAmount(amount.to_string()))?;
        Ok(Self::new(parsed, currency_code))
    }

    /// Multiply the unit amount by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code.clone())
    }

    /// Sum two amounts. Callers add amounts from a single cart, which has a
    /// single currency; the left-hand currency code is kept.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(self.amount + other.amount, self.currency_code.clone())
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display: `$34.99` for recognized currencies, `SEK 349.00`
    /// otherwise.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        CurrencyCode::parse(&self.currency_code).map_or_else(
            || format!("{} {rounded:.2}", self.currency_code),
            |code| format!("{}{rounded:.2}", code.symbol()),
        )
    }
}

/// ISO 4217 currency codes with dedicated display symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Parse a platform currency code. `None` for currencies without a
    /// dedicated symbol here; callers fall back to code-prefixed display.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            "CAD" => Some(Self::CAD),
            "AUD" => Some(Self::AUD),
            _ => None,
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// Canonical code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

/// A derived sale price: the current amount, the crossed-out original, and
/// the whole-percent discount.
///
/// This is the one place sale pricing is computed. A compare-at amount
/// produces a sale only when it strictly exceeds the current amount; the
/// percent off rounds half-up to a whole percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalePricing {
    /// What the buyer pays now.
    pub current: Money,
    /// The compare-at amount being crossed out.
    pub original: Money,
    /// Whole-percent discount, rounded half-up.
    pub percent_off: u8,
}

impl SalePricing {
    /// Derive sale pricing from a current amount and an optional compare-at
    /// amount. Returns `None` when there is no sale: no compare-at, a
    /// non-positive compare-at, or a compare-at not above the current amount.
    #[must_use]
    pub fn derive(current: &Money, compare_at: Option<&Money>) -> Option<Self> {
        let original = compare_at?;
        if original.amount <= Decimal::ZERO || original.amount <= current.amount {
            return None;
        }
        let percent = ((original.amount - current.amount) * Decimal::ONE_HUNDRED
            / original.amount)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Some(Self {
            current: current.clone(),
            original: original.clone(),
            percent_off: percent.to_u8().unwrap_or(0),
        })
    }
}

//! Money type for representing monetary values.
//!
//! Amounts are held in cents so that `price × quantity` sums are exact.
//! The backend speaks plain decimal numbers (`"price": 149`), so the
//! [`as_decimal`] serde adapters convert at the wire boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency of an amount. The shop trades only in rand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Currency {
    #[default]
    ZAR,
}

impl Currency {
    /// Currency code, e.g. "ZAR".
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ZAR => "ZAR",
        }
    }

    /// Display symbol, e.g. "R".
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ZAR => "R",
        }
    }

    /// Number of minor units per major unit.
    pub fn minor_units(&self) -> i64 {
        100
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a rand amount from cents.
    pub fn rand(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::ZAR)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use trtech_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(149.99, Currency::ZAR);
    /// assert_eq!(price.amount_cents, 14999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_units() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units() as f64
    }

    /// Format with symbol and two decimals (e.g., "R298.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "298.00").
    ///
    /// Built from the integer cents, so there is no float rounding on output.
    pub fn display_amount(&self) -> String {
        let units = self.currency.minor_units();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!(
            "{}{}.{:02}",
            sign,
            abs / units as u64,
            abs % units as u64
        )
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter: a rand amount as a plain JSON number.
pub mod as_decimal {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::ZAR))
    }
}

/// Serde adapter: an optional rand amount as a plain JSON number or null.
pub mod option_as_decimal {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        money: &Option<Money>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match money {
            Some(m) => serializer.serialize_some(&m.to_decimal()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        let amount = Option::<f64>::deserialize(deserializer)?;
        Ok(amount.map(|a| Money::from_decimal(a, Currency::ZAR)))
    }
}

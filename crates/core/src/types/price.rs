//! Type-safe price representation using decimal arithmetic.
//!
//! Every price in the catalog is in Brazilian reais. Amounts are kept as
//! [`Decimal`] and written to JSON as plain numbers, which is how catalog
//! documents have always stored them.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`] from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("not a number: {0:?}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount must be strictly positive in this context.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount is above [`Price::MAX_INPUT`].
    #[error("price cannot exceed {}", Price::MAX_INPUT)]
    TooLarge,
}

/// A price in reais (BRL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Currency symbol used when displaying prices.
    pub const SYMBOL: &'static str = "R$";

    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount accepted from user input: R$ 1.000.000.000,00.
    pub const MAX_INPUT: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a number of centavos.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The amount in reais.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a price typed by a person.
    ///
    /// Surrounding whitespace is ignored and the first `,` is read as the
    /// decimal separator, so both `199,90` and `199.90` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] if the text is not a decimal number,
    /// [`PriceError::Negative`] if it is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX_INPUT`].
    ///
    /// ```
    /// use heen_core::Price;
    ///
    /// assert_eq!(Price::parse("199,90").unwrap(), Price::from_cents(19990));
    /// assert!(Price::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let normalized = input.trim().replacen(',', ".", 1);
        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::NotANumber(input.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX_INPUT.0 {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }

    /// Parse a price that must be strictly greater than zero.
    ///
    /// # Errors
    ///
    /// Same as [`Price::parse`], plus [`PriceError::NotPositive`] for zero.
    pub fn parse_positive(input: &str) -> Result<Self, PriceError> {
        let price = Self::parse(input)?;
        if price.0.is_zero() {
            return Err(PriceError::NotPositive);
        }
        Ok(price)
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

/// Formats as `R$ 199,90`: two decimals (half away from zero), comma
/// separator, no thousands grouping.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        write!(
            f,
            "{} {}",
            Self::SYMBOL,
            rounded.to_string().replace('.', ",")
        )
    }
}

/// Saturates at [`Decimal::MAX`] instead of overflowing.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

// Accepts JSON numbers as well as numeric strings.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self)
    }
}

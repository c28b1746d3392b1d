//! Fixed-point decimal types for conversion rates
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! The minimum return of a conversion is the exact product
//! `amount * rate`; fractional rates need no extra scaling factor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RateError;

/// Minimum acceptable output units per input unit.
///
/// Invariant: rate >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ConversionRate(Decimal);

impl ConversionRate {
    /// Rate of exactly one output unit per input unit.
    pub const ONE: ConversionRate = ConversionRate(Decimal::ONE);

    /// Validate and wrap a rate.
    pub fn new(rate: Decimal) -> Result<Self, RateError> {
        if rate < Decimal::ONE {
            return Err(RateError::BelowOne {
                rate: rate.to_string(),
            });
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Floor the exchange's reported return must meet for `amount` of input.
    ///
    /// Returns `None` on arithmetic overflow.
    pub fn min_return(&self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.0)
    }
}

impl Default for ConversionRate {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<Decimal> for ConversionRate {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversionRate> for Decimal {
    fn from(rate: ConversionRate) -> Self {
        rate.0
    }
}

impl TryFrom<u32> for ConversionRate {
    type Error = RateError;

    fn try_from(rate: u32) -> Result<Self, Self::Error> {
        Self::new(Decimal::from(rate))
    }
}

impl fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

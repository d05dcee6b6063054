//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64`; arithmetic happens on `Decimal`
//! and is rounded back to 2 decimal places.

use crate::error::AppError;
use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding precision for monetary values
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input is logged and treated as zero so it never silently
/// inflates a total.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    let rounded = value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_f64().unwrap_or_else(|| {
        tracing::error!(value = %rounded, "Decimal not representable as f64, defaulting to zero");
        0.0
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount is out of range")]
    Overflow,
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// unit_price * quantity
#[inline]
pub fn line_total(unit_price: f64, quantity: i64) -> Result<Decimal, MoneyError> {
    to_decimal(unit_price)
        .checked_mul(Decimal::from(quantity))
        .ok_or(MoneyError::Overflow)
}

/// Sum of unit_price * quantity over all lines, rounded to 2 decimal places
pub fn sum_lines<I>(lines: I) -> Result<f64, MoneyError>
where
    I: IntoIterator<Item = (f64, i64)>,
{
    let mut total = Decimal::ZERO;
    for (price, qty) in lines {
        total = total
            .checked_add(line_total(price, qty)?)
            .ok_or(MoneyError::Overflow)?;
    }
    Ok(to_f64(total))
}

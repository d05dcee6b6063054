//! Price normalization
//!
//! Menu and offer prices arrive either as JSON numbers or as text the admin typed
//! (`"250"`, `"Rs. 1,250.50"`, `"$ 12.5"`). Everything that reads a price goes
//! through [`normalize_price`] so a malformed value is rejected instead of being
//! treated as zero.

use crate::error::AppError;
use crate::money::to_f64;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted price. Keeps line and cart totals far from `Decimal` limits.
pub const MAX_PRICE: i64 = 10_000_000;

/// Raw price as supplied by a client or stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Text form persisted in the catalog
    pub fn to_raw(&self) -> String {
        match self {
            PriceValue::Number(n) => n.to_string(),
            PriceValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

impl From<String> for PriceValue {
    fn from(value: String) -> Self {
        PriceValue::Text(value)
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Number(n) => write!(f, "{n}"),
            PriceValue::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price contains no digits")]
    NoDigits,

    #[error("price is malformed: {0}")]
    Malformed(String),

    #[error("price must be greater than zero")]
    NotPositive,

    #[error("price must not exceed {MAX_PRICE}")]
    TooLarge,
}

impl From<PriceError> for AppError {
    fn from(err: PriceError) -> Self {
        AppError::invalid_price(err.to_string())
    }
}

/// Convert a raw price into a positive amount rounded to 2 decimal places
pub fn normalize_price(value: &PriceValue) -> Result<f64, PriceError> {
    let amount = match value {
        PriceValue::Number(n) => {
            if !n.is_finite() || *n <= 0.0 {
                return Err(PriceError::NotPositive);
            }
            Decimal::from_f64(*n).ok_or(PriceError::TooLarge)?
        }
        PriceValue::Text(s) => parse_price_text(s)?,
    };

    if amount <= Decimal::ZERO {
        return Err(PriceError::NotPositive);
    }
    if amount > Decimal::from(MAX_PRICE) {
        return Err(PriceError::TooLarge);
    }
    let normalized = to_f64(amount);
    // Sub-cent prices round to zero
    if normalized <= 0.0 {
        return Err(PriceError::NotPositive);
    }
    Ok(normalized)
}

/// Normalize the raw text stored in the catalog
pub fn normalize_raw(raw: &str) -> Result<f64, PriceError> {
    normalize_price(&PriceValue::Text(raw.to_string()))
}

fn parse_price_text(text: &str) -> Result<Decimal, PriceError> {
    let chars: Vec<char> = text.chars().collect();

    // The number starts at the first digit, or at a '.' directly before a digit that
    // is not the tail of an abbreviation like "Rs."
    let start = chars.iter().enumerate().position(|(i, c)| {
        c.is_ascii_digit()
            || (*c == '.'
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
                && (i == 0 || !chars[i - 1].is_alphabetic()))
    });
    let Some(start) = start else {
        return Err(PriceError::NoDigits);
    };

    if chars[..start].contains(&'-') {
        return Err(PriceError::NotPositive);
    }

    let mut number = String::new();
    for c in &chars[start..] {
        match c {
            '0'..='9' | '.' => number.push(*c),
            ',' => {}
            _ => break,
        }
    }
    let number = number.trim_end_matches('.');

    if number.matches('.').count() > 1 {
        return Err(PriceError::Malformed(text.to_string()));
    }
    let number = if number.starts_with('.') {
        format!("0{number}")
    } else {
        number.to_string()
    };

    Decimal::from_str(&number).map_err(|_| PriceError::Malformed(text.to_string()))
}

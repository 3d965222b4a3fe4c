//! # Unit Formatting
//!
//! Conversions between integer base units (wei) and human-readable decimal
//! strings, following the conventions of ethers' `formatUnits`/`parseUnits`.
//!
//! ## Functions
//!
//! - [`format_units`] / [`format_ether`] - base units to decimal string
//! - [`parse_units`] / [`parse_ether`] - decimal string to base units

use thiserror::Error;

use crate::utils::constants::NATIVE_DECIMALS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("invalid decimal amount: {0}")]
    Invalid(String),
    #[error("too many decimal places in {0}")]
    TooPrecise(String),
    #[error("amount {0} does not fit in 128 bits")]
    Overflow(String),
}

/// Format an integer amount of base units with `decimals` decimal places.
///
/// Trailing zeros in the fraction are dropped, but at least one fractional
/// digit is always kept.
///
/// # Examples
///
/// ```rust
/// use dapp_web::utils::format::format_units;
///
/// assert_eq!(format_units(1_500_000, 6), "1.5");
/// assert_eq!(format_units(0, 18), "0.0");
/// ```
pub fn format_units(amount: u128, decimals: u32) -> String {
    let base = 10u128.pow(decimals);
    let whole = amount / base;
    let fraction = amount % base;

    let fraction_str = format!("{:0width$}", fraction, width = decimals as usize);
    let trimmed = fraction_str.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Format wei as native units (18 decimals).
///
/// ```rust
/// use dapp_web::utils::format::format_ether;
///
/// assert_eq!(format_ether(1_500_000_000_000_000_000), "1.5");
/// ```
pub fn format_ether(wei: u128) -> String {
    format_units(wei, NATIVE_DECIMALS)
}

/// Parse a decimal string such as `"0.01"` into base units.
pub fn parse_units(amount: &str, decimals: u32) -> Result<u128, UnitsError> {
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::Invalid(amount.to_string()));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooPrecise(amount.to_string()));
    }

    let overflow = || UnitsError::Overflow(amount.to_string());
    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let fraction_value: u128 = if fraction.is_empty() {
        0
    } else {
        fraction.parse::<u128>().map_err(|_| overflow())?
            * 10u128.pow(decimals - fraction.len() as u32)
    };

    whole_value
        .checked_mul(10u128.pow(decimals))
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(overflow)
}

/// Parse native units into wei (18 decimals).
pub fn parse_ether(amount: &str) -> Result<u128, UnitsError> {
    parse_units(amount, NATIVE_DECIMALS)
}

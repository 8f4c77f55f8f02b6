//! Human decimal amounts to and from integer base units.

use alloy_primitives::{utils::format_units, U256};

/// Largest decimals value a unit can carry in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

/// Percentages scale to 18-decimal fractions, so one percent is 1e16.
const PERCENTAGE_DECIMALS: u8 = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,
    #[error("Amount {0:?} is negative")]
    Negative(String),
    #[error("Amount {0:?} is not a decimal number")]
    Invalid(String),
    #[error("Amount {amount:?} has more than {decimals} decimal places")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("Token decimals {0} exceed the maximum of {MAX_DECIMALS}")]
    Decimals(u8),
    #[error("Amount {0:?} does not fit in 256 bits")]
    Overflow(String),
}

/// Shifts `amount` left by `decimals` places exactly.
///
/// Accepts plain decimals such as `100`, `0.1` or `123.456789`. Signs, exponents, separators
/// and fractional digits the token cannot represent are rejected instead of rounded.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err(AmountError::Empty);
    }
    if amount.starts_with('-') {
        return Err(AmountError::Negative(amount.to_string()));
    }
    if decimals > MAX_DECIMALS {
        return Err(AmountError::Decimals(decimals));
    }

    let (integer, fraction) = match amount.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (amount, None),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(integer) || fraction.is_some_and(|f| !is_digits(f)) {
        return Err(AmountError::Invalid(amount.to_string()));
    }

    let fraction = fraction.unwrap_or_default().trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooPrecise { amount: amount.to_string(), decimals });
    }

    // Checked: a 78-digit result can still exceed U256::MAX.
    let digits = format!("{}{fraction}", integer.trim_start_matches('0'));
    let digits = if digits.is_empty() { "0" } else { digits.as_str() };
    let shift = U256::from(decimals as usize - fraction.len());
    let overflow = || AmountError::Overflow(amount.to_string());

    U256::from_str_radix(digits, 10)
        .map_err(|_| overflow())?
        .checked_mul(U256::from(10u64).pow(shift))
        .ok_or_else(overflow)
}

/// `"0.3"` percent becomes `3e15`, the 18-decimal fraction pools store.
pub fn percentage_to_fixed18(percentage: &str) -> Result<U256, AmountError> {
    to_base_units(percentage, PERCENTAGE_DECIMALS)
}

/// Inverse of [`to_base_units`] without trailing zeros: `100500000` at 6 decimals is `100.5`.
pub fn format_base_units(value: U256, decimals: u8) -> String {
    match format_units(value, decimals) {
        Ok(formatted) if formatted.contains('.') => {
            formatted.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        Ok(formatted) => formatted,
        Err(_) => value.to_string(),
    }
}

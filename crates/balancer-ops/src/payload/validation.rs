use alloy_primitives::{Address, U256};

use std::str::FromStr;

use super::amount::{to_base_units, AmountError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` is not a valid address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("`{field}` is not a valid amount: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: AmountError,
    },
    #[error("`{field}` must be an integer in {min}..={max}, got {value:?}")]
    OutOfRange { field: &'static str, value: String, min: U256, max: U256 },
    #[error("At least one emergency action is required")]
    NoActions,
    #[error("Action `{0}` is selected more than once")]
    DuplicateAction(String),
    #[error("The schedule neither adds nor removes recipients")]
    EmptySchedule,
    #[error("Gauge {0} appears more than once in the schedule")]
    DuplicateRecipient(Address),
}

pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::MissingField(field)),
        value => Ok(value),
    }
}

pub fn parse_address(field: &'static str, value: &str) -> Result<Address, ValidationError> {
    let value = required(field, value)?;
    Address::from_str(value)
        .map_err(|_| ValidationError::InvalidAddress { field, value: value.to_string() })
}

/// Like [`parse_address`], but an empty value means "not given".
pub fn parse_optional_address(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Address>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_address(field, value).map(Some),
    }
}

pub fn parse_amount(
    field: &'static str,
    value: &str,
    decimals: u8,
) -> Result<U256, ValidationError> {
    let value = required(field, value)?;
    to_base_units(value, decimals)
        .map_err(|source| ValidationError::InvalidAmount { field, source })
}

/// Whole number in `min..=max`.
pub fn parse_uint(
    field: &'static str,
    value: &str,
    min: U256,
    max: U256,
) -> Result<U256, ValidationError> {
    let value = required(field, value)?;
    let out_of_range =
        || ValidationError::OutOfRange { field, value: value.to_string(), min, max };

    let parsed = if value.bytes().all(|b| b.is_ascii_digit()) {
        U256::from_str_radix(value, 10).map_err(|_| out_of_range())?
    } else {
        return Err(out_of_range());
    };

    if parsed < min || parsed > max {
        return Err(out_of_range());
    }

    Ok(parsed)
}

/// Largest value of an unsigned integer type `bits` wide.
pub fn uint_max(bits: usize) -> U256 {
    if bits >= 256 {
        U256::MAX
    } else {
        (U256::from(1) << bits) - U256::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        let address =
            parse_address("gauge", " 0x7c68c42De679ffB0f16216154C996C354cF1161B ").unwrap();
        assert_eq!(address.to_checksum(None), "0x7c68c42De679ffB0f16216154C996C354cF1161B");

        assert_eq!(parse_address("gauge", ""), Err(ValidationError::MissingField("gauge")));
        assert!(matches!(
            parse_address("gauge", "0xGAUGE"),
            Err(ValidationError::InvalidAddress { field: "gauge", .. })
        ));

        assert_eq!(parse_optional_address("safe", None), Ok(None));
        assert_eq!(parse_optional_address("safe", Some(" ")), Ok(None));
        assert!(parse_optional_address("safe", Some("nope")).is_err());
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("amount", "100.5", 6), Ok(U256::from(100_500_000u64)));
        assert!(matches!(
            parse_amount("amount", "1.1234567", 6),
            Err(ValidationError::InvalidAmount {
                field: "amount",
                source: AmountError::TooPrecise { .. }
            })
        ));
    }

    #[test]
    fn ranges() {
        let one = U256::from(1);
        let max = uint_max(8);
        assert_eq!(max, U256::from(255));
        assert_eq!(uint_max(56), U256::from((1u64 << 56) - 1));
        assert_eq!(uint_max(256), U256::MAX);

        assert_eq!(parse_uint("maxPeriods", "12", one, max), Ok(U256::from(12)));
        for bad in ["0", "256", "-1", "1.5", "abc"] {
            assert!(
                matches!(
                    parse_uint("maxPeriods", bad, one, max),
                    Err(ValidationError::OutOfRange { .. })
                ),
                "{bad}"
            );
        }
    }
}

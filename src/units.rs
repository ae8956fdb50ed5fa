use ethers::types::U256;

use crate::errors::CustomError;

/// Largest supported decimal precision. `U256::MAX` has 78 digits, so
/// 10^78 and beyond cannot be represented when rescaling parsed input.
pub const MAX_DECIMALS: u32 = 77;

/// Format a smallest-unit amount as a human-readable decimal string.
///
/// The decimal point is placed by digit position, so no precision is
/// lost for any value. Trailing fractional zeros are trimmed but one
/// fractional digit is always kept: `1000000000000000000` at 18
/// decimals formats as `"1.0"`, zero as `"0.0"`. With zero decimals
/// the plain integer string is returned.
pub fn format_units(amount: U256, decimals: u32) -> Result<String, CustomError> {
    if decimals > MAX_DECIMALS {
        return Err(CustomError::InvalidPrecisionError(decimals));
    }

    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return Ok(digits);
    }

    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (&digits[..split], digits[split..].to_string())
    } else {
        ("0", format!("{:0>width$}", digits, width = decimals))
    };

    let frac_trimmed = frac_part.trim_end_matches('0');
    let frac_part = if frac_trimmed.is_empty() {
        "0"
    } else {
        frac_trimmed
    };

    Ok(format!("{}.{}", int_part, frac_part))
}

/// Parse a user-entered decimal string into a smallest-unit amount.
///
/// Rejects anything that is not a plain non-negative decimal number,
/// and fractional digits beyond `decimals` (no silent rounding).
pub fn parse_units(amount: &str, decimals: u32) -> Result<U256, CustomError> {
    if decimals > MAX_DECIMALS {
        return Err(CustomError::InvalidPrecisionError(decimals));
    }

    let invalid = || CustomError::InvalidAmountError(amount.to_string());

    let trimmed = amount.trim();
    let mut parts = trimmed.split('.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("");
    if parts.next().is_some() || (int_part.is_empty() && frac_part.is_empty()) {
        return Err(invalid());
    }
    if frac_part.len() > decimals as usize {
        return Err(invalid());
    }

    let int = if int_part.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(int_part).map_err(|_| invalid())?
    };
    let frac = if frac_part.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(frac_part).map_err(|_| invalid())?
    };

    // frac < 10^len(frac), so rescaling it stays below 10^decimals.
    let rescaled_frac = frac * U256::exp10(decimals as usize - frac_part.len());
    int.checked_mul(U256::exp10(decimals as usize))
        .and_then(|scaled| scaled.checked_add(rescaled_frac))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(s: &str) -> U256 {
        U256::from_dec_str(s).unwrap()
    }

    #[test]
    fn formats_whole_units_with_one_fractional_digit() {
        let one_ether = wei("1000000000000000000");
        assert_eq!(format_units(one_ether, 18).unwrap(), "1.0");
    }

    #[test]
    fn formats_zero_canonically() {
        assert_eq!(format_units(U256::zero(), 18).unwrap(), "0.0");
        assert_eq!(format_units(U256::zero(), 0).unwrap(), "0");
    }

    #[test]
    fn trims_trailing_fractional_zeros() {
        assert_eq!(
            format_units(wei("1500000000000000000"), 18).unwrap(),
            "1.5"
        );
        assert_eq!(format_units(wei("1234500"), 6).unwrap(), "1.2345");
    }

    #[test]
    fn keeps_full_precision_below_one() {
        assert_eq!(
            format_units(U256::one(), 18).unwrap(),
            "0.000000000000000001"
        );
        assert_eq!(format_units(wei("21000000000000"), 18).unwrap(), "0.000021");
    }

    #[test]
    fn zero_decimals_formats_as_integer() {
        assert_eq!(format_units(wei("42"), 0).unwrap(), "42");
    }

    #[test]
    fn rejects_precision_beyond_u256() {
        assert!(matches!(
            format_units(U256::one(), 78),
            Err(CustomError::InvalidPrecisionError(78))
        ));
        assert!(matches!(
            parse_units("1.0", 78),
            Err(CustomError::InvalidPrecisionError(78))
        ));
    }

    #[test]
    fn parses_plain_and_fractional_amounts() {
        assert_eq!(parse_units("1.0", 18).unwrap(), wei("1000000000000000000"));
        assert_eq!(parse_units("0.5", 18).unwrap(), wei("500000000000000000"));
        assert_eq!(parse_units("42", 0).unwrap(), wei("42"));
        assert_eq!(parse_units(".5", 8).unwrap(), wei("50000000"));
        assert_eq!(parse_units("7.", 2).unwrap(), wei("700"));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(parse_units("", 18).is_err());
        assert!(parse_units(".", 18).is_err());
        assert!(parse_units("1.2.3", 18).is_err());
        assert!(parse_units("-1", 18).is_err());
        assert!(parse_units("1,5", 18).is_err());
        // more fractional digits than the unit carries
        assert!(parse_units("1.123", 2).is_err());
    }

    #[test]
    fn round_trips_exactly() {
        for (raw, decimals) in [
            ("0", 18u32),
            ("1", 18),
            ("21000000000000", 18),
            ("1000000000000000000", 18),
            ("999999999999999999999999", 18),
            ("123456", 6),
            ("7", 0),
        ] {
            let value = wei(raw);
            let formatted = format_units(value, decimals).unwrap();
            assert_eq!(parse_units(&formatted, decimals).unwrap(), value);
        }
    }
}

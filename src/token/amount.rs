//! Conversions between human-typed decimal strings and token base units.
//!
//! Base units are `U256`, the width of the ERC-20 `uint256` they are handed
//! to. Fractional digits beyond a token's decimals are truncated, never
//! rounded, so a conversion can never produce more than the user typed.

use alloy_primitives::U256;

use crate::error::RouterError;

/// `2^256 - 1`, the allowance used for "approve max".
pub const MAX_APPROVAL: U256 = U256::MAX;

/// `10^decimals` by repeated multiplication.
pub fn pow10(decimals: u8) -> Result<U256, RouterError> {
    let ten = U256::from(10u8);
    let mut acc = U256::from(1u8);
    for _ in 0..decimals {
        acc = acc
            .checked_mul(ten)
            .ok_or_else(|| RouterError::invalid_amount(format!("10^{decimals} overflows")))?;
    }
    Ok(acc)
}

fn parse_digits(digits: &str) -> Result<U256, RouterError> {
    let ten = U256::from(10u8);
    let mut value = U256::ZERO;
    for c in digits.chars() {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| RouterError::invalid_amount(format!("unexpected character {c:?}")))?;
        value = value
            .checked_mul(ten)
            .and_then(|v| v.checked_add(U256::from(digit)))
            .ok_or_else(|| RouterError::invalid_amount("amount overflows uint256"))?;
    }
    Ok(value)
}

/// Parse a display amount such as `"1.5"` into base units of a token with
/// `decimals` decimals.
///
/// `".5"` reads as `0.5` and `"5."` as `5`. Extra fractional digits are
/// dropped: `to_base_units("1.500000001", 6) == 1_500_000`.
pub fn to_base_units(display: &str, decimals: u8) -> Result<U256, RouterError> {
    let display = display.trim();
    let (integer, fraction) = display.split_once('.').unwrap_or((display, ""));
    if integer.is_empty() && fraction.is_empty() {
        return Err(RouterError::invalid_amount(format!("{display:?} is not a number")));
    }

    let integer = parse_digits(integer)?;

    // Validate the whole fraction before truncating it
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(RouterError::invalid_amount(format!(
            "{display:?} has a malformed fractional part"
        )));
    }
    let width = decimals as usize;
    let mut fraction: String = fraction.chars().take(width).collect();
    while fraction.len() < width {
        fraction.push('0');
    }
    let fraction = parse_digits(&fraction)?;

    integer
        .checked_mul(pow10(decimals)?)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(|| RouterError::invalid_amount("amount overflows uint256"))
}

/// Parse an integer string that is already in base units (e.g. wei).
pub fn parse_base_units(raw: &str) -> Result<U256, RouterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RouterError::invalid_amount("empty amount"));
    }
    parse_digits(raw)
}

/// Whole tokens in `amount`; the fractional remainder is discarded.
pub fn to_display(amount: U256, decimals: u8) -> Result<String, RouterError> {
    Ok((amount / pow10(decimals)?).to_string())
}

/// Like [`to_display`] but keeps the remainder, with trailing zeros trimmed.
pub fn to_display_exact(amount: U256, decimals: u8) -> Result<String, RouterError> {
    let unit = pow10(decimals)?;
    let integer = amount / unit;
    let remainder = amount % unit;
    if remainder.is_zero() {
        return Ok(integer.to_string());
    }

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    Ok(format!("{}.{}", integer, fraction.trim_end_matches('0')))
}

pub fn is_approved(requested: U256, allowance: U256) -> bool {
    allowance >= requested
}

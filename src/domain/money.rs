use std::fmt;

use serde::Serializer;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so $50000.00 = 5_000_000 cents.
pub type Cents = i64;

/// Charge amount used when the operator does not provide one (50000.00).
pub const DEFAULT_CHARGE_CENTS: Cents = 5_000_000;

/// Format cents as a fixed-point decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let parts: Vec<&str> = input.split('.').collect();
    let cents = match parts.as_slice() {
        [units] => to_cents(parse_digits(units)?, 0)?,
        [units, decimals] => {
            let units = if units.is_empty() {
                0
            } else {
                parse_digits(units)?
            };
            // Anything past the second decimal place is truncated
            let decimals: String = decimals.chars().take(2).collect();
            let fraction = match decimals.len() {
                0 => 0,
                1 => parse_digits(&decimals)? * 10,
                _ => parse_digits(&decimals)?,
            };
            to_cents(units, fraction)?
        }
        _ => return Err(ParseCentsError::InvalidFormat),
    };

    Ok(if negative { -cents } else { cents })
}

fn to_cents(units: i64, fraction: i64) -> Result<Cents, ParseCentsError> {
    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or(ParseCentsError::InvalidFormat)
}

fn parse_digits(s: &str) -> Result<i64, ParseCentsError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::InvalidFormat)
}

/// Serde helper: encode cents as a decimal string ("50000.00") in JSON output.
pub fn serialize_cents<S>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_cents(*cents))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

use std::any::Any;

use crate::value::{Value, ValueError};

/// Signed integer flag value with radix-inferring parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct I64Value(i64);

impl I64Value {
    pub fn new(default: i64) -> Self {
        Self(default)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Value for I64Value {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        self.0 = parse_i64_auto(text)?;
        Ok(())
    }

    fn text(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "i64"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Unsigned integer flag value with radix-inferring parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct U64Value(u64);

impl U64Value {
    pub fn new(default: u64) -> Self {
        Self(default)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Value for U64Value {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        self.0 = parse_u64_auto(text)?;
        Ok(())
    }

    fn text(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "u64"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Floating point flag value.
#[derive(Debug, Clone, Copy, Default)]
pub struct F64Value(f64);

impl F64Value {
    pub fn new(default: f64) -> Self {
        Self(default)
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Value for F64Value {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        let text = text.trim();
        self.0 = text
            .parse()
            .map_err(|err| format!("parsing {text:?}: {err}"))?;
        Ok(())
    }

    fn text(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parse an integer with the radix inferred from the text: `0x` hex,
/// `0o` or a leading zero octal, `0b` binary, decimal otherwise.
/// Serialization is always decimal, so any accepted form round-trips.
pub(crate) fn parse_i64_auto(text: &str) -> Result<i64, ValueError> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = parse_u64_radix(digits)?;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(format!("value {trimmed:?} out of range").into());
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| format!("value {trimmed:?} out of range").into())
    }
}

pub(crate) fn parse_u64_auto(text: &str) -> Result<u64, ValueError> {
    let trimmed = text.trim();
    if trimmed.starts_with('-') {
        return Err(format!("invalid unsigned value {trimmed:?}").into());
    }
    parse_u64_radix(trimmed.strip_prefix('+').unwrap_or(trimmed))
}

fn parse_u64_radix(digits: &str) -> Result<u64, ValueError> {
    let (radix, body) = if let Some(hex) = strip_radix_prefix(digits, "0x", "0X") {
        (16, hex)
    } else if let Some(oct) = strip_radix_prefix(digits, "0o", "0O") {
        (8, oct)
    } else if let Some(bin) = strip_radix_prefix(digits, "0b", "0B") {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    u64::from_str_radix(body, radix).map_err(|err| format!("parsing {digits:?}: {err}").into())
}

fn strip_radix_prefix<'a>(digits: &'a str, lower: &str, upper: &str) -> Option<&'a str> {
    digits
        .strip_prefix(lower)
        .or_else(|| digits.strip_prefix(upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_is_inferred_from_prefix() {
        assert_eq!(parse_i64_auto("42").unwrap(), 42);
        assert_eq!(parse_i64_auto("+42").unwrap(), 42);
        assert_eq!(parse_i64_auto("-17").unwrap(), -17);
        assert_eq!(parse_i64_auto("0x2A").unwrap(), 42);
        assert_eq!(parse_i64_auto("0X2a").unwrap(), 42);
        assert_eq!(parse_i64_auto("052").unwrap(), 42);
        assert_eq!(parse_i64_auto("0o52").unwrap(), 42);
        assert_eq!(parse_i64_auto("0b101010").unwrap(), 42);
        assert_eq!(parse_i64_auto("0").unwrap(), 0);
        assert_eq!(parse_i64_auto("00").unwrap(), 0);
        assert_eq!(parse_i64_auto(" 7 ").unwrap(), 7);
    }

    #[test]
    fn extremes_fit_and_overflow_is_reported() {
        assert_eq!(parse_i64_auto("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(parse_i64_auto("-9223372036854775808").unwrap(), i64::MIN);
        assert!(parse_i64_auto("9223372036854775808").is_err());
        assert!(parse_i64_auto("-9223372036854775809").is_err());
    }

    #[test]
    fn malformed_integers_are_rejected() {
        for text in ["", "abc", "0x", "0xZZ", "1.5", "--4"] {
            assert!(parse_i64_auto(text).is_err(), "{text:?}");
        }
        assert!(parse_u64_auto("-1").is_err());
        assert_eq!(parse_u64_auto("0xFF").unwrap(), 255);
    }
}

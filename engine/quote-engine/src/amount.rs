//! Wei amounts backed by 256-bit integers

use crate::error::{QuoteError, Result};
use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Decimal places of the native currency (1 ETH = 10^18 wei)
pub const ETHER_DECIMALS: usize = 18;

/// An amount of the native currency in its smallest unit
///
/// 18-decimal fixed point values routinely exceed `u64`, so the amount is a
/// `U256` and every operation that can grow it is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wei(U256);

impl Wei {
    /// Create an amount from a wei count
    pub fn new(wei: u64) -> Self {
        Self(U256::from(wei))
    }

    pub fn from_u256(value: U256) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Parse a decimal integer wei string, e.g. `"100000000000000000"`
    pub fn from_dec_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QuoteError::InvalidPrice(format!("not a wei amount: {value:?}")));
        }
        U256::from_dec_str(trimmed)
            .map(Self)
            .map_err(|_| QuoteError::InvalidPrice(format!("wei amount out of range: {value:?}")))
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0.checked_add(other.0).map(Self).ok_or(QuoteError::AmountOverflow)
    }

    /// Multiply a per-second rate by a number of seconds
    pub fn checked_mul_secs(self, seconds: u64) -> Result<Self> {
        self.0.checked_mul(U256::from(seconds)).map(Self).ok_or(QuoteError::AmountOverflow)
    }

    /// Integer division truncating toward zero
    pub fn div_floor(self, divisor: u64) -> Self {
        Self(self.0 / U256::from(divisor))
    }

    /// Render as a decimal ether string with `decimals` fractional digits,
    /// rounding half-up on the first dropped digit
    pub fn format_ether(&self, decimals: usize) -> String {
        let (int_part, frac_part) = if decimals >= ETHER_DECIMALS {
            let unit = U256::exp10(ETHER_DECIMALS);
            let frac = self.0 % unit;
            let digits = format!("{:0>width$}", frac.to_string(), width = ETHER_DECIMALS);
            (self.0 / unit, format!("{digits:0<decimals$}"))
        } else {
            let scale = U256::exp10(ETHER_DECIMALS - decimals);
            let half = scale / U256::from(2u8);
            let scaled = match self.0.checked_add(half) {
                Some(v) => v / scale,
                None => self.0 / scale,
            };
            let unit = U256::exp10(decimals);
            let frac = (scaled % unit).to_string();
            (scaled / unit, format!("{frac:0>decimals$}"))
        };

        if decimals == 0 {
            int_part.to_string()
        } else {
            format!("{int_part}.{frac_part}")
        }
    }
}

impl From<u64> for Wei {
    fn from(wei: u64) -> Self {
        Self::new(wei)
    }
}

impl From<u128> for Wei {
    fn from(wei: u128) -> Self {
        Self(U256::from(wei))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a user-entered ether amount such as `"0.001"` into wei
///
/// Signs, exponents and more than 18 fractional digits are rejected.
pub fn parse_ether(input: &str) -> Result<Wei> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QuoteError::InvalidPrice("amount is empty".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(QuoteError::InvalidPrice(format!("negative amount: {input:?}")));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(QuoteError::InvalidPrice(format!("not a number: {input:?}")));
    }
    if frac_part.len() > ETHER_DECIMALS {
        return Err(QuoteError::InvalidPrice(format!(
            "more than {} decimal places: {input:?}",
            ETHER_DECIMALS
        )));
    }

    let digits = format!("{int_part}{frac_part:0<width$}", width = ETHER_DECIMALS);
    U256::from_dec_str(&digits)
        .map(Wei)
        .map_err(|_| QuoteError::InvalidPrice(format!("amount out of range: {input:?}")))
}

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct WeiVisitor;

impl<'de> Visitor<'de> for WeiVisitor {
    type Value = Wei;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative wei amount as a decimal string or integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Wei, E> {
        Ok(Wei::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Wei, E> {
        u64::try_from(v)
            .map(Wei::new)
            .map_err(|_| E::custom(format!("negative wei amount: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Wei, E> {
        Wei::from_dec_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(WeiVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ether() {
        assert_eq!(parse_ether("1").unwrap(), Wei::from(1_000_000_000_000_000_000u128));
        assert_eq!(parse_ether("0.001").unwrap(), Wei::new(1_000_000_000_000_000));
        assert_eq!(parse_ether(".5").unwrap(), Wei::new(500_000_000_000_000_000));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), Wei::new(1));
        assert_eq!(parse_ether(" 2. ").unwrap(), Wei::from(2_000_000_000_000_000_000u128));
    }

    #[test]
    fn test_parse_ether_rejects_bad_input() {
        for bad in ["", "   ", "-1", "+1", "abc", "1.2.3", "1e18", ".", "0.0000000000000000001"] {
            let err = parse_ether(bad).unwrap_err();
            assert!(matches!(err, QuoteError::InvalidPrice(_)), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_format_ether_rounds_half_up() {
        assert_eq!(Wei::new(103_780_000_000_000_000).format_ether(4), "0.1038");
        assert_eq!(Wei::new(3_600_000_000_000_000).format_ether(4), "0.0036");
        assert_eq!(Wei::new(49_999_999_999_999).format_ether(4), "0.0000");
        assert_eq!(Wei::new(50_000_000_000_000).format_ether(4), "0.0001");
        assert_eq!(Wei::from(1_500_000_000_000_000_000u128).format_ether(0), "2");
        assert_eq!(Wei::new(1).format_ether(18), "0.000000000000000001");
        assert_eq!(Wei::new(1).format_ether(20), "0.00000000000000000100");
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Wei::from_u256(U256::MAX);
        assert_eq!(max.checked_add(Wei::new(1)), Err(QuoteError::AmountOverflow));
        assert_eq!(max.checked_mul_secs(2), Err(QuoteError::AmountOverflow));
        assert_eq!(Wei::new(7).checked_mul_secs(3).unwrap(), Wei::new(21));
        assert_eq!(Wei::new(39).div_floor(20), Wei::new(1));
    }

    #[test]
    fn test_serde_accepts_strings_and_integers() {
        let from_str: Wei = serde_json::from_str("\"100000000000000000000\"").unwrap();
        assert_eq!(from_str, Wei::from(100_000_000_000_000_000_000u128));

        let from_int: Wei = serde_json::from_str("3600").unwrap();
        assert_eq!(from_int, Wei::new(3600));

        assert!(serde_json::from_str::<Wei>("-5").is_err());
        assert!(serde_json::from_str::<Wei>("\"0x10\"").is_err());

        let json = serde_json::to_string(&Wei::new(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }
}

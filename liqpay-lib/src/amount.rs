//! Exact monetary amounts using fixed-point decimal
//!
//! Callback amounts are compared against order totals, so they are parsed
//! into [`Decimal`] and never pass through `f64`.
//!
//! # Security
//!
//! - Uses `Decimal` internally (28-29 significant digits)
//! - Parsing preserves the transmitted scale (`"10.00"` stays `10.00`)
//! - Serializes as string (preserves precision)

use crate::{LiqpayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Transaction amount with fixed-point precision
///
/// # Examples
///
/// ```rust
/// use liqpay_lib::Amount;
///
/// let paid = Amount::from_str_checked("10.00").unwrap();
/// let due = Amount::from_str_checked("10").unwrap();
/// assert_eq!(paid, due);
/// assert_eq!(paid.to_string(), "10.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Wrap an existing decimal value.
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Create from decimal string (e.g., "123.45" or "1.5e2")
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::MalformedPayload`] if the string is not a decimal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use liqpay_lib::Amount;
    /// let amt = Amount::from_str_checked("100.50").unwrap();
    /// assert_eq!(amt.to_string(), "100.50");
    /// assert!(Amount::from_str_checked("ten").is_err());
    /// ```
    pub fn from_str_checked(s: &str) -> Result<Self> {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(|value| Self { value })
            .map_err(|e| LiqpayError::malformed("amount", format!("{:?}: {}", s, e)))
    }

    /// Parse a JSON scalar as sent by the gateway.
    ///
    /// The gateway emits amounts both as JSON numbers and as strings. JSON
    /// numbers keep their source text, so every transmitted digit reaches
    /// the decimal parser.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Self::from_str_checked(s),
            Value::Number(n) => Self::from_str_checked(&n.to_string()),
            other => Err(LiqpayError::malformed(
                "amount",
                format!("expected number or string, got {}", other),
            )),
        }
    }

    /// Get the internal Decimal value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use liqpay_lib::Amount;
    /// use rust_decimal::Decimal;
    /// let amt = Amount::from_str_checked("12").unwrap();
    /// assert_eq!(amt.as_decimal(), Decimal::from(12));
    /// ```
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Amount {
    type Err = LiqpayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_checked(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_amount_preserves_scale() {
        let amt = Amount::from_str_checked("10.00").unwrap();
        assert_eq!(amt.as_decimal(), dec!(10.00));
        assert_eq!(amt.to_string(), "10.00");
    }

    #[test]
    fn test_amount_equality_ignores_scale() {
        let a = Amount::from_str_checked("10.00").unwrap();
        let b = Amount::from_str_checked("10").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_float_rounding() {
        let a = Amount::from_str_checked("0.1").unwrap();
        let b = Amount::from_str_checked("0.2").unwrap();
        let sum = a.as_decimal() + b.as_decimal();
        assert_eq!(sum, dec!(0.3));
    }

    #[test]
    fn test_from_json_number_and_string() {
        assert_eq!(Amount::from_json(&json!(25)).unwrap().as_decimal(), dec!(25));
        assert_eq!(
            Amount::from_json(&json!(1.05)).unwrap().as_decimal(),
            dec!(1.05)
        );
        assert_eq!(
            Amount::from_json(&json!("99.99")).unwrap().as_decimal(),
            dec!(99.99)
        );
    }

    #[test]
    fn test_from_json_number_keeps_all_digits() {
        let value: Value = serde_json::from_str("1234567890123.456789").unwrap();
        let amt = Amount::from_json(&value).unwrap();
        assert_eq!(amt.as_decimal(), dec!(1234567890123.456789));
        assert_eq!(amt.to_string(), "1234567890123.456789");
    }

    #[test]
    fn test_from_json_rejects_non_scalar() {
        let err = Amount::from_json(&json!(null)).unwrap_err();
        assert_eq!(err.code(), crate::LiqpayErrorCode::MalformedPayload);
        assert!(Amount::from_json(&json!(["1"])).is_err());
    }

    #[test]
    fn test_scientific_notation() {
        let amt = Amount::from_str_checked("1.5e2").unwrap();
        assert_eq!(amt.as_decimal(), dec!(150));
    }

    #[test]
    fn test_invalid_amount() {
        assert!(Amount::from_str_checked("").is_err());
        assert!("abc".parse::<Amount>().is_err());
    }

    #[test]
    fn test_serialization() {
        let amt = Amount::from_str_checked("42.50").unwrap();
        let json = serde_json::to_string(&amt).unwrap();
        assert_eq!(json, "\"42.50\"");
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amt, parsed);
    }
}

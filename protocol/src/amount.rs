//! Monetary amounts in Brazilian reais.
//!
//! Amounts are held as whole centavos. The payload wants exactly two
//! fraction digits with a `.` separator (`10.50`); people type and read
//! `R$ 10,50`. Both conversions live here so nothing else has to touch
//! floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing to parse.
    #[error("amount is empty")]
    Empty,

    /// The text is not a plain decimal number.
    #[error("not a decimal amount: {0:?}")]
    Invalid(String),

    /// More than two digits after the separator.
    #[error("amount has more than two decimal places: {0:?}")]
    TooManyDecimals(String),

    /// A negative amount.
    #[error("amount must not be negative: {0}")]
    Negative(String),

    /// The value does not fit in centavos.
    #[error("amount out of range: {0:?}")]
    Overflow(String),
}

/// A non-negative amount in centavos.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount {
    centavos: u64,
}

impl Amount {
    /// Zero reais.
    pub const ZERO: Amount = Amount { centavos: 0 };

    /// Wrap a centavo count.
    pub const fn from_centavos(centavos: u64) -> Self {
        Self { centavos }
    }

    /// The amount in centavos.
    pub const fn centavos(&self) -> u64 {
        self.centavos
    }

    /// True when the amount is strictly greater than zero.
    pub const fn is_positive(&self) -> bool {
        self.centavos > 0
    }

    /// Convert a floating-point value in reais, rounding to the centavo.
    ///
    /// Zero means "open amount" and yields `Ok(None)`. Values that are not
    /// finite, negative, or too large for centavos are errors, so a fixed
    /// amount is never silently turned into an open one.
    pub fn from_reais(reais: f64) -> Result<Option<Self>, AmountError> {
        if !reais.is_finite() {
            return Err(AmountError::Invalid(reais.to_string()));
        }
        if reais < 0.0 {
            return Err(AmountError::Negative(reais.to_string()));
        }
        let centavos = (reais * 100.0).round();
        if centavos >= u64::MAX as f64 {
            return Err(AmountError::Overflow(reais.to_string()));
        }
        Ok(Some(Self::from_centavos(centavos as u64)).filter(Amount::is_positive))
    }

    /// Parse a decimal string such as `10`, `10.5`, `10,50` or `R$ 10,50`.
    pub fn parse_decimal(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        let text = trimmed
            .strip_prefix("R$")
            .map(str::trim_start)
            .unwrap_or(trimmed);
        if text.is_empty() {
            return Err(AmountError::Empty);
        }

        let normalized = text.replace(',', ".");
        let (whole, fraction) = match normalized.split_once('.') {
            Some((w, f)) => (w, f),
            None => (normalized.as_str(), ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(AmountError::Invalid(input.to_string()));
        }
        if fraction.len() > 2 {
            return Err(AmountError::TooManyDecimals(input.to_string()));
        }

        let overflow = || AmountError::Overflow(input.to_string());
        let reais: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        reais
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self::from_centavos)
            .ok_or_else(overflow)
    }

    /// Parse the value of the payload amount field.
    ///
    /// Only the form the encoder writes is accepted: digits, optionally
    /// followed by `.` and one or two digits. No comma, sign or currency.
    pub fn parse_emv(value: &str) -> Result<Self, AmountError> {
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        let conforming = match value.split_once('.') {
            Some((whole, fraction)) => {
                !whole.is_empty()
                    && all_digits(whole)
                    && (1..=2).contains(&fraction.len())
                    && all_digits(fraction)
            }
            None => !value.is_empty() && all_digits(value),
        };
        if !conforming {
            return Err(AmountError::Invalid(value.to_string()));
        }
        Self::parse_decimal(value)
    }

    /// Read a masked currency input field.
    ///
    /// The input mask keeps every digit the user typed and treats the digit
    /// string as centavos, so `"R$ 10,50"`, `"1050"` and `"10.50"` all mean
    /// ten reais and fifty centavos. Returns `None` when there are no digits
    /// or the value overflows.
    pub fn from_masked_input(input: &str) -> Option<Self> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok().map(Self::from_centavos)
    }

    /// Format for the payload amount field: `1234.56`.
    pub fn to_emv_string(&self) -> String {
        format!("{}.{:02}", self.centavos / 100, self.centavos % 100)
    }

    /// Format for display: `R$ 1234,56`.
    pub fn to_brl(&self) -> String {
        format!("R$ {},{:02}", self.centavos / 100, self.centavos % 100)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emv_string())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emv_formatting() {
        assert_eq!(Amount::from_centavos(1050).to_emv_string(), "10.50");
        assert_eq!(Amount::from_centavos(5).to_emv_string(), "0.05");
        assert_eq!(Amount::from_centavos(123456).to_emv_string(), "1234.56");
        assert_eq!(Amount::ZERO.to_emv_string(), "0.00");
    }

    #[test]
    fn test_brl_formatting() {
        assert_eq!(Amount::from_centavos(1050).to_brl(), "R$ 10,50");
        assert_eq!(Amount::from_centavos(100000).to_brl(), "R$ 1000,00");
    }

    #[test]
    fn test_from_reais() {
        assert_eq!(Amount::from_reais(10.5), Ok(Some(Amount::from_centavos(1050))));
        assert_eq!(
            Amount::from_reais(0.1 + 0.2),
            Ok(Some(Amount::from_centavos(30)))
        );
        assert_eq!(Amount::from_reais(0.0), Ok(None));
        assert_eq!(Amount::from_reais(0.001), Ok(None));
    }

    #[test]
    fn test_from_reais_refuses_unrepresentable_values() {
        assert!(matches!(
            Amount::from_reais(1e300),
            Err(AmountError::Overflow(_))
        ));
        assert!(matches!(
            Amount::from_reais(-3.0),
            Err(AmountError::Negative(_))
        ));
        assert!(matches!(
            Amount::from_reais(f64::NAN),
            Err(AmountError::Invalid(_))
        ));
        assert!(matches!(
            Amount::from_reais(f64::INFINITY),
            Err(AmountError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_decimal_variants() {
        let expected = Amount::from_centavos(1050);
        assert_eq!(Amount::parse_decimal("10.5").unwrap(), expected);
        assert_eq!(Amount::parse_decimal("10.50").unwrap(), expected);
        assert_eq!(Amount::parse_decimal("10,50").unwrap(), expected);
        assert_eq!(Amount::parse_decimal(" R$ 10,50 ").unwrap(), expected);
        assert_eq!(Amount::parse_decimal("7").unwrap(), Amount::from_centavos(700));
        assert_eq!(Amount::parse_decimal(".25").unwrap(), Amount::from_centavos(25));
        assert_eq!(Amount::parse_decimal("3.").unwrap(), Amount::from_centavos(300));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Amount::parse_decimal("  "), Err(AmountError::Empty));
        assert!(matches!(
            Amount::parse_decimal("ten"),
            Err(AmountError::Invalid(_))
        ));
        assert!(matches!(
            Amount::parse_decimal("1.2.3"),
            Err(AmountError::Invalid(_))
        ));
        assert!(matches!(
            Amount::parse_decimal("-5"),
            Err(AmountError::Invalid(_))
        ));
        assert!(matches!(
            Amount::parse_decimal("."),
            Err(AmountError::Invalid(_))
        ));
        assert!(matches!(
            Amount::parse_decimal("1.999"),
            Err(AmountError::TooManyDecimals(_))
        ));
        assert!(matches!(
            Amount::parse_decimal("999999999999999999999"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_emv_accepts_encoder_output() {
        assert_eq!(Amount::parse_emv("10.50"), Ok(Amount::from_centavos(1050)));
        assert_eq!(Amount::parse_emv("10.5"), Ok(Amount::from_centavos(1050)));
        assert_eq!(Amount::parse_emv("7"), Ok(Amount::from_centavos(700)));
    }

    #[test]
    fn test_parse_emv_rejects_display_forms() {
        for raw in ["10,50", "R$ 10", ".5", "5.", "1.234", " 10.50", "+1.00", ""] {
            assert!(
                matches!(Amount::parse_emv(raw), Err(AmountError::Invalid(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_from_str_delegates_to_decimal_parser() {
        assert_eq!("0,99".parse::<Amount>().unwrap(), Amount::from_centavos(99));
        assert!("abc".parse::<Amount>().is_err());
    }

    #[test]
    fn test_masked_input_reads_centavos() {
        assert_eq!(
            Amount::from_masked_input("R$ 10,50"),
            Some(Amount::from_centavos(1050))
        );
        assert_eq!(
            Amount::from_masked_input("1050"),
            Some(Amount::from_centavos(1050))
        );
        assert_eq!(Amount::from_masked_input("R$ "), None);
        assert_eq!(Amount::from_masked_input("0"), Some(Amount::ZERO));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Amount::from_centavos(250)).unwrap();
        assert_eq!(json, "250");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.centavos(), 250);
    }
}

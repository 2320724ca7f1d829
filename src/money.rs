//! Currency amounts as shown on product listings.
//!
//! A [`Price`] keeps the text the catalog displays (`"$50.00"`) next to the
//! parsed symbol and decimal amount, so the cart can sum exact values while
//! still echoing the original label back to the customer.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbol used when no priced item is available to borrow one from.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Unsigned amount: plain digits, `1,234,567` or `1,23,456` grouping, or a
/// bare fraction such as `.50`.
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+|\d{1,3}(?:,\d{3})+|\d{1,2}(?:,\d{2})+,\d{3})?(?:\.\d+)?$")
        .expect("amount pattern is valid")
});

/// Errors raised while reading a price label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The label was empty or only whitespace.
    #[error("Price is empty")]
    Empty,

    /// The label starts with a digit, so there is no currency symbol.
    #[error("Price {0:?} has no leading currency symbol")]
    MissingSymbol(String),

    /// The part after the symbol is not a non-negative decimal number.
    #[error("Price {0:?} does not contain a valid amount")]
    InvalidAmount(String),
}

/// A catalog price: currency symbol plus exact decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    label: String,
    symbol: String,
    amount: Decimal,
}

impl Price {
    /// Parse a label such as `"$50.00"`, `"₹1,299"` or `"Rs. 450.50"`.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] when the label is empty, lacks a symbol, or
    /// the amount cannot be read as a non-negative decimal.
    pub fn parse(label: &str) -> Result<Self, PriceError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let invalid = || PriceError::InvalidAmount(label.to_string());

        let first_digit = trimmed.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
        let (mut symbol, mut digits) = trimmed.split_at(first_digit);
        // A dot right before the digits is a decimal point: "$.50" is half a dollar.
        if let Some(head) = symbol.strip_suffix('.') {
            symbol = head;
            digits = &trimmed[first_digit - 1..];
        }

        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(PriceError::MissingSymbol(label.to_string()));
        }
        if symbol.contains(['-', '+']) || !AMOUNT.is_match(digits) {
            return Err(invalid());
        }

        let mut normalized: String = digits.chars().filter(|c| *c != ',').collect();
        if normalized.starts_with('.') {
            normalized.insert(0, '0');
        }
        let amount = Decimal::from_str(&normalized).map_err(|_| invalid())?;

        Ok(Self {
            label: label.to_string(),
            symbol: symbol.to_string(),
            amount,
        })
    }

    /// The label exactly as listed in the catalog, surrounding whitespace included.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The currency symbol preceding the amount.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The unit amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.label
    }
}

/// Round to cents (half away from zero) and render with exactly two decimals.
#[must_use]
pub fn format_cents(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dollar_label() {
        let price = Price::parse("$50.00").unwrap();
        assert_eq!(price.symbol(), "$");
        assert_eq!(price.amount(), Decimal::new(5000, 2));
        assert_eq!(price.label(), "$50.00");
    }

    #[test]
    fn parses_multi_character_symbol_and_thousands() {
        let price = Price::parse("Rs. 1,299.50").unwrap();
        assert_eq!(price.symbol(), "Rs.");
        assert_eq!(price.amount(), Decimal::new(129_950, 2));

        let rupee = Price::parse("₹450").unwrap();
        assert_eq!(rupee.symbol(), "₹");
        assert_eq!(rupee.amount(), Decimal::from(450));
    }

    #[test]
    fn rejects_malformed_labels() {
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(
            Price::parse("50.00"),
            Err(PriceError::MissingSymbol("50.00".to_string()))
        );
        assert!(matches!(
            Price::parse("$abc"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse("$-5.00"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse("$5.0.0"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse("$50.00 USD"),
            Err(PriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn leading_decimal_point_belongs_to_the_amount() {
        let price = Price::parse("$.50").unwrap();
        assert_eq!(price.symbol(), "$");
        assert_eq!(price.amount(), Decimal::new(50, 2));

        let spaced = Price::parse("Rs. .75").unwrap();
        assert_eq!(spaced.symbol(), "Rs.");
        assert_eq!(spaced.amount(), Decimal::new(75, 2));
    }

    #[test]
    fn signed_amounts_are_rejected() {
        for label in ["-$5.00", "$-5.00", "$+5.00", "+$5.00", "$ -5"] {
            assert_eq!(
                Price::parse(label),
                Err(PriceError::InvalidAmount(label.to_string())),
                "{label}"
            );
        }
    }

    #[test]
    fn thousands_separators_must_group_digits() {
        assert!(matches!(
            Price::parse("$1,2,3"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse("$1,23"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert_eq!(
            Price::parse("$1,234,567.89").unwrap().amount(),
            Decimal::new(123_456_789, 2)
        );
        // Lakh grouping as used on rupee prices.
        assert_eq!(
            Price::parse("₹1,29,999").unwrap().amount(),
            Decimal::from(129_999)
        );
    }

    #[test]
    fn label_is_kept_verbatim() {
        let price = Price::parse(" $50.00 ").unwrap();
        assert_eq!(price.label(), " $50.00 ");
        assert_eq!(price.to_string(), " $50.00 ");
        assert_eq!(price.amount(), Decimal::new(5000, 2));
    }

    #[test]
    fn serde_uses_the_label() {
        let price: Price = serde_json::from_str("\"$19.99\"").unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"$19.99\"");
        assert!(serde_json::from_str::<Price>("\"19.99\"").is_err());
    }

    #[test]
    fn formats_cents_without_float_artifacts() {
        assert_eq!(format_cents(Decimal::ZERO), "0.00");
        assert_eq!(format_cents(Decimal::new(100, 0)), "100.00");
        // 0.1 + 0.2 is exact in decimal arithmetic.
        assert_eq!(format_cents(Decimal::new(1, 1) + Decimal::new(2, 1)), "0.30");
        assert_eq!(format_cents(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_cents(Decimal::new(10_049, 4)), "1.00");
    }
}

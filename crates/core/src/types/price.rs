//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are in whole rupees (decimals allowed for explicit overrides). On
//! the wire a price is a plain JSON number, matching what the admin panel and
//! the product catalog store.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, IgnoredAny, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A display price in Indian rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Currency symbol used for every rendered price.
    pub const CURRENCY_SYMBOL: &'static str = "₹";

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Digits after the decimal point, ignoring trailing zeros.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        self.0.normalize().scale()
    }

    /// Format for display with at least two decimal places (e.g., "₹2250.00").
    ///
    /// Finer amounts keep every digit so the shown value is never cut short.
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.0.normalize();
        if amount.scale() <= 2 {
            format!("{}{amount:.2}", Self::CURRENCY_SYMBOL)
        } else {
            format!("{}{amount}", Self::CURRENCY_SYMBOL)
        }
    }
}

/// Shortest exact form, without trailing zeros (e.g., "2250", "3999.5").
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let amount = self.0.normalize();
        if amount.scale() == 0
            && let Some(whole) = amount.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match amount.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&amount.to_string()),
        }
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a numeric price")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        if !v.is_finite() {
            return Err(E::custom("price must be finite"));
        }
        // f64 Display is the shortest round-trip form, so 3999.99 stays 3999.99
        Decimal::from_str(&v.to_string())
            .or_else(|_| Decimal::from_scientific(&format!("{v:e}")))
            .map(Price)
            .map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse::<Price>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Valid(Price),
    Invalid(IgnoredAny),
}

impl Lenient {
    fn into_price(self) -> Option<Price> {
        match self {
            Self::Valid(price) => Some(price),
            Self::Invalid(_) => None,
        }
    }
}

/// Deserialize an optional price, treating non-numeric values as absent.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lenient>::deserialize(deserializer)?.and_then(Lenient::into_price))
}

/// Deserialize a key → price map, dropping entries whose value is not numeric.
///
/// # Errors
///
/// Fails if the value is present but not a map.
pub fn deserialize_lenient_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Lenient>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.into_price().map(|price| (key, price)))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_rupees(2250).display(), "₹2250.00");
        let price: Price = "3999.5".parse().unwrap();
        assert_eq!(price.display(), "₹3999.50");
    }

    #[test]
    fn test_display_keeps_extra_precision() {
        let price: Price = "3999.999".parse().unwrap();
        assert_eq!(price.display(), "₹3999.999");
        assert_eq!(price.decimal_places(), 3);
        let price: Price = "12.500".parse().unwrap();
        assert_eq!(price.display(), "₹12.50");
        assert_eq!(price.decimal_places(), 1);
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        let price: Price = "3999.00".parse().unwrap();
        assert_eq!(price.to_string(), "3999");
    }

    #[test]
    fn test_deserialize_integer_and_float() {
        let whole: Price = serde_json::from_str("500").unwrap();
        assert_eq!(whole, Price::from_rupees(500));

        let fractional: Price = serde_json::from_str("3999.99").unwrap();
        assert_eq!(fractional.amount(), Decimal::new(399_999, 2));
    }

    #[test]
    fn test_deserialize_numeric_string() {
        let price: Price = serde_json::from_str("\"450\"").unwrap();
        assert_eq!(price, Price::from_rupees(450));
    }

    #[test]
    fn test_deserialize_rejects_text() {
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Price>("true").is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(
            serde_json::to_string(&Price::from_rupees(2250)).unwrap(),
            "2250"
        );
        let price: Price = "12.5".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.5");
    }

    #[test]
    fn test_negative() {
        assert!(Price::from_rupees(-1).is_negative());
        assert!(!Price::from_rupees(0).is_negative());
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_lenient")]
        price: Option<Price>,
        #[serde(default, deserialize_with = "deserialize_lenient_map")]
        variants: BTreeMap<String, Price>,
    }

    #[test]
    fn test_lenient_option() {
        let h: Holder = serde_json::from_str(r#"{"price": "n/a"}"#).unwrap();
        assert!(h.price.is_none());
        let h: Holder = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert!(h.price.is_none());
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.price.is_none());
        let h: Holder = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        assert_eq!(h.price, Some(Price::from_rupees(10)));
    }

    #[test]
    fn test_lenient_map_drops_bad_entries() {
        let h: Holder =
            serde_json::from_str(r#"{"variants": {"1kg": 3999, "2kg": "soon"}}"#).unwrap();
        assert_eq!(h.variants.len(), 1);
        assert_eq!(h.variants.get("1kg"), Some(&Price::from_rupees(3999)));
    }
}

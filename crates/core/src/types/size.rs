//! The packaging-size catalog.
//!
//! Every product is sold in the same six pack sizes. The price of a size that
//! has no explicit override is derived from the product's 100 gram base price
//! and the size's multiplier. This table is the only definition of the
//! catalog; size buttons, price resolution and admin validation all read it.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A size key outside the six-entry catalog was requested.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size key: {0:?}")]
pub struct UnknownSizeKey(pub String);

/// Key of one pack size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum SizeKey {
    #[default]
    #[serde(rename = "100g")]
    Grams100,
    #[serde(rename = "250g")]
    Grams250,
    #[serde(rename = "500g")]
    Grams500,
    #[serde(rename = "1kg")]
    Kg1,
    #[serde(rename = "2kg")]
    Kg2,
    #[serde(rename = "5kg")]
    Kg5,
}

impl SizeKey {
    /// All keys in display order.
    pub const ALL: [Self; 6] = [
        Self::Grams100,
        Self::Grams250,
        Self::Grams500,
        Self::Kg1,
        Self::Kg2,
        Self::Kg5,
    ];

    /// The wire form of the key (e.g., "500g").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grams100 => "100g",
            Self::Grams250 => "250g",
            Self::Grams500 => "500g",
            Self::Kg1 => "1kg",
            Self::Kg2 => "2kg",
            Self::Kg5 => "5kg",
        }
    }

    /// Position in the catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Key at `index`, or `None` past the end of the catalog.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog entry for this key.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // discriminants are 0..=5
    pub fn variant(self) -> &'static SizeVariant {
        &SIZE_VARIANTS[self.index()]
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeKey {
    type Err = UnknownSizeKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSizeKey(s.to_owned()))
    }
}

/// One entry of the size catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeVariant {
    /// Catalog key.
    pub key: SizeKey,
    /// Human-readable label shown on size buttons and in chat messages.
    pub label: &'static str,
    multiplier_mantissa: i64,
    multiplier_scale: u32,
}

impl SizeVariant {
    const fn new(key: SizeKey, label: &'static str, mantissa: i64, scale: u32) -> Self {
        Self {
            key,
            label,
            multiplier_mantissa: mantissa,
            multiplier_scale: scale,
        }
    }

    /// Factor applied to the 100 gram base price.
    #[must_use]
    pub fn multiplier(&self) -> Decimal {
        Decimal::new(self.multiplier_mantissa, self.multiplier_scale)
    }
}

impl Serialize for SizeVariant {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SizeVariant", 3)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("label", self.label)?;
        state.serialize_field("multiplier", &self.multiplier().normalize().to_string())?;
        state.end()
    }
}

/// The size catalog, smallest first. Indexed by [`SizeKey::index`].
pub static SIZE_VARIANTS: [SizeVariant; 6] = [
    SizeVariant::new(SizeKey::Grams100, "100 gram", 1, 0),
    SizeVariant::new(SizeKey::Grams250, "250 gram", 24, 1),
    SizeVariant::new(SizeKey::Grams500, "500 gram", 45, 1),
    SizeVariant::new(SizeKey::Kg1, "1 kg", 85, 1),
    SizeVariant::new(SizeKey::Kg2, "2 kg", 16, 0),
    SizeVariant::new(SizeKey::Kg5, "5 kg", 38, 0),
];

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_keys() {
        for (index, variant) in SIZE_VARIANTS.iter().enumerate() {
            assert_eq!(variant.key.index(), index);
            assert_eq!(SizeKey::ALL[index], variant.key);
        }
    }

    #[test]
    fn test_multipliers_strictly_increase() {
        for pair in SIZE_VARIANTS.windows(2) {
            assert!(
                pair[0].multiplier() < pair[1].multiplier(),
                "{} must be cheaper per pack than {}",
                pair[0].key,
                pair[1].key
            );
        }
    }

    #[test]
    fn test_known_multipliers() {
        assert_eq!(SizeKey::Grams100.variant().multiplier(), Decimal::ONE);
        assert_eq!(SizeKey::Grams500.variant().multiplier(), Decimal::new(45, 1));
        assert_eq!(SizeKey::Kg1.variant().multiplier(), Decimal::new(85, 1));
        assert_eq!(SizeKey::Kg2.variant().multiplier(), Decimal::from(16));
        assert_eq!(SizeKey::Kg5.variant().multiplier(), Decimal::from(38));
    }

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(SizeKey::default(), SIZE_VARIANTS[0].key);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1kg".parse::<SizeKey>().unwrap(), SizeKey::Kg1);
        assert_eq!(" 500G ".parse::<SizeKey>().unwrap(), SizeKey::Grams500);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "3kg".parse::<SizeKey>().unwrap_err();
        assert_eq!(err, UnknownSizeKey("3kg".to_owned()));
        assert_eq!(err.to_string(), "unknown size key: \"3kg\"");
    }

    #[test]
    fn test_from_index() {
        assert_eq!(SizeKey::from_index(0), Some(SizeKey::Grams100));
        assert_eq!(SizeKey::from_index(5), Some(SizeKey::Kg5));
        assert_eq!(SizeKey::from_index(6), None);
    }

    #[test]
    fn test_serde_uses_wire_keys() {
        assert_eq!(serde_json::to_string(&SizeKey::Kg1).unwrap(), "\"1kg\"");
        let key: SizeKey = serde_json::from_str("\"250g\"").unwrap();
        assert_eq!(key, SizeKey::Grams250);
    }
}

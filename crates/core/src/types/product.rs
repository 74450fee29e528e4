//! Catalog product records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::price::{self, Price};
use super::size::SizeKey;

/// Highest price, in rupees, accepted for a base price or an override.
pub const MAX_PRICE_RUPEES: i64 = 10_000_000;

/// Digits allowed after the decimal point in a stored price.
pub const MAX_PRICE_DECIMALS: u32 = 2;

/// Errors found when validating a product before it is saved.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// Slug is empty or contains characters that are not URL-safe.
    #[error("slug {0:?} must be non-empty lowercase letters, digits and dashes")]
    InvalidSlug(String),
    /// Product has no display name.
    #[error("product name cannot be empty")]
    EmptyName,
    /// Base price is missing or not a number.
    #[error("base price is required")]
    MissingBasePrice,
    /// A price is below zero.
    #[error("price for {0} cannot be negative")]
    NegativePrice(String),
    /// A price is above [`MAX_PRICE_RUPEES`].
    #[error("price for {0} cannot exceed {MAX_PRICE_RUPEES}")]
    PriceTooLarge(String),
    /// A price has more than [`MAX_PRICE_DECIMALS`] decimal places.
    #[error("price for {0} can have at most {MAX_PRICE_DECIMALS} decimal places")]
    PriceTooPrecise(String),
    /// A price override names a size outside the catalog.
    #[error("price override for unknown size {0:?}")]
    UnknownOverrideSize(String),
}

/// A product as stored in the catalog.
///
/// Every field tolerates absence so that partially-filled records from the
/// admin panel still load. A missing or non-numeric
/// `basePrice` is kept as `None` and reported when a price is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, URL-safe identifier.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    /// Price of the 100 gram pack.
    #[serde(
        default,
        deserialize_with = "price::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_price: Option<Price>,
    /// Explicit per-size prices. Coverage is partial; missing sizes are derived.
    #[serde(
        default,
        deserialize_with = "price::deserialize_lenient_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub price_variants: BTreeMap<String, Price>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Fallback image when `images` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Create a product with only identity and base price set.
    #[must_use]
    pub fn new(slug: impl Into<String>, name: impl Into<String>, base_price: Price) -> Self {
        Self {
            slug: slug.into(),
            sku: String::new(),
            name: name.into(),
            base_price: Some(base_price),
            price_variants: BTreeMap::new(),
            images: Vec::new(),
            image: None,
            short_description: String::new(),
            description: String::new(),
            benefits: Vec::new(),
            features: Vec::new(),
            product_type: None,
            category: None,
        }
    }

    /// Explicit price override for `size`, if the admin set one.
    #[must_use]
    pub fn price_override(&self, size: SizeKey) -> Option<Price> {
        self.price_variants.get(size.as_str()).copied()
    }

    /// Number of selectable gallery images (at least one if a fallback exists).
    #[must_use]
    pub fn image_count(&self) -> usize {
        if self.images.is_empty() {
            usize::from(self.image.is_some())
        } else {
            self.images.len()
        }
    }

    /// Image shown at gallery position `index`, falling back to `image`.
    #[must_use]
    pub fn image_at(&self, index: usize) -> Option<&str> {
        self.images
            .get(index)
            .or(self.image.as_ref())
            .map(String::as_str)
    }

    /// Check the record before it is persisted.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: slug, name, base price, then overrides.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if !is_url_safe_slug(&self.slug) {
            return Err(ProductValidationError::InvalidSlug(self.slug.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        let base = self
            .base_price
            .ok_or(ProductValidationError::MissingBasePrice)?;
        check_price_bounds("basePrice", base)?;
        for (key, price) in &self.price_variants {
            if !SizeKey::ALL.iter().any(|size| size.as_str() == key) {
                return Err(ProductValidationError::UnknownOverrideSize(key.clone()));
            }
            check_price_bounds(key, *price)?;
        }
        Ok(())
    }
}

fn check_price_bounds(field: &str, price: Price) -> Result<(), ProductValidationError> {
    if price.is_negative() {
        return Err(ProductValidationError::NegativePrice(field.to_owned()));
    }
    if price > Price::from_rupees(MAX_PRICE_RUPEES) {
        return Err(ProductValidationError::PriceTooLarge(field.to_owned()));
    }
    if price.decimal_places() > MAX_PRICE_DECIMALS {
        return Err(ProductValidationError::PriceTooPrecise(field.to_owned()));
    }
    Ok(())
}

fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn almonds() -> Product {
        Product::new("california-almonds", "California Almonds", Price::from_rupees(500))
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "slug": "kaju-w240",
            "sku": "DF-KAJU-240",
            "name": "Kaju W240",
            "basePrice": 120,
            "priceVariants": {"1kg": 999},
            "images": ["a.jpg", "b.jpg"],
            "shortDescription": "Whole cashews",
            "description": "Premium whole cashews.",
            "benefits": ["Heart healthy"],
            "features": ["100% Natural"],
            "type": "nuts",
            "category": "cashews"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.base_price, Some(Price::from_rupees(120)));
        assert_eq!(
            product.price_override(SizeKey::Kg1),
            Some(Price::from_rupees(999))
        );
        assert_eq!(product.price_override(SizeKey::Kg2), None);
        assert_eq!(product.product_type.as_deref(), Some("nuts"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let product: Product = serde_json::from_str(r#"{"slug": "raisins"}"#).unwrap();
        assert!(product.base_price.is_none());
        assert!(product.images.is_empty());
        assert!(product.price_variants.is_empty());
    }

    #[test]
    fn test_non_numeric_base_price_is_absent() {
        let product: Product =
            serde_json::from_str(r#"{"slug": "raisins", "basePrice": "call us"}"#).unwrap();
        assert!(product.base_price.is_none());
    }

    #[test]
    fn test_image_fallback() {
        let mut product = almonds();
        assert_eq!(product.image_count(), 0);
        assert_eq!(product.image_at(0), None);

        product.image = Some("fallback.jpg".to_owned());
        assert_eq!(product.image_count(), 1);
        assert_eq!(product.image_at(0), Some("fallback.jpg"));

        product.images = vec!["one.jpg".to_owned(), "two.jpg".to_owned()];
        assert_eq!(product.image_count(), 2);
        assert_eq!(product.image_at(1), Some("two.jpg"));
        assert_eq!(product.image_at(7), Some("fallback.jpg"));
    }

    #[test]
    fn test_validate_ok() {
        let mut product = almonds();
        product
            .price_variants
            .insert("1kg".to_owned(), Price::from_rupees(3999));
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_slug() {
        let mut product = almonds();
        product.slug = "Bad Slug".to_owned();
        assert!(matches!(
            product.validate(),
            Err(ProductValidationError::InvalidSlug(_))
        ));
        product.slug = "-edge".to_owned();
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_validate_missing_base_price() {
        let mut product = almonds();
        product.base_price = None;
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::MissingBasePrice)
        );
    }

    #[test]
    fn test_validate_unknown_override() {
        let mut product = almonds();
        product
            .price_variants
            .insert("3kg".to_owned(), Price::from_rupees(1));
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::UnknownOverrideSize("3kg".to_owned()))
        );
    }

    #[test]
    fn test_validate_negative_override() {
        let mut product = almonds();
        product
            .price_variants
            .insert("2kg".to_owned(), Price::from_rupees(-5));
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::NegativePrice("2kg".to_owned()))
        );
    }

    #[test]
    fn test_validate_price_upper_bound() {
        let mut product = almonds();
        product.base_price = Some("10000000000000000000000000000".parse().unwrap());
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::PriceTooLarge("basePrice".to_owned()))
        );

        let mut product = almonds();
        product
            .price_variants
            .insert("5kg".to_owned(), Price::from_rupees(MAX_PRICE_RUPEES + 1));
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::PriceTooLarge("5kg".to_owned()))
        );

        product
            .price_variants
            .insert("5kg".to_owned(), Price::from_rupees(MAX_PRICE_RUPEES));
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_price_precision() {
        let mut product = almonds();
        product
            .price_variants
            .insert("1kg".to_owned(), "3999.999".parse().unwrap());
        assert_eq!(
            product.validate(),
            Err(ProductValidationError::PriceTooPrecise("1kg".to_owned()))
        );

        product
            .price_variants
            .insert("1kg".to_owned(), "3999.990".parse().unwrap());
        assert!(product.validate().is_ok());
    }
}

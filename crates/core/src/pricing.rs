//! Variant price resolution.
//!
//! A product's displayed price for a pack size is its explicit override when
//! the admin set one, otherwise the 100 gram base price scaled by the size's
//! catalog multiplier and rounded to whole rupees.

use rust_decimal::RoundingStrategy;
use serde::Serialize;

use crate::types::{Price, Product, SizeKey, UnknownSizeKey};

/// Errors returned by price resolution.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The product record has no usable base price.
    #[error("product {slug:?} has no base price")]
    MissingBasePrice { slug: String },
    /// Scaling the base price overflowed the decimal range.
    #[error("price of {slug:?} in {size} is out of range")]
    PriceOutOfRange { slug: String, size: SizeKey },
    /// The requested size is not in the catalog.
    #[error(transparent)]
    UnknownSizeKey(#[from] UnknownSizeKey),
}

/// Resolve the displayed price of `product` in `size`.
///
/// Overrides are returned exactly as stored. Derived prices round half away
/// from zero.
///
/// # Errors
///
/// Returns [`PricingError::MissingBasePrice`] when no override exists for
/// `size` and the product has no base price, or
/// [`PricingError::PriceOutOfRange`] when the derived price overflows.
pub fn resolve_price(product: &Product, size: SizeKey) -> Result<Price, PricingError> {
    if let Some(price) = product.price_override(size) {
        return Ok(price);
    }
    let base = product
        .base_price
        .ok_or_else(|| PricingError::MissingBasePrice {
            slug: product.slug.clone(),
        })?;
    let derived = base
        .amount()
        .checked_mul(size.variant().multiplier())
        .ok_or_else(|| PricingError::PriceOutOfRange {
            slug: product.slug.clone(),
            size,
        })?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Ok(Price::new(derived))
}

/// Resolve a price from an untyped size key (query strings, CLI arguments).
///
/// # Errors
///
/// Returns [`PricingError::UnknownSizeKey`] for keys outside the catalog, or
/// any error from [`resolve_price`].
pub fn resolve_price_by_key(product: &Product, key: &str) -> Result<Price, PricingError> {
    resolve_price(product, key.parse()?)
}

/// A resolved price together with the size it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub size: SizeKey,
    pub label: &'static str,
    pub price: Price,
}

impl PriceQuote {
    /// Price with currency symbol and two decimals.
    #[must_use]
    pub fn display(&self) -> String {
        self.price.display()
    }
}

/// Resolve `size` and pair the price with its catalog label.
///
/// # Errors
///
/// See [`resolve_price`].
pub fn quote(product: &Product, size: SizeKey) -> Result<PriceQuote, PricingError> {
    Ok(PriceQuote {
        size,
        label: size.variant().label,
        price: resolve_price(product, size)?,
    })
}

/// Quotes for every catalog size, in display order.
///
/// # Errors
///
/// See [`resolve_price`]. The first failure is returned.
pub fn quote_all(product: &Product) -> Result<Vec<PriceQuote>, PricingError> {
    SizeKey::ALL
        .into_iter()
        .map(|size| quote(product, size))
        .collect()
}

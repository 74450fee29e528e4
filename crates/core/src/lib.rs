//! DryFruto Core - Shared types and resolution logic.
//!
//! This crate provides the domain model used by every DryFruto component:
//! - `storefront` - Public catalog site
//! - `admin` - Internal settings and product editor
//! - `cli` - Migrations, seeding and inspection tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Every resolution is a function of an immutable
//! snapshot passed in by the caller.
//!
//! # Modules
//!
//! - [`types`] - Prices, size catalog, phone numbers, products, settings records
//! - [`pricing`] - Turns a product and a size into the displayed price
//! - [`site_config`] - Merges the persisted settings record with built-in defaults
//! - [`contact`] - Call and chat links for the contact channels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contact;
pub mod pricing;
pub mod site_config;
pub mod types;

pub use pricing::{PriceQuote, PricingError, quote, quote_all, resolve_price, resolve_price_by_key};
pub use site_config::{
    EffectiveSiteSettings, Palette, SocialLink, SocialNetwork, resolve_settings,
};
pub use types::*;

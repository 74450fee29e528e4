//! Core types for DryFruto.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod phone;
pub mod price;
pub mod product;
pub mod selection;
pub mod settings;
pub mod size;

pub use phone::{Phone, PhoneError};
pub use price::Price;
pub use product::{Product, ProductValidationError};
pub use selection::{ProductSelection, ProductTab, UnknownTab};
pub use settings::{
    ColorSlot, GLOBAL_SCOPE, SettingsValidationError, SiteSettingsRecord, UnknownColorSlot,
};
pub use size::{SIZE_VARIANTS, SizeKey, SizeVariant, UnknownSizeKey};

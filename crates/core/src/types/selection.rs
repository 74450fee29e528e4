//! Per-view selection state on the product detail page.
//!
//! Nothing here is persisted: the state is rebuilt from the request every
//! time a product page is rendered.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::product::Product;
use super::size::{SizeKey, UnknownSizeKey};

/// Tab shown below the product gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductTab {
    #[default]
    Description,
    Benefits,
}

impl ProductTab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Benefits => "benefits",
        }
    }
}

impl fmt::Display for ProductTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tab name that is neither `description` nor `benefits`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tab: {0:?}")]
pub struct UnknownTab(pub String);

impl FromStr for ProductTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" => Ok(Self::Description),
            "benefits" => Ok(Self::Benefits),
            _ => Err(UnknownTab(s.to_owned())),
        }
    }
}

/// Selected size, gallery image and tab for one product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProductSelection {
    size: SizeKey,
    image_index: usize,
    tab: ProductTab,
}

impl ProductSelection {
    /// Initial state on product load: first size, first image, description tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn size(&self) -> SizeKey {
        self.size
    }

    #[must_use]
    pub const fn image_index(&self) -> usize {
        self.image_index
    }

    #[must_use]
    pub const fn tab(&self) -> ProductTab {
        self.tab
    }

    pub const fn select_size(&mut self, size: SizeKey) {
        self.size = size;
    }

    /// Select by catalog position; positions past the end pick the largest size.
    pub fn select_size_index(&mut self, index: usize) {
        let last = SizeKey::ALL.len() - 1;
        self.size = SizeKey::from_index(index.min(last)).unwrap_or_default();
    }

    /// Select by wire key.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSizeKey`] and leaves the selection unchanged when the
    /// key is not in the catalog.
    pub fn select_size_key(&mut self, key: &str) -> Result<(), UnknownSizeKey> {
        self.size = key.parse()?;
        Ok(())
    }

    /// Select a gallery image, clamped to the product's image count.
    pub fn select_image(&mut self, index: usize, product: &Product) {
        self.image_index = index.min(product.image_count().saturating_sub(1));
    }

    pub const fn select_tab(&mut self, tab: ProductTab) {
        self.tab = tab;
    }

    /// Image URL for the current selection, if the product has any image.
    #[must_use]
    pub fn current_image<'a>(&self, product: &'a Product) -> Option<&'a str> {
        product.image_at(self.image_index)
    }
}

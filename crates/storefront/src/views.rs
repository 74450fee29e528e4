//! Template view models.
//!
//! Builders here turn core domain values into plain, pre-formatted data so
//! templates never compute prices or colors themselves.

use dryfruto_core::contact::{chat_url, inquiry_message};
use dryfruto_core::{
    ColorSlot, EffectiveSiteSettings, Palette, PricingError, Product, ProductSelection, ProductTab,
    SizeKey, SocialLink, quote,
};

/// Shown in place of a price when the product has no base price.
pub const PRICE_UNAVAILABLE: &str = "Price unavailable";

/// Scope names used for page style lookups.
pub mod scope {
    pub const HEADER: &str = "header";
    pub const FOOTER: &str = "footer";
    pub const HOME: &str = "home";
    pub const PRODUCTS: &str = "products";
    pub const PRODUCT: &str = "product";
}

/// Site-wide data rendered by the base layout.
#[derive(Debug, Clone)]
pub struct LayoutView {
    pub business_name: String,
    pub slogan: String,
    pub logo: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub call_link: String,
    pub whatsapp_link: String,
    pub social_links: Vec<SocialLink>,
    pub header: Palette,
    pub footer: Palette,
    /// Accent color for the page body.
    pub accent: String,
}

impl LayoutView {
    /// Build the layout for a page identified by `page_scope`.
    #[must_use]
    pub fn new(settings: &EffectiveSiteSettings, page_scope: &str) -> Self {
        Self {
            business_name: settings.business_name.clone(),
            slogan: settings.slogan.clone(),
            logo: settings.logo.clone(),
            phone: settings.phone.clone(),
            email: settings.email.clone(),
            address: settings.address.clone(),
            call_link: settings.call_link.clone(),
            whatsapp_link: settings.whatsapp_link.clone(),
            social_links: settings.social_links.clone(),
            header: settings.palette(scope::HEADER),
            footer: settings.palette(scope::FOOTER),
            accent: settings.color(page_scope, ColorSlot::AccentColor).to_owned(),
        }
    }
}

/// Product tile on the home and listing pages.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub href: String,
    pub name: String,
    pub short_description: String,
    pub image: Option<String>,
    /// Price of the default size, or [`PRICE_UNAVAILABLE`].
    pub price: String,
    pub price_label: &'static str,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product) -> Self {
        let size = SizeKey::default();
        Self {
            href: product_href(&product.slug),
            name: product.name.clone(),
            short_description: product.short_description.clone(),
            image: product.image_at(0).map(str::to_owned),
            price: price_text(product, size),
            price_label: size.variant().label,
        }
    }
}

/// Size button on the product page.
#[derive(Debug, Clone)]
pub struct SizeOptionView {
    pub key: &'static str,
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

/// Gallery thumbnail on the product page.
#[derive(Debug, Clone)]
pub struct ThumbnailView {
    pub url: String,
    pub href: String,
    pub selected: bool,
}

/// Tab header on the product page.
#[derive(Debug, Clone)]
pub struct TabView {
    pub title: &'static str,
    pub href: String,
    pub selected: bool,
}

/// Everything the product page renders.
#[derive(Debug, Clone)]
pub struct ProductPageView {
    pub slug: String,
    pub sku: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub features: Vec<String>,
    pub image: Option<String>,
    /// Empty unless the product has more than one image.
    pub thumbnails: Vec<ThumbnailView>,
    pub sizes: Vec<SizeOptionView>,
    pub selected_label: &'static str,
    /// Formatted price, or [`PRICE_UNAVAILABLE`].
    pub price: String,
    pub price_available: bool,
    pub tabs: Vec<TabView>,
    pub show_benefits: bool,
    pub chat_url: String,
    pub call_link: String,
}

impl ProductPageView {
    /// Build the page for `product` in the given selection state.
    #[must_use]
    pub fn new(
        product: &Product,
        selection: &ProductSelection,
        settings: &EffectiveSiteSettings,
    ) -> Self {
        let slug = product.slug.as_str();
        let selected_size = selection.size();
        let quote = match quote(product, selected_size) {
            Ok(quote) => Some(quote),
            Err(PricingError::MissingBasePrice { slug }) => {
                tracing::warn!(%slug, size = %selected_size, "product has no base price");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, %slug, "price resolution failed");
                None
            }
        };

        let sizes = SizeKey::ALL
            .into_iter()
            .map(|size| {
                let mut next = *selection;
                next.select_size(size);
                SizeOptionView {
                    key: size.as_str(),
                    label: size.variant().label,
                    href: selection_href(slug, &next),
                    selected: size == selected_size,
                }
            })
            .collect();

        let thumbnails = if product.images.len() > 1 {
            product
                .images
                .iter()
                .enumerate()
                .map(|(index, url)| {
                    let mut next = *selection;
                    next.select_image(index, product);
                    ThumbnailView {
                        url: url.clone(),
                        href: selection_href(slug, &next),
                        selected: index == selection.image_index(),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let tabs = [
            (ProductTab::Description, "Description"),
            (ProductTab::Benefits, "Benefits"),
        ]
        .into_iter()
        .map(|(tab, title)| {
            let mut next = *selection;
            next.select_tab(tab);
            TabView {
                title,
                href: selection_href(slug, &next),
                selected: tab == selection.tab(),
            }
        })
        .collect();

        let label = selected_size.variant().label;
        let message = inquiry_message(&product.name, label, quote.as_ref());

        Self {
            slug: product.slug.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            short_description: product.short_description.clone(),
            description: product.description.clone(),
            benefits: product.benefits.clone(),
            features: product.features.clone(),
            image: selection.current_image(product).map(str::to_owned),
            thumbnails,
            sizes,
            selected_label: label,
            price: quote
                .as_ref()
                .map_or_else(|| PRICE_UNAVAILABLE.to_owned(), |q| q.display()),
            price_available: quote.is_some(),
            tabs,
            show_benefits: selection.tab() == ProductTab::Benefits,
            chat_url: chat_url(&settings.whatsapp_link, &message),
            call_link: settings.call_link.clone(),
        }
    }
}

/// Link to a product page.
#[must_use]
pub fn product_href(slug: &str) -> String {
    format!("/products/{}", urlencoding::encode(slug))
}

/// Link to a product page in a given selection state.
#[must_use]
pub fn selection_href(slug: &str, selection: &ProductSelection) -> String {
    format!(
        "{}?size={}&image={}&tab={}",
        product_href(slug),
        selection.size(),
        selection.image_index(),
        selection.tab()
    )
}

fn price_text(product: &Product, size: SizeKey) -> String {
    quote(product, size).map_or_else(|_| PRICE_UNAVAILABLE.to_owned(), |q| q.display())
}

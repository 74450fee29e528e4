//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use dryfruto_core::{Product, ProductSelection, ProductTab};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{LayoutView, ProductCardView, ProductPageView, scope};

/// Listing filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
}

/// Selection state carried in the product page URL.
///
/// Values are kept as strings so a malformed parameter does not reject the
/// whole request.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub size: Option<String>,
    pub image: Option<String>,
    pub tab: Option<String>,
}

/// Category filter link on the listing page.
#[derive(Debug, Clone)]
pub struct CategoryLinkView {
    pub name: String,
    pub href: String,
    pub selected: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: LayoutView,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryLinkView>,
    pub all_selected: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: LayoutView,
    pub product: ProductPageView,
}

/// Shown with a 404 status when no product has the requested slug.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub layout: LayoutView,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let settings = state.cache().settings(state.pool()).await;
    let catalog = state.cache().catalog(state.pool()).await?;

    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let products = catalog
        .iter()
        .filter(|p| category.is_none() || p.category.as_deref() == category)
        .map(ProductCardView::new)
        .collect();

    Ok(ProductsIndexTemplate {
        layout: LayoutView::new(&settings, scope::PRODUCTS),
        products,
        categories: category_links(&catalog, category),
        all_selected: category.is_none(),
    })
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response> {
    let settings = state.cache().settings(state.pool()).await;
    let layout = LayoutView::new(&settings, scope::PRODUCT);

    let Some(product) = state.cache().product(state.pool(), &slug).await? else {
        return Ok((StatusCode::NOT_FOUND, ProductNotFoundTemplate { layout }).into_response());
    };

    let selection = selection_from_query(&query, &product)?;
    let view = ProductPageView::new(&product, &selection, &settings);

    Ok(ProductShowTemplate {
        layout,
        product: view,
    }
    .into_response())
}

/// Rebuild the selection state from query parameters.
///
/// An unknown size key is a caller bug: debug builds reject it, release
/// builds log it and keep the default size. Out-of-range image indices clamp
/// and unknown tabs fall back to the description.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unknown size key in debug builds.
pub fn selection_from_query(query: &SelectionQuery, product: &Product) -> Result<ProductSelection> {
    let mut selection = ProductSelection::new();

    if let Some(size) = query.size.as_deref().filter(|s| !s.trim().is_empty())
        && let Err(e) = selection.select_size_key(size)
    {
        if cfg!(debug_assertions) {
            return Err(AppError::BadRequest(e.to_string()));
        }
        tracing::warn!(error = %e, slug = %product.slug, "ignoring unknown size key");
    }

    if let Some(index) = query
        .image
        .as_deref()
        .and_then(|i| i.trim().parse::<usize>().ok())
    {
        selection.select_image(index, product);
    }

    if let Some(tab) = query
        .tab
        .as_deref()
        .and_then(|t| t.parse::<ProductTab>().ok())
    {
        selection.select_tab(tab);
    }

    Ok(selection)
}

/// Distinct categories in catalog order.
fn category_links(catalog: &[Product], selected: Option<&str>) -> Vec<CategoryLinkView> {
    let mut links: Vec<CategoryLinkView> = Vec::new();
    for name in catalog.iter().filter_map(|p| p.category.as_deref()) {
        if name.trim().is_empty() || links.iter().any(|l| l.name == name) {
            continue;
        }
        links.push(CategoryLinkView {
            name: name.to_owned(),
            href: format!("/products?category={}", urlencoding::encode(name)),
            selected: selected == Some(name),
        });
    }
    links
}

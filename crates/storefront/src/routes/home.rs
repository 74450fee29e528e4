//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::{LayoutView, ProductCardView, scope};

/// Number of products shown on the home page grid.
const FEATURED_PRODUCTS: usize = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    /// First products of the catalog.
    pub products: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.cache().settings(state.pool()).await;

    let products = state.cache().catalog(state.pool()).await.map_or_else(
        |e| {
            tracing::error!("Failed to load product catalog: {e}");
            Vec::new()
        },
        |catalog| {
            catalog
                .iter()
                .take(FEATURED_PRODUCTS)
                .map(ProductCardView::new)
                .collect()
        },
    );

    HomeTemplate {
        layout: LayoutView::new(&settings, scope::HOME),
        products,
    }
}

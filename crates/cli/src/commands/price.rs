//! Price lookup for one product and pack size.

use dryfruto_admin::db::ProductRepository;
use dryfruto_core::{PriceQuote, Product, SizeKey, quote};

/// Print the resolved price of `slug` at `size`.
///
/// # Errors
///
/// Returns an error for an unknown size key, an unknown product, a product
/// without a base price, or a failed database read.
pub async fn show(slug: &str, size: &str) -> Result<(), Box<dyn std::error::Error>> {
    let size: SizeKey = size.parse()?;

    let pool = super::connect().await?;
    let product = ProductRepository::new(&pool)
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| format!("Product not found: {slug}"))?;

    let quote = quote(&product, size)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", describe(&product, &quote));
    }
    Ok(())
}

fn describe(product: &Product, quote: &PriceQuote) -> String {
    let source = if product.price_override(quote.size).is_some() {
        "override"
    } else {
        "derived"
    };
    format!(
        "{} ({}): {} [{source}]",
        product.name,
        quote.label,
        quote.display()
    )
}

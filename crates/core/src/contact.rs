//! Chat and call links for product enquiries.

use crate::pricing::PriceQuote;

/// Enquiry text sent through the chat channel.
///
/// The price is the resolved quote, never recomputed here. Without a price
/// (missing base price) the price suffix is left out.
#[must_use]
pub fn inquiry_message(product_name: &str, label: &str, price: Option<&PriceQuote>) -> String {
    match price {
        Some(quote) => format!(
            "Hi, I'm interested in {product_name} ({label}) - {}{}",
            crate::Price::CURRENCY_SYMBOL,
            quote.price
        ),
        None => format!("Hi, I'm interested in {product_name} ({label})"),
    }
}

/// Chat link that opens with `message` prefilled.
#[must_use]
pub fn chat_url(whatsapp_link: &str, message: &str) -> String {
    let separator = if whatsapp_link.contains('?') { '&' } else { '?' };
    format!(
        "{whatsapp_link}{separator}text={}",
        urlencoding::encode(message)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing::quote;
    use crate::types::{Price, Product, SizeKey};

    #[test]
    fn test_message_embeds_resolved_price() {
        let mut product = Product::new("almonds", "California Almonds", Price::from_rupees(500));
        product
            .price_variants
            .insert("1kg".to_owned(), Price::from_rupees(3999));
        let q = quote(&product, SizeKey::Kg1).unwrap();
        assert_eq!(
            inquiry_message(&product.name, q.label, Some(&q)),
            "Hi, I'm interested in California Almonds (1 kg) - ₹3999"
        );
        let q = quote(&product, SizeKey::Grams500).unwrap();
        assert_eq!(
            inquiry_message(&product.name, q.label, Some(&q)),
            "Hi, I'm interested in California Almonds (500 gram) - ₹2250"
        );
    }

    #[test]
    fn test_message_price_matches_page_for_fractional_override() {
        let mut product = Product::new("figs", "Figs", Price::from_rupees(500));
        for raw in ["3999.5", "3999.99", "3999.999"] {
            let exact: Price = raw.parse().unwrap();
            product.price_variants.insert("1kg".to_owned(), exact);
            let q = quote(&product, SizeKey::Kg1).unwrap();
            let message = inquiry_message(&product.name, q.label, Some(&q));
            let in_message: Price = message.rsplit('₹').next().unwrap().parse().unwrap();
            let on_page: Price = q
                .display()
                .trim_start_matches(Price::CURRENCY_SYMBOL)
                .parse()
                .unwrap();
            assert_eq!(in_message, exact);
            assert_eq!(on_page, exact);
        }
    }

    #[test]
    fn test_message_without_price() {
        assert_eq!(
            inquiry_message("Walnuts", "2 kg", None),
            "Hi, I'm interested in Walnuts (2 kg)"
        );
    }

    #[test]
    fn test_chat_url_encodes_message() {
        let url = chat_url("https://wa.me/919870990795", "Hi, I'm in (1 kg) - ₹10");
        assert_eq!(
            url,
            "https://wa.me/919870990795?text=Hi%2C%20I%27m%20in%20%281%20kg%29%20-%20%E2%82%B910"
        );
    }

    #[test]
    fn test_chat_url_appends_to_existing_query() {
        assert_eq!(
            chat_url("https://api.whatsapp.com/send?phone=919870990795", "hi"),
            "https://api.whatsapp.com/send?phone=919870990795&text=hi"
        );
    }
}

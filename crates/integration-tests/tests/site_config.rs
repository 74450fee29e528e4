//! Settings saved by the admin, as the storefront resolves and renders them.

#![allow(clippy::unwrap_used)]

use dryfruto_core::{ColorSlot, SiteSettingsRecord, resolve_settings};
use dryfruto_storefront::db::settings::parse_record;
use dryfruto_storefront::views::{LayoutView, scope};
use serde_json::json;

fn styled(global: Option<&str>, footer: Option<&str>) -> SiteSettingsRecord {
    let mut record = SiteSettingsRecord::default();
    if let Some(color) = global {
        record
            .page_styles
            .insert("global".to_string(), [("footerBg".to_string(), color.to_string())].into());
    }
    if let Some(color) = footer {
        record
            .page_styles
            .insert("footer".to_string(), [("footerBg".to_string(), color.to_string())].into());
    }
    record
}

#[test]
fn test_footer_background_precedence() {
    let cases = [
        (Some("#111"), Some("#222"), "#222"),
        (Some("#111"), None, "#111"),
        (None, None, "#2d1810"),
    ];
    for (global, footer, expected) in cases {
        let settings = resolve_settings(Some(&styled(global, footer)));
        assert_eq!(settings.color(scope::FOOTER, ColorSlot::FooterBg), expected);
        assert_eq!(LayoutView::new(&settings, scope::HOME).footer.footer_bg, expected);
    }
}

#[test]
fn test_defaults_are_complete() {
    let settings = resolve_settings(None);
    for value in [
        &settings.business_name,
        &settings.slogan,
        &settings.logo,
        &settings.phone,
        &settings.email,
        &settings.address,
        &settings.call_link,
        &settings.whatsapp_link,
    ] {
        assert!(!value.is_empty());
    }
    for slot in ColorSlot::ALL {
        assert!(settings.color("any-page", slot).starts_with('#'));
    }
}

#[test]
fn test_admin_document_resolves_on_the_storefront() {
    let saved = json!({
        "businessName": "DryFruto Noida",
        "phone": "+91 98111 22233",
        "email": "",
        "instagramLink": "https://instagram.com/dryfruto",
        "pageStyles": {
            "global": {"headerBg": "#000000"},
            "home": {"accentColor": "#16a34a"}
        }
    });

    let record = parse_record(saved).unwrap();
    let settings = resolve_settings(Some(&record));

    assert_eq!(settings.business_name, "DryFruto Noida");
    assert_eq!(settings.slogan, "Live With Health");
    assert_eq!(settings.email, "info@dryfruto.com");
    assert_eq!(settings.call_link, "tel:+919811122233");

    let home = LayoutView::new(&settings, scope::HOME);
    assert_eq!(home.header.header_bg, "#000000");
    // footer background aliases the header background within the global tier
    assert_eq!(home.footer.footer_bg, "#000000");
    assert_eq!(home.accent, "#16a34a");
    assert_eq!(LayoutView::new(&settings, scope::PRODUCTS).accent, "#f59e0b");
    assert_eq!(home.social_links.len(), 1);
}

#[test]
fn test_resolution_is_idempotent() {
    let record = styled(Some("#111"), Some("#222"));
    assert_eq!(resolve_settings(Some(&record)), resolve_settings(Some(&record)));
}

//! Effective site configuration.
//!
//! [`resolve_settings`] merges the persisted [`SiteSettingsRecord`] with the
//! built-in defaults. The result is an immutable snapshot in which every field
//! pages read is populated; callers share it (usually behind an `Arc`) and
//! build a new one when the record changes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::settings::non_empty;
use crate::types::{ColorSlot, GLOBAL_SCOPE, Phone, SiteSettingsRecord};

/// Built-in values used when the record leaves a field unset.
pub mod defaults {
    pub const BUSINESS_NAME: &str = "DryFruto";
    pub const SLOGAN: &str = "Live With Health";
    pub const PHONE: &str = "9870990795";
    pub const EMAIL: &str = "info@dryfruto.com";
    pub const ADDRESS: &str = "123, Main Street, New Delhi, India";
    pub const LOGO: &str = "https://customer-assets.emergentagent.com/job_70b8c44d-b0eb-46ab-b798-c90870274405/artifacts/5olvlaa7_WhatsApp%20Image%202025-12-26%20at%2013.46.33.jpeg";
    pub const WHATSAPP_BASE: &str = "https://wa.me/";
}

/// Social network shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Facebook,
    Instagram,
    Twitter,
    Youtube,
}

impl SocialNetwork {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Youtube => "YouTube",
        }
    }
}

/// A configured social profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub network: SocialNetwork,
    pub label: &'static str,
    pub url: String,
}

/// All six colors resolved for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub header_bg: String,
    pub header_text: String,
    pub footer_bg: String,
    pub footer_text: String,
    pub footer_link: String,
    pub accent_color: String,
}

/// Fully-populated site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSiteSettings {
    pub business_name: String,
    pub slogan: String,
    pub logo: String,
    /// Ten national digits.
    pub phone: String,
    pub email: String,
    pub address: String,
    /// `tel:+91<phone>`.
    pub call_link: String,
    /// Configured link, or `https://wa.me/91<phone>`.
    pub whatsapp_link: String,
    /// Only the networks that have a link, in footer order.
    pub social_links: Vec<SocialLink>,
    /// Scope → slot → color, with blank values and unknown slots removed.
    pub page_styles: BTreeMap<String, BTreeMap<ColorSlot, String>>,
}

impl EffectiveSiteSettings {
    /// Resolve the color of `slot` for the page identified by `scope`.
    ///
    /// Consults the page's own styles, then the `global` styles, then the
    /// built-in default. Within one scope, `footerBg` and `footerLink` fall
    /// back to `headerBg` and `accentColor` before the next scope is tried.
    #[must_use]
    pub fn color(&self, scope: &str, slot: ColorSlot) -> &str {
        [scope, GLOBAL_SCOPE]
            .into_iter()
            .filter_map(|tier| self.page_styles.get(tier))
            .find_map(|slots| {
                slots
                    .get(&slot)
                    .or_else(|| slot.alias().and_then(|alias| slots.get(&alias)))
            })
            .map_or_else(|| slot.default_color(), String::as_str)
    }

    /// Every slot resolved for `scope`.
    #[must_use]
    pub fn palette(&self, scope: &str) -> Palette {
        let color = |slot| self.color(scope, slot).to_owned();
        Palette {
            header_bg: color(ColorSlot::HeaderBg),
            header_text: color(ColorSlot::HeaderText),
            footer_bg: color(ColorSlot::FooterBg),
            footer_text: color(ColorSlot::FooterText),
            footer_link: color(ColorSlot::FooterLink),
            accent_color: color(ColorSlot::AccentColor),
        }
    }
}

impl Default for EffectiveSiteSettings {
    fn default() -> Self {
        resolve_settings(None)
    }
}

/// Merge `raw` with the built-in defaults.
///
/// `None` (record not loaded yet, or the load failed) yields the defaults.
/// Blank strings are treated as unset. A stored phone that does not parse is
/// replaced by the default number so that the derived links stay valid.
#[must_use]
pub fn resolve_settings(raw: Option<&SiteSettingsRecord>) -> EffectiveSiteSettings {
    let empty = SiteSettingsRecord::default();
    let raw = raw.unwrap_or(&empty);
    let text = |value: &Option<String>, default: &str| {
        non_empty(value.as_deref()).unwrap_or(default).to_owned()
    };

    let phone = non_empty(raw.phone.as_deref())
        .and_then(|p| Phone::parse(p).ok())
        .unwrap_or_else(|| Phone::from_static(defaults::PHONE));
    let call_link = phone.call_link();
    let whatsapp_link = non_empty(raw.whatsapp_link.as_deref()).map_or_else(
        || format!("{}{}{phone}", defaults::WHATSAPP_BASE, Phone::COUNTRY_CODE),
        str::to_owned,
    );

    let social_links = [
        (SocialNetwork::Facebook, &raw.facebook_link),
        (SocialNetwork::Instagram, &raw.instagram_link),
        (SocialNetwork::Twitter, &raw.twitter_link),
        (SocialNetwork::Youtube, &raw.youtube_link),
    ]
    .into_iter()
    .filter_map(|(network, link)| {
        non_empty(link.as_deref()).map(|url| SocialLink {
            network,
            label: network.label(),
            url: url.to_owned(),
        })
    })
    .collect();

    EffectiveSiteSettings {
        business_name: text(&raw.business_name, defaults::BUSINESS_NAME),
        slogan: text(&raw.slogan, defaults::SLOGAN),
        logo: text(&raw.logo, defaults::LOGO),
        phone: phone.into(),
        email: text(&raw.email, defaults::EMAIL),
        address: text(&raw.address, defaults::ADDRESS),
        call_link,
        whatsapp_link,
        social_links,
        page_styles: clean_page_styles(&raw.page_styles),
    }
}

fn clean_page_styles(
    raw: &BTreeMap<String, BTreeMap<String, String>>,
) -> BTreeMap<String, BTreeMap<ColorSlot, String>> {
    raw.iter()
        .map(|(scope, slots)| {
            let slots: BTreeMap<_, _> = slots
                .iter()
                .filter_map(|(name, color)| {
                    let slot = name.parse::<ColorSlot>().ok()?;
                    non_empty(Some(color.as_str())).map(|c| (slot, c.to_owned()))
                })
                .collect();
            (scope.trim().to_owned(), slots)
        })
        .filter(|(scope, slots)| !scope.is_empty() && !slots.is_empty())
        .collect()
}

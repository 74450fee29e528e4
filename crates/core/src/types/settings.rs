//! The persisted site settings record.
//!
//! This is the raw, admin-authored shape as stored and transferred. Any field
//! may be absent; [`crate::site_config::resolve_settings`] turns it into the
//! fully-populated configuration pages render from.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::phone::{Phone, PhoneError};

/// Scope key consulted when a page has no value of its own.
pub const GLOBAL_SCOPE: &str = "global";

/// A color slot name that is not part of [`ColorSlot`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color slot: {0:?}")]
pub struct UnknownColorSlot(pub String);

/// Named color slots pages can style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSlot {
    HeaderBg,
    HeaderText,
    FooterBg,
    FooterText,
    FooterLink,
    AccentColor,
}

impl ColorSlot {
    /// Every slot.
    pub const ALL: [Self; 6] = [
        Self::HeaderBg,
        Self::HeaderText,
        Self::FooterBg,
        Self::FooterText,
        Self::FooterLink,
        Self::AccentColor,
    ];

    /// Wire name of the slot (e.g., "footerBg").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeaderBg => "headerBg",
            Self::HeaderText => "headerText",
            Self::FooterBg => "footerBg",
            Self::FooterText => "footerText",
            Self::FooterLink => "footerLink",
            Self::AccentColor => "accentColor",
        }
    }

    /// Built-in color used when no scope sets this slot.
    #[must_use]
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::HeaderBg | Self::FooterBg => "#2d1810",
            Self::HeaderText | Self::FooterText => "#fef3c7",
            Self::FooterLink | Self::AccentColor => "#f59e0b",
        }
    }

    /// Slot consulted in the same scope when this one is unset.
    ///
    /// Footers historically inherited the header background and the accent
    /// color, so a palette with only `headerBg`/`accentColor` still themes them.
    #[must_use]
    pub const fn alias(self) -> Option<Self> {
        match self {
            Self::FooterBg => Some(Self::HeaderBg),
            Self::FooterLink => Some(Self::AccentColor),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorSlot {
    type Err = UnknownColorSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownColorSlot(s.to_owned()))
    }
}

/// Problems that block an admin save.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsValidationError {
    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("page style scope names cannot be empty")]
    EmptyScope,
    #[error("page style {scope:?}: {source}")]
    UnknownColorSlot {
        scope: String,
        #[source]
        source: UnknownColorSlot,
    },
}

/// Raw site settings as persisted by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// National digits only; the country code is added when links are built.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub facebook_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub instagram_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub twitter_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube_link: Option<String>,
    /// Scope → slot name → color.
    #[serde(default, deserialize_with = "lenient_page_styles", skip_serializing_if = "BTreeMap::is_empty")]
    pub page_styles: BTreeMap<String, BTreeMap<String, String>>,
}

impl SiteSettingsRecord {
    /// Check the record before it is persisted.
    ///
    /// Empty strings are allowed everywhere; they mean "use the default".
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if let Some(phone) = non_empty(self.phone.as_deref()) {
            Phone::parse(phone)?;
        }
        if let Some(email) = non_empty(self.email.as_deref())
            && !is_valid_email(email)
        {
            return Err(SettingsValidationError::InvalidEmail(email.to_owned()));
        }
        for (scope, slots) in &self.page_styles {
            if scope.trim().is_empty() {
                return Err(SettingsValidationError::EmptyScope);
            }
            for slot in slots.keys() {
                slot.parse::<ColorSlot>()
                    .map_err(|source| SettingsValidationError::UnknownColorSlot {
                        scope: scope.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Rewrite `phone` into its normalized digit form when it parses.
    pub fn normalize_phone(&mut self) {
        if let Some(phone) = non_empty(self.phone.as_deref())
            && let Ok(parsed) = Phone::parse(phone)
        {
            self.phone = Some(parsed.into());
        }
    }
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Basic email shape check: `local@domain.tld`.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.contains('@')
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientString {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Other(IgnoredAny),
}

impl LenientString {
    fn into_string(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(n) => Some(n.to_string()),
            Self::Unsigned(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScope {
    Slots(BTreeMap<String, LenientString>),
    Other(IgnoredAny),
}

/// Strings pass through, numbers become text, anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LenientString>::deserialize(deserializer)?.and_then(LenientString::into_string))
}

/// Page styles with malformed scopes or non-string colors dropped.
fn lenient_page_styles<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<LenientScopes>::deserialize(deserializer)? {
        Some(LenientScopes::Scopes(scopes)) => scopes,
        Some(LenientScopes::Other(_)) | None => return Ok(BTreeMap::new()),
    };
    Ok(raw
        .into_iter()
        .filter_map(|(scope, slots)| match slots {
            LenientScope::Slots(slots) => Some((
                scope,
                slots
                    .into_iter()
                    .filter_map(|(slot, color)| color.into_string().map(|c| (slot, c)))
                    .collect(),
            )),
            LenientScope::Other(_) => None,
        })
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScopes {
    Scopes(BTreeMap<String, LenientScope>),
    Other(IgnoredAny),
}

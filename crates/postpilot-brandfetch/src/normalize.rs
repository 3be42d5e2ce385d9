//! Reduction of a [`BrandLookupResult`] into a fully populated
//! [`NormalizedBrand`].
//!
//! None of these functions fail: every extractor falls back to a fixed
//! default when the upstream record is missing the data it looks for.

use postpilot_core::brand_guides::{DEFAULT_ACCENT, DEFAULT_PRIMARY, DEFAULT_SECONDARY};
use postpilot_core::{display_name_from_domain, BrandColors, BrandGuideUpdate};
use serde::{Deserialize, Serialize};

use crate::types::{BrandColor, BrandFont, BrandLink, BrandLogo, BrandLookupResult, LogoFormat};

pub const DEFAULT_BACKGROUND: &str = "#FAFAFA";
pub const DEFAULT_FONT: &str = "Inter";

/// Minimum brightness for a color to qualify as a background.
const BACKGROUND_MIN_BRIGHTNESS: f64 = 0.9;

/// UI-ready brand record.
///
/// `colors` and `fonts` are always non-empty strings; `logos` entries may be
/// `null`; absent `links` keys are omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBrand {
    pub name: String,
    pub domain: String,
    pub description: String,
    pub colors: BrandColors,
    pub logos: BrandLogos,
    pub fonts: BrandFonts,
    pub links: BrandLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandLogos {
    pub primary: Option<String>,
    pub dark: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandFonts {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl NormalizedBrand {
    /// Brand guide overlay carrying the visual identity of this brand.
    ///
    /// The description becomes the voice description only when non-empty.
    #[must_use]
    pub fn guide_update(&self) -> BrandGuideUpdate {
        BrandGuideUpdate {
            colors: Some(self.colors.clone()),
            heading_font: Some(self.fonts.heading.clone()),
            body_font: Some(self.fonts.body.clone()),
            voice_description: Some(self.description.clone()).filter(|d| !d.trim().is_empty()),
            logo_url: self.logos.primary.clone(),
            logo_dark_url: self.logos.dark.clone(),
            icon_url: self.logos.icon.clone(),
            domain: Some(self.domain.clone()),
            ..BrandGuideUpdate::default()
        }
    }
}

fn default_palette() -> BrandColors {
    BrandColors {
        primary: DEFAULT_PRIMARY.to_string(),
        secondary: DEFAULT_SECONDARY.to_string(),
        accent: DEFAULT_ACCENT.to_string(),
        background: DEFAULT_BACKGROUND.to_string(),
    }
}

/// Picks the four palette roles from an unordered color list.
///
/// Role tags win over brightness ranking. Colors with an empty `hex` are
/// ignored.
#[must_use]
pub fn extract_colors(colors: &[BrandColor]) -> BrandColors {
    let usable: Vec<&BrandColor> = colors.iter().filter(|c| !c.hex.trim().is_empty()).collect();

    // `sort_by` is stable, so equal brightness keeps input order.
    let mut ranked = usable.clone();
    ranked.sort_by(|a, b| b.brightness.total_cmp(&a.brightness));

    let tagged = |kind: &str| {
        usable
            .iter()
            .find(|c| c.kind.as_deref() == Some(kind))
            .map(|c| c.hex.clone())
    };
    let nth_brightest = |n: usize| ranked.get(n).map(|c| c.hex.clone());

    let defaults = default_palette();
    BrandColors {
        primary: tagged("primary")
            .or_else(|| tagged("accent"))
            .or_else(|| nth_brightest(0))
            .unwrap_or(defaults.primary),
        secondary: tagged("secondary")
            .or_else(|| nth_brightest(1))
            .unwrap_or(defaults.secondary),
        accent: tagged("accent")
            .or_else(|| nth_brightest(2))
            .unwrap_or(defaults.accent),
        background: ranked
            .iter()
            .find(|c| c.brightness > BACKGROUND_MIN_BRIGHTNESS)
            .map_or(defaults.background, |c| c.hex.clone()),
    }
}

/// Best encoding of a logo: first SVG, else first PNG, else whatever comes
/// first. Formats with a blank `src` are never picked, so `None` when the
/// logo has no usable format.
fn best_format(logo: &BrandLogo) -> Option<&str> {
    let usable: Vec<&LogoFormat> = logo
        .formats
        .iter()
        .filter(|f| !f.src.trim().is_empty())
        .collect();
    let by_format = |wanted: &str| {
        usable
            .iter()
            .find(|f| f.format.as_deref() == Some(wanted))
            .copied()
    };
    by_format("svg")
        .or_else(|| by_format("png"))
        .or_else(|| usable.first().copied())
        .map(|f| f.src.as_str())
}

/// Assigns logo variants to the primary, dark and icon slots in one pass.
#[must_use]
pub fn extract_logos(logos: &[BrandLogo]) -> BrandLogos {
    let mut out = BrandLogos::default();

    for logo in logos {
        let Some(src) = best_format(logo) else {
            continue;
        };
        match (logo.kind.as_deref(), logo.theme.as_deref()) {
            (Some("logo" | "lockup"), Some("light")) if out.primary.is_none() => {
                out.primary = Some(src.to_string());
            }
            (Some("logo" | "lockup"), Some("dark")) if out.dark.is_none() => {
                out.dark = Some(src.to_string());
            }
            (Some("icon" | "symbol"), _) if out.icon.is_none() => {
                out.icon = Some(src.to_string());
            }
            _ => {}
        }
    }

    if out.primary.is_none() {
        out.primary = logos.first().and_then(best_format).map(str::to_string);
    }

    out
}

/// Heading and body font names. Fonts without a name are ignored.
#[must_use]
pub fn extract_fonts(fonts: &[BrandFont]) -> BrandFonts {
    let named: Vec<(&str, Option<&str>)> = fonts
        .iter()
        .filter_map(|f| {
            let name = f.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
            Some((name, f.kind.as_deref()))
        })
        .collect();

    let tagged = |kind: &str| {
        named
            .iter()
            .find(|(_, k)| *k == Some(kind))
            .map(|(name, _)| (*name).to_string())
    };
    let nth = |n: usize| named.get(n).map(|(name, _)| (*name).to_string());

    let heading = tagged("title")
        .or_else(|| tagged("heading"))
        .or_else(|| nth(0))
        .unwrap_or_else(|| DEFAULT_FONT.to_string());
    let body = tagged("body")
        .or_else(|| nth(1))
        .unwrap_or_else(|| heading.clone());

    BrandFonts { heading, body }
}

/// Buckets named links into social profiles and the website.
///
/// Matching is case-insensitive on the link name; the first link in each
/// category wins.
#[must_use]
pub fn extract_links(links: &[BrandLink]) -> BrandLinks {
    let mut out = BrandLinks::default();

    for link in links {
        let name = link.name.to_lowercase();
        let slot = if name.contains("twitter") || name.contains("x.com") {
            &mut out.twitter
        } else if name.contains("linkedin") {
            &mut out.linkedin
        } else if name.contains("instagram") {
            &mut out.instagram
        } else if name.contains("website") || name == "homepage" {
            &mut out.website
        } else {
            continue;
        };
        if slot.is_none() {
            *slot = Some(link.url.clone());
        }
    }

    out
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalizes an upstream record looked up for `requested_domain` (already
/// cleaned).
#[must_use]
pub fn normalize(result: &BrandLookupResult, requested_domain: &str) -> NormalizedBrand {
    NormalizedBrand {
        name: non_empty(result.name.as_deref())
            .unwrap_or_else(|| display_name_from_domain(requested_domain)),
        domain: non_empty(result.domain.as_deref())
            .unwrap_or_else(|| requested_domain.to_string()),
        description: non_empty(result.description.as_deref())
            .or_else(|| non_empty(result.long_description.as_deref()))
            .unwrap_or_default(),
        colors: extract_colors(&result.colors),
        logos: extract_logos(&result.logos),
        fonts: extract_fonts(&result.fonts),
        links: extract_links(&result.links),
    }
}

/// Brand synthesized without any upstream call.
#[must_use]
pub fn placeholder_brand(clean_domain: &str) -> NormalizedBrand {
    NormalizedBrand {
        name: display_name_from_domain(clean_domain),
        domain: clean_domain.to_string(),
        description: format!("Welcome to {clean_domain}"),
        colors: default_palette(),
        logos: BrandLogos::default(),
        fonts: BrandFonts {
            heading: DEFAULT_FONT.to_string(),
            body: DEFAULT_FONT.to_string(),
        },
        links: BrandLinks::default(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

//! Brandfetch v2 brand response types.
//!
//! Every field is optional upstream. Collections that are missing or `null`
//! deserialize as empty so the normalizer never has to special-case them.

use serde::{Deserialize, Deserializer};

/// Response body of `GET /v2/brands/{domain}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandLookupResult {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "longDescription")]
    pub long_description: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub logos: Vec<BrandLogo>,
    #[serde(deserialize_with = "null_as_empty")]
    pub colors: Vec<BrandColor>,
    #[serde(deserialize_with = "null_as_empty")]
    pub fonts: Vec<BrandFont>,
    #[serde(deserialize_with = "null_as_empty")]
    pub links: Vec<BrandLink>,
}

/// One logo variant, e.g. the dark-theme lockup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandLogo {
    /// `light` or `dark`.
    pub theme: Option<String>,
    /// `logo`, `lockup`, `icon` or `symbol`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub formats: Vec<LogoFormat>,
}

/// A single encoding of a logo variant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogoFormat {
    pub src: String,
    /// `svg`, `png`, `jpeg`, ...
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandColor {
    pub hex: String,
    /// Role hint: `primary`, `secondary`, `accent`, `dark`, `light`, ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Perceived brightness in `[0, 1]`.
    pub brightness: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandFont {
    pub name: Option<String>,
    /// Role hint: `title`, `heading` or `body`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandLink {
    pub name: String,
    pub url: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_deserializes_to_empty_collections() {
        let result: BrandLookupResult = serde_json::from_str("{}").expect("parse");
        assert!(result.name.is_none());
        assert!(result.logos.is_empty());
        assert!(result.colors.is_empty());
        assert!(result.fonts.is_empty());
        assert!(result.links.is_empty());
    }

    #[test]
    fn null_collections_deserialize_as_empty() {
        let result: BrandLookupResult =
            serde_json::from_str(r#"{"name":"Stripe","links":null,"fonts":null}"#).expect("parse");
        assert_eq!(result.name.as_deref(), Some("Stripe"));
        assert!(result.links.is_empty());
        assert!(result.fonts.is_empty());
    }

    #[test]
    fn long_description_uses_camel_case_key() {
        let result: BrandLookupResult =
            serde_json::from_str(r#"{"longDescription":"Payments infrastructure"}"#)
                .expect("parse");
        assert_eq!(
            result.long_description.as_deref(),
            Some("Payments infrastructure")
        );
    }

    #[test]
    fn logo_and_color_type_fields_map_to_kind() {
        let result: BrandLookupResult = serde_json::from_str(
            r##"{
                "logos": [{"theme":"dark","type":"lockup","formats":[{"src":"https://cdn/x.svg","format":"svg","width":100}]}],
                "colors": [{"hex":"#635BFF","type":"accent","brightness":0.42}]
            }"##,
        )
        .expect("parse");
        assert_eq!(result.logos[0].kind.as_deref(), Some("lockup"));
        assert_eq!(result.logos[0].formats[0].format.as_deref(), Some("svg"));
        assert_eq!(result.colors[0].kind.as_deref(), Some("accent"));
        assert!((result.colors[0].brightness - 0.42).abs() < f64::EPSILON);
    }
}

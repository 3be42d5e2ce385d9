//! Brand guide: stored voice and visual-identity configuration for a workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_PRIMARY: &str = "#6366F1";
pub const DEFAULT_SECONDARY: &str = "#8B5CF6";
pub const DEFAULT_ACCENT: &str = "#10B981";
/// Default background of a freshly provisioned brand guide.
pub const DEFAULT_GUIDE_BACKGROUND: &str = "#FAFAF9";
pub const DEFAULT_GUIDE_FONT: &str = "inter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl BrandColors {
    #[must_use]
    pub fn guide_defaults() -> Self {
        Self {
            primary: DEFAULT_PRIMARY.to_string(),
            secondary: DEFAULT_SECONDARY.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            background: DEFAULT_GUIDE_BACKGROUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandGuide {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub colors: BrandColors,
    pub heading_font: String,
    pub body_font: String,
    pub voice_tones: Vec<String>,
    pub voice_keywords: Vec<String>,
    pub voice_description: Option<String>,
    pub audience_demographics: Option<String>,
    pub audience_interests: Option<String>,
    pub audience_pain_points: Option<String>,
    pub tagline: Option<String>,
    pub value_props: Vec<String>,
    pub do_list: Vec<String>,
    pub dont_list: Vec<String>,
    pub logo_url: Option<String>,
    pub logo_dark_url: Option<String>,
    pub icon_url: Option<String>,
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the empty guide provisioned alongside a new workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrandGuide {
    pub workspace_id: Uuid,
    pub domain: Option<String>,
}

/// Sparse overlay for brand guide columns. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandGuideUpdate {
    pub colors: Option<BrandColors>,
    pub heading_font: Option<String>,
    pub body_font: Option<String>,
    pub voice_tones: Option<Vec<String>>,
    pub voice_keywords: Option<Vec<String>>,
    pub voice_description: Option<String>,
    pub tagline: Option<String>,
    pub logo_url: Option<String>,
    pub logo_dark_url: Option<String>,
    pub icon_url: Option<String>,
    pub domain: Option<String>,
}

impl BrandGuide {
    /// A guide with default palette and fonts, used when a workspace has no
    /// stored guide yet.
    #[must_use]
    pub fn empty(workspace_id: Uuid, domain: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            colors: BrandColors::guide_defaults(),
            heading_font: DEFAULT_GUIDE_FONT.to_string(),
            body_font: DEFAULT_GUIDE_FONT.to_string(),
            voice_tones: vec!["professional".to_string(), "friendly".to_string()],
            voice_keywords: Vec::new(),
            voice_description: None,
            audience_demographics: None,
            audience_interests: None,
            audience_pain_points: None,
            tagline: None,
            value_props: Vec::new(),
            do_list: Vec::new(),
            dont_list: Vec::new(),
            logo_url: None,
            logo_dark_url: None,
            icon_url: None,
            domain,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: &BrandGuideUpdate, now: DateTime<Utc>) {
        if let Some(ref colors) = update.colors {
            self.colors = colors.clone();
        }
        if let Some(ref font) = update.heading_font {
            self.heading_font.clone_from(font);
        }
        if let Some(ref font) = update.body_font {
            self.body_font.clone_from(font);
        }
        if let Some(ref tones) = update.voice_tones {
            self.voice_tones.clone_from(tones);
        }
        if let Some(ref keywords) = update.voice_keywords {
            self.voice_keywords.clone_from(keywords);
        }
        if update.voice_description.is_some() {
            self.voice_description.clone_from(&update.voice_description);
        }
        if update.tagline.is_some() {
            self.tagline.clone_from(&update.tagline);
        }
        if update.logo_url.is_some() {
            self.logo_url.clone_from(&update.logo_url);
        }
        if update.logo_dark_url.is_some() {
            self.logo_dark_url.clone_from(&update.logo_dark_url);
        }
        if update.icon_url.is_some() {
            self.icon_url.clone_from(&update.icon_url);
        }
        if update.domain.is_some() {
            self.domain.clone_from(&update.domain);
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_guide_uses_defaults() {
        let ws = Uuid::new_v4();
        let guide = BrandGuide::empty(ws, Some("acme.com".to_string()), Utc::now());
        assert_eq!(guide.workspace_id, ws);
        assert_eq!(guide.colors.primary, DEFAULT_PRIMARY);
        assert_eq!(guide.colors.background, DEFAULT_GUIDE_BACKGROUND);
        assert_eq!(guide.heading_font, "inter");
        assert_eq!(guide.voice_tones, vec!["professional", "friendly"]);
        assert_eq!(guide.domain.as_deref(), Some("acme.com"));
    }

    #[test]
    fn apply_update_keeps_unsupplied_fields() {
        let now = Utc::now();
        let mut guide = BrandGuide::empty(Uuid::new_v4(), None, now);
        guide.tagline = Some("Building the future, today.".to_string());

        guide.apply_update(
            &BrandGuideUpdate {
                heading_font: Some("Sohne".to_string()),
                logo_url: Some("https://cdn.example.com/logo.svg".to_string()),
                ..BrandGuideUpdate::default()
            },
            now,
        );

        assert_eq!(guide.heading_font, "Sohne");
        assert_eq!(guide.body_font, "inter");
        assert_eq!(guide.logo_url.as_deref(), Some("https://cdn.example.com/logo.svg"));
        assert_eq!(guide.tagline.as_deref(), Some("Building the future, today."));
    }
}

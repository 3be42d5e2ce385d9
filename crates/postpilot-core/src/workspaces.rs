use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant/brand boundary owning posts, connections, and a brand guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Presentation color token, e.g. `from-emerald-500 to-emerald-600`.
    pub color: String,
    pub owner_id: Uuid,
    /// Free-form settings document. Known keys are described by
    /// [`WorkspaceSettings`]; unknown keys are preserved as-is.
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Typed view of the settings document, falling back to defaults for
    /// anything missing or malformed.
    #[must_use]
    pub fn typed_settings(&self) -> WorkspaceSettings {
        serde_json::from_value(self.settings.clone()).unwrap_or_default()
    }

    /// Overwrites exactly the fields supplied in `patch`.
    pub fn apply_patch(&mut self, patch: &WorkspacePatch) {
        if let Some(ref name) = patch.name {
            self.name.clone_from(name);
        }
        if let Some(ref kind) = patch.kind {
            self.kind.clone_from(kind);
        }
        if let Some(ref color) = patch.color {
            self.color.clone_from(color);
        }
        if let Some(ref settings) = patch.settings {
            self.settings = settings.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub default_platforms: Vec<String>,
    pub default_hashtags: Vec<String>,
    pub auto_schedule: bool,
    pub ai_tone: String,
    pub ai_max_length: u32,
    /// One of `never`, `sometimes`, `always`.
    pub ai_emojis: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_platforms: Vec::new(),
            default_hashtags: Vec::new(),
            auto_schedule: false,
            ai_tone: "professional".to_string(),
            ai_max_length: 280,
            ai_emojis: "sometimes".to_string(),
        }
    }
}

impl WorkspaceSettings {
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

/// Insert payload for a new workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkspace {
    pub name: String,
    pub kind: String,
    pub color: String,
    pub owner_id: Uuid,
    pub settings: serde_json::Value,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspacePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

impl WorkspacePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none() && self.color.is_none() && self.settings.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> Workspace {
        Workspace {
            id: Uuid::nil(),
            name: "TechCorp Inc.".to_string(),
            kind: "business".to_string(),
            color: "from-emerald-500 to-emerald-600".to_string(),
            owner_id: Uuid::nil(),
            settings: serde_json::json!({"ai_tone": "casual", "custom": 1}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn apply_patch_overwrites_only_supplied_fields() {
        let mut ws = workspace();
        ws.apply_patch(&WorkspacePatch {
            name: Some("TechCorp".to_string()),
            ..WorkspacePatch::default()
        });
        assert_eq!(ws.name, "TechCorp");
        assert_eq!(ws.kind, "business");
        assert_eq!(ws.color, "from-emerald-500 to-emerald-600");
    }

    #[test]
    fn typed_settings_fills_defaults_and_keeps_known_values() {
        let settings = workspace().typed_settings();
        assert_eq!(settings.ai_tone, "casual");
        assert_eq!(settings.ai_max_length, 280);
        assert_eq!(settings.ai_emojis, "sometimes");
    }

    #[test]
    fn workspace_serializes_kind_as_type() {
        let json = serde_json::to_value(workspace()).expect("serialize");
        assert_eq!(json["type"], "business");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(WorkspacePatch::default().is_empty());
        let patch: WorkspacePatch = serde_json::from_str(r#"{"type":"agency"}"#).expect("parse");
        assert!(!patch.is_empty());
        assert_eq!(patch.kind.as_deref(), Some("agency"));
    }
}

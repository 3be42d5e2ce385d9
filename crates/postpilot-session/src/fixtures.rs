//! Deterministic demo data used when no live data is available.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use postpilot_core::{
    BrandColors, BrandGuide, BrandGuideUpdate, NewBrandGuide, NewWorkspace, Platform,
    PlatformConnection, Workspace, WorkspacePatch, WorkspaceSettings,
};
use uuid::Uuid;

use crate::error::SessionError;
use crate::source::DataSource;

pub const TECHCORP_ID: Uuid = Uuid::from_u128(1);
pub const PERSONAL_ID: Uuid = Uuid::from_u128(2);
pub const SIDE_PROJECT_ID: Uuid = Uuid::from_u128(3);
pub const FIXTURE_OWNER_ID: Uuid = Uuid::from_u128(0xff);

/// 2025-01-01T00:00:00Z; fixture rows sort in declaration order.
fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn workspace(
    id: Uuid,
    name: &str,
    kind: &str,
    color: &str,
    settings: WorkspaceSettings,
    offset_minutes: i64,
) -> Workspace {
    let created = epoch() + Duration::minutes(offset_minutes);
    Workspace {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        color: color.to_string(),
        owner_id: FIXTURE_OWNER_ID,
        settings: settings.to_value(),
        created_at: created,
        updated_at: created,
    }
}

/// The three demo workspaces, oldest first.
#[must_use]
pub fn workspaces() -> Vec<Workspace> {
    vec![
        workspace(
            TECHCORP_ID,
            "TechCorp Inc.",
            "business",
            "from-emerald-500 to-emerald-600",
            WorkspaceSettings::default(),
            0,
        ),
        workspace(
            PERSONAL_ID,
            "Ben's Personal Brand",
            "personal",
            "from-indigo-500 to-purple-500",
            WorkspaceSettings {
                ai_tone: "friendly".to_string(),
                ..WorkspaceSettings::default()
            },
            1,
        ),
        workspace(
            SIDE_PROJECT_ID,
            "Side Project Co.",
            "startup",
            "from-amber-500 to-orange-500",
            WorkspaceSettings {
                ai_tone: "casual".to_string(),
                ai_emojis: "always".to_string(),
                ..WorkspaceSettings::default()
            },
            2,
        ),
    ]
}

fn connection(
    seq: u128,
    workspace_id: Uuid,
    platform: Platform,
    platform_user_id: &str,
    username: &str,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> PlatformConnection {
    PlatformConnection {
        id: Uuid::from_u128(0xc000 + seq),
        workspace_id,
        platform: platform.as_str().to_string(),
        platform_user_id: platform_user_id.to_string(),
        platform_username: Some(username.to_string()),
        status: "active".to_string(),
        expires_at,
        created_at: now,
        updated_at: now,
    }
}

/// Demo connections for one fixture workspace; empty for any other id.
///
/// The TechCorp `LinkedIn` token expires five days after `now`, so it reads
/// as a warning.
#[must_use]
pub fn connections(workspace_id: Uuid, now: DateTime<Utc>) -> Vec<PlatformConnection> {
    match workspace_id {
        TECHCORP_ID => vec![
            connection(1, workspace_id, Platform::Twitter, "t1", "@techcorp", None, now),
            connection(
                2,
                workspace_id,
                Platform::Linkedin,
                "l1",
                "TechCorp Inc.",
                Some(now + Duration::days(5)),
                now,
            ),
        ],
        PERSONAL_ID => vec![
            connection(3, workspace_id, Platform::Twitter, "t2", "@benmichals", None, now),
            connection(4, workspace_id, Platform::Instagram, "i1", "@ben.michals", None, now),
        ],
        SIDE_PROJECT_ID => vec![connection(
            5,
            workspace_id,
            Platform::Twitter,
            "t3",
            "@sideproject",
            None,
            now,
        )],
        _ => Vec::new(),
    }
}

/// Demo brand guide for one fixture workspace, if it has one.
#[must_use]
pub fn brand_guide(workspace_id: Uuid, now: DateTime<Utc>) -> Option<BrandGuide> {
    let mut guide = BrandGuide::empty(workspace_id, None, now);
    guide.id = Uuid::from_u128(0xb000 + workspace_id.as_u128());

    match workspace_id {
        TECHCORP_ID => {
            guide.colors = BrandColors {
                primary: "#10B981".to_string(),
                secondary: "#059669".to_string(),
                accent: "#F59E0B".to_string(),
                background: "#F9FAFB".to_string(),
            };
            guide.voice_tones = strings(&["professional", "innovative"]);
            guide.voice_keywords = strings(&["technology", "innovation", "future"]);
            guide.voice_description = Some(
                "We speak with authority about technology while remaining approachable."
                    .to_string(),
            );
            guide.audience_demographics =
                Some("Tech professionals, 25-45, decision makers".to_string());
            guide.audience_interests = Some("Technology, productivity, innovation".to_string());
            guide.audience_pain_points =
                Some("Complexity, slow processes, outdated tools".to_string());
            guide.tagline = Some("Building the future, today.".to_string());
            guide.value_props = strings(&[
                "Cutting-edge solutions",
                "Expert support",
                "Proven results",
            ]);
            guide.do_list = strings(&["Be confident", "Use data", "Show expertise"]);
            guide.dont_list = strings(&["Be arrogant", "Use jargon", "Overpromise"]);
            guide.domain = Some("techcorp.com".to_string());
        }
        PERSONAL_ID => {
            guide.colors = BrandColors {
                primary: "#6366F1".to_string(),
                secondary: "#8B5CF6".to_string(),
                accent: "#EC4899".to_string(),
                background: "#FAFAF9".to_string(),
            };
            guide.voice_tones = strings(&["authentic", "inspiring"]);
            guide.voice_keywords = strings(&["growth", "learning", "journey"]);
            guide.voice_description = Some(
                "Personal and relatable, sharing real experiences and lessons learned."
                    .to_string(),
            );
            guide.audience_demographics = Some("Aspiring entrepreneurs, 20-35".to_string());
            guide.audience_interests =
                Some("Personal development, startups, side hustles".to_string());
            guide.audience_pain_points =
                Some("Imposter syndrome, getting started, time management".to_string());
            guide.tagline = Some("Build in public. Grow together.".to_string());
            guide.value_props = strings(&[
                "Authentic insights",
                "Actionable advice",
                "Community support",
            ]);
            guide.do_list = strings(&["Be vulnerable", "Share failures", "Celebrate wins"]);
            guide.dont_list = strings(&["Brag", "Be preachy", "Ignore comments"]);
        }
        _ => return None,
    }

    Some(guide)
}

/// Read-only source serving the fixture set. Every write fails with
/// [`SessionError::AuthenticationRequired`].
#[derive(Debug, Default)]
pub struct FixtureDataSource;

impl FixtureDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataSource for FixtureDataSource {
    fn owner_id(&self) -> Option<Uuid> {
        None
    }

    async fn list_workspaces(&self, _owner_id: Uuid) -> Result<Vec<Workspace>, SessionError> {
        Ok(workspaces())
    }

    async fn insert_workspace(&self, _new: &NewWorkspace) -> Result<Workspace, SessionError> {
        Err(SessionError::AuthenticationRequired)
    }

    async fn update_workspace(
        &self,
        _id: Uuid,
        _patch: &WorkspacePatch,
    ) -> Result<Workspace, SessionError> {
        Err(SessionError::AuthenticationRequired)
    }

    async fn delete_workspace(&self, _id: Uuid) -> Result<(), SessionError> {
        Err(SessionError::AuthenticationRequired)
    }

    async fn list_connections(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<PlatformConnection>, SessionError> {
        Ok(connections(workspace_id, Utc::now()))
    }

    async fn get_brand_guide(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<BrandGuide>, SessionError> {
        Ok(brand_guide(workspace_id, Utc::now()))
    }

    async fn insert_brand_guide(&self, _new: &NewBrandGuide) -> Result<BrandGuide, SessionError> {
        Err(SessionError::AuthenticationRequired)
    }

    async fn upsert_brand_guide(
        &self,
        _workspace_id: Uuid,
        _update: &BrandGuideUpdate,
    ) -> Result<BrandGuide, SessionError> {
        Err(SessionError::AuthenticationRequired)
    }
}

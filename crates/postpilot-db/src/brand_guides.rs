//! Database operations for the `brand_guides` table.

use chrono::{DateTime, Utc};
use postpilot_core::{BrandColors, BrandGuide, BrandGuideUpdate, NewBrandGuide};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::DbError;

/// A row from the `brand_guides` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandGuideRow {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub colors: Json<BrandColors>,
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

impl From<BrandGuideRow> for BrandGuide {
    fn from(row: BrandGuideRow) -> Self {
        Self {
            id: row.id,
            workspace_id: row.workspace_id,
            colors: row.colors.0,
            heading_font: row.heading_font,
            body_font: row.body_font,
            voice_tones: row.voice_tones,
            voice_keywords: row.voice_keywords,
            voice_description: row.voice_description,
            audience_demographics: row.audience_demographics,
            audience_interests: row.audience_interests,
            audience_pain_points: row.audience_pain_points,
            tagline: row.tagline,
            value_props: row.value_props,
            do_list: row.do_list,
            dont_list: row.dont_list,
            logo_url: row.logo_url,
            logo_dark_url: row.logo_dark_url,
            icon_url: row.icon_url,
            domain: row.domain,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const GUIDE_COLUMNS: &str = "id, workspace_id, colors, heading_font, body_font, voice_tones, \
     voice_keywords, voice_description, audience_demographics, audience_interests, \
     audience_pain_points, tagline, value_props, do_list, dont_list, logo_url, logo_dark_url, \
     icon_url, domain, created_at, updated_at";

/// Returns the brand guide of a workspace, or `None` if none is stored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_brand_guide(
    pool: &PgPool,
    workspace_id: Uuid,
) -> Result<Option<BrandGuideRow>, DbError> {
    let row = sqlx::query_as::<_, BrandGuideRow>(&format!(
        "SELECT {GUIDE_COLUMNS} FROM brand_guides WHERE workspace_id = $1"
    ))
    .bind(workspace_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts an empty guide (column defaults) for a workspace.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including when the
/// workspace already has a guide.
pub async fn create_brand_guide(
    pool: &PgPool,
    new: &NewBrandGuide,
) -> Result<BrandGuideRow, DbError> {
    let row = sqlx::query_as::<_, BrandGuideRow>(&format!(
        "INSERT INTO brand_guides (workspace_id, domain) \
         VALUES ($1, $2) \
         RETURNING {GUIDE_COLUMNS}"
    ))
    .bind(new.workspace_id)
    .bind(new.domain.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Inserts or overlays the guide of `workspace_id`.
///
/// On insert, absent fields take the column defaults. On conflict, absent
/// fields keep their stored value.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn upsert_brand_guide(
    pool: &PgPool,
    workspace_id: Uuid,
    update: &BrandGuideUpdate,
) -> Result<BrandGuideRow, DbError> {
    let colors = update.colors.clone().map(Json);

    let row = sqlx::query_as::<_, BrandGuideRow>(&format!(
        "INSERT INTO brand_guides \
           (workspace_id, colors, heading_font, body_font, voice_tones, voice_keywords, \
            voice_description, tagline, logo_url, logo_dark_url, icon_url, domain) \
         VALUES ($1, \
                 COALESCE($2, '{{\"primary\":\"#6366F1\",\"secondary\":\"#8B5CF6\",\"accent\":\"#10B981\",\"background\":\"#FAFAF9\"}}'::jsonb), \
                 COALESCE($3, 'inter'), \
                 COALESCE($4, 'inter'), \
                 COALESCE($5::TEXT[], '{{professional,friendly}}'::TEXT[]), \
                 COALESCE($6::TEXT[], '{{}}'::TEXT[]), \
                 $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (workspace_id) DO UPDATE \
         SET colors            = COALESCE($2, brand_guides.colors), \
             heading_font      = COALESCE($3, brand_guides.heading_font), \
             body_font         = COALESCE($4, brand_guides.body_font), \
             voice_tones       = COALESCE($5::TEXT[], brand_guides.voice_tones), \
             voice_keywords    = COALESCE($6::TEXT[], brand_guides.voice_keywords), \
             voice_description = COALESCE($7, brand_guides.voice_description), \
             tagline           = COALESCE($8, brand_guides.tagline), \
             logo_url          = COALESCE($9, brand_guides.logo_url), \
             logo_dark_url     = COALESCE($10, brand_guides.logo_dark_url), \
             icon_url          = COALESCE($11, brand_guides.icon_url), \
             domain            = COALESCE($12, brand_guides.domain), \
             updated_at        = NOW() \
         RETURNING {GUIDE_COLUMNS}"
    ))
    .bind(workspace_id)
    .bind(colors)
    .bind(update.heading_font.as_deref())
    .bind(update.body_font.as_deref())
    .bind(update.voice_tones.as_deref())
    .bind(update.voice_keywords.as_deref())
    .bind(update.voice_description.as_deref())
    .bind(update.tagline.as_deref())
    .bind(update.logo_url.as_deref())
    .bind(update.logo_dark_url.as_deref())
    .bind(update.icon_url.as_deref())
    .bind(update.domain.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

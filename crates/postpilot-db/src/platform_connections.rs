//! Database operations for the `platform_connections` table.
//!
//! Reads never select token columns.

use chrono::{DateTime, Utc};
use postpilot_core::PlatformConnection;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `platform_connections` table, minus token material.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlatformConnectionRow {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub platform: String,
    pub platform_user_id: String,
    pub platform_username: Option<String>,
    pub status: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlatformConnectionRow> for PlatformConnection {
    fn from(row: PlatformConnectionRow) -> Self {
        Self {
            id: row.id,
            workspace_id: row.workspace_id,
            platform: row.platform,
            platform_user_id: row.platform_user_id,
            platform_username: row.platform_username,
            status: row.status,
            expires_at: row.expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for a connection established by the OAuth flow.
#[derive(Debug, Clone)]
pub struct NewConnection<'a> {
    pub workspace_id: Uuid,
    pub platform: &'a str,
    pub platform_user_id: &'a str,
    pub platform_username: Option<&'a str>,
    pub access_token: &'a str,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: &'a str,
}

const CONNECTION_COLUMNS: &str = "id, workspace_id, platform, platform_user_id, platform_username, \
                                  status, expires_at, created_at, updated_at";

/// Returns the connections of one workspace, ordered by platform name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_connections_for_workspace(
    pool: &PgPool,
    workspace_id: Uuid,
) -> Result<Vec<PlatformConnectionRow>, DbError> {
    let rows = sqlx::query_as::<_, PlatformConnectionRow>(&format!(
        "SELECT {CONNECTION_COLUMNS} FROM platform_connections \
         WHERE workspace_id = $1 \
         ORDER BY platform, created_at"
    ))
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Inserts a connection and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including CHECK violations
/// for unknown platforms or statuses).
pub async fn insert_connection(
    pool: &PgPool,
    new: &NewConnection<'_>,
) -> Result<PlatformConnectionRow, DbError> {
    let row = sqlx::query_as::<_, PlatformConnectionRow>(&format!(
        "INSERT INTO platform_connections \
           (workspace_id, platform, platform_user_id, platform_username, access_token, \
            expires_at, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {CONNECTION_COLUMNS}"
    ))
    .bind(new.workspace_id)
    .bind(new.platform)
    .bind(new.platform_user_id)
    .bind(new.platform_username)
    .bind(new.access_token)
    .bind(new.expires_at)
    .bind(new.status)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

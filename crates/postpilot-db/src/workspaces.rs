//! Database operations for the `workspaces` table.

use chrono::{DateTime, Utc};
use postpilot_core::{NewWorkspace, Workspace, WorkspacePatch};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `workspaces` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkspaceRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub color: String,
    pub owner_id: Uuid,
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(row: WorkspaceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            kind: row.kind,
            color: row.color,
            owner_id: row.owner_id,
            settings: row.settings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const WORKSPACE_COLUMNS: &str = "id, name, type, color, owner_id, settings, created_at, updated_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every workspace owned by `owner_id`, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_workspaces_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<WorkspaceRow>, DbError> {
    let rows = sqlx::query_as::<_, WorkspaceRow>(&format!(
        "SELECT {WORKSPACE_COLUMNS} FROM workspaces \
         WHERE owner_id = $1 \
         ORDER BY created_at ASC, id ASC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single workspace by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_workspace(pool: &PgPool, id: Uuid) -> Result<Option<WorkspaceRow>, DbError> {
    let row = sqlx::query_as::<_, WorkspaceRow>(&format!(
        "SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a workspace and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_workspace(pool: &PgPool, new: &NewWorkspace) -> Result<WorkspaceRow, DbError> {
    let row = sqlx::query_as::<_, WorkspaceRow>(&format!(
        "INSERT INTO workspaces (name, type, color, owner_id, settings) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {WORKSPACE_COLUMNS}"
    ))
    .bind(&new.name)
    .bind(&new.kind)
    .bind(&new.color)
    .bind(new.owner_id)
    .bind(&new.settings)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Overlays `patch` onto an existing workspace in a single statement.
///
/// `None` fields keep their stored value via `COALESCE`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if `owner_id` owns no workspace with `id`,
/// or [`DbError::Sqlx`] if the query fails.
pub async fn update_workspace(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    patch: &WorkspacePatch,
) -> Result<WorkspaceRow, DbError> {
    sqlx::query_as::<_, WorkspaceRow>(&format!(
        "UPDATE workspaces \
         SET name       = COALESCE($3, name), \
             type       = COALESCE($4, type), \
             color      = COALESCE($5, color), \
             settings   = COALESCE($6, settings), \
             updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 \
         RETURNING {WORKSPACE_COLUMNS}"
    ))
    .bind(id)
    .bind(owner_id)
    .bind(patch.name.as_deref())
    .bind(patch.kind.as_deref())
    .bind(patch.color.as_deref())
    .bind(patch.settings.as_ref())
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Hard-deletes a workspace. Connections, posts, members, and the brand
/// guide cascade.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if `owner_id` owns no workspace with `id`,
/// or [`DbError::Sqlx`] if the query fails.
pub async fn delete_workspace(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM workspaces WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

use std::sync::Arc;

use async_trait::async_trait;
use postpilot_core::{
    BrandGuide, BrandGuideUpdate, NewBrandGuide, NewWorkspace, PlatformConnection, Workspace,
    WorkspacePatch,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::SessionError;
use crate::fixtures::FixtureDataSource;
use crate::live::LiveDataSource;

/// Backing store for a workspace session.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// The authenticated user this source acts for. `None` means every write
    /// fails with [`SessionError::AuthenticationRequired`].
    fn owner_id(&self) -> Option<Uuid>;

    async fn list_workspaces(&self, owner_id: Uuid) -> Result<Vec<Workspace>, SessionError>;
    async fn insert_workspace(&self, new: &NewWorkspace) -> Result<Workspace, SessionError>;
    async fn update_workspace(
        &self,
        id: Uuid,
        patch: &WorkspacePatch,
    ) -> Result<Workspace, SessionError>;
    async fn delete_workspace(&self, id: Uuid) -> Result<(), SessionError>;

    async fn list_connections(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<PlatformConnection>, SessionError>;

    async fn get_brand_guide(&self, workspace_id: Uuid)
        -> Result<Option<BrandGuide>, SessionError>;
    async fn insert_brand_guide(&self, new: &NewBrandGuide) -> Result<BrandGuide, SessionError>;
    async fn upsert_brand_guide(
        &self,
        workspace_id: Uuid,
        update: &BrandGuideUpdate,
    ) -> Result<BrandGuide, SessionError>;
}

/// Picks the data source once at startup: live when both a pool and an
/// authenticated user are available, fixtures otherwise.
#[must_use]
pub fn select_data_source(pool: Option<PgPool>, user_id: Option<Uuid>) -> Arc<dyn DataSource> {
    match (pool, user_id) {
        (Some(pool), Some(owner_id)) => {
            tracing::info!(owner_id = %owner_id, "using live data source");
            Arc::new(LiveDataSource::new(pool, owner_id))
        }
        (pool, user_id) => {
            tracing::info!(
                has_database = pool.is_some(),
                has_user = user_id.is_some(),
                "using fixture data source"
            );
            Arc::new(FixtureDataSource::new())
        }
    }
}

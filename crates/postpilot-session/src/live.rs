use async_trait::async_trait;
use postpilot_core::{
    BrandGuide, BrandGuideUpdate, NewBrandGuide, NewWorkspace, PlatformConnection, Workspace,
    WorkspacePatch,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::SessionError;
use crate::source::DataSource;

/// PostgreSQL-backed source scoped to one authenticated owner.
pub struct LiveDataSource {
    pool: PgPool,
    owner_id: Uuid,
}

impl LiveDataSource {
    #[must_use]
    pub fn new(pool: PgPool, owner_id: Uuid) -> Self {
        Self { pool, owner_id }
    }
}

#[async_trait]
impl DataSource for LiveDataSource {
    fn owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }

    async fn list_workspaces(&self, owner_id: Uuid) -> Result<Vec<Workspace>, SessionError> {
        let rows = postpilot_db::list_workspaces_for_owner(&self.pool, owner_id).await?;
        Ok(rows.into_iter().map(Workspace::from).collect())
    }

    async fn insert_workspace(&self, new: &NewWorkspace) -> Result<Workspace, SessionError> {
        let row = postpilot_db::create_workspace(&self.pool, new).await?;
        Ok(row.into())
    }

    async fn update_workspace(
        &self,
        id: Uuid,
        patch: &WorkspacePatch,
    ) -> Result<Workspace, SessionError> {
        let row = postpilot_db::update_workspace(&self.pool, id, self.owner_id, patch).await?;
        Ok(row.into())
    }

    async fn delete_workspace(&self, id: Uuid) -> Result<(), SessionError> {
        postpilot_db::delete_workspace(&self.pool, id, self.owner_id).await?;
        Ok(())
    }

    async fn list_connections(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<PlatformConnection>, SessionError> {
        let rows = postpilot_db::list_connections_for_workspace(&self.pool, workspace_id).await?;
        Ok(rows.into_iter().map(PlatformConnection::from).collect())
    }

    async fn get_brand_guide(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<BrandGuide>, SessionError> {
        let row = postpilot_db::get_brand_guide(&self.pool, workspace_id).await?;
        Ok(row.map(BrandGuide::from))
    }

    async fn insert_brand_guide(&self, new: &NewBrandGuide) -> Result<BrandGuide, SessionError> {
        let row = postpilot_db::create_brand_guide(&self.pool, new).await?;
        Ok(row.into())
    }

    async fn upsert_brand_guide(
        &self,
        workspace_id: Uuid,
        update: &BrandGuideUpdate,
    ) -> Result<BrandGuide, SessionError> {
        let row = postpilot_db::upsert_brand_guide(&self.pool, workspace_id, update).await?;
        Ok(row.into())
    }
}

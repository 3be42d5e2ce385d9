use std::sync::Arc;

use chrono::{DateTime, Utc};
use postpilot_brandfetch::NormalizedBrand;
use postpilot_core::{
    clean_domain, BrandGuide, BrandGuideUpdate, ConnectionHealth, NewBrandGuide, NewWorkspace,
    PlatformConnection, Workspace, WorkspacePatch, WorkspaceSettings,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::SessionError;
use crate::fixtures;
use crate::selection::SelectionStore;
use crate::source::DataSource;

const MAX_WORKSPACE_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    LoadingWorkspaces,
    Ready,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionView {
    #[serde(flatten)]
    pub connection: PlatformConnection,
    pub health: ConnectionHealth,
}

/// Owned copy of the session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub authenticated: bool,
    pub current_workspace_id: Option<Uuid>,
    pub workspaces: Vec<Workspace>,
    pub connections: Vec<ConnectionView>,
}

/// Single-owner state container for the user's workspaces.
///
/// Every operation writes to the [`DataSource`] before touching in-memory
/// state. Reads that fail fall back to fixture data instead of erroring.
pub struct WorkspaceSession {
    source: Arc<dyn DataSource>,
    selection: Box<dyn SelectionStore>,
    state: SessionState,
    workspaces: Vec<Workspace>,
    current: Option<Workspace>,
    connections: Vec<PlatformConnection>,
}

impl WorkspaceSession {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, selection: Box<dyn SelectionStore>) -> Self {
        Self {
            source,
            selection,
            state: SessionState::Uninitialized,
            workspaces: Vec::new(),
            current: None,
            connections: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.source.owner_id().is_some()
    }

    #[must_use]
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    #[must_use]
    pub fn current_workspace(&self) -> Option<&Workspace> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn connections(&self) -> &[PlatformConnection] {
        &self.connections
    }

    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            authenticated: self.is_authenticated(),
            current_workspace_id: self.current.as_ref().map(|w| w.id),
            workspaces: self.workspaces.clone(),
            connections: self
                .connections
                .iter()
                .map(|c| ConnectionView {
                    health: c.health(now),
                    connection: c.clone(),
                })
                .collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Loads workspaces, resolves the current one and its connections.
    ///
    /// Never fails: an unauthenticated source, an empty list or a read error
    /// all yield the fixture set.
    pub async fn load(&mut self) {
        self.state = SessionState::LoadingWorkspaces;
        self.workspaces = self.fetch_workspaces().await;

        let persisted = self
            .selection
            .load()
            .and_then(|raw| Uuid::parse_str(&raw).ok());
        self.current = persisted
            .and_then(|id| self.workspaces.iter().find(|w| w.id == id))
            .or_else(|| self.workspaces.first())
            .cloned();

        self.reload_connections().await;
        self.state = SessionState::Ready;
    }

    /// Re-runs the workspace loader, keeping the persisted selection.
    pub async fn refresh_workspaces(&mut self) {
        self.load().await;
    }

    pub async fn refresh_connections(&mut self) {
        self.reload_connections().await;
    }

    async fn fetch_workspaces(&self) -> Vec<Workspace> {
        let Some(owner_id) = self.source.owner_id() else {
            return fixtures::workspaces();
        };

        match self.source.list_workspaces(owner_id).await {
            Ok(list) if list.is_empty() => {
                tracing::info!(owner_id = %owner_id, "no workspaces stored, using fixtures");
                fixtures::workspaces()
            }
            Ok(mut list) => {
                list.sort_by_key(|w| w.created_at);
                list
            }
            Err(e) => {
                tracing::warn!(owner_id = %owner_id, error = %e, "failed to load workspaces, using fixtures");
                fixtures::workspaces()
            }
        }
    }

    async fn reload_connections(&mut self) {
        let Some(workspace_id) = self.current.as_ref().map(|w| w.id) else {
            self.connections.clear();
            return;
        };

        self.connections = match self.source.list_connections(workspace_id).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(workspace_id = %workspace_id, error = %e, "failed to load connections, using fixtures");
                fixtures::connections(workspace_id, Utc::now())
            }
        };
    }

    /// Single entry point for changing the current workspace: persist the
    /// selection, then swap it in memory and reload connections.
    async fn set_current(&mut self, workspace: Option<Workspace>) -> Result<(), SessionError> {
        match &workspace {
            Some(ws) => self.selection.save(&ws.id.to_string())?,
            None => self.selection.clear()?,
        }
        self.current = workspace;
        self.reload_connections().await;
        Ok(())
    }

    /// Writes only target workspaces the session loaded for its owner.
    fn ensure_loaded(&self, id: Uuid) -> Result<(), SessionError> {
        if self.workspaces.iter().any(|w| w.id == id) {
            Ok(())
        } else {
            Err(SessionError::UnknownWorkspace(id))
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// - [`SessionError::UnknownWorkspace`] if `id` is not in the loaded list.
    /// - [`SessionError::Selection`] if the selection cannot be persisted.
    pub async fn select_workspace(&mut self, id: Uuid) -> Result<(), SessionError> {
        let workspace = self
            .workspaces
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(SessionError::UnknownWorkspace(id))?;
        self.set_current(Some(workspace)).await
    }

    /// Creates a workspace with default settings and makes it current.
    ///
    /// With a `domain`, an empty brand guide for the cleaned domain is
    /// provisioned too; failing to do so is logged, not returned.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AuthenticationRequired`] without an authenticated user.
    /// - [`SessionError::Validation`] if the trimmed name is empty or too long.
    /// - Any error from the data source insert. A failed selection write
    ///   after the insert is logged and the new workspace still becomes
    ///   current.
    pub async fn create_workspace(
        &mut self,
        name: &str,
        kind: &str,
        color: &str,
        domain: Option<&str>,
    ) -> Result<Workspace, SessionError> {
        let owner_id = self
            .source
            .owner_id()
            .ok_or(SessionError::AuthenticationRequired)?;
        let name = validate_name(name)?;

        let created = self
            .source
            .insert_workspace(&NewWorkspace {
                name,
                kind: kind.to_string(),
                color: color.to_string(),
                owner_id,
                settings: WorkspaceSettings::default().to_value(),
            })
            .await?;
        tracing::info!(workspace_id = %created.id, "workspace created");

        if let Some(domain) = domain.map(clean_domain).filter(|d| !d.is_empty()) {
            let new_guide = NewBrandGuide {
                workspace_id: created.id,
                domain: Some(domain),
            };
            if let Err(e) = self.source.insert_brand_guide(&new_guide).await {
                tracing::warn!(workspace_id = %created.id, error = %e, "failed to provision brand guide");
            }
        }

        self.workspaces.push(created.clone());
        // The row is stored; a failed selection write is only logged.
        if let Err(e) = self.selection.save(&created.id.to_string()) {
            tracing::warn!(workspace_id = %created.id, error = %e, "failed to persist selection");
        }
        self.current = Some(created.clone());
        self.reload_connections().await;
        Ok(created)
    }

    /// Persists `patch`, then applies it to the list entry and the current
    /// workspace.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownWorkspace`] if `id` is not in the loaded list.
    /// - [`SessionError::Validation`] if a supplied name is empty or too long.
    /// - Any error from the data source update.
    pub async fn update_workspace(
        &mut self,
        id: Uuid,
        mut patch: WorkspacePatch,
    ) -> Result<Workspace, SessionError> {
        self.ensure_loaded(id)?;
        if let Some(name) = patch.name.take() {
            patch.name = Some(validate_name(&name)?);
        }

        let stored = self.source.update_workspace(id, &patch).await?;

        let mut result = stored.clone();
        if let Some(entry) = self.workspaces.iter_mut().find(|w| w.id == id) {
            entry.apply_patch(&patch);
            entry.updated_at = stored.updated_at;
            result = entry.clone();
        }
        if let Some(current) = self.current.as_mut().filter(|w| w.id == id) {
            current.apply_patch(&patch);
            current.updated_at = stored.updated_at;
        }
        Ok(result)
    }

    /// Persists the delete, then drops the workspace from the list. Deleting
    /// the current workspace selects the first remaining one, or clears the
    /// selection when none remain.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownWorkspace`] if `id` is not in the loaded list.
    /// - Any error from the data source delete or the selection store.
    pub async fn delete_workspace(&mut self, id: Uuid) -> Result<(), SessionError> {
        self.ensure_loaded(id)?;
        self.source.delete_workspace(id).await?;
        tracing::info!(workspace_id = %id, "workspace deleted");

        self.workspaces.retain(|w| w.id != id);
        if self.current.as_ref().is_some_and(|w| w.id == id) {
            let next = self.workspaces.first().cloned();
            self.set_current(next).await?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Brand guide
    // -----------------------------------------------------------------------

    /// Brand guide of the current workspace. Read failures fall back to the
    /// fixture guide for that id, if any.
    pub async fn brand_guide(&self) -> Option<BrandGuide> {
        let workspace_id = self.current.as_ref()?.id;
        match self.source.get_brand_guide(workspace_id).await {
            Ok(guide) => guide,
            Err(e) => {
                tracing::warn!(workspace_id = %workspace_id, error = %e, "failed to load brand guide, using fixtures");
                fixtures::brand_guide(workspace_id, Utc::now())
            }
        }
    }

    /// # Errors
    ///
    /// - [`SessionError::NoCurrentWorkspace`] if nothing is selected.
    /// - Any error from the data source upsert.
    pub async fn save_brand_guide(
        &self,
        update: &BrandGuideUpdate,
    ) -> Result<BrandGuide, SessionError> {
        let workspace_id = self
            .current
            .as_ref()
            .map(|w| w.id)
            .ok_or(SessionError::NoCurrentWorkspace)?;
        self.source.upsert_brand_guide(workspace_id, update).await
    }

    /// Writes the visual identity of `brand` into the current workspace's
    /// brand guide.
    ///
    /// # Errors
    ///
    /// Same as [`WorkspaceSession::save_brand_guide`].
    pub async fn apply_brand(&self, brand: &NormalizedBrand) -> Result<BrandGuide, SessionError> {
        self.save_brand_guide(&brand.guide_update()).await
    }
}

fn validate_name(raw: &str) -> Result<String, SessionError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SessionError::Validation(
            "workspace name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_WORKSPACE_NAME_CHARS {
        return Err(SessionError::Validation(format!(
            "workspace name must be at most {MAX_WORKSPACE_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

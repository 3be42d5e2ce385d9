//! Workspace and connection command handlers for the CLI.
//!
//! Every handler works on a loaded [`WorkspaceSession`], so the same commands
//! run against the database or the fixture set.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use postpilot_core::{PlatformConnection, Workspace, WorkspacePatch};
use postpilot_session::WorkspaceSession;
use uuid::Uuid;

const DEFAULT_KIND: &str = "business";
const DEFAULT_COLOR: &str = "from-indigo-500 to-purple-500";

/// Sub-commands available under `workspaces`.
#[derive(Debug, Subcommand)]
pub enum WorkspaceCommands {
    /// List workspaces, marking the current one
    List,
    /// Make a workspace current
    Select { id: Uuid },
    /// Create a workspace and make it current
    Create {
        name: String,
        /// Workspace type (e.g. business, personal)
        #[arg(long = "type", default_value = DEFAULT_KIND)]
        kind: String,
        /// Gradient class pair, e.g. "from-blue-500 to-blue-600"
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
        /// Brand domain; provisions an empty brand guide for it
        #[arg(long)]
        domain: Option<String>,
    },
    /// Change name, type or color of a workspace
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a workspace
    Delete { id: Uuid },
}

/// Dispatches a `workspaces` sub-command.
///
/// # Errors
///
/// Returns an error if the session rejects the operation or the backing
/// store fails.
pub(crate) async fn run(
    session: &mut WorkspaceSession,
    command: WorkspaceCommands,
) -> anyhow::Result<()> {
    match command {
        WorkspaceCommands::List => {
            print!("{}", workspace_table(session.workspaces(), current_id(session)));
        }
        WorkspaceCommands::Select { id } => {
            session.select_workspace(id).await?;
            println!("current workspace: {}", describe_current(session));
        }
        WorkspaceCommands::Create {
            name,
            kind,
            color,
            domain,
        } => {
            let created = session
                .create_workspace(&name, &kind, &color, domain.as_deref())
                .await?;
            println!("created workspace {} ({})", created.name, created.id);
        }
        WorkspaceCommands::Update {
            id,
            name,
            kind,
            color,
        } => {
            let patch = WorkspacePatch {
                name,
                kind,
                color,
                settings: None,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update; pass --name, --type or --color");
            }
            let updated = session.update_workspace(id, patch).await?;
            println!("updated workspace {} ({})", updated.name, updated.id);
        }
        WorkspaceCommands::Delete { id } => {
            session.delete_workspace(id).await?;
            println!("deleted workspace {id}");
            println!("current workspace: {}", describe_current(session));
        }
    }
    Ok(())
}

/// Prints the current workspace's connections with their health label.
pub(crate) fn run_connections(session: &WorkspaceSession) {
    println!("workspace: {}", describe_current(session));
    print!("{}", connection_table(session.connections(), Utc::now()));
}

fn current_id(session: &WorkspaceSession) -> Option<Uuid> {
    session.current_workspace().map(|w| w.id)
}

fn describe_current(session: &WorkspaceSession) -> String {
    session
        .current_workspace()
        .map_or_else(|| "none".to_string(), |w| format!("{} ({})", w.name, w.id))
}

fn fmt_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "\u{2014}".to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}

pub(crate) fn workspace_table(workspaces: &[Workspace], current: Option<Uuid>) -> String {
    if workspaces.is_empty() {
        return "no workspaces\n".to_string();
    }

    let mut out = format!("  {:<38}{:<12}{:<32}NAME\n", "ID", "TYPE", "COLOR");
    for ws in workspaces {
        let marker = if Some(ws.id) == current { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<38}{:<12}{:<32}{}",
            ws.id.to_string(),
            ws.kind,
            ws.color,
            ws.name
        );
    }
    out
}

pub(crate) fn connection_table(connections: &[PlatformConnection], now: DateTime<Utc>) -> String {
    if connections.is_empty() {
        return "no connections\n".to_string();
    }

    let mut out = format!(
        "{:<11}{:<22}{:<9}{:<9}EXPIRES\n",
        "PLATFORM", "ACCOUNT", "STATUS", "HEALTH"
    );
    for conn in connections {
        let account = conn
            .platform_username
            .as_deref()
            .unwrap_or(&conn.platform_user_id);
        let _ = writeln!(
            out,
            "{:<11}{:<22}{:<9}{:<9}{}",
            conn.platform,
            account,
            conn.status,
            conn.health(now).as_str(),
            fmt_date(conn.expires_at)
        );
    }
    out
}

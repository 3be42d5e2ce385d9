mod brand;
mod workspaces;

use clap::{Parser, Subcommand};
use postpilot_core::AppConfig;
use postpilot_session::{select_data_source, FileSelectionStore, WorkspaceSession};
use tracing_subscriber::EnvFilter;

use crate::brand::BrandCommands;
use crate::workspaces::WorkspaceCommands;

#[derive(Debug, Parser)]
#[command(name = "postpilot-cli")]
#[command(about = "PostPilot workspace and brand command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List, select and edit workspaces
    Workspaces {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    /// Show platform connections of the current workspace
    Connections,
    /// Look up brands and manage the current workspace's brand guide
    Brand {
        #[command(subcommand)]
        command: BrandCommands,
    },
    /// Print the full session state as JSON
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = postpilot_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("postpilot-cli ready; run with --help for commands");
        return Ok(());
    };

    match command {
        Commands::Brand {
            command: BrandCommands::Lookup { domain },
        } => brand::run_brand_lookup(&config, &domain).await,
        Commands::Workspaces { command } => {
            let mut session = open_session(&config).await?;
            workspaces::run(&mut session, command).await
        }
        Commands::Connections => {
            let session = open_session(&config).await?;
            workspaces::run_connections(&session);
            Ok(())
        }
        Commands::Brand { command } => {
            let mut session = open_session(&config).await?;
            brand::run(&mut session, &config, command).await
        }
        Commands::Status => {
            let session = open_session(&config).await?;
            let snapshot = session.snapshot(chrono::Utc::now());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

/// Connects to the database when configured and loads the session.
///
/// Without `DATABASE_URL` or `POSTPILOT_USER_ID` the session runs on fixture
/// data.
async fn open_session(config: &AppConfig) -> anyhow::Result<WorkspaceSession> {
    let pool = match config.database_url.as_deref() {
        Some(url) => {
            let pool_config = postpilot_db::PoolConfig::from_app_config(config);
            let pool = postpilot_db::connect_pool(url, pool_config).await?;
            postpilot_db::run_migrations(&pool).await?;
            Some(pool)
        }
        None => None,
    };

    let source = select_data_source(pool, config.user_id);
    let selection = FileSelectionStore::new(config.state_path.clone());
    let mut session = WorkspaceSession::new(source, Box::new(selection));
    session.load().await;
    tracing::debug!(
        authenticated = session.is_authenticated(),
        workspaces = session.workspaces().len(),
        "session loaded"
    );
    Ok(session)
}

pub mod app_config;
pub mod brand_guides;
pub mod config;
pub mod connections;
pub mod domain;
pub mod posts;
pub mod workspaces;

pub use app_config::{AppConfig, Environment};
pub use brand_guides::{BrandColors, BrandGuide, BrandGuideUpdate, NewBrandGuide};
pub use config::{load_app_config, load_app_config_from_env};
pub use connections::{ConnectionHealth, ConnectionStatus, PlatformConnection};
pub use domain::{clean_domain, display_name_from_domain};
pub use posts::{Platform, PostStatus};
pub use workspaces::{NewWorkspace, Workspace, WorkspacePatch, WorkspaceSettings};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

use postpilot_db::DbError;
use thiserror::Error;
use uuid::Uuid;

use crate::selection::SelectionError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// A write was attempted without an authenticated user.
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("unknown workspace: {0}")]
    UnknownWorkspace(Uuid),

    #[error("no workspace is selected")]
    NoCurrentWorkspace,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

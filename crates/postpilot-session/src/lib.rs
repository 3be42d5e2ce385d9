//! Workspace session state: which workspaces the user has, which one is
//! current, and the platform connections of the current one.
//!
//! Reads degrade to built-in fixture data; writes go to the backing store
//! before the in-memory state changes.

pub mod error;
pub mod fixtures;
pub mod live;
pub mod selection;
pub mod session;
pub mod source;

pub use error::SessionError;
pub use fixtures::FixtureDataSource;
pub use live::LiveDataSource;
pub use selection::{
    FileSelectionStore, MemorySelectionStore, SelectionError, SelectionStore, SELECTION_KEY,
};
pub use session::{ConnectionView, SessionSnapshot, SessionState, WorkspaceSession};
pub use source::{select_data_source, DataSource};

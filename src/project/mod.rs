//! Loading project files from disk into an [`AnalysisHost`](crate::ide::AnalysisHost).

mod error;
pub mod file_loader;
pub mod workspace_loader;

pub use error::LoadError;
pub use workspace_loader::{LoadSummary, WorkspaceLoader};

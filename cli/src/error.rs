use stegsuite_core::api::{ExportError, UnknownTool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Command(String),

    #[error(transparent)]
    UnknownTool(#[from] UnknownTool),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to encode event: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

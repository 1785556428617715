//! Error types for trace export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while writing a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Writing the output file failed.
    #[error("failed to write trace to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the trace failed.
    #[error("failed to serialize trace: {0}")]
    Json(#[from] serde_json::Error),
}

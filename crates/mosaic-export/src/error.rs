use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type produced by page renderers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that abort an export batch.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export cancelled")]
    Cancelled,
    #[error("rendering sheet {sheet} failed: {source}")]
    Render {
        sheet: u32,
        #[source]
        source: BoxError,
    },
    #[error("document sink failed for {path}: {source}")]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} export is not implemented")]
    Unsupported(&'static str),
    #[error("export worker task failed: {0}")]
    Worker(#[source] tokio::task::JoinError),
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExportError::Cancelled)
    }

    pub(crate) fn sink(path: &Path, source: io::Error) -> Self {
        ExportError::Sink {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

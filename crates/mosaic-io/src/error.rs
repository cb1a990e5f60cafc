//! Error types for mosaic-io

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReadError>;

/// Operational read failures. Malformed rows and missing result files are
/// not errors; they produce smaller or empty tables.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to scan folder {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    pub(crate) fn file(path: &Path, source: io::Error) -> Self {
        ReadError::File {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn scan(path: &Path, source: io::Error) -> Self {
        ReadError::Scan {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ReadError::File { path, .. } | ReadError::Scan { path, .. } => path,
        }
    }
}

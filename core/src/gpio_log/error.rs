//! Error types for GPIO log reading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a GPIO log from disk
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("missing input file {path}")]
    NotFound { path: PathBuf },

    #[error("failed to open log file {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to memory map file {path}")]
    MemoryMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//! Analysis errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while analyzing a log archive
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("archive not found: {}", path.display())]
    ArchiveNotFound { path: PathBuf },

    #[error("cannot open archive {}: {source}", path.display())]
    ArchiveCorrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive {} has no extension to derive an extraction directory from", path.display())]
    NoExtractionDir { path: PathBuf },

    #[error("failed to extract {} into {}: {source}", path.display(), dest.display())]
    Extract {
        path: PathBuf,
        dest: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to list {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {entry} as text: {source}")]
    FileRead {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("breath damage capture {capture:?} is not a valid amount in line {line:?}")]
    PatternCapture { line: String, capture: String },
}

//! Error types for project inspection.
//!
//! Only [`Error::PomLoad`], [`Error::Snapshot`] and [`Error::Io`] ever reach
//! the caller of the loaders. The other variants are recovered inside the
//! inspection pipeline: a bad version string falls through to the next
//! compliance source, an unreadable report means "no known failing tests",
//! and an unresolved classpath contributes nothing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid version format: {0:?}")]
    InvalidVersionFormat(String),

    #[error("Failed to read test report {}: {reason}", path.display())]
    ReportReadFailure { path: PathBuf, reason: String },

    #[error("Failed to resolve test classpath of {module}: {reason}")]
    DependencyResolutionFailure { module: String, reason: String },

    #[error("Failed to load {}: {reason}", path.display())]
    PomLoad { path: PathBuf, reason: String },

    #[error("Failed to load reactor snapshot {}: {reason}", path.display())]
    Snapshot { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the txt-report library.
///
/// Only batch-level failures surface as an `Error`. Failures reading a single
/// input file are folded into its [`CountRecord`](crate::CountRecord).
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Input path is empty, missing, or not a directory.
    #[error("Invalid directory '{path}': path is empty, missing or not a directory")]
    InvalidDirectory {
        /// Path supplied as input
        path: PathBuf,
    },

    /// No matching files found in directory.
    #[error("No files matching '{pattern}' found in '{path}'")]
    NoFiles {
        /// Directory that was scanned
        path: PathBuf,
        /// Pattern the file names were matched against
        pattern: String,
    },

    /// Invalid UTF-8 encountered in file.
    #[error("Invalid UTF-8 encoding in file '{path}'")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },

    /// Worker thread pool could not be started.
    #[error("Failed to start worker threads: {message}")]
    ThreadPool {
        /// Error message
        message: String,
    },

    /// Invalid file name pattern.
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The invalid pattern
        pattern: String,
        /// Reason why it's invalid
        reason: String,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid directory error.
    #[must_use]
    pub fn invalid_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidDirectory { path: path.into() }
    }

    /// Creates an invalid UTF-8 error.
    #[must_use]
    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8 { path: path.into() }
    }

    /// Creates a no files error.
    #[must_use]
    pub fn no_files(path: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self::NoFiles {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates a thread pool error.
    #[must_use]
    pub fn thread_pool(source: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool {
            message: source.to_string(),
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidPattern { .. })
    }

    /// Returns true if the input directory was rejected.
    #[must_use]
    pub const fn is_invalid_directory(&self) -> bool {
        matches!(self, Self::InvalidDirectory { .. })
    }

    /// Returns true if the scan found nothing to process.
    #[must_use]
    pub const fn is_no_files(&self) -> bool {
        matches!(self, Self::NoFiles { .. })
    }
}

impl From<globset::Error> for Error {
    fn from(e: globset::Error) -> Self {
        Self::invalid_pattern(e.glob().unwrap_or("unknown"), e.kind().to_string())
    }
}

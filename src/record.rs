use std::path::Path;

/// Line and word totals for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// Number of lines
    pub lines: usize,

    /// Number of whitespace-delimited words
    pub words: usize,
}

/// How processing a single file ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file was read and counted
    Counted(Counts),

    /// The file could not be processed
    Failed {
        /// Human-readable description of the failure
        message: String,
    },
}

/// Immutable per-file result produced by the counter and consumed by the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRecord {
    /// Base name of the file, without directories
    pub file_name: String,

    /// Counts or failure for this file
    pub outcome: Outcome,
}

impl CountRecord {
    /// Creates a successful record.
    #[must_use]
    pub fn counted(file_name: impl Into<String>, counts: Counts) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: Outcome::Counted(counts),
        }
    }

    /// Creates a failed record.
    #[must_use]
    pub fn failed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: Outcome::Failed {
                message: message.into(),
            },
        }
    }

    /// Line count, zero for failed records.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        match &self.outcome {
            Outcome::Counted(counts) => counts.lines,
            Outcome::Failed { .. } => 0,
        }
    }

    /// Word count, zero for failed records.
    #[must_use]
    pub const fn word_count(&self) -> usize {
        match &self.outcome {
            Outcome::Counted(counts) => counts.words,
            Outcome::Failed { .. } => 0,
        }
    }

    /// Failure description if processing failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Counted(_) => None,
            Outcome::Failed { message } => Some(message),
        }
    }

    /// Returns true if processing failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// Extracts the base name used to identify a file in records.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

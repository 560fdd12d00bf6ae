use crate::record::{file_name_of, CountRecord, Outcome};
use std::path::Path;
use tracing::{info, warn};

/// Receives per-file progress notifications from counting tasks.
///
/// Implementations are shared between concurrently running tasks, so they
/// must be thread-safe. Notifications for different files may interleave
/// in any order.
pub trait Progress: Send + Sync {
    /// Called before a file is read.
    fn started(&self, _path: &Path) {}

    /// Called once a file's record has been produced.
    fn finished(&self, _record: &CountRecord) {}
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Reports progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn started(&self, path: &Path) {
        info!("Processing: {} ...", file_name_of(path));
    }

    fn finished(&self, record: &CountRecord) {
        match &record.outcome {
            Outcome::Counted(counts) => info!(
                "Done: {} - {} line(s), {} word(s)",
                record.file_name, counts.lines, counts.words
            ),
            Outcome::Failed { message } => {
                warn!("Failed to process {}: {}", record.file_name, message);
            }
        }
    }
}

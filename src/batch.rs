use crate::{
    counter::count,
    error::{Error, Result},
    progress::Progress,
    record::{file_name_of, CountRecord},
};
use rayon::prelude::*;
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Counts every file concurrently and waits for all of them.
///
/// Files are spread over a thread pool of `max_workers` threads, or one per
/// CPU when unset. The call returns only once every file has a record, and
/// one record is produced per input path, in input order. A failing or
/// panicking file never affects the others.
///
/// # Errors
///
/// Returns an error if the thread pool cannot be started.
pub fn count_all(
    paths: &[PathBuf],
    progress: &dyn Progress,
    max_workers: Option<usize>,
) -> Result<Vec<CountRecord>> {
    let workers = max_workers.unwrap_or_else(num_cpus::get).max(1);
    debug!("Counting {} files on {} threads", paths.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("txt-report-{i}"))
        .build()
        .map_err(Error::thread_pool)?;

    Ok(pool.install(|| {
        paths
            .par_iter()
            .map(|path| count_isolated(path, progress))
            .collect()
    }))
}

/// Runs [`count`] and turns a panic into a failed record.
fn count_isolated(path: &Path, progress: &dyn Progress) -> CountRecord {
    panic::catch_unwind(AssertUnwindSafe(|| count(path, progress)))
        .unwrap_or_else(|payload| panicked(path, payload.as_ref()))
}

fn panicked(path: &Path, payload: &(dyn Any + Send)) -> CountRecord {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    warn!("Counting {} panicked: {}", path.display(), reason);
    CountRecord::failed(file_name_of(path), format!("processing panicked: {reason}"))
}

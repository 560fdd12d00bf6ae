use crate::{
    counter::{count_text, decode},
    error::{Error, Result},
    progress::Progress,
    record::{file_name_of, CountRecord},
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, warn};

/// Counts every file on the current tokio runtime, one task per file.
///
/// Same contract as [`count_all`](crate::count_all): one record per path,
/// in input order, returned only after every task has finished. A task that
/// fails to join becomes a failed record for its file.
pub async fn count_all_async(paths: &[PathBuf], progress: Arc<dyn Progress>) -> Vec<CountRecord> {
    debug!("Spawning {} counting tasks", paths.len());

    let handles: Vec<_> = paths
        .iter()
        .map(|path| {
            let progress = Arc::clone(&progress);
            let task_path = path.clone();
            let handle = tokio::spawn(async move {
                progress.started(&task_path);
                let record = count_file_async(&task_path).await;
                progress.finished(&record);
                record
            });
            (path, handle)
        })
        .collect();

    let mut records = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let record = handle.await.unwrap_or_else(|e| {
            warn!("Counting task for {} failed: {}", path.display(), e);
            CountRecord::failed(file_name_of(path), format!("task failed: {e}"))
        });
        records.push(record);
    }
    records
}

async fn count_file_async(path: &Path) -> CountRecord {
    let file_name = file_name_of(path);

    match read_text_async(path).await {
        Ok(text) => CountRecord::counted(file_name, count_text(&text)),
        Err(e) => CountRecord::failed(file_name, e.to_string()),
    }
}

async fn read_text_async(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    decode(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::count_all;
    use crate::progress::{testing::RecordingProgress, NoProgress};
    use assert_fs::prelude::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_async_matches_threaded() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").write_str("hello world\n\nfoo").unwrap();
        temp.child("a.txt").write_str("one two three").unwrap();
        temp.child("bad.txt").write_binary(&[0xff, 0xff]).unwrap();

        let paths = vec![
            temp.path().join("b.txt"),
            temp.path().join("a.txt"),
            temp.path().join("bad.txt"),
            temp.path().join("vanished.txt"),
        ];

        let threaded = count_all(&paths, &NoProgress, None).unwrap();
        let asynchronous = count_all_async(&paths, Arc::new(NoProgress)).await;

        assert_eq!(threaded, asynchronous);
        assert_eq!(asynchronous.iter().filter(|r| r.is_failed()).count(), 2);
    }

    #[tokio::test]
    async fn test_async_notifies_progress() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").write_str("x").unwrap();

        let progress = Arc::new(RecordingProgress::default());
        let records = count_all_async(&[temp.path().join("a.txt")], progress.clone()).await;

        assert_eq!(records.len(), 1);
        assert_eq!(progress.started.lock().unwrap().len(), 1);
        assert_eq!(*progress.finished.lock().unwrap(), records);
    }
}

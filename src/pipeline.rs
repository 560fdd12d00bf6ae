use crate::{
    batch::count_all,
    config::Config,
    error::Result,
    progress::{Progress, TracingProgress},
    record::CountRecord,
    report,
    scanner::Scanner,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{info, instrument, warn};

/// Statistics collected during a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of files counted
    pub total_files: usize,

    /// Number of files that could not be processed
    pub failed_files: usize,

    /// Sum of line counts over successful files
    pub total_lines: usize,

    /// Sum of word counts over successful files
    pub total_words: usize,

    /// Location of the written report
    pub report_path: PathBuf,

    /// Total execution time
    pub duration: Duration,
}

impl RunSummary {
    fn new(records: &[CountRecord], report_path: PathBuf, duration: Duration) -> Self {
        Self {
            total_files: records.len(),
            failed_files: records.iter().filter(|r| r.is_failed()).count(),
            total_lines: records.iter().map(CountRecord::line_count).sum(),
            total_words: records.iter().map(CountRecord::word_count).sum(),
            report_path,
            duration,
        }
    }
}

/// Scans, counts, aggregates and writes the report.
pub struct Pipeline {
    config: Config,
    scanner: Scanner,
    progress: Arc<dyn Progress>,
}

impl Pipeline {
    /// Creates a new pipeline reporting progress through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_progress(config, Arc::new(TracingProgress))
    }

    /// Creates a new pipeline with a custom progress observer.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn with_progress(config: Config, progress: Arc<dyn Progress>) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::new(&config)?;

        Ok(Self {
            config,
            scanner,
            progress,
        })
    }

    /// Lists the files a run would count, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or holds no
    /// matching file.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        self.scanner.scan()
    }

    /// Executes the whole run and returns statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails or the report cannot be written.
    /// Files that fail to read do not cause an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use txt_report::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().input_dir("./notes").build()?;
    /// let summary = Pipeline::new(config)?.run()?;
    /// println!("{}", summary.report_path.display());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub fn run(&self) -> Result<RunSummary> {
        let files = self.discover()?;
        self.process(&files)
    }

    /// Counts the given files concurrently and writes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be started or the report
    /// cannot be written.
    pub fn process(&self, files: &[PathBuf]) -> Result<RunSummary> {
        let start = Instant::now();
        info!("Counting {} file(s) concurrently", files.len());

        let records = count_all(files, self.progress.as_ref(), self.config.max_workers)?;
        self.finish(&records, start)
    }

    /// Async variant of [`Pipeline::run`], counting on the tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::run`].
    #[cfg(feature = "async")]
    pub async fn run_async(&self) -> Result<RunSummary> {
        let start = Instant::now();

        let files = self.discover()?;
        info!("Counting {} file(s) on tokio", files.len());

        let records = crate::async_batch::count_all_async(&files, Arc::clone(&self.progress)).await;
        self.finish(&records, start)
    }

    fn finish(&self, records: &[CountRecord], start: Instant) -> Result<RunSummary> {
        let failed = records.iter().filter(|r| r.is_failed()).count();
        if failed > 0 {
            warn!("{} of {} file(s) could not be processed", failed, records.len());
        }

        let lines = report::aggregate(records);
        let report_path = self.config.report_path();
        report::write(&lines, &report_path)?;

        let summary = RunSummary::new(records, absolute(&report_path), start.elapsed());
        info!(
            "✓ Report complete: {} files, {} lines, {} words in {:.2}s",
            summary.total_files,
            summary.total_lines,
            summary.total_words,
            summary.duration.as_secs_f64()
        );

        Ok(summary)
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use assert_fs::prelude::*;
    use std::fs;

    fn pipeline_for(input: &Path, output: &Path) -> Pipeline {
        let config = Config::builder()
            .input_dir(input)
            .output_dir(output)
            .build()
            .unwrap();
        Pipeline::with_progress(config, Arc::new(NoProgress)).unwrap()
    }

    fn report_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_pipeline_writes_sorted_report() {
        let input = assert_fs::TempDir::new().unwrap();
        input.child("b.txt").write_str("hello world\n\nfoo").unwrap();
        input.child("a.txt").write_str("one two three").unwrap();
        let output = assert_fs::TempDir::new().unwrap();

        let summary = pipeline_for(input.path(), &output.path().join("export"))
            .run()
            .unwrap();

        assert_eq!(
            report_lines(&summary.report_path),
            vec![
                "a.txt - 1 linhas - 3 palavras",
                "b.txt - 3 linhas - 3 palavras",
            ]
        );
        assert!(summary.report_path.is_absolute());
        assert!(summary.report_path.ends_with("export/relatorio.txt"));
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.failed_files, 0);
        assert_eq!(summary.total_lines, 4);
        assert_eq!(summary.total_words, 6);
    }

    #[test]
    fn test_pipeline_isolates_unreadable_file() {
        let input = assert_fs::TempDir::new().unwrap();
        input.child("a.txt").write_str("x y").unwrap();
        input.child("b.txt").write_str("z").unwrap();
        input.child("c.txt").write_binary(&[0xff, 0xfe, 0xfd]).unwrap();
        input.child("d.txt").write_str("").unwrap();
        let output = assert_fs::TempDir::new().unwrap();

        let summary = pipeline_for(input.path(), output.path()).run().unwrap();
        let lines = report_lines(&summary.report_path);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "c.txt - Erro ao processar.");
        assert_eq!(lines[3], "d.txt - 0 linhas - 0 palavras");
        assert_eq!(
            lines.iter().filter(|l| l.ends_with("Erro ao processar.")).count(),
            1
        );
        assert_eq!(summary.failed_files, 1);
    }

    #[test]
    fn test_file_deleted_after_discovery() {
        let input = assert_fs::TempDir::new().unwrap();
        input.child("a.txt").write_str("one").unwrap();
        input.child("c.txt").write_str("soon gone").unwrap();
        let output = assert_fs::TempDir::new().unwrap();
        let pipeline = pipeline_for(input.path(), output.path());

        let files = pipeline.discover().unwrap();
        fs::remove_file(input.path().join("c.txt")).unwrap();
        let summary = pipeline.process(&files).unwrap();

        assert_eq!(
            report_lines(&summary.report_path),
            vec!["a.txt - 1 linhas - 1 palavras", "c.txt - Erro ao processar."]
        );
    }

    #[test]
    fn test_pipeline_without_files_writes_nothing() {
        let input = assert_fs::TempDir::new().unwrap();
        input.child("readme.md").write_str("x").unwrap();
        let output = assert_fs::TempDir::new().unwrap();
        let export = output.path().join("export");

        let err = pipeline_for(input.path(), &export).run().unwrap_err();

        assert!(err.is_no_files());
        assert!(!export.exists());
    }

    #[test]
    fn test_pipeline_report_write_failure_is_fatal() {
        let input = assert_fs::TempDir::new().unwrap();
        input.child("a.txt").write_str("x").unwrap();
        let output = assert_fs::TempDir::new().unwrap();
        output.child("blocked").write_str("file in the way").unwrap();

        let err = pipeline_for(input.path(), &output.path().join("blocked"))
            .run()
            .unwrap_err();

        assert!(err.is_io());
    }

    #[test]
    fn test_pipeline_rerun_is_byte_identical() {
        let input = assert_fs::TempDir::new().unwrap();
        for i in 0..8 {
            input
                .child(format!("f{i}.txt"))
                .write_str(&"word ".repeat(i))
                .unwrap();
        }
        let output = assert_fs::TempDir::new().unwrap();
        let pipeline = pipeline_for(input.path(), output.path());

        let first = fs::read(pipeline.run().unwrap().report_path).unwrap();
        let second = fs::read(pipeline.run().unwrap().report_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_pipeline_rejects_invalid_directory() {
        let config = Config {
            input_dir: PathBuf::from("/nonexistent/input"),
            ..Config::default()
        };

        let result = Pipeline::new(config);
        assert!(matches!(result, Err(e) if e.is_invalid_directory()));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_pipeline_run_async() {
        let input = assert_fs::TempDir::new().unwrap();
        input.child("b.txt").write_str("hello world\n\nfoo").unwrap();
        input.child("a.txt").write_str("one two three").unwrap();
        let output = assert_fs::TempDir::new().unwrap();

        let summary = pipeline_for(input.path(), output.path())
            .run_async()
            .await
            .unwrap();

        assert_eq!(
            report_lines(&summary.report_path),
            vec![
                "a.txt - 1 linhas - 3 palavras",
                "b.txt - 3 linhas - 3 palavras",
            ]
        );
    }
}

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = "export";
const DEFAULT_REPORT_NAME: &str = "relatorio.txt";
const DEFAULT_PATTERN: &str = "*.txt";

/// Configuration for the txt-report pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory whose files are counted (not recursed into)
    pub input_dir: PathBuf,

    /// Directory the report is written to
    pub output_dir: PathBuf,

    /// File name of the report inside `output_dir`
    pub report_name: String,

    /// Glob matched against each file name in `input_dir`
    pub pattern: String,

    /// Size of the counting thread pool, `None` for one thread per CPU
    pub max_workers: Option<usize>,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use txt_report::Config;
    ///
    /// let config = Config::builder()
    ///     .input_dir(".")
    ///     .output_dir("./export")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Input directory is empty, missing or not a directory
    /// - The file pattern is not a valid glob
    /// - The report name is empty or contains a path separator
    /// - `max_workers` is zero
    pub fn validate(&self) -> Result<()> {
        validate_input_dir(&self.input_dir)?;

        globset::Glob::new(&self.pattern)?;

        if self.report_name.trim().is_empty() {
            return Err(Error::config("report_name must not be empty"));
        }

        if self.report_name.contains(['/', '\\']) {
            return Err(Error::config(format!(
                "report_name must be a bare file name, got '{}'",
                self.report_name
            )));
        }

        if self.max_workers == Some(0) {
            return Err(Error::config("max_workers must be greater than 0"));
        }

        Ok(())
    }

    /// Returns the full path of the report file.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_name: DEFAULT_REPORT_NAME.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            max_workers: None,
        }
    }
}

fn validate_input_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        return Err(Error::invalid_directory(path));
    }

    if !path.is_dir() {
        return Err(Error::invalid_directory(path));
    }

    Ok(())
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    report_name: Option<String>,
    pattern: Option<String>,
    max_workers: Option<usize>,
}

impl ConfigBuilder {
    /// Sets the directory to scan.
    #[must_use]
    pub fn input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(path.into());
        self
    }

    /// Sets the directory the report is written to.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the report file name.
    #[must_use]
    pub fn report_name(mut self, name: impl Into<String>) -> Self {
        self.report_name = Some(name.into());
        self
    }

    /// Sets the glob used to select input files.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Caps the number of files counted at the same time.
    ///
    /// The report is identical with or without a cap.
    #[must_use]
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            input_dir: self.input_dir.unwrap_or_else(|| PathBuf::from(".")),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            report_name: self
                .report_name
                .unwrap_or_else(|| DEFAULT_REPORT_NAME.to_string()),
            pattern: self.pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            max_workers: self.max_workers,
        };

        config.validate()?;
        Ok(config)
    }
}

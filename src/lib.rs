//! # txt-report
//!
//! Counts lines and words of every `.txt` file in a directory concurrently
//! and writes a consolidated report sorted by file name.
//!
//! ## Features
//!
//! - Concurrent counting on a thread pool sized to the CPU count
//! - Per-file failures are recorded, never abort the batch
//! - Deterministic report regardless of task completion order
//! - Atomic report writes
//! - Optional tokio-based counting (`async` feature)
//!
//! ## Quick Start
//!
//! ```no_run
//! use txt_report::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .input_dir("./notes")
//!     .output_dir("./export")
//!     .build()?;
//!
//! let summary = txt_report::run(config)?;
//! println!("Report written to {}", summary.report_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Report format
//!
//! One line per file, ordered by file name:
//!
//! ```text
//! a.txt - 1 linhas - 3 palavras
//! b.txt - 3 linhas - 3 palavras
//! c.txt - Erro ao processar.
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "async")]
mod async_batch;
mod batch;
mod config;
mod counter;
mod error;
mod pipeline;
mod progress;
mod record;
mod scanner;

pub mod report;

#[cfg(feature = "async")]
pub use async_batch::count_all_async;
pub use batch::count_all;
pub use config::{Config, ConfigBuilder};
pub use counter::{count, count_file, count_text};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use progress::{NoProgress, Progress, TracingProgress};
pub use record::{CountRecord, Counts, Outcome};
pub use report::aggregate;

/// Runs a complete scan-count-report cycle with the given configuration.
///
/// Progress is reported through `tracing`.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The input directory cannot be listed
/// - No matching files are found
/// - The report cannot be written
///
/// # Examples
///
/// ```no_run
/// use txt_report::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .input_dir(".")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<RunSummary> {
    Pipeline::new(config)?.run()
}

//! Basic example of using txt-report as a library
//!
//! Counts the .txt files of a directory and prints every report line.

use std::sync::Arc;
use txt_report::{Config, NoProgress, Pipeline};

fn main() -> anyhow::Result<()> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());

    let config = Config::builder()
        .input_dir(dir)
        .output_dir("./export")
        .max_workers(4)
        .build()?;

    let pipeline = Pipeline::with_progress(config, Arc::new(NoProgress))?;
    let summary = pipeline.run()?;

    println!("{}", std::fs::read_to_string(&summary.report_path)?);
    println!(
        "✓ {} files ({} failed), {} lines, {} words",
        summary.total_files, summary.failed_files, summary.total_lines, summary.total_words
    );
    println!("✓ Report written to: {}", summary.report_path.display());

    Ok(())
}

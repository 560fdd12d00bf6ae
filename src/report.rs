use crate::{
    error::{Error, Result},
    record::{CountRecord, Outcome},
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Sorts records by file name and renders one report line per record.
///
/// The order depends only on `file_name` (byte-wise), never on the order
/// records arrive in.
#[must_use]
pub fn aggregate(records: &[CountRecord]) -> Vec<String> {
    let mut sorted: Vec<&CountRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    sorted.into_iter().map(render_line).collect()
}

/// Renders a single report line.
#[must_use]
pub fn render_line(record: &CountRecord) -> String {
    match &record.outcome {
        Outcome::Counted(counts) => format!(
            "{} - {} linhas - {} palavras",
            record.file_name, counts.lines, counts.words
        ),
        Outcome::Failed { .. } => format!("{} - Erro ao processar.", record.file_name),
    }
}

/// Joins report lines, terminating each with the platform line separator.
#[must_use]
pub fn render(lines: &[String]) -> String {
    lines.iter().fold(String::new(), |mut out, line| {
        out.push_str(line);
        out.push_str(LINE_ENDING);
        out
    })
}

/// Writes report lines to `destination` as UTF-8, replacing any existing file.
///
/// Parent directories are created as needed. Content goes to a temporary
/// sibling first and is renamed into place, so the destination never holds
/// a partial report.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written. Nothing is retried.
pub fn write(lines: &[String], destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    write_file_atomic(destination, &render(lines))?;

    info!("Wrote {} report lines to {}", lines.len(), destination.display());
    Ok(())
}

fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);
    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

    let written = temp_file
        .write_all(content.as_bytes())
        .and_then(|()| temp_file.sync_all());
    drop(temp_file);

    if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(path, e));
    }

    debug!("Renamed {} to {}", temp_path.display(), path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

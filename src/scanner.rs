use crate::{
    config::Config,
    error::{Error, Result},
};
use globset::{Glob, GlobMatcher};
use std::path::PathBuf;
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Lists the files directly inside the input directory that match the
/// configured pattern.
pub(crate) struct Scanner {
    input_dir: PathBuf,
    pattern: String,
    matcher: GlobMatcher,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern is not a valid glob.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            input_dir: config.input_dir.clone(),
            pattern: config.pattern.clone(),
            matcher: Glob::new(&config.pattern)?.compile_matcher(),
        })
    }

    /// Returns matching file paths sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input directory cannot be listed
    /// - No file matches the pattern
    pub(crate) fn scan(&self) -> Result<Vec<PathBuf>> {
        debug!("Scanning {} for '{}'", self.input_dir.display(), self.pattern);

        let walker = WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut files = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    if self.accepts(&entry) {
                        trace!("Matched {}", entry.path().display());
                        files.push(entry.into_path());
                    }
                }
                Err(e) if e.depth() == 0 => {
                    let path = e.path().unwrap_or(&self.input_dir).to_path_buf();
                    return Err(Error::Io {
                        path,
                        message: e.to_string(),
                    });
                }
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }

        if files.is_empty() {
            return Err(Error::no_files(&self.input_dir, &self.pattern));
        }

        debug!("Found {} matching files", files.len());
        Ok(files)
    }

    fn accepts(&self, entry: &DirEntry) -> bool {
        is_regular_file(entry) && self.matcher.is_match(entry.file_name())
    }
}

fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::path::Path;

    fn scanner_for(dir: &Path) -> Scanner {
        let config = Config::builder().input_dir(dir).build().unwrap();
        Scanner::new(&config).unwrap()
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_scan_finds_only_txt_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").write_str("b").unwrap();
        temp.child("a.txt").write_str("a").unwrap();
        temp.child("notes.md").write_str("md").unwrap();
        temp.child("data.txt.bak").write_str("bak").unwrap();

        let files = scanner_for(temp.path()).scan().unwrap();
        assert_eq!(names(&files), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("top.txt").write_str("top").unwrap();
        temp.child("nested/deep.txt").write_str("deep").unwrap();

        let files = scanner_for(temp.path()).scan().unwrap();
        assert_eq!(names(&files), vec!["top.txt"]);
    }

    #[test]
    fn test_scan_skips_directories_named_like_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("dir.txt").create_dir_all().unwrap();
        temp.child("real.txt").write_str("x").unwrap();

        let files = scanner_for(temp.path()).scan().unwrap();
        assert_eq!(names(&files), vec!["real.txt"]);
    }

    #[test]
    fn test_scan_without_matches_is_no_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("readme.md").write_str("x").unwrap();

        let err = scanner_for(temp.path()).scan().unwrap_err();
        assert!(err.is_no_files());
    }

    #[test]
    fn test_scan_with_custom_pattern() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.log").write_str("x").unwrap();
        temp.child("b.txt").write_str("x").unwrap();

        let config = Config::builder()
            .input_dir(temp.path())
            .pattern("*.log")
            .build()
            .unwrap();
        let files = Scanner::new(&config).unwrap().scan().unwrap();
        assert_eq!(names(&files), vec!["a.log"]);
    }
}

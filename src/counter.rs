use crate::{
    error::{Error, Result},
    progress::Progress,
    record::{file_name_of, CountRecord, Counts},
};
use memchr::memchr2;
use std::{fs, path::Path};
use tracing::trace;

/// Characters that separate words within a line.
const WORD_DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Counts a single file, notifying `progress` before and after.
///
/// Never fails: read and decode errors become a failed [`CountRecord`]
/// with zero counts.
pub fn count(path: &Path, progress: &dyn Progress) -> CountRecord {
    progress.started(path);
    let record = count_file(path);
    progress.finished(&record);
    record
}

/// Counts a single file without progress notifications.
#[must_use]
pub fn count_file(path: &Path) -> CountRecord {
    let file_name = file_name_of(path);

    match read_text(path) {
        Ok(text) => {
            let counts = count_text(&text);
            trace!(
                "Counted {}: {} lines, {} words",
                file_name,
                counts.lines,
                counts.words
            );
            CountRecord::counted(file_name, counts)
        }
        Err(e) => CountRecord::failed(file_name, e.to_string()),
    }
}

/// Counts lines and words in already decoded text.
///
/// Lines end at `\r\n`, `\n` or `\r`; a trailing terminator does not open
/// an extra line. Words are maximal runs of characters outside
/// space, tab, CR and LF.
#[must_use]
pub fn count_text(text: &str) -> Counts {
    Lines { rest: text }.fold(Counts::default(), |acc, line| Counts {
        lines: acc.lines + 1,
        words: acc.words + count_words(line),
    })
}

fn count_words(line: &str) -> usize {
    line.split(WORD_DELIMITERS)
        .filter(|token| !token.is_empty())
        .count()
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode(path, bytes)
}

/// Decodes file bytes as UTF-8, skipping a leading byte-order mark.
pub(crate) fn decode(path: &Path, mut bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }

    String::from_utf8(bytes).map_err(|_| Error::invalid_utf8(path))
}

/// Iterator over lines split on any of `\r\n`, `\n`, `\r`.
struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let bytes = self.rest.as_bytes();
        match memchr2(b'\r', b'\n', bytes) {
            Some(i) => {
                let line = &self.rest[..i];
                let terminator = if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.rest = &self.rest[i + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

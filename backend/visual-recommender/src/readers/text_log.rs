// Gzip-compressed, whitespace-delimited log reader
//
// Failures never propagate: a missing file is an empty log, and any read or
// decode error mid-stream is logged and ends the iteration.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Whitespace-split fields of one log line
pub type Row = Vec<String>;

pub type GzLineSource = BufReader<MultiGzDecoder<BufReader<File>>>;

/// Lazy iterator over the non-empty lines of a compressed text log.
pub struct TextLogReader<R: BufRead = GzLineSource> {
    source: Option<R>,
    label: PathBuf,
    line_buf: String,
    rows_read: usize,
    failed: bool,
}

impl TextLogReader<GzLineSource> {
    /// Open a gzip log. Missing or unreadable files produce an empty reader.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                debug!(path = %path.display(), "Opened text log");
                let decoder = MultiGzDecoder::new(BufReader::new(file));
                Self::with_label(BufReader::new(decoder), path)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Text log not found, treating as empty");
                Self::unavailable(path)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to open text log");
                Self::unavailable(path)
            }
        }
    }
}

impl<R: BufRead> TextLogReader<R> {
    /// Read plain (already decompressed) lines from any buffered source.
    pub fn from_reader(source: R) -> Self {
        Self::with_label(source, "<reader>")
    }

    fn with_label(source: R, label: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source),
            label: label.into(),
            line_buf: String::new(),
            rows_read: 0,
            failed: false,
        }
    }

    fn unavailable(label: impl Into<PathBuf>) -> Self {
        Self {
            source: None,
            label: label.into(),
            line_buf: String::new(),
            rows_read: 0,
            failed: true,
        }
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// True when the log was missing or iteration ended on an error.
    pub fn failed(&self) -> bool {
        self.failed
    }

    fn stop(&mut self, err: Option<io::Error>) {
        if let Some(e) = err {
            error!(
                path = %self.label.display(),
                rows_read = self.rows_read,
                error = %e,
                "Error while reading text log, stopping early"
            );
            self.failed = true;
        } else {
            debug!(path = %self.label.display(), rows_read = self.rows_read, "Finished text log");
        }
        self.source = None;
    }
}

impl<R: BufRead> Iterator for TextLogReader<R> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        loop {
            let source = self.source.as_mut()?;
            self.line_buf.clear();
            match source.read_line(&mut self.line_buf) {
                Ok(0) => {
                    self.stop(None);
                    return None;
                }
                Ok(_) => {
                    let row: Row = self
                        .line_buf
                        .split_whitespace()
                        .map(str::to_string)
                        .collect();
                    if row.is_empty() {
                        continue;
                    }
                    self.rows_read += 1;
                    return Some(row);
                }
                Err(e) => {
                    self.stop(Some(e));
                    return None;
                }
            }
        }
    }
}

/// Gzip-decode an arbitrary byte source into log rows.
pub fn gz_lines<S: Read>(source: S) -> TextLogReader<BufReader<MultiGzDecoder<S>>> {
    TextLogReader::from_reader(BufReader::new(MultiGzDecoder::new(source)))
}

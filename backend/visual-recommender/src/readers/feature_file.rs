// Binary image-feature file reader
//
// Record layout: 8-byte item id followed by FEATURE_DIM little-endian f32s.

use crate::error::{AppError, Result};
use crate::models::{RawItemId, FEATURE_DIM, ITEM_ID_BYTES};
use ndarray::Array1;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, error};

const FEATURE_BLOCK_BYTES: usize = 4 * FEATURE_DIM;

/// One decoded record of the feature file
#[derive(Debug, Clone)]
pub struct FeatureRecord {
    pub raw_id: RawItemId,
    pub features: Array1<f32>,
}

/// Lazy, single-pass iterator over the records of a feature file.
///
/// A short identifier block ends the iteration cleanly. A short feature block
/// yields `AppError::TruncatedRecord` once and then the iterator is fused.
/// The underlying handle is dropped as soon as iteration stops either way.
pub struct FeatureFileReader<R: Read = BufReader<File>> {
    source: Option<R>,
    records_read: usize,
}

impl FeatureFileReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to open feature file");
            AppError::Io(e)
        })?;
        debug!(path = %path.display(), "Opened feature file");
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> FeatureFileReader<R> {
    pub fn from_reader(source: R) -> Self {
        Self {
            source: Some(source),
            records_read: 0,
        }
    }

    /// Number of complete records yielded so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    fn read_record(source: &mut R) -> Result<Option<FeatureRecord>> {
        let mut id_buf = [0u8; ITEM_ID_BYTES];
        if read_full(source, &mut id_buf)? < ITEM_ID_BYTES {
            return Ok(None);
        }
        let raw_id = RawItemId::Bytes(id_buf);

        let mut block = vec![0u8; FEATURE_BLOCK_BYTES];
        let actual = read_full(source, &mut block)?;
        if actual < FEATURE_BLOCK_BYTES {
            return Err(AppError::TruncatedRecord {
                item_id: raw_id.display_lossy(),
                expected: FEATURE_BLOCK_BYTES,
                actual,
            });
        }

        let features: Array1<f32> = block
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Some(FeatureRecord { raw_id, features }))
    }
}

impl<R: Read> Iterator for FeatureFileReader<R> {
    type Item = Result<FeatureRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source.as_mut()?;
        match Self::read_record(source) {
            Ok(Some(record)) => {
                self.records_read += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                debug!(records = self.records_read, "Reached end of feature file");
                self.source = None;
                None
            }
            Err(e) => {
                self.source = None;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the source allows; returns the number of bytes read.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

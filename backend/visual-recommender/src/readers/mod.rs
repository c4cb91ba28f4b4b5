//! Streaming decoders for the three offline inputs.
//!
//! Both readers are plain `Iterator`s: each record is decoded on demand and
//! the file handle is released once the iterator stops or is dropped.

pub mod feature_file;
pub mod text_log;

pub use feature_file::{FeatureFileReader, FeatureRecord};
pub use text_log::{Row, TextLogReader};

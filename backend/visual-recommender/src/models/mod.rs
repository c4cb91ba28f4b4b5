// Domain models for the visual recommender

use crate::error::{AppError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Number of `f32` values in every item feature vector
pub const FEATURE_DIM: usize = 4096;

/// Width of the identifier slot that precedes each feature block
pub const ITEM_ID_BYTES: usize = 8;

pub type ItemId = String;
pub type OwnerId = String;
pub type UserId = String;

/// Item identifier as produced by a reader, before it is used as a map key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawItemId {
    /// Fixed 8-byte slot from the binary feature file
    Bytes([u8; ITEM_ID_BYTES]),
    /// Identifier that is already text
    Text(String),
}

impl RawItemId {
    /// Decode into the canonical string form.
    ///
    /// Byte slots are read as UTF-8 verbatim (no trimming of padding).
    pub fn decode(self) -> Result<ItemId> {
        match self {
            RawItemId::Bytes(bytes) => String::from_utf8(bytes.to_vec()).map_err(|e| {
                AppError::InvalidItemId(format!("{:?} is not valid UTF-8: {}", bytes, e))
            }),
            RawItemId::Text(text) => Ok(text),
        }
    }

    /// Lossy rendering for log and error messages
    pub fn display_lossy(&self) -> String {
        match self {
            RawItemId::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            RawItemId::Text(text) => text.clone(),
        }
    }
}

/// Interaction timestamp as found in the log.
///
/// Digit-only fields become `Integer`; everything else is kept as `Raw`.
/// Ordering: any `Integer` is greater than any `Raw`, integers compare
/// numerically and raws compare lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Integer(i64),
    Raw(String),
}

impl Timestamp {
    pub fn parse(field: &str) -> Self {
        if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = field.parse::<i64>() {
                return Timestamp::Integer(value);
            }
        }
        Timestamp::Raw(field.to_string())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Timestamp::Integer(value) => Some(*value),
            Timestamp::Raw(_) => None,
        }
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Timestamp::Integer(a), Timestamp::Integer(b)) => a.cmp(b),
            (Timestamp::Raw(a), Timestamp::Raw(b)) => a.cmp(b),
            (Timestamp::Integer(_), Timestamp::Raw(_)) => Ordering::Greater,
            (Timestamp::Raw(_), Timestamp::Integer(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Integer(value) => write!(f, "{}", value),
            Timestamp::Raw(raw) => f.write_str(raw),
        }
    }
}

/// One entry of an interaction sequence.
///
/// In a user's history `counterpart` is the item; in an item's history it is
/// the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub counterpart: String,
    pub timestamp: Timestamp,
}

impl Interaction {
    pub fn new(counterpart: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            counterpart: counterpart.into(),
            timestamp,
        }
    }
}

/// Recommendation candidate with its cosine score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub score: f32,
    pub item_id: ItemId,
}

impl ScoredItem {
    /// Descending order on `(score, item_id)`.
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.item_id.cmp(&self.item_id))
    }
}

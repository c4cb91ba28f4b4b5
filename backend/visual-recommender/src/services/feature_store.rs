use crate::error::{AppError, Result};
use crate::models::ItemId;
use crate::readers::{FeatureFileReader, FeatureRecord};
use crate::utils::l2_norm;
use indexmap::IndexMap;
use ndarray::{Array1, ArrayView1};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct StoredFeature {
    vector: Array1<f32>,
    norm: f32,
}

/// In-memory item -> feature vector mapping, in file order.
///
/// **Bounds**: holds at most the `limit` passed to [`FeatureStore::load`].
/// Each item's L2 norm is computed once on insert and reused by every
/// recommendation pass.
#[derive(Debug, Default, Clone)]
pub struct FeatureStore {
    features: IndexMap<ItemId, StoredFeature>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the first `limit` records of a binary feature file.
    ///
    /// `None` or `Some(0)` loads every record.
    ///
    /// # Errors
    /// `AppError::Io` if the file cannot be opened or read,
    /// `AppError::TruncatedRecord` for a short feature block within the
    /// loaded range, `AppError::InvalidItemId` for a non-UTF-8 identifier.
    pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), limit = ?limit, "Loading item features");

        let store = Self::from_records(FeatureFileReader::open(path)?, limit)?;

        info!(path = %path.display(), items = store.len(), "Loaded item features");
        Ok(store)
    }

    /// Build a store from decoded records, stopping after `limit` records.
    ///
    /// No record past the limit is pulled from the iterator.
    pub fn from_records<I>(records: I, limit: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = Result<FeatureRecord>>,
    {
        let limit = limit.filter(|&n| n > 0).unwrap_or(usize::MAX);
        let mut store = Self::new();

        for record in records.into_iter().take(limit) {
            let FeatureRecord { raw_id, features } = record?;
            store.insert(raw_id.decode()?, features)?;
        }

        debug!(items = store.len(), "Feature store populated");
        Ok(store)
    }

    /// Insert or replace an item's vector.
    ///
    /// Every vector in a store has the same length; the first insert fixes it.
    pub fn insert(&mut self, item_id: ItemId, vector: Array1<f32>) -> Result<()> {
        if let Some(expected) = self.dimension() {
            if vector.len() != expected {
                return Err(AppError::DimensionMismatch {
                    item_id,
                    expected,
                    actual: vector.len(),
                });
            }
        }

        let norm = l2_norm(vector.view());
        self.features.insert(item_id, StoredFeature { vector, norm });
        Ok(())
    }

    pub fn get(&self, item_id: &str) -> Option<ArrayView1<'_, f32>> {
        self.features.get(item_id).map(|f| f.vector.view())
    }

    pub fn norm(&self, item_id: &str) -> Option<f32> {
        self.features.get(item_id).map(|f| f.norm)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.features.contains_key(item_id)
    }

    /// Iterate `(item_id, vector, norm)` in load order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, ArrayView1<'_, f32>, f32)> + '_ {
        self.features
            .iter()
            .map(|(id, f)| (id, f.vector.view(), f.norm))
    }

    /// Length of the stored vectors, None while empty
    pub fn dimension(&self) -> Option<usize> {
        self.features.values().next().map(|f| f.vector.len())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

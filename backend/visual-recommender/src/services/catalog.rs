// One-shot bootstrap of every in-memory structure

use super::{ContentRecommender, FeatureStore, InteractionIndex, OwnershipIndex};
use crate::config::Config;
use crate::error::Result;
use crate::readers::TextLogReader;
use std::time::Instant;
use tracing::info;

/// Everything the recommender reads, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub ownership: OwnershipIndex,
    pub interactions: InteractionIndex,
    pub features: FeatureStore,
}

impl Catalog {
    /// Build the indices from the two text logs, then load the feature file.
    ///
    /// # Errors
    /// Only the feature file can fail the load; missing or corrupt text logs
    /// degrade to empty indices.
    pub fn load(config: &Config) -> Result<Self> {
        let started = Instant::now();

        let ownership = OwnershipIndex::build(TextLogReader::open(&config.items_to_owners_path));
        let interactions = InteractionIndex::build(TextLogReader::open(&config.appreciate_path));
        let features = FeatureStore::load(&config.image_features_path, config.feature_limit())?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog loaded"
        );

        Ok(Self {
            ownership,
            interactions,
            features,
        })
    }

    pub fn recommender(&self) -> ContentRecommender<'_> {
        ContentRecommender::new(&self.features, &self.interactions)
    }
}

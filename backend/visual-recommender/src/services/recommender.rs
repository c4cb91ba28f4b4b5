//! Content-based Recommender
//!
//! Averages the feature vectors of a user's most recent interactions into a
//! profile and ranks every unseen item in the feature store by cosine
//! similarity to it.
//!
//! Algorithm:
//! 1. Take the user's history sorted by timestamp (descending, stable)
//! 2. Keep the first `recent_n` items that have features
//! 3. Profile = element-wise mean of those vectors
//! 4. Score every stored item the user has never interacted with
//! 5. Sort by (score, item_id) descending and keep `top_k`

use super::{FeatureStore, InteractionIndex};
use crate::models::{Interaction, ScoredItem};
use crate::utils::{cosine_similarity, l2_norm, mean_vector, SIMILARITY_EPSILON};
use ndarray::ArrayView1;
use std::collections::HashSet;
use tracing::debug;

pub struct ContentRecommender<'a> {
    features: &'a FeatureStore,
    interactions: &'a InteractionIndex,
}

impl<'a> ContentRecommender<'a> {
    pub fn new(features: &'a FeatureStore, interactions: &'a InteractionIndex) -> Self {
        Self {
            features,
            interactions,
        }
    }

    /// Rank unseen items for `user_id`.
    ///
    /// # Returns
    /// At most `top_k` items, highest score first. Empty when the user has no
    /// history or none of their recent items has features.
    pub fn recommend(&self, user_id: &str, top_k: usize, recent_n: usize) -> Vec<ScoredItem> {
        let history = match self.interactions.history(user_id) {
            Some(history) if !history.is_empty() => history,
            _ => {
                debug!(user_id = %user_id, "No interaction history, nothing to recommend");
                return Vec::new();
            }
        };

        let vectors: Vec<ArrayView1<'_, f32>> = recent_items(history, recent_n)
            .filter_map(|item_id| self.features.get(item_id))
            .collect();

        let profile = match mean_vector(&vectors) {
            Some(profile) => profile,
            None => {
                debug!(
                    user_id = %user_id,
                    recent_n = recent_n,
                    "No recent items have features, nothing to recommend"
                );
                return Vec::new();
            }
        };
        let profile_norm = l2_norm(profile.view()) + SIMILARITY_EPSILON;

        let seen: HashSet<&str> = history.iter().map(|i| i.counterpart.as_str()).collect();

        let mut scores: Vec<ScoredItem> = self
            .features
            .iter()
            .filter(|(item_id, _, _)| !seen.contains(item_id.as_str()))
            .map(|(item_id, vec, norm)| ScoredItem {
                score: cosine_similarity(profile.view(), profile_norm, vec, norm),
                item_id: item_id.clone(),
            })
            .collect();

        scores.sort_by(ScoredItem::cmp_desc);
        scores.truncate(top_k);

        debug!(
            user_id = %user_id,
            profile_items = vectors.len(),
            seen_items = seen.len(),
            returned = scores.len(),
            "Scored candidates"
        );

        scores
    }
}

/// Item ids of the `recent_n` newest interactions, newest first.
///
/// The sort is stable, so equal timestamps keep arrival order.
fn recent_items(history: &[Interaction], recent_n: usize) -> impl Iterator<Item = &str> {
    let mut ordered: Vec<&Interaction> = history.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    ordered
        .into_iter()
        .take(recent_n)
        .map(|i| i.counterpart.as_str())
}

// Human-readable output of the demo driver

use crate::models::{ScoredItem, UserId};
use crate::services::Catalog;
use crate::utils::format_count;
use std::fmt;

pub const NO_INTERACTIONS_MESSAGE: &str =
    "No user interactions available to generate recommendations.";

/// Sizes of the loaded structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryReport {
    pub items_with_owners: usize,
    pub owners_with_items: usize,
    pub users_with_interactions: usize,
    pub items_with_interactions: usize,
    pub loaded_item_features: usize,
}

impl SummaryReport {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            items_with_owners: catalog.ownership.item_count(),
            owners_with_items: catalog.ownership.owner_count(),
            users_with_interactions: catalog.interactions.user_count(),
            items_with_interactions: catalog.interactions.item_count(),
            loaded_item_features: catalog.features.len(),
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "items with owners: {}", format_count(self.items_with_owners))?;
        writeln!(f, "owners with items: {}", format_count(self.owners_with_items))?;
        writeln!(
            f,
            "users with interactions: {}",
            format_count(self.users_with_interactions)
        )?;
        writeln!(
            f,
            "items with interactions: {}",
            format_count(self.items_with_interactions)
        )?;
        write!(
            f,
            "loaded item features: {}",
            format_count(self.loaded_item_features)
        )
    }
}

/// Ranked list for one user
#[derive(Debug, Clone)]
pub struct RecommendationReport {
    pub user_id: UserId,
    pub items: Vec<ScoredItem>,
}

impl fmt::Display for RecommendationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample user: {}", self.user_id)?;
        for (rank, item) in self.items.iter().enumerate() {
            write!(
                f,
                "\n{:02}. {} (score={:.4})",
                rank + 1,
                item.item_id,
                item.score
            )?;
        }
        Ok(())
    }
}

/// The configured user if any, otherwise the first user of the interaction log.
pub fn pick_sample_user(catalog: &Catalog, configured: Option<&str>) -> Option<UserId> {
    match configured {
        Some(user) => Some(user.to_string()),
        None => catalog.interactions.first_user().cloned(),
    }
}

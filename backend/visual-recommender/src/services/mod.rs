pub mod catalog;
pub mod feature_store;
pub mod indexing;
pub mod recommender;

pub use catalog::Catalog;
pub use feature_store::FeatureStore;
pub use indexing::{InteractionIndex, OwnershipIndex};
pub use recommender::ContentRecommender;

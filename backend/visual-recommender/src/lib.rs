pub mod config;
pub mod error;
pub mod models;
pub mod readers;
pub mod report;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{Interaction, RawItemId, ScoredItem, Timestamp, FEATURE_DIM};
pub use services::{Catalog, ContentRecommender, FeatureStore, InteractionIndex, OwnershipIndex};

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_IMAGE_FEATURES_PATH: &str = "data/Behance_Image_Features.b";
const DEFAULT_ITEMS_TO_OWNERS_PATH: &str = "data/Behance_Item_to_Owners.gz";
const DEFAULT_APPRECIATE_PATH: &str = "data/Behance_appreciate_1M.gz";
const DEFAULT_IMAGE_FEATURE_LIMIT: usize = 70_000;
const DEFAULT_TOP_K: usize = 5;
const DEFAULT_RECENT_N: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Input files
    pub image_features_path: PathBuf,
    pub items_to_owners_path: PathBuf,
    pub appreciate_path: PathBuf,

    /// Maximum number of feature records to load; 0 loads everything
    pub image_feature_limit: usize,

    // Recommendation demo
    pub top_k: usize,
    pub recent_n: usize,
    #[serde(default)]
    pub sample_user: Option<String>,

    // Observability
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_features_path: PathBuf::from(DEFAULT_IMAGE_FEATURES_PATH),
            items_to_owners_path: PathBuf::from(DEFAULT_ITEMS_TO_OWNERS_PATH),
            appreciate_path: PathBuf::from(DEFAULT_APPRECIATE_PATH),
            image_feature_limit: DEFAULT_IMAGE_FEATURE_LIMIT,
            top_k: DEFAULT_TOP_K,
            recent_n: DEFAULT_RECENT_N,
            sample_user: None,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `VISUAL_REC_*` environment variables
    /// (a `.env` file is honoured).
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("image_features_path", DEFAULT_IMAGE_FEATURES_PATH)?
            .set_default("items_to_owners_path", DEFAULT_ITEMS_TO_OWNERS_PATH)?
            .set_default("appreciate_path", DEFAULT_APPRECIATE_PATH)?
            .set_default("image_feature_limit", DEFAULT_IMAGE_FEATURE_LIMIT as i64)?
            .set_default("top_k", DEFAULT_TOP_K as i64)?
            .set_default("recent_n", DEFAULT_RECENT_N as i64)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .add_source(
                config::Environment::with_prefix("VISUAL_REC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("image_features_path", &self.image_features_path),
            ("items_to_owners_path", &self.items_to_owners_path),
            ("appreciate_path", &self.appreciate_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AppError::Configuration(format!("{} must not be empty", name)));
            }
        }

        if self.top_k == 0 {
            return Err(AppError::Configuration(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if self.recent_n == 0 {
            return Err(AppError::Configuration(
                "recent_n must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            return Err(AppError::Configuration(format!(
                "log_format must be 'pretty' or 'json', got '{}'",
                self.log_format
            )));
        }

        Ok(())
    }

    /// Feature load limit, `None` meaning "load everything"
    pub fn feature_limit(&self) -> Option<usize> {
        match self.image_feature_limit {
            0 => None,
            n => Some(n),
        }
    }
}

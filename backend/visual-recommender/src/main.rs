use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use visual_recommender::report::{
    pick_sample_user, RecommendationReport, SummaryReport, NO_INTERACTIONS_MESSAGE,
};
use visual_recommender::{Catalog, Config};

fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(&config);

    config
        .validate()
        .context("Configuration validation failed")?;
    info!(
        features = %config.image_features_path.display(),
        owners = %config.items_to_owners_path.display(),
        interactions = %config.appreciate_path.display(),
        limit = ?config.feature_limit(),
        "Configuration loaded and validated"
    );

    let catalog = match Catalog::load(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            if e.is_corrupt_input() {
                error!(error = %e, "Feature file is malformed, aborting");
            }
            return Err(e).context("Failed to load catalog");
        }
    };

    println!("{}", SummaryReport::from_catalog(&catalog));

    let Some(user_id) = pick_sample_user(&catalog, config.sample_user.as_deref()) else {
        println!("{}", NO_INTERACTIONS_MESSAGE);
        return Ok(());
    };

    let items = catalog
        .recommender()
        .recommend(&user_id, config.top_k, config.recent_n);
    if items.is_empty() {
        warn!(user_id = %user_id, "No recommendations produced for sample user");
    }

    println!("{}", RecommendationReport { user_id, items });
    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the report.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

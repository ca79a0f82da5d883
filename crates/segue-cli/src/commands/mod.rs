pub mod config;
pub mod recommend;
pub mod serve;
pub mod status;

pub use recommend::run_recommend;
pub use serve::run_serve;
pub use status::show_status;

use anyhow::{Context, Result};
use segue_core::Recommender;
use segue_web::Config;

/// Load both artifacts named by the configuration.
pub fn load_recommender(config: &Config) -> Result<Recommender> {
    log::info!(
        "Loading catalog {} and similarity matrix {}",
        config.catalog_path.display(),
        config.similarity_path.display()
    );
    Recommender::load(
        &config.catalog_path,
        &config.similarity_path,
        config.recommend_options(),
    )
    .context("Failed to load recommendation artifacts")
}

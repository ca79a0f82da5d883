use anyhow::Result;
use segue_web::Config;
use std::sync::Arc;

use super::load_recommender;

pub async fn run_serve(config: &Config) -> Result<()> {
    let recommender = load_recommender(config)?;
    log::info!(
        "Serving {} songs (cutoff {}, limit {}, exclusion {:?})",
        recommender.catalog().len(),
        config.cutoff,
        config.limit,
        config.exclusion
    );

    segue_web::serve(Arc::new(recommender), &config.bind_addr()).await?;
    Ok(())
}

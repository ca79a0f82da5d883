use anyhow::Result;
use segue_web::Config;

use super::load_recommender;

pub fn show_status(config: &Config) -> Result<()> {
    println!("\nSegue Status\n");
    println!(
        "  Catalog:    {} ({})",
        config.catalog_path.display(),
        presence(config.catalog_path.exists())
    );
    println!(
        "  Similarity: {} ({})",
        config.similarity_path.display(),
        presence(config.similarity_path.exists())
    );

    match load_recommender(config) {
        Ok(recommender) => {
            println!("  Songs:      {}", recommender.catalog().len());
            println!("\n  Ready. Run `segue serve` to start the web front-end.");
        }
        Err(e) => {
            println!("\n  ✗ Artifacts failed to load: {e:#}");
            println!("\n  Point --catalog/--similarity (or the config file) at valid artifacts.");
        }
    }

    Ok(())
}

fn presence(exists: bool) -> &'static str {
    if exists {
        "found"
    } else {
        "missing"
    }
}

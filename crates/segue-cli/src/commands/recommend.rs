use anyhow::Result;
use segue_core::Recommendation;
use segue_web::views::NOT_FOUND_MESSAGE;
use segue_web::Config;

use super::load_recommender;

/// Look up one song and print what it resolves to.
pub fn run_recommend(config: &Config, song: &str, json: bool) -> Result<()> {
    let recommender = load_recommender(config)?;
    let result = recommender.recommend(song);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        Recommendation::Found {
            song,
            recommendations,
            ..
        } => {
            println!("Matched: {song}\n");
            if recommendations.is_empty() {
                println!("  No other songs to recommend.");
            }
            for (rank, rec) in recommendations.iter().enumerate() {
                println!("  {:>2}. {} ({:.3})", rank + 1, rec.title, rec.score);
            }
        }
        Recommendation::NotFound => {
            println!("{NOT_FOUND_MESSAGE}");
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use segue_web::Config;
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "segue", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the song catalog (default: ~/.local/share/segue/catalog.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Path to the similarity matrix (default: ~/.local/share/segue/similarity.json)
    #[arg(long, global = true)]
    similarity: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Serve the recommendation web front-end
    ///
    /// Loads the catalog and similarity matrix once, then answers requests
    /// until interrupted with Ctrl-C:
    ///
    /// - GET  /                 search form
    /// - POST /recommend        form field `song`; result page or "not found"
    /// - GET  /api/recommend    query parameter `song`; JSON
    /// - GET  /health           liveness and catalog size
    ///
    /// The server refuses to start if either artifact is missing, malformed,
    /// or if the matrix size does not match the catalog.
    Serve {
        /// Interface to bind (overrides config `host`)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config `port`)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Look up a song and print its recommendations
    Recommend {
        /// Song name; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        song: Vec<String>,

        /// Number of recommendations (overrides config `limit`)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show artifact locations and whether they load
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it is missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = cli.similarity {
        config.similarity_path = path;
    }

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    logging::init(level, config.log_coloured)?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            config.validate()?;
            commands::run_serve(&config).await?;
        }
        Commands::Recommend { song, limit, json } => {
            if let Some(limit) = limit {
                config.limit = limit;
            }
            config.validate()?;
            commands::run_recommend(&config, &song.join(" "), json)?;
        }
        Commands::Status => {
            commands::show_status(&config)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}

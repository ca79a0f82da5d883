use anyhow::Result;
use segue_web::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("# Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "# File exists: {}",
        if exists { "yes" } else { "no (using defaults)" }
    );
    println!("# Priority: CLI args > ENV vars (SEGUE_*) > Config file > Defaults\n");

    print!("{}", config.to_toml()?);
    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure segue.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

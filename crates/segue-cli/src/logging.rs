use anyhow::Result;
use twyg::{LogLevel, OptsBuilder};

/// Install the twyg logger behind the `log` facade.
///
/// `level` is one of trace, debug, info, warn, error; anything else falls
/// back to info.
pub fn init(level: &str, coloured: bool) -> Result<()> {
    let opts = OptsBuilder::new()
        .coloured(coloured)
        .level(parse_level(level))
        .report_caller(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build logger options: {}", e))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;
    Ok(())
}

fn parse_level(level: &str) -> LogLevel {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "warn" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

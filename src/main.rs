use anyhow::{Context, Result};
use log::LevelFilter;

use taskdesk::config::Config;
use taskdesk::logger::Logger;
use taskdesk::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;

    let logger = Logger::from_config(config.logging.enabled)?;
    let level = if args.iter().any(|arg| arg == "--debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger.install(level)?;

    if config.api.resolve_csrf_token().is_none() {
        eprintln!(
            "⚠️  No CSRF token configured; set {} or api.csrf_token to enable writes",
            config.api.csrf_token_env
        );
    }

    // Run the TUI application
    ui::run_app(config, logger).await?;

    Ok(())
}

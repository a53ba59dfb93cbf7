use anyhow::Context;
use copiloto::{
    config::{get_config, initialize_config},
    logging::init_logging,
    ui::run_ui,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    initialize_config().context("failed to load configuration")?;
    let config = get_config();

    // Dropping the handle flushes and stops the logger.
    let _logger = init_logging(&config).context("failed to start logging")?;
    log::info!("Starting {} against {}", config.agent_name, config.base_url);

    if let Err(e) = run_ui(config).await {
        log::error!("Terminal UI failed: {}", e);
        return Err(e).context("terminal UI failed");
    }

    log::info!("Session closed");
    Ok(())
}

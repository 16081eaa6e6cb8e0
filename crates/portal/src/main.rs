mod cli;
mod config;
mod domain;
mod errors;
mod handlers;
mod models;
mod routes;
mod server;
mod service;
mod utils;

use cli::Cli;
use server::run;
use utils::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging first so warnings from argument resolution are emitted
    logging::init_logging()?;

    // Parse CLI arguments
    let config = Cli::parse_config().await?;

    // Serve the portal until shutdown
    if let Err(e) = run(config).await {
        tracing::error!("Failed to run MCP portal: {}", e);
        return Err(e.into());
    }

    Ok(())
}

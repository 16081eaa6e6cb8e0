use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use tracing_subscriber::{self, EnvFilter};

mod core;
mod server;

use crate::core::logger::{FileLogger, Logger, TracingLogger};
use crate::core::provider::TimeServer;

/// Time MCP Server
///
/// Timezone queries, conversions and date arithmetic over MCP stdio:
/// - Tools: current time, conversion, timezone info, add/subtract time, common timezones
/// - Prompts: timezone comparison, meeting scheduler
/// - Resources: current UTC time, timezone catalog, help
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-server-time
#[derive(Parser, Debug)]
#[command(name = "mcp-server-time")]
#[command(about = "MCP server for timezone-aware time operations")]
#[command(version)]
struct Args {
    /// Append operation logs to this file (stdout is reserved for the protocol)
    #[arg(long, env = "TIME_MCP_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging only if LOG_LEVEL environment variable is set
    if let Ok(log_level) = env::var("LOG_LEVEL") {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();

        tracing::info!("Starting Time MCP server with log level: {}", log_level);
    }

    let logger: Arc<dyn Logger> = match args.log_file {
        Some(path) => {
            tracing::info!("Writing operation logs to {}", path.display());
            Arc::new(FileLogger::new(path))
        }
        None => Arc::new(TracingLogger),
    };
    logger.info("Time MCP Server starting up...", None);

    let time_server = TimeServer::with_capabilities(Arc::new(DefaultClock), logger);

    if let Err(e) = server::run(time_server).await {
        tracing::error!("Error running Time MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::domain::LocalFileSystem;
use crate::errors::{PortalError, PortalResult};
use crate::routes::create_router;
use crate::service::DiscoveryService;

/// Bind the listener and serve the portal until the process stops
pub async fn run(config: Config) -> PortalResult<()> {
    let discovery = Arc::new(DiscoveryService::new(
        Arc::new(LocalFileSystem),
        config.servers_dir().clone(),
        *config.readme_preview_bytes(),
    ));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| PortalError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!("MCP Server Portal running on http://{}", address);
    tracing::info!("Scanning servers from: {}", discovery.root().display());
    tracing::info!("Serving static files from: {}", config.public_dir().display());

    let servers = discovery.list_all().await;
    tracing::info!("Found {} MCP server(s)", servers.len());
    for server in &servers {
        tracing::info!("  - {} ({})", server.name, server.version);
    }

    let router = create_router(discovery, config.public_dir());
    axum::serve(listener, router).await?;

    Ok(())
}

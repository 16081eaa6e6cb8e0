use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::Config;
use crate::errors::{PortalError, PortalResult};

/// MCP Server Portal
///
/// Scans a directory of MCP server folders and serves a browsable catalog.
///
/// ## Features
/// - **Discovery**: Reads `package.json`, `mcp-config.json` and `README.md` of every server folder
/// - **API**: JSON listing, per-server details, README content and setup snippets
/// - **Browser**: Static HTML/JS front end served from the public directory
///
/// ## Development
/// ```bash
/// RUST_LOG=debug cargo run --bin mcp-portal -- --servers-dir ./servers
/// ```
///
/// ## Environment Variables
/// - `MCP_SERVERS_DIR`: Root directory holding the server folders
/// - `PORT`: HTTP port to listen on
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-portal")]
#[command(about = "A web portal for browsing local MCP servers")]
#[command(version)]
#[command(
    long_about = "Discovers MCP server folders under a root directory and serves their metadata, \nREADMEs and generated Claude Desktop configuration over HTTP."
)]
pub struct Cli {
    /// Directory containing one subfolder per MCP server
    #[arg(
        long,
        env = "MCP_SERVERS_DIR",
        default_value = "../servers",
        value_name = "DIRECTORY"
    )]
    pub servers_dir: PathBuf,

    /// Directory holding the static front end
    #[arg(long, default_value = "public", value_name = "DIRECTORY")]
    pub public_dir: PathBuf,

    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Number of README bytes used for previews and feature extraction
    #[arg(long, default_value_t = 300, value_name = "BYTES")]
    pub readme_preview_bytes: usize,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub async fn parse_config() -> PortalResult<Config> {
        Self::parse().into_config().await
    }

    /// Resolve directories to absolute paths and build the configuration
    pub async fn into_config(self) -> PortalResult<Config> {
        let servers_dir = resolve_directory(&self.servers_dir).await?;
        let public_dir = resolve_directory(&self.public_dir).await?;
        Ok(Config::new(
            servers_dir,
            public_dir,
            self.host,
            self.port,
            self.readme_preview_bytes,
        ))
    }
}

/// Make `path` absolute, rejecting paths that exist but are not directories.
///
/// A missing directory is accepted: the portal then serves an empty catalog.
async fn resolve_directory(path: &Path) -> PortalResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    match tokio::fs::metadata(&absolute).await {
        Ok(metadata) if !metadata.is_dir() => Err(PortalError::InvalidDirectory {
            path: absolute.display().to_string(),
        }),
        Ok(_) => Ok(tokio::fs::canonicalize(&absolute).await?),
        Err(_) => {
            tracing::warn!("Directory does not exist yet: {}", absolute.display());
            Ok(absolute)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mcp-portal"]).unwrap();
        assert_eq!(cli.public_dir, PathBuf::from("public"));
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.readme_preview_bytes, 300);
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "mcp-portal",
            "--servers-dir",
            "/srv/mcp",
            "--port",
            "9090",
            "--host",
            "127.0.0.1",
            "--readme-preview-bytes",
            "64",
        ])
        .unwrap();
        assert_eq!(cli.servers_dir, PathBuf::from("/srv/mcp"));
        assert_eq!(cli.port, 9090);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.readme_preview_bytes, 64);
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["mcp-portal", "--port", "not-a-port"]).is_err());
    }

    #[tokio::test]
    async fn test_into_config_resolves_existing_directories() {
        let servers = TempDir::new().unwrap();
        let public = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "mcp-portal",
            "--servers-dir",
            servers.path().to_str().unwrap(),
            "--public-dir",
            public.path().to_str().unwrap(),
        ])
        .unwrap();

        let config = cli.into_config().await.unwrap();
        assert!(config.servers_dir().is_absolute());
        assert_eq!(
            config.servers_dir(),
            &tokio::fs::canonicalize(servers.path()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_accepted() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("not-created");

        let resolved = resolve_directory(&missing).await.unwrap();
        assert_eq!(resolved, missing);
    }

    #[tokio::test]
    async fn test_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("servers.txt");
        tokio::fs::write(&file, "not a dir").await.unwrap();

        let err = resolve_directory(&file).await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidDirectory { .. }));
    }
}

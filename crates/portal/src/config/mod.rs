use std::path::PathBuf;

use derive_getters::Getters;

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Getters)]
pub struct Config {
    servers_dir: PathBuf,
    public_dir: PathBuf,
    host: String,
    port: u16,
    readme_preview_bytes: usize,
}

impl Config {
    pub fn new(
        servers_dir: PathBuf,
        public_dir: PathBuf,
        host: String,
        port: u16,
        readme_preview_bytes: usize,
    ) -> Self {
        Self {
            servers_dir,
            public_dir,
            host,
            port,
            readme_preview_bytes,
        }
    }

    /// Address string handed to the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub mod manifest;
pub mod mcp_config;
pub mod record;
pub mod snippets;

pub use manifest::{Author, PackageManifest};
pub use mcp_config::McpConfig;
pub use record::ServerRecord;
pub use snippets::ServerSnippets;

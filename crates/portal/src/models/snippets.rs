use std::collections::BTreeMap;

use serde::Serialize;

use super::record::LaunchConfig;

/// Copy-paste artifacts generated for one server
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSnippets {
    pub configuration: DesktopConfiguration,
    pub install_steps: Vec<NumberedStep>,
    pub inspector_command: String,
}

/// `{"mcpServers": {"<id>": {command, args, env}}}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopConfiguration {
    pub mcp_servers: BTreeMap<String, LaunchConfig>,
}

impl DesktopConfiguration {
    pub fn single(id: &str, launch: LaunchConfig) -> Self {
        Self {
            mcp_servers: BTreeMap::from([(id.to_string(), launch)]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberedStep {
    pub step: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `GET /api/servers/{id}/readme` body
#[derive(Debug, Clone, Serialize)]
pub struct ReadmeContent {
    pub content: String,
}

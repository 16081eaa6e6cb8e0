use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unified view of one discovered server folder, as served by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub license: String,
    pub category: String,
    pub path: String,
    pub card: Card,
    pub details: Details,
    pub installation: Installation,
    pub inspector: Inspector,
    pub configuration: ClientConfiguration,

    // Legacy fields, kept for older front ends
    pub features: Vec<String>,
    pub readme: String,
    pub has_readme: bool,
    pub scripts: Map<String, Value>,
    pub dependencies: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub icon: String,
    pub color: String,
    pub short_description: String,
    pub features: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Details {
    pub overview: String,
    pub capabilities: Vec<Value>,
    pub tools: Vec<Value>,
    pub prompts: Vec<Value>,
    pub resources: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub dependencies: Map<String, Value>,
    pub dev_dependencies: Map<String, Value>,
    pub steps: Vec<InstallStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallStep {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InstallStep {
    pub fn new(title: &str, command: Option<&str>, description: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            command: command.map(str::to_string),
            description: description.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Inspector {
    pub enabled: bool,
    pub command: String,
    pub description: String,
    pub examples: Vec<Value>,
}

/// Client launch settings, keyed by client
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfiguration {
    pub claude_desktop: LaunchConfig,
}

/// How a client starts the server process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: Map<String, Value>,
}

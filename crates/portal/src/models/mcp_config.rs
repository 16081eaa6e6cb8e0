use serde::Deserialize;
use serde_json::{Map, Value};

use super::manifest::Author;
use super::record::{InstallStep, LaunchConfig};

/// Contents of a server's `mcp-config.json`
///
/// Every field is optional. Anything left out falls back to the manifest
/// or to a computed default when the record is built.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub author: Option<Author>,
    pub license: Option<String>,
    pub category: Option<String>,
    pub card: Option<CardConfig>,
    pub details: Option<DetailsConfig>,
    pub installation: Option<InstallationConfig>,
    pub inspector: Option<InspectorConfig>,
    pub configuration: Option<ConfigurationConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    pub icon: Option<String>,
    pub color: Option<String>,
    pub short_description: Option<String>,
    pub features: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsConfig {
    pub overview: Option<String>,
    pub capabilities: Option<Vec<Value>>,
    pub tools: Option<Vec<Value>>,
    pub prompts: Option<Vec<Value>>,
    pub resources: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationConfig {
    pub dependencies: Option<Map<String, Value>>,
    pub dev_dependencies: Option<Map<String, Value>>,
    pub steps: Option<Vec<InstallStep>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectorConfig {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    pub description: Option<String>,
    pub examples: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationConfig {
    pub claude_desktop: Option<LaunchConfig>,
}

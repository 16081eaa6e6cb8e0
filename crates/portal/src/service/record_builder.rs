use std::path::Path;

use serde_json::Map;

use crate::models::mcp_config::{
    CardConfig, ConfigurationConfig, DetailsConfig, InspectorConfig, InstallationConfig,
};
use crate::models::record::{
    Card, ClientConfiguration, Details, InstallStep, Installation, Inspector, LaunchConfig,
};
use crate::models::{Author, McpConfig, PackageManifest, ServerRecord};
use crate::service::fallback::{resolve, resolve_str};
use crate::service::features::extract_features;
use crate::service::icons::default_icon;

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_CATEGORY: &str = "utility";
pub const DEFAULT_CARD_COLOR: &str = "#3b82f6";
pub const DEFAULT_INSPECTOR_COMMAND: &str = "npm run inspector";

/// Everything read from one server folder
#[derive(Debug, Clone)]
pub struct FolderContents<'a> {
    pub folder: &'a str,
    pub path: &'a Path,
    pub manifest: PackageManifest,
    pub config: Option<McpConfig>,
    pub readme_preview: String,
    pub has_readme: bool,
}

fn default_install_steps() -> Vec<InstallStep> {
    vec![
        InstallStep::new(
            "Install dependencies",
            Some("npm install"),
            Some("Install all required dependencies"),
        ),
        InstallStep::new(
            "Build the server",
            Some("npm run build"),
            Some("Compile TypeScript to JavaScript"),
        ),
    ]
}

fn default_launch() -> LaunchConfig {
    LaunchConfig {
        command: "node".to_string(),
        args: vec!["build/index.js".to_string()],
        env: Map::new(),
    }
}

/// Merge a folder's config, manifest and README into a [`ServerRecord`].
///
/// Each field is resolved independently: config value, then manifest value,
/// then computed default. Legacy mirror fields are copied from the resolved
/// primary fields at the end.
pub fn build_record(contents: FolderContents<'_>) -> ServerRecord {
    let FolderContents {
        folder,
        path,
        manifest,
        config,
        readme_preview,
        has_readme,
    } = contents;

    let McpConfig {
        id,
        name,
        version,
        description,
        keywords,
        author,
        license,
        category,
        card,
        details,
        installation,
        inspector,
        configuration,
    } = config.unwrap_or_default();

    let id = resolve_str([id], folder);
    let name = resolve_str([name, manifest.name.clone()], folder);
    let version = resolve_str([version, manifest.version.clone()], DEFAULT_VERSION);
    let description = resolve_str(
        [description, manifest.description.clone()],
        DEFAULT_DESCRIPTION,
    );
    let keywords = resolve([keywords, manifest.keywords.clone()], Vec::new);
    let author = resolve_str(
        [
            author.as_ref().and_then(Author::name),
            manifest.author.as_ref().and_then(Author::name),
        ],
        DEFAULT_AUTHOR,
    );
    let license = resolve_str([license, manifest.license.clone()], DEFAULT_LICENSE);
    let category = resolve_str([category], DEFAULT_CATEGORY);

    let manifest_keywords = manifest.keywords.as_deref().unwrap_or_default();
    let card = build_card(
        card.unwrap_or_default(),
        folder,
        &description,
        &keywords,
        || extract_features(&readme_preview, manifest_keywords),
    );
    let details = build_details(details.unwrap_or_default(), &description);
    let installation = build_installation(installation.unwrap_or_default(), &manifest);
    let inspector = build_inspector(inspector.unwrap_or_default(), &name);
    let configuration = ClientConfiguration {
        claude_desktop: configuration
            .and_then(|ConfigurationConfig { claude_desktop }| claude_desktop)
            .unwrap_or_else(default_launch),
    };

    ServerRecord {
        features: card.features.clone(),
        dependencies: installation.dependencies.clone(),
        scripts: manifest.scripts.unwrap_or_default(),
        readme: readme_preview,
        has_readme,
        id,
        name,
        version,
        description,
        keywords,
        author,
        license,
        category,
        path: path.display().to_string(),
        card,
        details,
        installation,
        inspector,
        configuration,
    }
}

fn build_card(
    card: CardConfig,
    folder: &str,
    description: &str,
    keywords: &[String],
    features: impl FnOnce() -> Vec<String>,
) -> Card {
    Card {
        icon: resolve_str([card.icon], default_icon(folder)),
        color: resolve_str([card.color], DEFAULT_CARD_COLOR),
        short_description: resolve_str([card.short_description], description),
        features: resolve([card.features], features),
        tags: resolve([card.tags], || keywords.to_vec()),
    }
}

fn build_details(details: DetailsConfig, description: &str) -> Details {
    Details {
        overview: resolve_str([details.overview], description),
        capabilities: details.capabilities.unwrap_or_default(),
        tools: details.tools.unwrap_or_default(),
        prompts: details.prompts.unwrap_or_default(),
        resources: details.resources.unwrap_or_default(),
    }
}

fn build_installation(installation: InstallationConfig, manifest: &PackageManifest) -> Installation {
    Installation {
        dependencies: resolve(
            [installation.dependencies, manifest.dependencies.clone()],
            Map::new,
        ),
        dev_dependencies: resolve(
            [installation.dev_dependencies, manifest.dev_dependencies.clone()],
            Map::new,
        ),
        steps: resolve([installation.steps], default_install_steps),
    }
}

fn build_inspector(inspector: InspectorConfig, name: &str) -> Inspector {
    Inspector {
        enabled: resolve([inspector.enabled], || true),
        command: resolve_str([inspector.command], DEFAULT_INSPECTOR_COMMAND),
        description: resolve([inspector.description], || {
            format!("Test the {} with the MCP Inspector", name)
        }),
        examples: inspector.examples.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: serde_json::Value) -> PackageManifest {
        serde_json::from_value(value).unwrap()
    }

    fn config(value: serde_json::Value) -> Option<McpConfig> {
        Some(serde_json::from_value(value).unwrap())
    }

    fn contents<'a>(
        folder: &'a str,
        manifest: PackageManifest,
        config: Option<McpConfig>,
        readme: &str,
    ) -> FolderContents<'a> {
        FolderContents {
            folder,
            path: Path::new("/srv/servers/weather"),
            manifest,
            config,
            readme_preview: readme.to_string(),
            has_readme: !readme.is_empty(),
        }
    }

    #[test]
    fn test_manifest_only_defaults() {
        let record = build_record(contents("weather", PackageManifest::default(), None, ""));

        assert_eq!(record.id, "weather");
        assert_eq!(record.name, "weather");
        assert_eq!(record.version, DEFAULT_VERSION);
        assert_eq!(record.description, DEFAULT_DESCRIPTION);
        assert_eq!(record.author, DEFAULT_AUTHOR);
        assert_eq!(record.license, DEFAULT_LICENSE);
        assert_eq!(record.category, DEFAULT_CATEGORY);
        assert_eq!(record.path, "/srv/servers/weather");
        assert_eq!(record.card.icon, "fas fa-cloud-sun");
        assert_eq!(record.card.color, DEFAULT_CARD_COLOR);
        assert_eq!(record.card.short_description, DEFAULT_DESCRIPTION);
        assert_eq!(record.details.overview, DEFAULT_DESCRIPTION);
        assert!(record.details.tools.is_empty());
        assert_eq!(record.installation.steps, default_install_steps());
        assert!(record.inspector.enabled);
        assert_eq!(record.inspector.command, DEFAULT_INSPECTOR_COMMAND);
        assert_eq!(
            record.inspector.description,
            "Test the weather with the MCP Inspector"
        );
        assert_eq!(record.configuration.claude_desktop, default_launch());
        assert!(!record.has_readme);
        assert!(record.scripts.is_empty());
    }

    #[test]
    fn test_config_overrides_manifest() {
        let record = build_record(contents(
            "weather",
            manifest(json!({
                "name": "weather-pkg",
                "version": "0.3.0",
                "description": "Forecasts",
                "keywords": ["weather"],
                "author": {"name": "Ada"},
                "dependencies": {"zod": "^3.0.0"}
            })),
            config(json!({
                "id": "forecast",
                "name": "Forecast Server",
                "category": "data",
                "installation": {"dependencies": {"undici": "^6.0.0"}}
            })),
            "",
        ));

        assert_eq!(record.id, "forecast");
        assert_eq!(record.name, "Forecast Server");
        assert_eq!(record.version, "0.3.0");
        assert_eq!(record.description, "Forecasts");
        assert_eq!(record.author, "Ada");
        assert_eq!(record.category, "data");
        assert_eq!(record.installation.dependencies, record.dependencies);
        assert!(record.dependencies.contains_key("undici"));
        assert_eq!(
            record.inspector.description,
            "Test the Forecast Server with the MCP Inspector"
        );
    }

    #[test]
    fn test_blank_config_name_falls_back_to_manifest() {
        let record = build_record(contents(
            "weather",
            manifest(json!({"name": "weather-pkg"})),
            config(json!({"name": ""})),
            "",
        ));
        assert_eq!(record.name, "weather-pkg");
    }

    #[test]
    fn test_partial_card_config() {
        let record = build_record(contents(
            "weather",
            manifest(json!({"description": "Forecasts", "keywords": ["weather", "api"]})),
            config(json!({"card": {"icon": "fas fa-umbrella"}})),
            "- **Hourly forecasts**\n",
        ));

        assert_eq!(record.card.icon, "fas fa-umbrella");
        assert_eq!(record.card.color, DEFAULT_CARD_COLOR);
        assert_eq!(record.card.short_description, "Forecasts");
        assert_eq!(record.card.features, vec!["Hourly forecasts", "weather", "api"]);
        assert_eq!(record.card.tags, vec!["weather", "api"]);
        assert_eq!(record.features, record.card.features);
    }

    #[test]
    fn test_config_card_features_mirror_into_legacy_field() {
        let record = build_record(contents(
            "weather",
            PackageManifest::default(),
            config(json!({"card": {"features": []}})),
            "- **Ignored**\n",
        ));

        assert!(record.card.features.is_empty());
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_empty_config_keywords_are_kept() {
        let record = build_record(contents(
            "weather",
            manifest(json!({"keywords": ["weather"]})),
            config(json!({"keywords": []})),
            "",
        ));

        assert!(record.keywords.is_empty());
        assert!(record.card.tags.is_empty());
        // features still come from the manifest keywords
        assert_eq!(record.card.features, vec!["weather"]);
    }

    #[test]
    fn test_custom_launch_configuration() {
        let record = build_record(contents(
            "weather",
            PackageManifest::default(),
            config(json!({
                "configuration": {"claude_desktop": {"command": "python", "args": ["server.py"]}},
                "inspector": {"enabled": false}
            })),
            "",
        ));

        assert_eq!(record.configuration.claude_desktop.command, "python");
        assert!(record.configuration.claude_desktop.env.is_empty());
        assert!(!record.inspector.enabled);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = build_record(contents(
            "weather",
            manifest(json!({"devDependencies": {"typescript": "^5"}})),
            None,
            "readme",
        ));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["hasReadme"], true);
        assert_eq!(value["card"]["shortDescription"], DEFAULT_DESCRIPTION);
        assert_eq!(value["installation"]["devDependencies"]["typescript"], "^5");
        assert_eq!(value["configuration"]["claude_desktop"]["command"], "node");
        assert_eq!(value["installation"]["steps"][0]["command"], "npm install");
    }
}

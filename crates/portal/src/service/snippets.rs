use crate::models::record::{InstallStep, LaunchConfig};
use crate::models::snippets::{DesktopConfiguration, NumberedStep};
use crate::models::{ServerRecord, ServerSnippets};

/// Build the Claude Desktop config, numbered install steps and inspector
/// command for a record.
pub fn generate_snippets(record: &ServerRecord) -> ServerSnippets {
    let path = normalize_path(&record.path);

    ServerSnippets {
        configuration: DesktopConfiguration::single(
            &record.id,
            anchor_launch(&record.configuration.claude_desktop, &path),
        ),
        install_steps: install_steps(&record.installation.steps, &record.path),
        inspector_command: format!("cd \"{}\" && {}", record.path, record.inspector.command),
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Bare file arguments are made absolute against the server folder
fn anchor_launch(launch: &LaunchConfig, path: &str) -> LaunchConfig {
    let args = launch
        .args
        .iter()
        .map(|arg| {
            if arg.contains('/') {
                arg.clone()
            } else {
                format!("{}/{}", path, arg)
            }
        })
        .collect();

    LaunchConfig {
        command: launch.command.clone(),
        args,
        env: launch.env.clone(),
    }
}

fn install_steps(steps: &[InstallStep], path: &str) -> Vec<NumberedStep> {
    let navigate = InstallStep::new(
        "Navigate to server directory",
        Some(&format!("cd {}", path)),
        None,
    );
    let register = InstallStep::new(
        "Add to Claude Desktop",
        None,
        Some("Copy the configuration above and add it to your Claude Desktop settings."),
    );

    std::iter::once(navigate)
        .chain(steps.iter().cloned())
        .chain(std::iter::once(register))
        .enumerate()
        .map(|(index, step)| NumberedStep {
            step: index + 1,
            title: step.title,
            command: step.command,
            description: step.description,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackageManifest;
    use crate::service::record_builder::{FolderContents, build_record};
    use std::path::Path;

    fn record_at(path: &str, args: &[&str]) -> ServerRecord {
        let mut record = build_record(FolderContents {
            folder: "time",
            path: Path::new(path),
            manifest: PackageManifest::default(),
            config: None,
            readme_preview: String::new(),
            has_readme: false,
        });
        record.configuration.claude_desktop.args = args.iter().map(|a| a.to_string()).collect();
        record
    }

    #[test]
    fn test_args_without_slash_are_anchored() {
        let record = record_at("/srv/servers/time", &["build/index.js", "index.js"]);
        let snippets = generate_snippets(&record);

        let launch = &snippets.configuration.mcp_servers["time"];
        assert_eq!(launch.command, "node");
        assert_eq!(launch.args, vec!["build/index.js", "/srv/servers/time/index.js"]);
    }

    #[test]
    fn test_backslashes_are_normalized_in_args() {
        let record = record_at(r"C:\mcp\servers\time", &["index.js"]);
        let snippets = generate_snippets(&record);

        assert_eq!(
            snippets.configuration.mcp_servers["time"].args,
            vec!["C:/mcp/servers/time/index.js"]
        );
    }

    #[test]
    fn test_install_steps_are_wrapped_and_numbered() {
        let record = record_at("/srv/servers/time", &[]);
        let steps = generate_snippets(&record).install_steps;

        let titles: Vec<_> = steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Navigate to server directory",
                "Install dependencies",
                "Build the server",
                "Add to Claude Desktop"
            ]
        );
        assert_eq!(steps[0].command.as_deref(), Some("cd /srv/servers/time"));
        assert_eq!(steps.iter().map(|s| s.step).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(steps[3].command.is_none());
    }

    #[test]
    fn test_inspector_command() {
        let record = record_at("/srv/servers/time", &[]);
        assert_eq!(
            generate_snippets(&record).inspector_command,
            "cd \"/srv/servers/time\" && npm run inspector"
        );
    }

    #[test]
    fn test_configuration_json_shape() {
        let record = record_at("/srv/servers/time", &["build/index.js"]);
        let value = serde_json::to_value(generate_snippets(&record)).unwrap();

        assert_eq!(
            value["configuration"]["mcpServers"]["time"]["args"][0],
            "build/index.js"
        );
        assert!(value["configuration"]["mcpServers"]["time"]["env"].is_object());
        assert_eq!(value["installSteps"][0]["step"], 1);
        assert!(value["inspectorCommand"].is_string());
    }
}

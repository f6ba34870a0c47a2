use super::{active_integrations, DevcontainerConfig, Service};
use crate::constants::{API_PORT, EXPO_WEB_PORT, METRO_PORT, WEB_PORT};
use crate::copier::write_file;
use crate::error::{Error, Result};
use crate::template::TemplateData;
use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::{json, Value as Json};
use std::path::{Path, PathBuf};

const ASSISTANT_HOME: &str = "/home/node/.claude-code";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposeFile {
    pub services: IndexMap<String, ComposeService>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub volumes: IndexMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSpec>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub environment: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shm_size: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_hosts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<Healthcheck>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub depends_on: IndexMap<String, DependsOn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSpec {
    pub context: String,
    pub dockerfile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Healthcheck {
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

impl Healthcheck {
    pub fn new(test: &[&str], interval: &str, retries: u32) -> Self {
        Self {
            test: test.iter().map(|s| s.to_string()).collect(),
            interval: interval.to_string(),
            timeout: "5s".to_string(),
            retries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependsOn {
    pub condition: String,
}

/// Everything written to `.devcontainer/`.
#[derive(Debug, Clone, PartialEq)]
pub struct DevcontainerPlan {
    /// Dockerfile of the app image.
    pub image: String,
    pub services: ComposeFile,
    /// `devcontainer.json` contents.
    pub editor_integration: Json,
    /// `setup.sh`, run once after the container is created.
    pub startup_script: String,
    /// `setup-assistant.sh`, present when the assistant is enabled.
    pub assistant_script: Option<String>,
}

/// Database name used by the container services, e.g. `my_app_db`.
pub fn database_name(data: &TemplateData) -> String {
    format!("{}_db", data.project_name.to_snake_case())
}

/// Derives the development environment for `data` from `config`.
pub fn compose(data: &TemplateData, config: &DevcontainerConfig) -> DevcontainerPlan {
    DevcontainerPlan {
        image: dockerfile(config),
        services: compose_file(data, config),
        editor_integration: editor_settings(data, config),
        startup_script: setup_script(data, config),
        assistant_script: config.assistant.then(assistant_script),
    }
}

fn dockerfile(config: &DevcontainerConfig) -> String {
    let mut apt = vec!["git", "curl"];
    apt.extend(config.services().iter().filter_map(Service::apt_package));

    let mut globals = vec!["@expo/cli"];
    if config.assistant {
        globals.push("@anthropic-ai/claude-code");
    }

    let mut content = format!(
        r#"FROM node:20-bullseye

RUN apt-get update && apt-get install -y \
    {apt} \
    && rm -rf /var/lib/apt/lists/*

RUN corepack enable
ENV COREPACK_ENABLE_DOWNLOAD_PROMPT=0

RUN npm install -g {globals}

RUN git config --global init.defaultBranch main
RUN mkdir -p /workspace && chown -R node:node /workspace

WORKDIR /workspace
USER node
"#,
        apt = apt.join(" \\\n    "),
        globals = globals.join(" "),
    );

    for integration in active_integrations(config) {
        if let Some(setup) = integration.image_setup {
            content.push_str(&format!("\n# {}\n{}\n", integration.name, setup));
        }
    }
    if config.assistant {
        content.push_str(&format!("\nRUN mkdir -p {ASSISTANT_HOME}\n"));
    }
    content
}

fn compose_file(data: &TemplateData, config: &DevcontainerConfig) -> ComposeFile {
    let db_name = database_name(data);
    let mut file = ComposeFile::default();
    let mut app = ComposeService {
        build: Some(BuildSpec {
            context: ".".to_string(),
            dockerfile: "Dockerfile".to_string(),
        }),
        environment: IndexMap::from([("NODE_ENV".to_string(), "development".to_string())]),
        ports: [API_PORT, WEB_PORT, METRO_PORT, EXPO_WEB_PORT]
            .iter()
            .map(|port| format!("{port}:{port}"))
            .collect(),
        volumes: vec!["../:/workspace:cached".to_string()],
        command: Some("sleep infinity".to_string()),
        ..ComposeService::default()
    };

    for service in config.services() {
        file.services
            .insert(service.name().to_string(), service.compose_service(&db_name));
        if let Some(volume) = service.volume() {
            file.volumes.insert(volume.to_string(), serde_yaml::Value::Null);
        }
        let (key, value) = service.connection_env(&db_name);
        app.environment.insert(key.to_string(), value);
        if service.gates_app_start() {
            app.depends_on.insert(
                service.name().to_string(),
                DependsOn { condition: "service_healthy".to_string() },
            );
        }
    }

    if config.assistant {
        app.environment
            .insert("CLAUDE_CONFIG_DIR".to_string(), ASSISTANT_HOME.to_string());
        app.volumes.push(format!("assistant_data:{ASSISTANT_HOME}"));
        file.volumes
            .insert("assistant_data".to_string(), serde_yaml::Value::Null);
    }

    file.services.insert("app".to_string(), app);
    file
}

fn editor_settings(data: &TemplateData, config: &DevcontainerConfig) -> Json {
    let mut ports = vec![
        (API_PORT, "API Server", "notify"),
        (WEB_PORT, "Vite Dev Server", "openBrowser"),
        (METRO_PORT, "Metro Bundler", "notify"),
        (EXPO_WEB_PORT, "Expo Dev Tools", "openBrowser"),
    ];
    for service in config.services() {
        let (port, label) = service.forwarded_port();
        ports.push((port, label, "silent"));
    }

    let forward_ports: Vec<u16> = ports.iter().map(|(port, _, _)| *port).collect();
    let attributes: serde_json::Map<String, Json> = ports
        .iter()
        .map(|(port, label, action)| {
            (port.to_string(), json!({ "label": label, "onAutoForward": action }))
        })
        .collect();

    let mut settings = json!({
        "name": format!("{} Development", data.app_display_name),
        "dockerComposeFile": "docker-compose.yml",
        "service": "app",
        "workspaceFolder": "/workspace",
        "forwardPorts": forward_ports,
        "portsAttributes": attributes,
        "customizations": {
            "vscode": {
                "extensions": [
                    "msjsdiag.vscode-react-native",
                    "ms-vscode.vscode-typescript-next",
                    "dbaeumer.vscode-eslint",
                    "esbenp.prettier-vscode",
                    "redhat.vscode-yaml",
                    "ms-azuretools.vscode-docker",
                    "orta.vscode-jest",
                    "eamodio.gitlens"
                ],
                "settings": {
                    "terminal.integrated.defaultProfile.linux": "bash",
                    "editor.formatOnSave": true,
                    "editor.defaultFormatter": "esbenp.prettier-vscode",
                    "files.watcherExclude": {
                        "**/node_modules/**": true,
                        "**/.git/**": true,
                        "**/dist/**": true
                    },
                    "jest.jestCommandLine": "yarn test",
                    "jest.autoRun": "off"
                }
            }
        },
        "remoteUser": "node",
        "postCreateCommand": "bash .devcontainer/setup.sh"
    });
    if config.assistant {
        settings["postStartCommand"] = json!("bash .devcontainer/setup-assistant.sh");
    }
    settings
}

fn setup_script(data: &TemplateData, config: &DevcontainerConfig) -> String {
    let db_name = database_name(data);
    let services = config.services();

    let mut env = vec![
        format!("API_PORT={API_PORT}"),
        format!("WEB_PORT={WEB_PORT}"),
        "NODE_ENV=development".to_string(),
        "LOG_LEVEL=debug".to_string(),
    ];
    for service in &services {
        env.push(String::new());
        env.extend(service.env_lines(&db_name));
    }

    let waits: String = services.iter().map(Service::wait_block).collect();

    let integrations = active_integrations(config);
    let integration_setup = if integrations.is_empty() {
        String::new()
    } else {
        let commands: Vec<String> = integrations
            .iter()
            .map(|i| format!("# {}: {}\n{} 2>/dev/null || true", i.name, i.description, i.command))
            .collect();
        format!("\necho \"Configuring assistant tool integrations...\"\n{}\n", commands.join("\n"))
    };

    let prisma_setup = if data.has_prisma {
        r#"
echo "Generating database client..."
yarn db:generate
yarn db:push
if [ -d "packages/database/prisma/migrations" ]; then
    yarn db:migrate
fi
"#
    } else {
        ""
    };

    let mut commands = vec![
        "yarn dev           - Start all development servers",
        "yarn web:dev       - Start web dev server only",
        "yarn mobile:start  - Start mobile dev server only",
    ];
    if data.has_api {
        commands.push("yarn api:dev       - Start API server only");
    }
    if data.has_prisma {
        commands.push("yarn db:studio     - Open the database studio");
    }
    let commands: Vec<String> = commands.iter().map(|c| format!("echo \"  {c}\"")).collect();

    format!(
        r#"#!/bin/bash

echo "Setting up {name} development environment..."

if [ ! -f ".env" ]; then
    echo "Creating .env file..."
    cat > .env << EOF
{env}
EOF
fi
{waits}
echo "Installing dependencies..."
yarn install
{integration_setup}{prisma_setup}
echo ""
echo "Development environment is ready!"
echo "Available commands:"
{commands}
"#,
        name = data.app_display_name,
        env = env.join("\n"),
        commands = commands.join("\n"),
    )
}

fn assistant_script() -> String {
    format!(
        r#"#!/bin/bash

# Keeps the assistant's data on the persistent volume across rebuilds.
mkdir -p {ASSISTANT_HOME}/.claude/projects
rm -rf /home/node/.claude 2>/dev/null || true
ln -sf {ASSISTANT_HOME}/.claude /home/node/.claude
ln -sf {ASSISTANT_HOME}/.claude.json /home/node/.claude.json 2>/dev/null || true
chmod -R 700 {ASSISTANT_HOME} 2>/dev/null || true

echo "Assistant data directory configured at {ASSISTANT_HOME}"
"#
    )
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| Error::file(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

impl DevcontainerPlan {
    /// Writes every file of the plan into `dir`.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Paths written, scripts are made executable
    pub fn write<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::new();

        let dockerfile = dir.join("Dockerfile");
        write_file(&dockerfile, &self.image)?;
        written.push(dockerfile);

        let compose = dir.join("docker-compose.yml");
        write_file(&compose, &serde_yaml::to_string(&self.services)?)?;
        written.push(compose);

        let editor = dir.join("devcontainer.json");
        let mut content = serde_json::to_string_pretty(&self.editor_integration)?;
        content.push('\n');
        write_file(&editor, &content)?;
        written.push(editor);

        let mut scripts = vec![("setup.sh", &self.startup_script)];
        if let Some(script) = &self.assistant_script {
            scripts.push(("setup-assistant.sh", script));
        }
        for (name, script) in scripts {
            let path = dir.join(name);
            write_file(&path, script)?;
            make_executable(&path)?;
            written.push(path);
        }

        debug!("Wrote devcontainer files to '{}'", dir.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> TemplateData {
        TemplateData::new("my-app", None)
    }

    #[test]
    fn test_database_name() {
        assert_eq!(database_name(&data()), "my_app_db");
    }

    #[test]
    fn test_minimal_environment() {
        let config = DevcontainerConfig { enabled: true, ..DevcontainerConfig::default() };
        let plan = compose(&data(), &config);
        assert_eq!(plan.services.services.keys().collect::<Vec<_>>(), vec!["app"]);
        assert!(plan.services.volumes.is_empty());
        assert!(plan.assistant_script.is_none());
        assert!(!plan.image.contains("postgresql-client"));
        assert!(!plan.startup_script.contains("TIMEOUT="));
        assert!(plan.editor_integration.get("postStartCommand").is_none());
    }

    #[test]
    fn test_full_environment() {
        let plan = compose(&data(), &DevcontainerConfig::all());
        let names: Vec<&String> = plan.services.services.keys().collect();
        assert_eq!(names, vec!["postgres", "redis", "chrome", "app"]);

        let app = &plan.services.services["app"];
        assert_eq!(app.depends_on.len(), 2);
        assert!(app.environment.contains_key("BROWSER_WS_ENDPOINT"));
        assert!(plan.image.contains("postgresql-client"));
        assert!(plan.image.contains("astral.sh/uv"));
        assert_eq!(plan.startup_script.matches("TIMEOUT=30").count(), 3);
        assert!(plan.startup_script.contains("claude mcp add serena"));
        assert_eq!(plan.editor_integration["forwardPorts"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_compose_yaml_shape() {
        let plan = compose(&data(), &DevcontainerConfig::all());
        let yaml = serde_yaml::to_string(&plan.services).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed["services"]["app"]["depends_on"]["postgres"]["condition"].as_str(),
            Some("service_healthy")
        );
        assert_eq!(parsed["services"]["postgres"]["image"].as_str(), Some("postgres:15-alpine"));
    }
}

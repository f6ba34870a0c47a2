//! Registry of assistant tool integrations the setup script can activate.

use super::{DevcontainerConfig, Service};
use log::warn;

/// A tool server the AI assistant can be connected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIntegration {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Shell command that registers the integration with the assistant.
    pub command: &'static str,
    /// Service that must be enabled for the integration to work.
    pub requires: Option<Service>,
    /// Extra Dockerfile instructions the integration needs.
    pub image_setup: Option<&'static str>,
}

pub const TOOL_INTEGRATIONS: &[ToolIntegration] = &[
    ToolIntegration {
        id: "framework-docs",
        name: "Framework docs",
        description: "Component documentation and usage guides",
        command: "claude mcp add idealyst -s user -- npx -y @idealyst/mcp-server@latest",
        requires: None,
        image_setup: None,
    },
    ToolIntegration {
        id: "serena",
        name: "Serena",
        description: "Code navigation and semantic search",
        command: "claude mcp add serena -s user -- uvx --from git+https://github.com/oraios/serena serena start-mcp-server --project-from-cwd",
        requires: None,
        image_setup: Some(
            "RUN curl -LsSf https://astral.sh/uv/install.sh | sh\nENV PATH=\"/home/node/.local/bin:$PATH\"",
        ),
    },
    ToolIntegration {
        id: "playwright",
        name: "Playwright",
        description: "Browser automation through the headless Chrome service",
        command: "claude mcp add playwright -s user -- npx -y @playwright/mcp@latest --cdp-endpoint ws://chrome:3000",
        requires: Some(Service::Chrome),
        image_setup: None,
    },
    ToolIntegration {
        id: "postgres",
        name: "PostgreSQL",
        description: "Database queries against the development database",
        command: "claude mcp add postgres -s user -- npx -y @modelcontextprotocol/server-postgres $DATABASE_URL",
        requires: Some(Service::Postgres),
        image_setup: None,
    },
];

pub fn find_integration(id: &str) -> Option<&'static ToolIntegration> {
    TOOL_INTEGRATIONS.iter().find(|integration| integration.id == id)
}

/// Integrations to activate, in selection order.
///
/// Nothing is active without the assistant. An integration whose required
/// service is disabled is dropped even when selected; unknown ids are skipped.
pub fn active_integrations(config: &DevcontainerConfig) -> Vec<&'static ToolIntegration> {
    if !config.assistant {
        return Vec::new();
    }
    let mut active: Vec<&'static ToolIntegration> = Vec::new();
    for id in &config.integrations {
        let Some(integration) = find_integration(id) else {
            warn!("Unknown tool integration '{}' ignored", id);
            continue;
        };
        if integration.requires.is_some_and(|service| !config.has(service)) {
            continue;
        }
        if !active.contains(&integration) {
            active.push(integration);
        }
    }
    active
}

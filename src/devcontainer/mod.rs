//! Containerized development environment generation.
//!
//! A [`DevcontainerConfig`] is normalized once from either a plain boolean or a
//! structured object, then [`compose`] turns it into the Dockerfile, compose
//! file, editor settings and setup scripts written under `.devcontainer/`.

mod compose;
mod integrations;
mod services;

pub use compose::{
    compose, database_name, BuildSpec, ComposeFile, ComposeService, DependsOn, DevcontainerPlan,
    Healthcheck,
};
pub use integrations::{active_integrations, find_integration, ToolIntegration, TOOL_INTEGRATIONS};
pub use services::Service;

use serde::{Deserialize, Serialize};

/// Integrations selected when the environment is enabled with a plain `true`.
pub const DEFAULT_INTEGRATIONS: &[&str] = &["framework-docs", "serena"];

/// Optional services and tool integrations of the development container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevcontainerConfig {
    pub enabled: bool,
    pub postgres: bool,
    pub redis: bool,
    pub chrome: bool,
    #[serde(alias = "claudeCode")]
    pub assistant: bool,
    #[serde(alias = "mcpServers")]
    pub integrations: Vec<String>,
}

impl DevcontainerConfig {
    /// Everything on, with the default integrations.
    pub fn all() -> Self {
        Self {
            enabled: true,
            postgres: true,
            redis: true,
            chrome: true,
            assistant: true,
            integrations: DEFAULT_INTEGRATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Enabled services, in the order they appear in generated files.
    pub fn services(&self) -> Vec<Service> {
        Service::ALL.into_iter().filter(|service| self.has(*service)).collect()
    }

    pub fn has(&self, service: Service) -> bool {
        match service {
            Service::Postgres => self.postgres,
            Service::Redis => self.redis,
            Service::Chrome => self.chrome,
        }
    }
}

/// The devcontainer entry of a project configuration: a toggle or a full object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DevcontainerSetting {
    Toggle(bool),
    Custom(DevcontainerConfig),
}

impl Default for DevcontainerSetting {
    fn default() -> Self {
        DevcontainerSetting::Toggle(false)
    }
}

impl DevcontainerSetting {
    /// Normalizes the setting into a full configuration.
    ///
    /// `true` enables every service and the default integrations, `false`
    /// disables the environment.
    pub fn normalize(&self) -> DevcontainerConfig {
        match self {
            DevcontainerSetting::Toggle(true) => DevcontainerConfig::all(),
            DevcontainerSetting::Toggle(false) => DevcontainerConfig::default(),
            DevcontainerSetting::Custom(config) => config.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.normalize().enabled
    }
}

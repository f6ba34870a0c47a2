//! Project configuration for `init`.
//!
//! A [`ProjectConfig`] can be loaded from a JSON or YAML file and is then
//! completed by command line flags, defaults and, in interactive mode, prompts.

use crate::error::{Error, Result};
use crate::extensions::ExtensionConfig;
use crate::native::NativeMode;
use crate::template::{DatabaseProvider, TemplateData};
use crate::validation::{
    validate_app_display_name, validate_extension_config, validate_name, validate_org_domain,
    AppIdentifiers,
};
use cruet::Inflector;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything `init` needs to generate a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    pub org_domain: Option<String>,
    pub app_display_name: Option<String>,
    pub ios_bundle_id: Option<String>,
    pub android_package_name: Option<String>,
    pub extensions: ExtensionConfig,
    pub database_provider: DatabaseProvider,
    /// Parent directory of the new workspace; the current directory by default.
    pub directory: Option<PathBuf>,
    /// Generate into `directory` itself instead of a new `<projectName>` child.
    pub use_current_dir: bool,
    pub skip_install: bool,
    pub native_mode: NativeMode,
    pub templates_dir: Option<PathBuf>,
    #[serde(skip)]
    pub interactive: bool,
}

/// Parses configuration `content`, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` when the content is neither, with both parser messages
pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            Error::ConfigError(format!(
                "not valid JSON ({}) or YAML ({})",
                json_err, yaml_err
            ))
        }),
    }
}

/// Reads and parses a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    parse_config(&content)
}

impl ProjectConfig {
    /// Default organization domain for `name`, e.g. `com.myapp`.
    pub fn default_org_domain(name: &str) -> String {
        format!("com.{}", name.replace('-', ""))
    }

    /// Fills the display name and organization domain from the project name
    /// when they were not supplied.
    pub fn apply_defaults(&mut self) {
        if self.app_display_name.is_none() && !self.project_name.is_empty() {
            self.app_display_name = Some(self.project_name.to_title_case());
        }
        if self.org_domain.is_none() && !self.project_name.is_empty() {
            self.org_domain = Some(Self::default_org_domain(&self.project_name));
        }
    }

    /// Derives missing bundle identifiers from the organization domain.
    pub fn generate_identifiers(&mut self) {
        let Some(domain) = &self.org_domain else {
            return;
        };
        let derived = AppIdentifiers::derive(domain, &self.project_name);
        self.ios_bundle_id.get_or_insert(derived.ios_bundle_id);
        self.android_package_name.get_or_insert(derived.android_package_name);
    }

    /// Runs every validation rule.
    ///
    /// # Errors
    /// * `Error::MissingArguments` without a project name
    /// * `Error::ValidationError` for an invalid name, domain or identifier
    /// * `Error::InvalidExtension` for an unsatisfied extension prerequisite
    pub fn validate(&self) -> Result<()> {
        if self.project_name.is_empty() {
            return Err(Error::MissingArguments(vec!["NAME".to_string()]));
        }
        validate_name(&self.project_name)?;
        if let Some(domain) = &self.org_domain {
            validate_org_domain(domain)?;
        }
        if let Some(display_name) = &self.app_display_name {
            validate_app_display_name(display_name)?;
        }
        if let (Some(ios), Some(android)) = (&self.ios_bundle_id, &self.android_package_name) {
            AppIdentifiers {
                ios_bundle_id: ios.clone(),
                android_package_name: android.clone(),
            }
            .validate()?;
        }
        validate_extension_config(&self.extensions)
    }

    /// Directory the workspace is generated into.
    pub fn target_dir(&self) -> Result<PathBuf> {
        let base = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(if self.use_current_dir { base } else { base.join(&self.project_name) })
    }

    /// Substitution values for the whole workspace.
    pub fn template_data(&self) -> TemplateData {
        let mut data = TemplateData::new(&self.project_name, None);
        if let Some(display_name) = &self.app_display_name {
            data.app_name = display_name.clone();
            data.app_display_name = display_name.clone();
        }
        data.ios_bundle_id = self.ios_bundle_id.clone().unwrap_or_default();
        data.android_package_name = self.android_package_name.clone().unwrap_or_default();
        data.database_provider = self.database_provider;
        data.has_api = self.extensions.api;
        data.has_prisma = self.extensions.prisma;
        data.has_trpc = self.extensions.trpc;
        data.has_graphql = self.extensions.graphql;
        data.has_devcontainer = self.extensions.devcontainer.is_enabled();
        data.is_blank = self.extensions.enabled().is_empty();
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devcontainer::DevcontainerSetting;

    #[test]
    fn test_parse_json_config() {
        let config = parse_config(
            r#"{"projectName": "my-app", "orgDomain": "com.acme", "extensions": {"api": true, "trpc": true}}"#,
        )
        .unwrap();
        assert_eq!(config.project_name, "my-app");
        assert_eq!(config.org_domain.as_deref(), Some("com.acme"));
        assert!(config.extensions.api && config.extensions.trpc);
        assert!(!config.extensions.prisma);
    }

    #[test]
    fn test_parse_yaml_config() {
        let config = parse_config(
            "projectName: my-app\ndatabaseProvider: postgresql\nextensions:\n  devcontainer: true\n",
        )
        .unwrap();
        assert_eq!(config.database_provider, DatabaseProvider::Postgresql);
        assert_eq!(config.extensions.devcontainer, DevcontainerSetting::Toggle(true));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_config("[1, 2"), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_defaults_and_identifiers() {
        let mut config = ProjectConfig { project_name: "my-app".to_string(), ..Default::default() };
        config.apply_defaults();
        config.generate_identifiers();
        assert_eq!(config.app_display_name.as_deref(), Some("My App"));
        assert_eq!(config.org_domain.as_deref(), Some("com.myapp"));
        assert_eq!(config.ios_bundle_id.as_deref(), Some("com.myapp.my-app"));
        assert_eq!(config.android_package_name.as_deref(), Some("com.myapp.myapp"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_name() {
        let config = ProjectConfig::default();
        assert!(matches!(config.validate(), Err(Error::MissingArguments(_))));
    }

    #[test]
    fn test_template_data_flags() {
        let config = ProjectConfig {
            project_name: "shop".to_string(),
            extensions: ExtensionConfig { api: true, graphql: true, ..Default::default() },
            ..Default::default()
        };
        let data = config.template_data();
        assert!(data.has_api && data.has_graphql);
        assert!(!data.has_trpc && !data.is_blank);
        assert_eq!(data.package_name, "@shop/shop");
    }
}

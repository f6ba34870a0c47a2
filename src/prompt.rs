//! Interactive completion of a project configuration.
//! Only values the command line left open are asked for.

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use cruet::Inflector;
use dialoguer::Input;

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Asks for a line of text, offering `default` when given.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;
}

/// Terminal prompter backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}

/// Asks for the project name, display name and organization domain when they
/// are missing. Does nothing unless the configuration is interactive.
pub fn complete_config(prompt: &dyn Prompter, config: &mut ProjectConfig) -> Result<()> {
    if !config.interactive {
        return Ok(());
    }
    if config.project_name.is_empty() {
        config.project_name = prompt.input("Project name", None)?.trim().to_string();
    }
    if config.app_display_name.is_none() {
        let default = config.project_name.to_title_case();
        let answer = prompt.input("App display name", Some(&default))?;
        config.app_display_name = Some(answer.trim().to_string());
    }
    if config.org_domain.is_none() {
        let default = ProjectConfig::default_org_domain(&config.project_name);
        let answer = prompt.input("Organization domain", Some(&default))?;
        config.org_domain = Some(answer.trim().to_string());
    }
    Ok(())
}

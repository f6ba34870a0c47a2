//! Package generators, one per archetype.
//!
//! Every generator writes its own manifest and source stubs into
//! `packages/<name>` and nothing else. Cross-package wiring is left to the
//! orchestrator's integration pass.

mod api;
mod database;
mod embedded;
mod mobile;
mod shared;
mod web;
mod workspace;

pub use embedded::{embedded_set, emit_template, render_template, EmbeddedFile};
pub use workspace::generate_workspace_root;

use crate::constants::{MANIFEST_FILE, PACKAGES_DIR};
use crate::error::Result;
use crate::native::NativeMode;
use crate::template::TemplateData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The closed set of generatable package shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Api,
    Database,
    Web,
    Mobile,
    Shared,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Api => "api",
            Archetype::Database => "database",
            Archetype::Web => "web",
            Archetype::Mobile => "mobile",
            Archetype::Shared => "shared",
        }
    }

    /// Package script that starts the development server, if any.
    pub fn dev_script(&self) -> Option<&'static str> {
        match self {
            Archetype::Api | Archetype::Web => Some("dev"),
            Archetype::Mobile => Some("start"),
            Archetype::Database | Archetype::Shared => None,
        }
    }

    /// Package script that builds it; mobile apps are built per platform.
    pub fn build_script(&self) -> Option<&'static str> {
        match self {
            Archetype::Mobile => None,
            _ => Some("build"),
        }
    }

    /// Client packages import the shared library and talk to the API.
    pub fn is_client(&self) -> bool {
        matches!(self, Archetype::Web | Archetype::Mobile)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knobs that change how packages are produced, not what they contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Directory whose template sets override the built-in ones.
    pub templates_dir: Option<PathBuf>,
    pub native_mode: NativeMode,
}

/// Shared inputs of every generator in one run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    /// Workspace root.
    pub root: &'a Path,
    pub data: &'a TemplateData,
    pub options: &'a GeneratorOptions,
}

impl<'a> GenerationContext<'a> {
    pub fn new(root: &'a Path, data: &'a TemplateData, options: &'a GeneratorOptions) -> Self {
        Self { root, data, options }
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }

    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.packages_dir().join(name)
    }

    pub fn root_manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// `<templates_dir>/<relative>` when a templates directory is configured.
    pub fn custom_template(&self, relative: &str) -> Option<PathBuf> {
        self.options
            .templates_dir
            .as_ref()
            .map(|dir| dir.join(relative))
    }
}

/// What a package generator produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub archetype: Archetype,
    /// Directory name under `packages/`.
    pub name: String,
    /// Scope-qualified manifest name.
    pub package_name: String,
    pub path: PathBuf,
    pub warnings: Vec<String>,
}

impl PackageOutcome {
    fn new(ctx: &GenerationContext, archetype: Archetype, name: &str) -> Self {
        Self {
            archetype,
            name: name.to_string(),
            package_name: ctx.data.own_package_name(name),
            path: ctx.package_dir(name),
            warnings: Vec::new(),
        }
    }
}

/// Root script body that runs `script` of a workspace member.
pub fn workspace_command(package_name: &str, script: &str) -> String {
    format!("yarn workspace {} {}", package_name, script)
}

/// Generates a package of `archetype` named `name` inside the workspace.
pub fn generate_package(
    archetype: Archetype,
    ctx: &GenerationContext,
    name: &str,
) -> Result<PackageOutcome> {
    match archetype {
        Archetype::Api => api::generate(ctx, name),
        Archetype::Database => database::generate(ctx, name),
        Archetype::Web => web::generate(ctx, name),
        Archetype::Mobile => mobile::generate(ctx, name),
        Archetype::Shared => shared::generate(ctx, name),
    }
}

//! Top-level generation flows.
//!
//! `init` builds a complete workspace: root, shared library, web and mobile
//! clients, an integration pass, the extension pipeline and the aggregated root
//! scripts. `add` generates one package inside an existing workspace.
//! Every step runs after the previous one has finished writing.

use crate::config::ProjectConfig;
use crate::constants::{MANIFEST_FILE, PACKAGES_DIR};
use crate::error::{Error, Result};
use crate::extensions::{
    emit_client_integrations, ExtensionConfig, ExtensionId, ExtensionPipeline,
};
use crate::manifest::{add_scripts, add_to_workspaces, add_workspace_dependencies, read_manifest};
use crate::native::NativeMode;
use crate::packages::{
    generate_package, generate_workspace_root, workspace_command, Archetype, GenerationContext,
    GeneratorOptions, PackageOutcome,
};
use crate::process::install_dependencies;
use crate::template::TemplateData;
use crate::validation::{
    validate_app_display_name, validate_extension_config, validate_name, AppIdentifiers,
};
use crate::workspace::{resolve_project_path, WorkspaceContext};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Packages every `init` creates, in generation order.
const BASE_PACKAGES: [Archetype; 3] = [Archetype::Shared, Archetype::Web, Archetype::Mobile];

/// Summary of a finished generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorResult {
    pub project_path: PathBuf,
    /// Scope-qualified names of the packages that were created.
    pub packages_created: Vec<String>,
    pub extensions_enabled: Vec<ExtensionId>,
    /// Soft failures; the generation itself succeeded.
    pub warnings: Vec<String>,
    pub next_steps: Vec<String>,
}

/// A request to add one package to an existing workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub name: String,
    pub archetype: Archetype,
    pub app_display_name: Option<String>,
    /// Overrides the scope taken from the root manifest.
    pub scope: Option<String>,
    pub with_trpc: bool,
    pub with_graphql: bool,
    /// Any directory inside the workspace.
    pub directory: PathBuf,
    pub skip_install: bool,
    pub native_mode: NativeMode,
    pub templates_dir: Option<PathBuf>,
}

impl AddRequest {
    pub fn new<P: Into<PathBuf>>(name: &str, archetype: Archetype, directory: P) -> Self {
        Self {
            name: name.to_string(),
            archetype,
            app_display_name: None,
            scope: None,
            with_trpc: false,
            with_graphql: false,
            directory: directory.into(),
            skip_install: false,
            native_mode: NativeMode::default(),
            templates_dir: None,
        }
    }
}

/// Fails unless `path` is missing or an empty directory.
fn ensure_empty_target(path: &Path, use_current_dir: bool) -> Result<()> {
    if use_current_dir || !path.exists() {
        return Ok(());
    }
    let mut entries = fs::read_dir(path).map_err(|e| Error::file(path, e))?;
    if entries.next().is_some() {
        return Err(Error::TargetExists(path.to_path_buf()));
    }
    Ok(())
}

/// Links client packages to the shared library.
///
/// Sources are left alone: every file was substituted once when it was
/// written.
pub fn integrate_packages(packages: &[PackageOutcome]) -> Result<()> {
    let shared = packages.iter().find(|p| p.archetype == Archetype::Shared);
    if let Some(shared) = shared {
        for client in packages.iter().filter(|p| p.archetype.is_client()) {
            add_workspace_dependencies(
                client.path.join(MANIFEST_FILE),
                [shared.package_name.clone()],
            )?;
        }
    }
    Ok(())
}

/// Root scripts that start, build and test the whole workspace.
pub fn aggregate_scripts(ctx: &GenerationContext, packages: &[PackageOutcome]) -> Result<()> {
    let mut scripts: Vec<(String, String)> = Vec::new();
    let mut dev_names = Vec::new();
    let mut dev_commands = Vec::new();

    let dev_order = [Archetype::Api, Archetype::Web, Archetype::Mobile];
    for archetype in dev_order {
        let Some(package) = packages.iter().find(|p| p.archetype == archetype) else {
            continue;
        };
        let Some(dev) = archetype.dev_script() else {
            continue;
        };
        let alias = format!("{}:{}", package.name, dev);
        dev_names.push(package.name.clone());
        dev_commands.push(format!("\"yarn {}\"", alias));
        if archetype != Archetype::Api {
            scripts.push((alias, workspace_command(&package.package_name, dev)));
        }
    }

    if let Some(web) = packages.iter().find(|p| p.archetype == Archetype::Web) {
        for script in ["build", "preview"] {
            scripts.push((
                format!("{}:{}", web.name, script),
                workspace_command(&web.package_name, script),
            ));
        }
    }
    if let Some(mobile) = packages.iter().find(|p| p.archetype == Archetype::Mobile) {
        for script in ["android", "ios"] {
            scripts.push((
                format!("{}:{}", mobile.name, script),
                workspace_command(&mobile.package_name, script),
            ));
        }
    }

    if !dev_commands.is_empty() {
        scripts.push((
            "dev".to_string(),
            format!(
                "concurrently --names \"{}\" {}",
                dev_names.join(","),
                dev_commands.join(" ")
            ),
        ));
    }
    let root = &ctx.data.package_name;
    scripts.push((
        "build:packages".to_string(),
        format!("yarn workspaces foreach --all --topological-dev --exclude {} run build", root),
    ));
    scripts.push(("build".to_string(), "yarn build:packages".to_string()));
    scripts.push((
        "test".to_string(),
        format!("yarn workspaces foreach --all --exclude {} run test", root),
    ));

    add_scripts(ctx.root_manifest(), scripts)
}

fn init_next_steps(config: &ProjectConfig, path: &Path) -> Vec<String> {
    let mut steps = Vec::new();
    if !config.use_current_dir {
        steps.push(format!("cd {}", path.display()));
    }
    if config.skip_install {
        steps.push("yarn install".to_string());
    }
    if config.extensions.prisma {
        steps.push("yarn db:push".to_string());
    }
    steps.push("yarn dev".to_string());
    if config.extensions.devcontainer.is_enabled() {
        steps.push("Reopen the folder in the development container".to_string());
    }
    steps
}

/// Creates a complete workspace described by `config`.
///
/// Missing display name, organization domain and bundle identifiers take
/// their defaults first.
///
/// # Errors
/// Validation and target checks run before anything is written. After that
/// the first failing step aborts the run and leaves what was already written.
pub fn init_workspace(config: &ProjectConfig) -> Result<GeneratorResult> {
    let mut config = config.clone();
    config.apply_defaults();
    config.generate_identifiers();
    let config = &config;

    config.validate()?;
    let pipeline = ExtensionPipeline::new(&config.extensions).validate()?;

    let project_path = config.target_dir()?;
    ensure_empty_target(&project_path, config.use_current_dir)?;
    fs::create_dir_all(&project_path).map_err(|e| Error::file(&project_path, e))?;
    info!("Creating workspace in {}", project_path.display());

    let data = config.template_data();
    let options = GeneratorOptions {
        templates_dir: config.templates_dir.clone(),
        native_mode: config.native_mode,
    };
    let ctx = GenerationContext::new(&project_path, &data, &options);

    generate_workspace_root(&ctx)?;
    let mut packages = Vec::new();
    for archetype in BASE_PACKAGES {
        packages.push(generate_package(archetype, &ctx, archetype.name())?);
    }
    integrate_packages(&packages)?;

    let report = pipeline.apply(&ctx)?;
    packages.extend(report.packages().cloned());
    aggregate_scripts(&ctx, &packages)?;

    let mut warnings: Vec<String> = packages
        .iter()
        .flat_map(|p| p.warnings.iter().cloned())
        .chain(report.warnings().cloned())
        .collect();
    warnings.extend(install_dependencies(&project_path, config.skip_install));

    Ok(GeneratorResult {
        next_steps: init_next_steps(config, &project_path),
        project_path,
        packages_created: packages.into_iter().map(|p| p.package_name).collect(),
        extensions_enabled: report.applied(),
        warnings,
    })
}

/// Template data for a package added to an existing workspace.
///
/// The scope comes from the root manifest. A requested scope renames the new
/// package only; imports of its siblings keep the workspace scope.
fn package_data(request: &AddRequest, workspace: &WorkspaceContext) -> TemplateData {
    let mut data = TemplateData::new(&request.name, workspace.scope.as_deref());
    if let Some(scope) = &request.scope {
        data = data.with_package_scope(scope);
    }
    if let Some(display_name) = &request.app_display_name {
        data.app_name = display_name.clone();
        data.app_display_name = display_name.clone();
    }
    if request.archetype == Archetype::Mobile {
        let domain = ProjectConfig::default_org_domain(&data.package_scope);
        let ids = AppIdentifiers::derive(&domain, &request.name);
        data.ios_bundle_id = ids.ios_bundle_id;
        data.android_package_name = ids.android_package_name;
    }
    data.has_api = workspace.has_package(Archetype::Api.name());
    data.has_prisma = workspace.has_package(Archetype::Database.name());
    data.has_trpc = request.with_trpc;
    data.has_graphql = request.with_graphql;
    data
}

/// Manifest name of the existing workspace package `name`.
fn sibling_package_name(workspace: &WorkspaceContext, name: &str) -> Option<String> {
    if !workspace.has_package(name) {
        return None;
    }
    let path = workspace.root.join(PACKAGES_DIR).join(name).join(MANIFEST_FILE);
    let manifest = read_manifest(path).ok()?;
    manifest.get("name")?.as_str().map(str::to_string)
}

/// Adds one package to the workspace that contains `request.directory`.
///
/// # Errors
/// * `Error::ValidationError` for an invalid name or display name
/// * `Error::MissingArguments` for a mobile package without a display name
/// * `Error::NotInWorkspace` outside a workspace, before anything is written
/// * `Error::TargetExists` when the package directory already exists
/// * `Error::InvalidExtension` for `--with-trpc`/`--with-graphql` without an API package
///   in the workspace
pub fn add_package(request: &AddRequest) -> Result<GeneratorResult> {
    validate_name(&request.name)?;
    if request.archetype == Archetype::Mobile {
        let Some(display_name) = &request.app_display_name else {
            return Err(Error::MissingArguments(vec!["--app-name".to_string()]));
        };
        validate_app_display_name(display_name)?;
    }

    if (request.with_trpc || request.with_graphql) && !request.archetype.is_client() {
        return Err(Error::ValidationError(
            "--with-trpc and --with-graphql only apply to web and mobile packages".to_string(),
        ));
    }

    let workspace = WorkspaceContext::resolve(&request.directory, "add")?;
    validate_extension_config(&ExtensionConfig {
        api: workspace.has_package(Archetype::Api.name()),
        trpc: request.with_trpc,
        graphql: request.with_graphql,
        ..ExtensionConfig::default()
    })?;

    let location = resolve_project_path(&request.name, &workspace.root)?;
    if workspace.has_package(&request.name) || location.project_path.exists() {
        return Err(Error::TargetExists(location.project_path));
    }

    let data = package_data(request, &workspace);
    let options = GeneratorOptions {
        templates_dir: request.templates_dir.clone(),
        native_mode: request.native_mode,
    };
    let ctx = GenerationContext::new(&workspace.root, &data, &options);

    let package = generate_package(request.archetype, &ctx, &request.name)?;
    emit_client_integrations(&ctx, request.archetype, &package.path)?;

    let manifest = package.path.join(MANIFEST_FILE);
    let mut edges = Vec::new();
    if request.archetype != Archetype::Shared {
        edges.extend(sibling_package_name(&workspace, Archetype::Shared.name()));
    }
    if request.archetype.is_client() {
        edges.extend(sibling_package_name(&workspace, Archetype::Api.name()));
    }
    if !edges.is_empty() {
        add_workspace_dependencies(&manifest, edges)?;
    }

    add_to_workspaces(workspace.manifest_path(), &location.workspace_path)?;
    let mut scripts = Vec::new();
    if let Some(dev) = request.archetype.dev_script() {
        scripts.push((
            format!("{}:dev", request.name),
            workspace_command(&package.package_name, dev),
        ));
    }
    if let Some(build) = request.archetype.build_script() {
        scripts.push((
            format!("{}:build", request.name),
            workspace_command(&package.package_name, build),
        ));
    }
    add_scripts(workspace.manifest_path(), scripts)?;

    let mut warnings = package.warnings.clone();
    warnings.extend(install_dependencies(&workspace.root, request.skip_install));

    let mut next_steps = Vec::new();
    if request.skip_install {
        next_steps.push("yarn install".to_string());
    }
    if request.archetype.dev_script().is_some() {
        next_steps.push(format!("yarn {}:dev", request.name));
    }

    Ok(GeneratorResult {
        project_path: package.path.clone(),
        packages_created: vec![package.package_name],
        extensions_enabled: Vec::new(),
        warnings,
        next_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_target_is_accepted() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_empty_target(dir.path(), false).is_ok());
        assert!(ensure_empty_target(&dir.path().join("missing"), false).is_ok());
    }

    #[test]
    fn test_non_empty_target_is_refused() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("file"), "x").unwrap();
        assert!(matches!(
            ensure_empty_target(dir.path(), false),
            Err(Error::TargetExists(_))
        ));
        assert!(ensure_empty_target(dir.path(), true).is_ok());
    }
}

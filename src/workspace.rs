//! Workspace root detection and package path resolution.

use crate::constants::{MANIFEST_FILE, PACKAGES_DIR};
use crate::error::{Error, Result};
use crate::manifest::{read_manifest, ManifestValue};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

fn load_root_manifest(dir: &Path) -> Option<ManifestValue> {
    let path = dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return None;
    }
    match read_manifest(&path) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            debug!("Ignoring unreadable manifest: {}", e);
            None
        }
    }
}

/// True iff `dir` has a manifest whose `workspaces` field is an array.
pub fn is_workspace_root<P: AsRef<Path>>(dir: P) -> bool {
    load_root_manifest(dir.as_ref())
        .is_some_and(|manifest| matches!(manifest.get("workspaces"), Some(ManifestValue::Array(_))))
}

/// Scope derived from the manifest name at `dir`.
///
/// `@acme/platform` and `@acme` yield `acme`, a plain `platform` yields
/// `platform`. Returns `None` without a manifest, without a name, or when a
/// leading `@` is not followed by a scope.
pub fn scope_name<P: AsRef<Path>>(dir: P) -> Option<String> {
    let manifest = load_root_manifest(dir.as_ref())?;
    let name = manifest.get("name")?.as_str()?;
    let scope = match name.strip_prefix('@') {
        Some(rest) => rest.split_once('/').map_or(rest, |(scope, _)| scope),
        None => name,
    };
    if scope.is_empty() {
        return None;
    }
    Some(scope.to_string())
}

/// Walks up from `start` until a workspace root is found.
pub fn find_workspace_root<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .find(|dir| is_workspace_root(dir))
        .map(Path::to_path_buf)
}

/// Where a new package will live inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Absolute directory of the package.
    pub project_path: PathBuf,
    /// Path relative to the workspace root, as listed in `workspaces`.
    pub workspace_path: String,
    pub scope: Option<String>,
}

/// Resolves the directory for package `name` inside the workspace at `dir`.
///
/// # Errors
/// * `Error::NotInWorkspace` if `dir` is not a workspace root. Nothing is created.
pub fn resolve_project_path<P: AsRef<Path>>(name: &str, dir: P) -> Result<ProjectLocation> {
    let dir = dir.as_ref();
    if !is_workspace_root(dir) {
        return Err(Error::NotInWorkspace {
            operation: "create".to_string(),
            dir: dir.to_path_buf(),
        });
    }
    Ok(ProjectLocation {
        project_path: dir.join(PACKAGES_DIR).join(name),
        workspace_path: format!("{}/{}", PACKAGES_DIR, name),
        scope: scope_name(dir),
    })
}

/// A resolved workspace: root, scope and the packages already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceContext {
    pub root: PathBuf,
    pub scope: Option<String>,
    pub packages: Vec<String>,
}

impl WorkspaceContext {
    /// Resolves the workspace that contains `dir`.
    ///
    /// # Errors
    /// * `Error::NotInWorkspace` when no ancestor of `dir` is a workspace root
    pub fn resolve<P: AsRef<Path>>(dir: P, operation: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let root = find_workspace_root(dir).ok_or_else(|| Error::NotInWorkspace {
            operation: operation.to_string(),
            dir: dir.to_path_buf(),
        })?;

        let mut packages: Vec<String> = match fs::read_dir(root.join(PACKAGES_DIR)) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_dir())
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        packages.sort();

        Ok(Self { scope: scope_name(&root), root, packages })
    }

    pub fn has_package(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }
}

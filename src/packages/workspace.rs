use super::{emit_template, GenerationContext};
use crate::constants::{MANIFEST_FILE, PACKAGES_DIR, PACKAGE_MANAGER, ROOT_DEV_DEPENDENCIES};
use crate::error::Result;
use crate::manifest::{DependencyKind, ManifestDocument};
use log::info;
use serde_json::json;
use std::path::PathBuf;

/// Writes the workspace root: manifest, tsconfig, ignore and yarn files.
///
/// Scripts are not written here; they are aggregated once every package exists.
///
/// # Returns
/// The files that were written.
pub fn generate_workspace_root(ctx: &GenerationContext) -> Result<Vec<PathBuf>> {
    let data = ctx.data;
    info!("Creating workspace '{}'...", data.project_name);

    let workspace_glob = format!("{}/*", PACKAGES_DIR);
    ManifestDocument::new(&data.package_name)
        .version(&data.version)
        .description(&data.description)
        .private()
        .workspaces(&[&workspace_glob])
        .dependencies(DependencyKind::Dev, ROOT_DEV_DEPENDENCIES.iter().copied())
        .extra("packageManager", json!(PACKAGE_MANAGER))
        .write(ctx.root.join(MANIFEST_FILE))?;

    let mut written = vec![ctx.root_manifest()];
    written.extend(emit_template(ctx, "workspace", ctx.root)?);
    Ok(written)
}

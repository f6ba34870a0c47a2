use super::{emit_template, Archetype, GenerationContext, PackageOutcome};
use crate::constants::{CORE_DEPENDENCIES, MANIFEST_FILE, TOOLING_DEV_DEPENDENCIES};
use crate::error::Result;
use crate::manifest::{write_json, DependencyKind, ManifestDocument};
use log::info;
use serde_json::json;

pub fn generate(ctx: &GenerationContext, name: &str) -> Result<PackageOutcome> {
    let data = ctx.data;
    let dir = ctx.package_dir(name);
    info!("Creating shared package '{}'...", name);

    ManifestDocument::new(data.own_package_name(name))
        .version(&data.version)
        .private()
        .entry("src/index.ts")
        .export(".", "./src/index.ts")
        .export("./theme", "./src/theme.ts")
        .scripts(&[
            ("build", "tsc --noEmit"),
            ("test", "jest --passWithNoTests"),
        ])
        .dependencies(DependencyKind::Runtime, CORE_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Dev, TOOLING_DEV_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Peer, [("react", "*"), ("react-native", "*")])
        .write(dir.join(MANIFEST_FILE))?;

    write_json(
        dir.join("tsconfig.json"),
        &json!({
            "extends": "../../tsconfig.json",
            "compilerOptions": { "noEmit": true },
            "include": ["src"]
        }),
    )?;

    emit_template(ctx, Archetype::Shared.name(), &dir)?;
    Ok(PackageOutcome::new(ctx, Archetype::Shared, name))
}

use super::{emit_template, Archetype, GenerationContext, PackageOutcome};
use crate::constants::{
    CORE_DEPENDENCIES, GRAPHQL_CLIENT_DEPENDENCIES, MANIFEST_FILE, TOOLING_DEV_DEPENDENCIES,
    TRPC_CLIENT_DEPENDENCIES, WEB_DEPENDENCIES,
};
use crate::error::Result;
use crate::manifest::{write_json, DependencyKind, ManifestDocument};
use log::info;
use serde_json::json;

pub fn generate(ctx: &GenerationContext, name: &str) -> Result<PackageOutcome> {
    let data = ctx.data;
    let dir = ctx.package_dir(name);
    info!("Creating web package '{}'...", name);

    let mut manifest = ManifestDocument::new(data.own_package_name(name))
        .version(&data.version)
        .private()
        .module_type("module")
        .scripts(&[
            ("dev", "vite"),
            ("build", "tsc && vite build"),
            ("preview", "vite preview"),
            ("test", "jest --passWithNoTests"),
        ])
        .dependencies(DependencyKind::Runtime, CORE_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Runtime, WEB_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Dev, TOOLING_DEV_DEPENDENCIES.iter().copied())
        .dependencies(
            DependencyKind::Dev,
            [
                ("@types/react", "^19.0.0"),
                ("@types/react-dom", "^19.0.0"),
                ("@vitejs/plugin-react", "^4.3.0"),
                ("vite", "^5.2.0"),
            ],
        );
    if data.has_trpc {
        manifest = manifest
            .dependencies(DependencyKind::Runtime, TRPC_CLIENT_DEPENDENCIES.iter().copied());
    }
    if data.has_graphql {
        manifest = manifest
            .dependencies(DependencyKind::Runtime, GRAPHQL_CLIENT_DEPENDENCIES.iter().copied());
    }
    manifest.write(dir.join(MANIFEST_FILE))?;

    write_json(
        dir.join("tsconfig.json"),
        &json!({
            "extends": "../../tsconfig.json",
            "compilerOptions": {
                "lib": ["ES2020", "DOM", "DOM.Iterable"],
                "noEmit": true,
                "types": ["vite/client"],
                "paths": { "@/*": ["./src/*"] }
            },
            "include": ["src"]
        }),
    )?;

    emit_template(ctx, Archetype::Web.name(), &dir)?;
    Ok(PackageOutcome::new(ctx, Archetype::Web, name))
}

use super::{emit_template, Archetype, GenerationContext, PackageOutcome};
use crate::constants::{
    API_DEPENDENCIES, API_DEV_DEPENDENCIES, GRAPHQL_SERVER_DEPENDENCIES,
    GRAPHQL_SERVER_PRISMA_DEPENDENCIES, MANIFEST_FILE, TRPC_SERVER_DEPENDENCIES,
};
use crate::error::Result;
use crate::manifest::{DependencyKind, ManifestDocument};
use log::info;

/// Generates an Express API package.
///
/// Server dependencies for tRPC and GraphQL are included up front when those
/// flags are set, so the extensions only have to drop in source files.
pub fn generate(ctx: &GenerationContext, name: &str) -> Result<PackageOutcome> {
    let data = ctx.data;
    let dir = ctx.package_dir(name);
    info!("Creating API package '{}'...", name);

    let mut manifest = ManifestDocument::new(data.own_package_name(name))
        .version(&data.version)
        .private()
        .entry("src/index.ts")
        .scripts(&[
            ("dev", "tsx watch src/index.ts"),
            ("build", "tsc"),
            ("start", "node dist/index.js"),
            ("test", "jest --passWithNoTests"),
        ])
        .dependencies(DependencyKind::Runtime, API_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Dev, API_DEV_DEPENDENCIES.iter().copied());
    if data.has_trpc {
        manifest = manifest
            .dependencies(DependencyKind::Runtime, TRPC_SERVER_DEPENDENCIES.iter().copied());
    }
    if data.has_graphql {
        manifest = manifest
            .dependencies(DependencyKind::Runtime, GRAPHQL_SERVER_DEPENDENCIES.iter().copied());
        if data.has_prisma {
            manifest = manifest.dependencies(
                DependencyKind::Runtime,
                GRAPHQL_SERVER_PRISMA_DEPENDENCIES.iter().copied(),
            );
        }
    }
    manifest.write(dir.join(MANIFEST_FILE))?;

    emit_template(ctx, Archetype::Api.name(), &dir)?;
    Ok(PackageOutcome::new(ctx, Archetype::Api, name))
}

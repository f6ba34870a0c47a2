use super::{emit_template, Archetype, GenerationContext, PackageOutcome};
use crate::constants::{
    CORE_DEPENDENCIES, MANIFEST_FILE, MOBILE_DEPENDENCIES, TOOLING_DEV_DEPENDENCIES,
    TRPC_CLIENT_DEPENDENCIES, GRAPHQL_CLIENT_DEPENDENCIES,
};
use crate::error::Result;
use crate::manifest::{write_json, DependencyKind, ManifestDocument};
use crate::native::initialize_native;
use log::info;
use serde_json::json;

/// Generates a React Native package.
///
/// Native folders come from the React Native CLI when it is allowed and works;
/// the manifest and sources below are written in either case, so a fallback
/// still yields a complete package plus a warning.
pub fn generate(ctx: &GenerationContext, name: &str) -> Result<PackageOutcome> {
    let data = ctx.data;
    let dir = ctx.package_dir(name);

    let native = initialize_native(&ctx.packages_dir(), name, data, ctx.options.native_mode)?;
    info!("Creating mobile package '{}'...", name);

    let mut manifest = ManifestDocument::new(data.own_package_name(name))
        .version(&data.version)
        .private()
        .scripts(&[
            ("start", "react-native start"),
            ("android", "react-native run-android"),
            ("ios", "react-native run-ios"),
            ("test", "jest --passWithNoTests"),
        ])
        .dependencies(DependencyKind::Runtime, CORE_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Runtime, MOBILE_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Dev, TOOLING_DEV_DEPENDENCIES.iter().copied())
        .dependencies(
            DependencyKind::Dev,
            [
                ("@react-native/babel-preset", "0.83.0"),
                ("@react-native/metro-config", "0.83.0"),
                ("@types/react", "^19.0.0"),
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
            "compilerOptions": { "noEmit": true, "jsx": "react-native" },
            "include": ["src", "index.js"]
        }),
    )?;

    emit_template(ctx, Archetype::Mobile.name(), &dir)?;

    let mut outcome = PackageOutcome::new(ctx, Archetype::Mobile, name);
    outcome.warnings.extend(native.warning().map(str::to_string));
    Ok(outcome)
}

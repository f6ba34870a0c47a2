use super::{emit_template, Archetype, GenerationContext, PackageOutcome};
use crate::constants::{MANIFEST_FILE, PRISMA_DEPENDENCIES, PRISMA_DEV_DEPENDENCIES};
use crate::copier::{write_file, write_if_absent};
use crate::devcontainer::database_name;
use crate::error::Result;
use crate::manifest::{DependencyKind, ManifestDocument};
use log::info;

/// Generates a Prisma database package.
///
/// `.env` is only written when missing so that re-running never clobbers a
/// configured connection string; `.env.example` is always refreshed.
pub fn generate(ctx: &GenerationContext, name: &str) -> Result<PackageOutcome> {
    let data = ctx.data;
    let dir = ctx.package_dir(name);
    info!(
        "Creating database package '{}' ({})...",
        name,
        data.database_provider.as_str()
    );

    ManifestDocument::new(data.own_package_name(name))
        .version(&data.version)
        .private()
        .entry("src/index.ts")
        .export(".", "./src/index.ts")
        .export("./schemas", "./src/schemas.ts")
        .scripts(&[
            ("db:generate", "prisma generate"),
            ("db:push", "prisma db push"),
            ("db:migrate", "prisma migrate dev"),
            ("db:studio", "prisma studio"),
            ("build", "prisma generate && tsc --noEmit"),
        ])
        .dependencies(DependencyKind::Runtime, PRISMA_DEPENDENCIES.iter().copied())
        .dependencies(DependencyKind::Dev, PRISMA_DEV_DEPENDENCIES.iter().copied())
        .write(dir.join(MANIFEST_FILE))?;

    emit_template(ctx, Archetype::Database.name(), &dir)?;

    let env = format!(
        "DATABASE_URL=\"{}\"\n",
        data.database_provider.default_url(&database_name(data))
    );
    write_file(dir.join(".env.example"), &env)?;
    write_if_absent(dir.join(".env"), &env)?;

    Ok(PackageOutcome::new(ctx, Archetype::Database, name))
}

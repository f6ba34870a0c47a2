use super::{has_package, Extension, ExtensionId, ExtensionOutcome};
use crate::constants::MANIFEST_FILE;
use crate::error::Result;
use crate::manifest::{add_scripts, add_workspace_dependencies};
use crate::packages::{generate_package, workspace_command, Archetype, GenerationContext};

const DATABASE_SCRIPTS: &[&str] = &["db:generate", "db:push", "db:migrate", "db:studio"];

/// Prisma data layer package.
pub struct PrismaExtension;

impl Extension for PrismaExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::Prisma
    }

    fn apply(&self, ctx: &GenerationContext) -> Result<ExtensionOutcome> {
        let name = Archetype::Database.name();
        let package = generate_package(Archetype::Database, ctx, name)?;

        if has_package(ctx, Archetype::Api.name()) {
            add_workspace_dependencies(
                ctx.package_dir(Archetype::Api.name()).join(MANIFEST_FILE),
                [package.package_name.clone()],
            )?;
        }

        add_scripts(
            ctx.root_manifest(),
            DATABASE_SCRIPTS
                .iter()
                .map(|script| (*script, workspace_command(&package.package_name, script))),
        )?;

        let mut outcome = ExtensionOutcome::new(self.id());
        outcome.packages.push(package);
        Ok(outcome)
    }
}

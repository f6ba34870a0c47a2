use super::{existing_packages, has_package, Extension, ExtensionId, ExtensionOutcome};
use crate::constants::MANIFEST_FILE;
use crate::error::Result;
use crate::manifest::{add_scripts, add_workspace_dependencies};
use crate::packages::{generate_package, workspace_command, Archetype, GenerationContext};

/// Express API package plus its root scripts.
pub struct ApiExtension;

impl Extension for ApiExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::Api
    }

    fn apply(&self, ctx: &GenerationContext) -> Result<ExtensionOutcome> {
        let name = Archetype::Api.name();
        let package = generate_package(Archetype::Api, ctx, name)?;

        // The API reuses the shared schemas; clients import the router types.
        if has_package(ctx, Archetype::Shared.name()) {
            add_workspace_dependencies(
                package.path.join(MANIFEST_FILE),
                [ctx.data.scoped(Archetype::Shared.name())],
            )?;
        }
        for client in existing_packages(ctx, &[Archetype::Web.name(), Archetype::Mobile.name()]) {
            add_workspace_dependencies(
                ctx.package_dir(client).join(MANIFEST_FILE),
                [package.package_name.clone()],
            )?;
        }

        add_scripts(
            ctx.root_manifest(),
            [
                ("api:dev", workspace_command(&package.package_name, "dev")),
                ("api:build", workspace_command(&package.package_name, "build")),
            ],
        )?;

        let mut outcome = ExtensionOutcome::new(self.id());
        outcome.packages.push(package);
        Ok(outcome)
    }
}

use super::{emit_file, has_package, Extension, ExtensionId, ExtensionOutcome};
use crate::constants::{MANIFEST_FILE, TRPC_CLIENT_DEPENDENCIES, TRPC_SERVER_DEPENDENCIES};
use crate::copier::write_if_absent;
use crate::error::Result;
use crate::manifest::{add_dependencies, DependencyKind};
use crate::packages::{render_template, Archetype, GenerationContext};
use log::debug;
use std::path::Path;

/// Typed RPC router in the API and matching clients.
pub struct TrpcExtension;

/// Writes the React provider into a web or mobile package at `dir`.
pub(super) fn emit_client(ctx: &GenerationContext, archetype: Archetype, dir: &Path) -> Result<()> {
    let template = match archetype {
        Archetype::Mobile => "extensions/trpc/client/trpc.native.tsx",
        _ => "extensions/trpc/client/trpc.web.tsx",
    };
    emit_file(ctx, template, &dir.join("src/utils/trpc.tsx"))?;
    add_dependencies(
        dir.join(MANIFEST_FILE),
        DependencyKind::Runtime,
        TRPC_CLIENT_DEPENDENCIES.iter().copied(),
    )
}

impl Extension for TrpcExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::Trpc
    }

    fn apply(&self, ctx: &GenerationContext) -> Result<ExtensionOutcome> {
        let api = ctx.package_dir(Archetype::Api.name());
        let router_dir = api.join("src/trpc");
        emit_file(ctx, "extensions/trpc/api/router.ts", &router_dir.join("router.ts"))?;
        emit_file(ctx, "extensions/trpc/api/trpc.ts", &router_dir.join("trpc.ts"))?;
        add_dependencies(
            api.join(MANIFEST_FILE),
            DependencyKind::Runtime,
            TRPC_SERVER_DEPENDENCIES.iter().copied(),
        )?;

        for client in [Archetype::Web, Archetype::Mobile] {
            if has_package(ctx, client.name()) {
                emit_client(ctx, client, &ctx.package_dir(client.name()))?;
            }
        }

        if has_package(ctx, Archetype::Shared.name()) {
            let dir = ctx.package_dir(Archetype::Shared.name());
            for file in ["client.ts", "index.ts"] {
                let content = render_template(ctx, &format!("extensions/trpc/shared/{}", file))?;
                if !write_if_absent(dir.join("src/trpc").join(file), &content)? {
                    debug!("Kept existing shared trpc/{}", file);
                }
            }
            add_dependencies(
                dir.join(MANIFEST_FILE),
                DependencyKind::Runtime,
                [("@trpc/client", "^11.0.0"), ("superjson", "^2.2.1")],
            )?;
        }

        Ok(ExtensionOutcome::new(self.id()))
    }
}

use super::{emit_file, has_package, Extension, ExtensionId, ExtensionOutcome};
use crate::constants::{
    GRAPHQL_CLIENT_DEPENDENCIES, GRAPHQL_SERVER_DEPENDENCIES, GRAPHQL_SERVER_PRISMA_DEPENDENCIES,
    MANIFEST_FILE,
};
use crate::error::Result;
use crate::manifest::{add_dependencies, DependencyKind};
use crate::packages::{Archetype, GenerationContext};
use std::path::Path;

const SERVER_FILES: &[(&str, &str)] = &[
    ("extensions/graphql/api/builder.ts", "builder.ts"),
    ("extensions/graphql/api/schema.ts", "schema.ts"),
    ("extensions/graphql/api/resolvers/index.ts", "resolvers/index.ts"),
];

/// Writes the request client into a web or mobile package at `dir`.
pub(super) fn emit_client(ctx: &GenerationContext, archetype: Archetype, dir: &Path) -> Result<()> {
    let template = match archetype {
        Archetype::Mobile => "extensions/graphql/client/client.native.ts",
        _ => "extensions/graphql/client/client.web.ts",
    };
    emit_file(ctx, template, &dir.join("src/graphql/client.ts"))?;
    add_dependencies(
        dir.join(MANIFEST_FILE),
        DependencyKind::Runtime,
        GRAPHQL_CLIENT_DEPENDENCIES.iter().copied(),
    )
}

/// GraphQL schema in the API and request clients for web and mobile.
pub struct GraphqlExtension;

impl Extension for GraphqlExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::Graphql
    }

    fn apply(&self, ctx: &GenerationContext) -> Result<ExtensionOutcome> {
        let api = ctx.package_dir(Archetype::Api.name());
        for (template, target) in SERVER_FILES {
            emit_file(ctx, template, &api.join("src/graphql").join(target))?;
        }

        let mut server_deps = GRAPHQL_SERVER_DEPENDENCIES.to_vec();
        if ctx.data.has_prisma {
            server_deps.extend_from_slice(GRAPHQL_SERVER_PRISMA_DEPENDENCIES);
        }
        add_dependencies(api.join(MANIFEST_FILE), DependencyKind::Runtime, server_deps)?;

        for client in [Archetype::Web, Archetype::Mobile] {
            if has_package(ctx, client.name()) {
                emit_client(ctx, client, &ctx.package_dir(client.name()))?;
            }
        }

        Ok(ExtensionOutcome::new(self.id()))
    }
}

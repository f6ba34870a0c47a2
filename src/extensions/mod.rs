//! Optional capabilities layered onto a generated workspace.
//!
//! An [`ExtensionPipeline`] starts unvalidated. [`ExtensionPipeline::validate`]
//! checks every prerequisite before anything is written and yields a
//! [`ValidatedPipeline`], which is the only thing that can be applied.
//! Extensions run in declaration order and the first hard failure aborts the
//! rest of the run.

mod api;
mod devcontainer;
mod graphql;
mod prisma;
mod trpc;

use crate::constants::MANIFEST_FILE;
use crate::copier::write_file;
use crate::devcontainer::DevcontainerSetting;
use crate::error::{Error, Result};
use crate::packages::{render_template, Archetype, GenerationContext, PackageOutcome};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The closed set of extensions, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionId {
    Api,
    Prisma,
    Trpc,
    Graphql,
    Devcontainer,
}

impl ExtensionId {
    pub const ALL: [ExtensionId; 5] = [
        ExtensionId::Api,
        ExtensionId::Prisma,
        ExtensionId::Trpc,
        ExtensionId::Graphql,
        ExtensionId::Devcontainer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExtensionId::Api => "api",
            ExtensionId::Prisma => "prisma",
            ExtensionId::Trpc => "trpc",
            ExtensionId::Graphql => "graphql",
            ExtensionId::Devcontainer => "devcontainer",
        }
    }

    /// Command line flag that enables the extension.
    pub fn flag(&self) -> String {
        format!("--with-{}", self.name())
    }

    pub fn prerequisites(&self) -> &'static [ExtensionId] {
        match self {
            ExtensionId::Trpc | ExtensionId::Graphql => &[ExtensionId::Api],
            ExtensionId::Api | ExtensionId::Prisma | ExtensionId::Devcontainer => &[],
        }
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which extensions a request enables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    pub api: bool,
    pub prisma: bool,
    pub trpc: bool,
    pub graphql: bool,
    pub devcontainer: DevcontainerSetting,
}

impl ExtensionConfig {
    pub fn is_enabled(&self, id: ExtensionId) -> bool {
        match id {
            ExtensionId::Api => self.api,
            ExtensionId::Prisma => self.prisma,
            ExtensionId::Trpc => self.trpc,
            ExtensionId::Graphql => self.graphql,
            ExtensionId::Devcontainer => self.devcontainer.is_enabled(),
        }
    }

    /// Enabled extensions in declaration order.
    pub fn enabled(&self) -> Vec<ExtensionId> {
        ExtensionId::ALL
            .into_iter()
            .filter(|id| self.is_enabled(*id))
            .collect()
    }
}

/// An enabled extension whose prerequisite is not enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingPrerequisite {
    pub extension: ExtensionId,
    pub requirement: ExtensionId,
}

impl MissingPrerequisite {
    /// Flag the user has to add.
    pub fn flag(&self) -> String {
        self.requirement.flag()
    }
}

impl From<MissingPrerequisite> for Error {
    fn from(missing: MissingPrerequisite) -> Self {
        Error::InvalidExtension {
            extension: missing.extension.name().to_string(),
            requirement: missing.requirement.name().to_string(),
            flag: missing.flag(),
        }
    }
}

/// Lists every unsatisfied prerequisite, in declaration order.
pub fn validate_extensions(config: &ExtensionConfig) -> Vec<MissingPrerequisite> {
    let mut missing = Vec::new();
    for extension in config.enabled() {
        for requirement in extension.prerequisites() {
            if !config.is_enabled(*requirement) {
                missing.push(MissingPrerequisite { extension, requirement: *requirement });
            }
        }
    }
    missing
}

/// What an applied extension produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionOutcome {
    pub id: ExtensionId,
    /// Packages the extension created.
    pub packages: Vec<PackageOutcome>,
    pub warnings: Vec<String>,
}

impl ExtensionOutcome {
    fn new(id: ExtensionId) -> Self {
        Self { id, packages: Vec::new(), warnings: Vec::new() }
    }
}

/// A generator for one extension.
pub trait Extension {
    fn id(&self) -> ExtensionId;

    /// Writes the extension's files and folds its manifest changes into the
    /// workspace described by `ctx`.
    fn apply(&self, ctx: &GenerationContext) -> Result<ExtensionOutcome>;
}

/// Returns the generator registered for `id`.
pub fn generator(id: ExtensionId, config: &ExtensionConfig) -> Box<dyn Extension> {
    match id {
        ExtensionId::Api => Box::new(api::ApiExtension),
        ExtensionId::Prisma => Box::new(prisma::PrismaExtension),
        ExtensionId::Trpc => Box::new(trpc::TrpcExtension),
        ExtensionId::Graphql => Box::new(graphql::GraphqlExtension),
        ExtensionId::Devcontainer => Box::new(devcontainer::DevcontainerExtension::new(
            config.devcontainer.normalize(),
        )),
    }
}

/// An extension set that has not been checked yet.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionPipeline<'a> {
    config: &'a ExtensionConfig,
}

impl<'a> ExtensionPipeline<'a> {
    pub fn new(config: &'a ExtensionConfig) -> Self {
        Self { config }
    }

    /// Checks prerequisites without touching the filesystem.
    ///
    /// # Errors
    /// * `Error::InvalidExtension` for the first enabled extension whose
    ///   prerequisite is missing
    pub fn validate(self) -> Result<ValidatedPipeline<'a>> {
        if let Some(missing) = validate_extensions(self.config).into_iter().next() {
            return Err(missing.into());
        }
        Ok(ValidatedPipeline { config: self.config, order: self.config.enabled() })
    }
}

/// A pipeline whose prerequisites are all satisfied.
#[derive(Debug, Clone)]
pub struct ValidatedPipeline<'a> {
    config: &'a ExtensionConfig,
    order: Vec<ExtensionId>,
}

impl ValidatedPipeline<'_> {
    pub fn extensions(&self) -> &[ExtensionId] {
        &self.order
    }

    /// Applies each enabled extension in declaration order.
    ///
    /// # Errors
    /// The first failing extension aborts the run; files already written by
    /// earlier extensions stay in place.
    pub fn apply(self, ctx: &GenerationContext) -> Result<PipelineReport> {
        let mut outcomes = Vec::with_capacity(self.order.len());
        for id in self.order {
            info!("Applying extension '{}'...", id);
            let outcome = generator(id, self.config).apply(ctx)?;
            debug!(
                "Extension '{}' created {} package(s) with {} warning(s)",
                id,
                outcome.packages.len(),
                outcome.warnings.len()
            );
            outcomes.push(outcome);
        }
        Ok(PipelineReport { outcomes })
    }
}

/// Aggregated result of a completed pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub outcomes: Vec<ExtensionOutcome>,
}

impl PipelineReport {
    pub fn applied(&self) -> Vec<ExtensionId> {
        self.outcomes.iter().map(|outcome| outcome.id).collect()
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageOutcome> {
        self.outcomes.iter().flat_map(|outcome| outcome.packages.iter())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &String> {
        self.outcomes.iter().flat_map(|outcome| outcome.warnings.iter())
    }
}

/// Adds the RPC and GraphQL client files a newly added client package needs,
/// following the `hasTrpc` and `hasGraphql` flags of `ctx`.
pub fn emit_client_integrations(
    ctx: &GenerationContext,
    archetype: Archetype,
    dir: &Path,
) -> Result<()> {
    if !archetype.is_client() {
        return Ok(());
    }
    if ctx.data.has_trpc {
        trpc::emit_client(ctx, archetype, dir)?;
    }
    if ctx.data.has_graphql {
        graphql::emit_client(ctx, archetype, dir)?;
    }
    Ok(())
}

/// True when `packages/<name>` already has a manifest.
fn has_package(ctx: &GenerationContext, name: &str) -> bool {
    ctx.package_dir(name).join(MANIFEST_FILE).is_file()
}

/// Names among `candidates` that already have a manifest under `packages/`.
fn existing_packages<'n>(ctx: &GenerationContext, candidates: &[&'n str]) -> Vec<&'n str> {
    candidates.iter().copied().filter(|name| has_package(ctx, name)).collect()
}

/// Renders the template at `template` and writes it to `target`.
fn emit_file(ctx: &GenerationContext, template: &str, target: &Path) -> Result<PathBuf> {
    let content = render_template(ctx, template)?;
    write_file(target, &content)?;
    debug!("Emitted '{}'", target.display());
    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_is_kept() {
        let config = ExtensionConfig {
            graphql: true,
            api: true,
            devcontainer: DevcontainerSetting::Toggle(true),
            ..ExtensionConfig::default()
        };
        assert_eq!(
            config.enabled(),
            vec![ExtensionId::Api, ExtensionId::Graphql, ExtensionId::Devcontainer]
        );
    }

    #[test]
    fn test_missing_prerequisites_are_listed() {
        let config = ExtensionConfig { trpc: true, graphql: true, ..ExtensionConfig::default() };
        let missing = validate_extensions(&config);
        assert_eq!(missing.len(), 2);
        assert!(missing.iter().all(|m| m.requirement == ExtensionId::Api));
        assert_eq!(missing[0].flag(), "--with-api");
    }

    #[test]
    fn test_validation_error_names_flag() {
        let config = ExtensionConfig { trpc: true, ..ExtensionConfig::default() };
        let err = ExtensionPipeline::new(&config).validate().unwrap_err();
        assert!(err.to_string().contains("Extension 'trpc' requires '--with-api' to be enabled."));
    }

    #[test]
    fn test_prerequisite_satisfied() {
        let config = ExtensionConfig { api: true, trpc: true, ..ExtensionConfig::default() };
        let pipeline = ExtensionPipeline::new(&config).validate().unwrap();
        assert_eq!(pipeline.extensions(), &[ExtensionId::Api, ExtensionId::Trpc]);
    }

    #[test]
    fn test_every_id_has_a_generator() {
        let config = ExtensionConfig::default();
        for id in ExtensionId::ALL {
            assert_eq!(generator(id, &config).id(), id);
        }
    }
}

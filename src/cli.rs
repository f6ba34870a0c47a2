//! Command-line interface implementation for monoforge.
//! Provides argument parsing and help text formatting using clap.

use crate::config::{load_config, ProjectConfig};
use crate::constants::SKIP_NATIVE_ENV;
use crate::devcontainer::DevcontainerSetting;
use crate::error::Result;
use crate::native::NativeMode;
use crate::orchestrator::AddRequest;
use crate::packages::Archetype;
use crate::template::DatabaseProvider;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for monoforge.
#[derive(Parser, Debug)]
#[command(author, version, about = "monoforge: multi-package workspace scaffolding", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show trace output and detailed error information
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new workspace with shared, web and mobile packages
    Init(InitArgs),

    /// Add a package to the workspace containing the current directory
    #[command(alias = "create")]
    Add(AddArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct InitArgs {
    /// Name of the workspace
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Parent directory of the new workspace
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Reverse-DNS organization domain, e.g. com.example
    #[arg(long)]
    pub org_domain: Option<String>,

    /// Display name of the mobile and web app
    #[arg(long)]
    pub app_name: Option<String>,

    /// Generate the API package
    #[arg(long)]
    pub with_api: bool,

    /// Generate the Prisma database package
    #[arg(long)]
    pub with_prisma: bool,

    /// Add a tRPC router and clients (requires --with-api)
    #[arg(long)]
    pub with_trpc: bool,

    /// Add a GraphQL schema and clients (requires --with-api)
    #[arg(long)]
    pub with_graphql: bool,

    /// Generate a development container with every service enabled
    #[arg(long)]
    pub with_devcontainer: bool,

    /// Database used by the Prisma package
    #[arg(long, value_enum)]
    pub database: Option<DatabaseProvider>,

    /// Generate into the target directory itself
    #[arg(long)]
    pub current_dir: bool,

    /// Never prompt; missing values take their defaults
    #[arg(long)]
    pub no_interactive: bool,

    /// Do not run `yarn install`
    #[arg(long)]
    pub skip_install: bool,

    /// Do not run the React Native CLI; mobile is generated from templates only
    #[arg(long)]
    pub skip_native: bool,

    /// Directory whose template sets override the built-in ones
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// JSON or YAML project configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Package directory name under packages/
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Kind of package to generate
    #[arg(short = 't', long = "type", value_enum)]
    pub archetype: Archetype,

    /// Display name of the app (required for mobile packages)
    #[arg(long)]
    pub app_name: Option<String>,

    /// Wire the package to the workspace's tRPC router
    #[arg(long)]
    pub with_trpc: bool,

    /// Wire the package to the workspace's GraphQL API
    #[arg(long)]
    pub with_graphql: bool,

    /// Scope for the package name instead of the workspace's own
    #[arg(long)]
    pub scope: Option<String>,

    /// Directory inside the workspace; the current directory by default
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Do not run `yarn install`
    #[arg(long)]
    pub skip_install: bool,

    /// Do not run the React Native CLI
    #[arg(long)]
    pub skip_native: bool,

    /// Directory whose template sets override the built-in ones
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

/// Native mode for the run: `--skip-native` or the skip environment variable
/// select the template-only path.
pub fn native_mode(skip_native: bool, env_skip: bool) -> NativeMode {
    if skip_native || env_skip {
        NativeMode::TemplateOnly
    } else {
        NativeMode::Toolchain
    }
}

/// Reads the native-toolchain skip toggle from the environment.
pub fn env_skip_native() -> bool {
    std::env::var(SKIP_NATIVE_ENV).is_ok_and(|value| matches!(value.as_str(), "1" | "true"))
}

impl InitArgs {
    /// Builds the project configuration: config file first, flags on top.
    pub fn to_config(&self, env_skip: bool) -> Result<ProjectConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProjectConfig::default(),
        };

        if let Some(name) = &self.name {
            config.project_name = name.clone();
        }
        if self.directory.is_some() {
            config.directory = self.directory.clone();
        }
        if self.org_domain.is_some() {
            config.org_domain = self.org_domain.clone();
        }
        if self.app_name.is_some() {
            config.app_display_name = self.app_name.clone();
        }
        if let Some(database) = self.database {
            config.database_provider = database;
        }
        if self.templates.is_some() {
            config.templates_dir = self.templates.clone();
        }

        let extensions = &mut config.extensions;
        extensions.api |= self.with_api;
        extensions.prisma |= self.with_prisma;
        extensions.trpc |= self.with_trpc;
        extensions.graphql |= self.with_graphql;
        if self.with_devcontainer {
            extensions.devcontainer = DevcontainerSetting::Toggle(true);
        }

        config.use_current_dir |= self.current_dir;
        config.skip_install |= self.skip_install;
        if native_mode(self.skip_native, env_skip) == NativeMode::TemplateOnly {
            config.native_mode = NativeMode::TemplateOnly;
        }
        config.interactive = !self.no_interactive;
        Ok(config)
    }
}

impl AddArgs {
    pub fn to_request(&self, env_skip: bool) -> Result<AddRequest> {
        let directory = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(AddRequest {
            name: self.name.clone(),
            archetype: self.archetype,
            app_display_name: self.app_name.clone(),
            scope: self.scope.clone(),
            with_trpc: self.with_trpc,
            with_graphql: self.with_graphql,
            directory,
            skip_install: self.skip_install,
            native_mode: native_mode(self.skip_native, env_skip),
            templates_dir: self.templates.clone(),
        })
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 after printing help if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command().print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

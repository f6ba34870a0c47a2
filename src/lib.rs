//! monoforge assembles multi-package workspaces from composable templates.
//! It provides the template processor, tree copier, manifest merger, workspace
//! resolution, the extension pipeline and the devcontainer composer used by the
//! `init` and `add` commands.

/// Command-line interface module for the monoforge binary
pub mod cli;

/// Project configuration loading and defaults
/// Supports JSON and YAML files
pub mod config;

/// Dependency tables, ports, timeouts and file classification lists
pub mod constants;

/// Copying of template trees into a destination
pub mod copier;

/// Development container composition
pub mod devcontainer;

/// Error types and handling for monoforge
pub mod error;

/// Optional capabilities applied after the base packages
pub mod extensions;

/// Ignore rules for template trees
/// Processes .templateignore files on top of the default patterns
pub mod ignore;

pub mod logger;

/// Deep merge of package manifests
pub mod manifest;

/// Native mobile project initialization
pub mod native;

/// Top-level `init` and `add` flows
pub mod orchestrator;

/// Per-archetype package generators and built-in templates
pub mod packages;

/// External commands with a timeout
pub mod process;

/// User input and interaction handling
pub mod prompt;

/// Placeholder substitution and conditional blocks
pub mod template;

/// Name, domain, identifier and extension validation
pub mod validation;

/// Workspace root detection and scope resolution
pub mod workspace;

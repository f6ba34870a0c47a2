//! Error handling for monoforge.
//! Defines the error type shared by every generation step and the result alias
//! used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating a request or generating a workspace.
///
/// Validation and precondition variants are raised before anything is written.
/// Everything else aborts the current step and propagates to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A file or directory could not be read or written.
    #[error("Failed to access '{path}': {source}.")]
    FileError { path: PathBuf, source: io::Error },

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid project name, package type, domain or identifier.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// An extension was enabled without one of its prerequisites.
    #[error("Extension '{extension}' requires '{flag}' to be enabled. Add {flag} to include the {requirement} extension.")]
    InvalidExtension { extension: String, requirement: String, flag: String },

    #[error("The '{operation}' command must be run from within a workspace (no manifest with a 'workspaces' field in '{}').", .dir.display())]
    NotInWorkspace { operation: String, dir: PathBuf },

    #[error("Template directory '{}' does not exist.", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Missing required arguments: {}.", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("Target '{}' already exists and is not empty.", .0.display())]
    TargetExists(PathBuf),

    /// Represents errors in processing ignore rules
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    #[error("Manifest error in '{}': {reason}.", .path.display())]
    ManifestError { path: PathBuf, reason: String },

    /// An external command could not be started or did not finish.
    #[error("Command '{command}' failed: {reason}.")]
    SubprocessError { command: String, reason: String },

    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

impl Error {
    /// Wraps an IO error with the path it concerns.
    pub fn file<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::FileError { path: path.into(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
/// * `debug` - Also print the structured `Debug` form of the error
///
/// # Behavior
/// Prints a single-line message to stderr and exits with status code 1
pub fn default_error_handler(err: Error, debug: bool) {
    eprintln!("Error: {}", err);
    if debug {
        eprintln!("{:#?}", err);
    }
    std::process::exit(1);
}

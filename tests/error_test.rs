use std::io;
use std::path::PathBuf;

use monoforge::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::MissingArguments(vec!["NAME".to_string(), "--type".to_string()]);
    assert_eq!(err.to_string(), "Missing required arguments: NAME, --type.");
}

#[test]
fn test_not_in_workspace_names_operation() {
    let err = Error::NotInWorkspace {
        operation: "add".to_string(),
        dir: PathBuf::from("/tmp/outside"),
    };
    let message = err.to_string();
    assert!(message.starts_with("The 'add' command must be run from within a workspace"));
    assert!(message.contains("/tmp/outside"));
}

#[test]
fn test_file_error_keeps_path() {
    let err = Error::file("/tmp/missing.json", io::Error::from(io::ErrorKind::NotFound));
    assert!(matches!(
        &err,
        Error::FileError { path, .. } if path == &PathBuf::from("/tmp/missing.json")
    ));
    assert!(err.to_string().contains("/tmp/missing.json"));
}

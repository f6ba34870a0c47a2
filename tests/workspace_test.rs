use monoforge::error::Error;
use monoforge::workspace::{
    find_workspace_root, is_workspace_root, resolve_project_path, scope_name, WorkspaceContext,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), content).unwrap();
}

#[test]
fn test_is_workspace_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    // Missing manifest
    assert!(!is_workspace_root(root));

    write_manifest(root, r#"{"name": "plain"}"#);
    assert!(!is_workspace_root(root));

    write_manifest(root, r#"{"name": "nulls", "workspaces": null}"#);
    assert!(!is_workspace_root(root));

    write_manifest(root, r#"{"name": "object", "workspaces": {"packages": ["a"]}}"#);
    assert!(!is_workspace_root(root));

    write_manifest(root, r#"{"name": "root", "workspaces": []}"#);
    assert!(is_workspace_root(root));

    write_manifest(root, "not json");
    assert!(!is_workspace_root(root));
}

#[test]
fn test_scope_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    assert_eq!(scope_name(root), None);

    write_manifest(root, r#"{"name": "@acme/platform"}"#);
    assert_eq!(scope_name(root).as_deref(), Some("acme"));

    write_manifest(root, r#"{"name": "platform"}"#);
    assert_eq!(scope_name(root).as_deref(), Some("platform"));

    write_manifest(root, r#"{"version": "1.0.0"}"#);
    assert_eq!(scope_name(root), None);
}

#[test]
fn test_scope_name_without_package_part() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_manifest(root, r#"{"name": "@acme"}"#);
    assert_eq!(scope_name(root).as_deref(), Some("acme"));

    write_manifest(root, r#"{"name": "@"}"#);
    assert_eq!(scope_name(root), None);

    write_manifest(root, r#"{"name": "@/platform"}"#);
    assert_eq!(scope_name(root), None);
}

#[test]
fn test_resolve_outside_workspace_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_manifest(root, r#"{"name": "not-a-workspace"}"#);

    let err = resolve_project_path("my-app", root).unwrap_err();

    assert!(matches!(err, Error::NotInWorkspace { .. }));
    assert!(!root.join("packages").exists());
}

#[test]
fn test_resolve_inside_workspace() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_manifest(root, r#"{"name": "@acme/root", "workspaces": ["packages/*"]}"#);

    let location = resolve_project_path("my-app", root).unwrap();

    assert_eq!(location.project_path, root.join("packages").join("my-app"));
    assert_eq!(location.workspace_path, "packages/my-app");
    assert_eq!(location.scope.as_deref(), Some("acme"));
    assert!(!location.project_path.exists());
}

#[test]
fn test_workspace_context_from_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_manifest(root, r#"{"name": "@acme/root", "workspaces": ["packages/*"]}"#);
    write_manifest(&root.join("packages/web"), r#"{"name": "@acme/web"}"#);
    fs::create_dir_all(root.join("packages/api/src")).unwrap();
    fs::write(root.join("packages/README.md"), "not a package").unwrap();

    let nested = root.join("packages/api/src");
    assert_eq!(find_workspace_root(&nested).as_deref(), Some(root));

    let workspace = WorkspaceContext::resolve(&nested, "add").unwrap();
    assert_eq!(workspace.root, root);
    assert_eq!(workspace.scope.as_deref(), Some("acme"));
    assert_eq!(workspace.packages, vec!["api", "web"]);
    assert!(workspace.has_package("web"));
    assert!(!workspace.has_package("mobile"));
}

#[test]
fn test_workspace_context_outside_workspace() {
    let temp_dir = TempDir::new().unwrap();
    let err = WorkspaceContext::resolve(temp_dir.path(), "add").unwrap_err();
    assert!(matches!(err, Error::NotInWorkspace { operation, .. } if operation == "add"));
}

use monoforge::manifest::{
    add_dependencies, add_scripts, add_to_workspaces, add_workspace_dependencies, deep_merge,
    read_manifest, DependencyKind, ManifestDocument, ManifestValue,
};
use serde_json::{json, Value as Json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_manifest_json(dir: &Path, value: Json) -> PathBuf {
    let path = dir.join("package.json");
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn read_json(path: &Path) -> Json {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_add_scripts_keeps_existing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manifest_json(temp_dir.path(), json!({"name": "root", "scripts": {"a": "x"}}));

    add_scripts(&path, [("b", "y")]).unwrap();

    assert_eq!(read_json(&path)["scripts"], json!({"a": "x", "b": "y"}));
}

#[test]
fn test_add_scripts_replaces_same_key_only() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manifest_json(
        temp_dir.path(),
        json!({"name": "root", "scripts": {"dev": "old", "lint": "eslint ."}}),
    );

    add_scripts(&path, [("dev", "new")]).unwrap();

    assert_eq!(read_json(&path)["scripts"], json!({"dev": "new", "lint": "eslint ."}));
}

#[test]
fn test_deep_merge_is_idempotent() {
    let target: ManifestValue = json!({
        "name": "root",
        "scripts": {"dev": "vite"},
        "workspaces": ["packages/web"],
    })
    .into();
    let source: ManifestValue = json!({
        "scripts": {"build": "tsc"},
        "workspaces": ["packages/api", "packages/web"],
        "dependencies": {"react": "^19.0.0"},
    })
    .into();

    let once = deep_merge(target, source.clone());
    let twice = deep_merge(once.clone(), source);
    assert_eq!(once, twice);
}

#[test]
fn test_add_dependencies_sorts_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manifest_json(
        temp_dir.path(),
        json!({"name": "web", "dependencies": {"zod": "^3.0.0", "react": "^19.0.0"}}),
    );

    add_dependencies(&path, DependencyKind::Runtime, [("axios", "^1.6.0")]).unwrap();
    add_dependencies(&path, DependencyKind::Dev, [("vite", "^5.2.0")]).unwrap();

    let manifest = read_json(&path);
    let names: Vec<&String> = manifest["dependencies"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["axios", "react", "zod"]);
    assert_eq!(manifest["devDependencies"], json!({"vite": "^5.2.0"}));
    assert_eq!(manifest["name"], "web");
}

#[test]
fn test_workspace_dependency_edges() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manifest_json(temp_dir.path(), json!({"name": "@acme/web"}));

    add_workspace_dependencies(&path, ["@acme/shared", "@acme/api"]).unwrap();
    add_workspace_dependencies(&path, ["@acme/shared"]).unwrap();

    assert_eq!(
        read_json(&path)["dependencies"],
        json!({"@acme/api": "workspace:*", "@acme/shared": "workspace:*"})
    );
}

#[test]
fn test_two_siblings_registered_once_each() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manifest_json(temp_dir.path(), json!({"name": "root", "workspaces": []}));

    assert!(add_to_workspaces(&path, "packages/web").unwrap());
    assert!(add_to_workspaces(&path, "packages/api").unwrap());
    assert!(!add_to_workspaces(&path, "packages/web").unwrap());

    assert_eq!(read_json(&path)["workspaces"], json!(["packages/api", "packages/web"]));
}

#[test]
fn test_glob_covers_package() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manifest_json(
        temp_dir.path(),
        json!({"name": "root", "workspaces": ["packages/*"]}),
    );

    assert!(!add_to_workspaces(&path, "packages/admin").unwrap());
    assert!(add_to_workspaces(&path, "tools/cli").unwrap());

    assert_eq!(read_json(&path)["workspaces"], json!(["packages/*", "tools/cli"]));
}

#[test]
fn test_manifest_document_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("packages/shared/package.json");

    ManifestDocument::new("@acme/shared")
        .version("1.0.0")
        .private()
        .entry("src/index.ts")
        .export(".", "./src/index.ts")
        .scripts(&[("build", "tsc")])
        .dependencies(DependencyKind::Runtime, [("zod", "^3.0.0"), ("axios", "^1.6.0")])
        .dependencies(DependencyKind::Peer, [("react", "*")])
        .extra("sideEffects", json!(false))
        .write(&path)
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("}\n"));
    let manifest = read_json(&path);
    assert_eq!(manifest["name"], "@acme/shared");
    assert_eq!(manifest["main"], "src/index.ts");
    assert_eq!(manifest["types"], "src/index.ts");
    assert_eq!(manifest["exports"], json!({".": "./src/index.ts"}));
    assert_eq!(manifest["peerDependencies"], json!({"react": "*"}));
    assert_eq!(manifest["sideEffects"], json!(false));
    assert!(manifest.get("workspaces").is_none());
    let names: Vec<&String> = manifest["dependencies"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["axios", "zod"]);
}

#[test]
fn test_non_object_manifest_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("package.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(read_manifest(&path).is_err());
    assert!(add_scripts(&path, [("dev", "vite")]).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
}

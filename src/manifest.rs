//! Manifest (`package.json`) composition.
//!
//! Merging works over [`ManifestValue`], an explicit object/array/scalar tree.
//! Objects merge key by key, arrays are unioned in first-seen order and any other
//! pairing is overwritten by the source. Every convenience operation reads the
//! whole manifest, changes it in memory and writes it back in one go.

use crate::error::{Error, Result};
use globset::Glob;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Number, Value as Json};
use std::fs;
use std::path::Path;

/// Leaf values of a manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A manifest node.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestValue {
    Object(IndexMap<String, ManifestValue>),
    Array(Vec<ManifestValue>),
    Scalar(Scalar),
}

impl ManifestValue {
    pub fn object() -> Self {
        ManifestValue::Object(IndexMap::new())
    }

    pub fn string<S: Into<String>>(value: S) -> Self {
        ManifestValue::Scalar(Scalar::String(value.into()))
    }

    /// Object with string values, e.g. a dependency or script map.
    pub fn string_map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ManifestValue::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), ManifestValue::string(v)))
                .collect(),
        )
    }

    /// Wraps `value` as `{ key: value }`.
    pub fn with_key<S: Into<String>>(key: S, value: ManifestValue) -> Self {
        let mut map = IndexMap::new();
        map.insert(key.into(), value);
        ManifestValue::Object(map)
    }

    pub fn get(&self, key: &str) -> Option<&ManifestValue> {
        match self {
            ManifestValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ManifestValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ManifestValue]> {
        match self {
            ManifestValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Json> for ManifestValue {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => ManifestValue::Scalar(Scalar::Null),
            Json::Bool(b) => ManifestValue::Scalar(Scalar::Bool(b)),
            Json::Number(n) => ManifestValue::Scalar(Scalar::Number(n)),
            Json::String(s) => ManifestValue::Scalar(Scalar::String(s)),
            Json::Array(items) => ManifestValue::Array(items.into_iter().map(Into::into).collect()),
            Json::Object(map) => {
                ManifestValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<ManifestValue> for Json {
    fn from(value: ManifestValue) -> Self {
        match value {
            ManifestValue::Scalar(Scalar::Null) => Json::Null,
            ManifestValue::Scalar(Scalar::Bool(b)) => Json::Bool(b),
            ManifestValue::Scalar(Scalar::Number(n)) => Json::Number(n),
            ManifestValue::Scalar(Scalar::String(s)) => Json::String(s),
            ManifestValue::Array(items) => Json::Array(items.into_iter().map(Into::into).collect()),
            ManifestValue::Object(map) => {
                Json::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect::<Map<_, _>>())
            }
        }
    }
}

/// Deep-merges `source` into `target`.
///
/// Both objects: merge per key. Both arrays: union without duplicates, keeping
/// the order in which values were first seen. Anything else: `source` wins,
/// including an explicit `null`.
pub fn deep_merge(target: ManifestValue, source: ManifestValue) -> ManifestValue {
    match (target, source) {
        (ManifestValue::Object(mut target), ManifestValue::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => {
                        let current =
                            std::mem::replace(existing, ManifestValue::Scalar(Scalar::Null));
                        *existing = deep_merge(current, value);
                    }
                    None => {
                        target.insert(key, value);
                    }
                }
            }
            ManifestValue::Object(target)
        }
        (ManifestValue::Array(target), ManifestValue::Array(source)) => {
            let mut union: Vec<ManifestValue> = Vec::with_capacity(target.len() + source.len());
            for item in target.into_iter().chain(source) {
                if !union.contains(&item) {
                    union.push(item);
                }
            }
            ManifestValue::Array(union)
        }
        (_, source) => source,
    }
}

/// Which dependency map of a manifest to modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Dev,
    Peer,
}

impl DependencyKind {
    pub fn key(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
            DependencyKind::Peer => "peerDependencies",
        }
    }
}

/// Reads a manifest from disk.
///
/// # Errors
/// * `Error::ManifestError` if the document is not a JSON object
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<ManifestValue> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    let json: Json = serde_json::from_str(&content).map_err(|e| Error::ManifestError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    match ManifestValue::from(json) {
        value @ ManifestValue::Object(_) => Ok(value),
        _ => Err(Error::ManifestError {
            path: path.to_path_buf(),
            reason: "top-level value is not an object".to_string(),
        }),
    }
}

/// Writes a manifest pretty-printed with a trailing newline.
pub fn write_manifest<P: AsRef<Path>>(path: P, manifest: ManifestValue) -> Result<()> {
    let path = path.as_ref();
    let json: Json = manifest.into();
    let mut content = serde_json::to_string_pretty(&json)?;
    content.push('\n');
    fs::write(path, content).map_err(|e| Error::file(path, e))
}

/// Reads, merges `partial` into and writes back the manifest at `path`.
pub fn merge_into<P: AsRef<Path>>(path: P, partial: ManifestValue) -> Result<()> {
    let path = path.as_ref();
    let merged = deep_merge(read_manifest(path)?, partial);
    write_manifest(path, merged)?;
    debug!("Updated manifest '{}'", path.display());
    Ok(())
}

fn sort_keys(value: &mut ManifestValue, key: &str) {
    if let ManifestValue::Object(root) = value {
        if let Some(ManifestValue::Object(map)) = root.get_mut(key) {
            map.sort_keys();
        }
    }
}

/// Merges dependencies into the `kind` map, then sorts that map by name.
pub fn add_dependencies<P, I, K, V>(path: P, kind: DependencyKind, deps: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let path = path.as_ref();
    let partial = ManifestValue::with_key(kind.key(), ManifestValue::string_map(deps));
    let mut merged = deep_merge(read_manifest(path)?, partial);
    sort_keys(&mut merged, kind.key());
    write_manifest(path, merged)
}

/// Adds `"<name>": "workspace:*"` edges to the runtime dependencies.
pub fn add_workspace_dependencies<P, I, S>(path: P, packages: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    add_dependencies(
        path,
        DependencyKind::Runtime,
        packages.into_iter().map(|name| (Into::<String>::into(name), "workspace:*")),
    )
}

/// Merges scripts; an existing script is replaced only by a script of the same name.
pub fn add_scripts<P, I, K, V>(path: P, scripts: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    merge_into(path, ManifestValue::with_key("scripts", ManifestValue::string_map(scripts)))
}

/// True when an existing workspace entry already covers `package_path`.
pub fn workspace_covers(entries: &[ManifestValue], package_path: &str) -> bool {
    entries.iter().filter_map(ManifestValue::as_str).any(|entry| {
        let entry = entry.trim_end_matches('/');
        entry == package_path
            || Glob::new(entry)
                .map(|glob| glob.compile_matcher().is_match(package_path))
                .unwrap_or(false)
    })
}

/// Registers `package_path` in the root `workspaces` list unless already covered.
///
/// # Returns
/// * `Result<bool>` - Whether the list was changed
pub fn add_to_workspaces<P: AsRef<Path>>(path: P, package_path: &str) -> Result<bool> {
    let path = path.as_ref();
    let mut manifest = read_manifest(path)?;
    let ManifestValue::Object(root) = &mut manifest else {
        return Ok(false);
    };

    if !matches!(root.get("workspaces"), Some(ManifestValue::Array(_))) {
        root.insert("workspaces".to_string(), ManifestValue::Array(Vec::new()));
    }
    let Some(ManifestValue::Array(entries)) = root.get_mut("workspaces") else {
        return Ok(false);
    };

    if workspace_covers(entries, package_path) {
        debug!("'{}' is already covered by the workspaces list", package_path);
        return Ok(false);
    }
    entries.push(ManifestValue::string(package_path));
    entries.sort_by(|a, b| a.as_str().unwrap_or_default().cmp(b.as_str().unwrap_or_default()));
    write_manifest(path, manifest)?;
    Ok(true)
}

/// Typed builder for brand-new package manifests.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub exports: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<String>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub scripts: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub peer_dependencies: IndexMap<String, String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Json>,
}

impl ManifestDocument {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.private = Some(true);
        self
    }

    /// Sets `"type"`, e.g. `module`.
    pub fn module_type<S: Into<String>>(mut self, module_type: S) -> Self {
        self.module_type = Some(module_type.into());
        self
    }

    /// Sets both `main` and `types` to the entry file.
    pub fn entry<S: Into<String>>(mut self, entry: S) -> Self {
        let entry = entry.into();
        self.main = Some(entry.clone());
        self.types = Some(entry);
        self
    }

    pub fn workspaces(mut self, workspaces: &[&str]) -> Self {
        self.workspaces = Some(workspaces.iter().map(|w| w.to_string()).collect());
        self
    }

    pub fn scripts(mut self, scripts: &[(&str, &str)]) -> Self {
        self.scripts
            .extend(scripts.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Adds dependencies of `kind`; later entries replace earlier ones with the same name.
    pub fn dependencies<I, K, V>(mut self, kind: DependencyKind, deps: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = match kind {
            DependencyKind::Runtime => &mut self.dependencies,
            DependencyKind::Dev => &mut self.dev_dependencies,
            DependencyKind::Peer => &mut self.peer_dependencies,
        };
        map.extend(deps.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn export<K: Into<String>, V: Into<String>>(mut self, path: K, target: V) -> Self {
        self.exports.insert(path.into(), target.into());
        self
    }

    pub fn extra<K: Into<String>>(mut self, key: K, value: Json) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Writes the manifest with dependency maps sorted by name.
    pub fn write<P: AsRef<Path>>(mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.dependencies.sort_keys();
        self.dev_dependencies.sort_keys();
        self.peer_dependencies.sort_keys();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
        }
        let mut content = serde_json::to_string_pretty(&self)?;
        content.push('\n');
        fs::write(path, content).map_err(|e| Error::file(path, e))?;
        debug!("Wrote manifest '{}'", path.display());
        Ok(())
    }
}

/// Writes any serializable value as pretty JSON with a trailing newline.
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
    }
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content).map_err(|e| Error::file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(json: Json) -> ManifestValue {
        json.into()
    }

    #[test]
    fn test_objects_merge_recursively() {
        let merged = deep_merge(
            value(json!({"scripts": {"a": "x"}, "name": "root"})),
            value(json!({"scripts": {"b": "y"}})),
        );
        assert_eq!(merged, value(json!({"scripts": {"a": "x", "b": "y"}, "name": "root"})));
    }

    #[test]
    fn test_arrays_union_in_first_seen_order() {
        let merged = deep_merge(value(json!(["b", "a"])), value(json!(["c", "a", "b", "c"])));
        assert_eq!(merged, value(json!(["b", "a", "c"])));
    }

    #[test]
    fn test_null_source_overwrites() {
        let merged = deep_merge(value(json!({"main": "index.js"})), value(json!({"main": null})));
        assert_eq!(merged, value(json!({"main": null})));
    }

    #[test]
    fn test_scalar_replaced_by_object() {
        let merged = deep_merge(
            value(json!({"exports": "./index.js"})),
            value(json!({"exports": {".": "./src/index.ts"}})),
        );
        assert_eq!(merged, value(json!({"exports": {".": "./src/index.ts"}})));
    }

    #[test]
    fn test_existing_key_keeps_position() {
        let merged = deep_merge(
            value(json!({"name": "a", "version": "1.0.0", "private": true})),
            value(json!({"version": "2.0.0"})),
        );
        let keys: Vec<&str> = match &merged {
            ManifestValue::Object(map) => map.keys().map(String::as_str).collect(),
            _ => unreachable!(),
        };
        assert_eq!(keys, vec!["name", "version", "private"]);
    }

    #[test]
    fn test_workspace_covers() {
        let entries = vec![ManifestValue::string("packages/*")];
        assert!(workspace_covers(&entries, "packages/web"));
        assert!(!workspace_covers(&entries, "apps/web"));
        let exact = vec![ManifestValue::string("packages/web/")];
        assert!(workspace_covers(&exact, "packages/web"));
    }
}

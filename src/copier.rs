//! Recursive template tree copying.
//!
//! Text files are routed through [`process_content`], binary files are copied
//! byte-for-byte, and entries matching the [`IgnoreRules`] are skipped along with
//! everything below them.

use crate::constants::DOTFILE_SUFFIX;
use crate::error::{Error, Result};
use crate::ignore::IgnoreRules;
use crate::template::{process_content, should_process_file, TemplateData};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Maps a template basename to its destination basename.
///
/// `gitignore.dotfile` becomes `.gitignore`; any other name is unchanged.
pub fn destination_name(name: &str) -> String {
    match name.strip_suffix(DOTFILE_SUFFIX) {
        Some(stem) if !stem.is_empty() => format!(".{}", stem.trim_start_matches('.')),
        _ => name.to_string(),
    }
}

fn destination_path(dest_root: &Path, relative: &Path) -> PathBuf {
    let mut target = dest_root.to_path_buf();
    for component in relative.components() {
        let name = component.as_os_str().to_string_lossy();
        target.push(OsString::from(destination_name(&name)));
    }
    target
}

/// True when `dir` exists and contains at least one entry.
pub fn template_has_content<P: AsRef<Path>>(dir: P) -> bool {
    fs::read_dir(dir.as_ref())
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Copies a single template file, processing it when it is text.
///
/// # Arguments
/// * `source` - Template file to read
/// * `target` - Destination path, parent directories are created
/// * `data` - Substitution values
pub fn copy_file<S: AsRef<Path>, T: AsRef<Path>>(
    source: S,
    target: T,
    data: &TemplateData,
) -> Result<()> {
    let (source, target) = (source.as_ref(), target.as_ref());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
    }

    if should_process_file(target) {
        let content = fs::read_to_string(source).map_err(|e| Error::file(source, e))?;
        fs::write(target, process_content(&content, data)).map_err(|e| Error::file(target, e))?;
        debug!("Processed '{}' -> '{}'", source.display(), target.display());
    } else {
        fs::copy(source, target).map_err(|e| Error::file(target, e))?;
        debug!("Copied '{}' -> '{}'", source.display(), target.display());
    }
    Ok(())
}

/// Copies `src_dir` into `dest_dir`, applying ignore rules and template processing.
///
/// # Arguments
/// * `src_dir` - Template directory, must exist
/// * `dest_dir` - Destination directory, created if missing
/// * `data` - Substitution values
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Destination paths of the files written
///
/// # Errors
/// * `Error::TemplateNotFound` if `src_dir` is not a directory
/// * `Error::FileError` for the first file that fails to read or write
pub fn copy_tree<S: AsRef<Path>, D: AsRef<Path>>(
    src_dir: S,
    dest_dir: D,
    data: &TemplateData,
) -> Result<Vec<PathBuf>> {
    let (src_dir, dest_dir) = (src_dir.as_ref(), dest_dir.as_ref());
    if !src_dir.is_dir() {
        return Err(Error::TemplateNotFound(src_dir.to_path_buf()));
    }
    let rules = IgnoreRules::for_template(src_dir)?;
    fs::create_dir_all(dest_dir).map_err(|e| Error::file(dest_dir, e))?;

    let mut written = Vec::new();
    let walker = WalkDir::new(src_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let skip = rules.is_ignored(entry.file_name());
            if skip {
                debug!("Ignoring '{}'", entry.path().display());
            }
            !skip
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let target = destination_path(dest_dir, relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::file(&target, e))?;
        } else {
            copy_file(entry.path(), &target, data)?;
            written.push(target);
        }
    }
    Ok(written)
}

/// Copies a directory byte-for-byte with no ignore rules or processing.
///
/// Used to take a snapshot of a package before an external tool rewrites it.
pub fn snapshot_tree<S: AsRef<Path>, D: AsRef<Path>>(src_dir: S, dest_dir: D) -> Result<()> {
    let (src_dir, dest_dir) = (src_dir.as_ref(), dest_dir.as_ref());
    for entry in WalkDir::new(src_dir) {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let target = dest_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::file(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| Error::file(&target, e))?;
        }
    }
    Ok(())
}

/// Writes generated content, creating parent directories first.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::file(path, e))
}

/// Writes `content` only when nothing exists at `path` yet.
///
/// Returns whether the file was written.
pub fn write_if_absent<P: AsRef<Path>>(path: P, content: &str) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        debug!("Keeping existing '{}'", path.display());
        return Ok(false);
    }
    write_file(path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_name() {
        assert_eq!(destination_name("gitignore.dotfile"), ".gitignore");
        assert_eq!(destination_name("env.example.dotfile"), ".env.example");
        assert_eq!(destination_name(".dotfile"), ".dotfile");
        assert_eq!(destination_name("App.tsx"), "App.tsx");
    }

    #[test]
    fn test_destination_path_renames_every_component() {
        let target = destination_path(Path::new("/out"), Path::new("vscode.dotfile/settings.json"));
        assert_eq!(target, PathBuf::from("/out/.vscode/settings.json"));
    }
}

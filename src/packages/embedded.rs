//! Built-in templates compiled into the binary.
//!
//! Each set mirrors a directory under `templates/`; pointing `--templates` at
//! that directory reproduces the same output through the tree copier.

use super::GenerationContext;
use crate::copier::{copy_tree, destination_name, template_has_content, write_file};
use crate::error::{Error, Result};
use crate::template::{process_content, should_process_file, TemplateData};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// A template file and its path relative to the templates root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedFile {
    pub path: &'static str,
    pub content: &'static str,
}

macro_rules! embed {
    ($($path:literal),* $(,)?) => {
        &[$(EmbeddedFile {
            path: $path,
            content: include_str!(concat!("../../templates/", $path)),
        }),*]
    };
}

const WORKSPACE: &[EmbeddedFile] = embed![
    "workspace/README.md",
    "workspace/gitignore.dotfile",
    "workspace/tsconfig.json",
    "workspace/yarnrc.yml.dotfile",
];

const SHARED: &[EmbeddedFile] = embed![
    "shared/src/App.tsx",
    "shared/src/index.ts",
    "shared/src/screens/HomeScreen.tsx",
    "shared/src/screens/index.ts",
    "shared/src/theme.ts",
];

const WEB: &[EmbeddedFile] = embed![
    "web/index.html",
    "web/src/App.tsx",
    "web/src/main.tsx",
    "web/vite.config.ts",
];

const MOBILE: &[EmbeddedFile] = embed![
    "mobile/app.json",
    "mobile/babel.config.js",
    "mobile/index.js",
    "mobile/metro.config.js",
    "mobile/src/App.tsx",
];

const API: &[EmbeddedFile] = embed![
    "api/env.example.dotfile",
    "api/src/index.ts",
    "api/src/server.ts",
    "api/tsconfig.json",
];

const DATABASE: &[EmbeddedFile] = embed![
    "database/prisma/schema.prisma",
    "database/src/index.ts",
    "database/src/schemas.ts",
];

const EXTENSIONS: &[EmbeddedFile] = embed![
    "extensions/trpc/api/router.ts",
    "extensions/trpc/api/trpc.ts",
    "extensions/trpc/client/trpc.native.tsx",
    "extensions/trpc/client/trpc.web.tsx",
    "extensions/trpc/shared/client.ts",
    "extensions/trpc/shared/index.ts",
    "extensions/graphql/api/builder.ts",
    "extensions/graphql/api/resolvers/index.ts",
    "extensions/graphql/api/schema.ts",
    "extensions/graphql/client/client.native.ts",
    "extensions/graphql/client/client.web.ts",
];

const ALL_SETS: &[&[EmbeddedFile]] = &[WORKSPACE, SHARED, WEB, MOBILE, API, DATABASE, EXTENSIONS];

/// Embedded files whose path starts with `set/`.
pub fn embedded_set(set: &str) -> Vec<&'static EmbeddedFile> {
    let prefix = format!("{}/", set.trim_end_matches('/'));
    ALL_SETS
        .iter()
        .flat_map(|files| files.iter())
        .filter(|file| file.path.starts_with(&prefix))
        .collect()
}

fn embedded_file(path: &str) -> Option<&'static EmbeddedFile> {
    ALL_SETS
        .iter()
        .flat_map(|files| files.iter())
        .find(|file| file.path == path)
}

fn relative_target(dest: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(dest.to_path_buf(), |path, part| path.join(destination_name(part)))
}

fn emit_embedded(set: &str, dest: &Path, data: &TemplateData) -> Result<Vec<PathBuf>> {
    let files = embedded_set(set);
    if files.is_empty() {
        return Err(Error::TemplateNotFound(PathBuf::from(set)));
    }
    let prefix = format!("{}/", set.trim_end_matches('/'));
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let relative = file.path.strip_prefix(&prefix).unwrap_or(file.path);
        let target = relative_target(dest, relative);
        let content = if should_process_file(&target) {
            process_content(file.content, data)
        } else {
            file.content.to_string()
        };
        write_file(&target, &content)?;
        debug!("Emitted '{}'", target.display());
        written.push(target);
    }
    Ok(written)
}

/// Writes template set `set` into `dest`.
///
/// A non-empty `<templates_dir>/<set>` directory takes precedence and goes through
/// the tree copier; otherwise the built-in files are emitted.
pub fn emit_template(ctx: &GenerationContext, set: &str, dest: &Path) -> Result<Vec<PathBuf>> {
    if let Some(custom) = ctx.custom_template(set) {
        if template_has_content(&custom) {
            debug!("Using template directory '{}'", custom.display());
            return copy_tree(&custom, dest, ctx.data);
        }
    }
    emit_embedded(set, dest, ctx.data)
}

/// Renders one template file, e.g. `extensions/trpc/api/router.ts`.
pub fn render_template(ctx: &GenerationContext, path: &str) -> Result<String> {
    let raw = match ctx.custom_template(path).filter(|p| p.is_file()) {
        Some(custom) => fs::read_to_string(&custom).map_err(|e| Error::file(&custom, e))?,
        None => embedded_file(path)
            .map(|file| file.content.to_string())
            .ok_or_else(|| Error::TemplateNotFound(PathBuf::from(path)))?,
    };
    Ok(process_content(&raw, ctx.data))
}

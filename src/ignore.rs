//! Ignore rules for template trees.
//! Entries are matched by basename against the default patterns and any
//! patterns listed in the template's `.templateignore` file.

use crate::constants::{DEFAULT_IGNORE_PATTERNS, TEMPLATE_IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{ffi::OsStr, fs::read_to_string, path::Path};

/// Compiled set of basename patterns.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    set: GlobSet,
}

impl IgnoreRules {
    /// Built-in patterns plus `extra`.
    pub fn with_patterns<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in DEFAULT_IGNORE_PATTERNS {
            builder.add(compile(pattern)?);
        }
        for pattern in extra {
            builder.add(compile(pattern.as_ref())?);
        }
        let set = builder
            .build()
            .map_err(|e| Error::IgnoreError(format!("ignore rules failed to build: {}", e)))?;
        Ok(Self { set })
    }

    /// Loads the rules for a template root, including its `.templateignore` if present.
    ///
    /// # Notes
    /// - Blank lines and lines starting with `#` are skipped
    /// - A trailing `/` is dropped so directory patterns match the directory name
    pub fn for_template<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let ignore_path = template_root.as_ref().join(TEMPLATE_IGNORE_FILE);
        let patterns: Vec<String> = match read_to_string(&ignore_path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(|line| line.trim_end_matches('/').to_string())
                .collect(),
            Err(_) => {
                debug!(
                    "{} does not exist in '{}'",
                    TEMPLATE_IGNORE_FILE,
                    template_root.as_ref().display()
                );
                Vec::new()
            }
        };
        Self::with_patterns(patterns)
    }

    /// True when `name` (a basename) matches any rule.
    pub fn is_ignored<S: AsRef<OsStr>>(&self, name: S) -> bool {
        self.set.is_match(Path::new(name.as_ref()))
    }
}

fn compile(pattern: &str) -> Result<Glob> {
    Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("invalid pattern '{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let rules = IgnoreRules::with_patterns(std::iter::empty::<&str>()).unwrap();
        assert!(rules.is_ignored("node_modules"));
        assert!(rules.is_ignored(".git"));
        assert!(rules.is_ignored("debug.log"));
        assert!(rules.is_ignored("App.tsx.bak"));
        assert!(rules.is_ignored("notes~"));
        assert!(rules.is_ignored(".templateignore"));
        assert!(!rules.is_ignored("App.tsx"));
        assert!(!rules.is_ignored("builder.ts"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = IgnoreRules::with_patterns(["a[b"]).unwrap_err();
        assert!(matches!(err, Error::IgnoreError(_)));
    }
}

//! Native mobile project initialization.
//!
//! The React Native CLI creates the `android/` and `ios/` folders. It is a
//! best-effort step: when it fails or times out, the package directory is put
//! back the way it was and generation continues from templates alone.

use crate::constants::{MOBILE_BACKUP_DIR, NATIVE_INIT_TIMEOUT};
use crate::copier::snapshot_tree;
use crate::error::{Error, Result};
use crate::process::{run_command, CommandStatus};
use crate::template::TemplateData;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Whether the native toolchain may be invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NativeMode {
    #[default]
    Toolchain,
    /// Never spawn the toolchain; always take the template-only path.
    TemplateOnly,
}

/// Result of a native initialization attempt that did not abort generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome {
    Initialized,
    /// Native folders were not created; the package is template-only.
    Fallback { warning: String },
}

impl NativeOutcome {
    pub fn warning(&self) -> Option<&str> {
        match self {
            NativeOutcome::Initialized => None,
            NativeOutcome::Fallback { warning } => Some(warning),
        }
    }
}

struct Snapshot {
    backup: PathBuf,
}

impl Snapshot {
    fn take(package_dir: &Path) -> Result<Option<Self>> {
        if !package_dir.exists() {
            return Ok(None);
        }
        let backup = package_dir
            .parent()
            .unwrap_or(package_dir)
            .join(MOBILE_BACKUP_DIR);
        if backup.exists() {
            fs::remove_dir_all(&backup).map_err(|e| Error::file(&backup, e))?;
        }
        snapshot_tree(package_dir, &backup)?;
        fs::remove_dir_all(package_dir).map_err(|e| Error::file(package_dir, e))?;
        debug!("Saved '{}' to '{}'", package_dir.display(), backup.display());
        Ok(Some(Self { backup }))
    }

    fn restore(self, package_dir: &Path) -> Result<()> {
        if package_dir.exists() {
            fs::remove_dir_all(package_dir).map_err(|e| Error::file(package_dir, e))?;
        }
        fs::rename(&self.backup, package_dir).map_err(|e| Error::file(package_dir, e))?;
        debug!("Restored '{}' from snapshot", package_dir.display());
        Ok(())
    }

    fn discard(self) -> Result<()> {
        fs::remove_dir_all(&self.backup).map_err(|e| Error::file(&self.backup, e))
    }
}

fn init_args(name: &str, data: &TemplateData) -> Vec<String> {
    let mut args = vec![
        "@react-native-community/cli@latest".to_string(),
        "init".to_string(),
        name.to_string(),
        "--directory".to_string(),
        name.to_string(),
        "--title".to_string(),
        data.app_display_name.clone(),
        "--pm".to_string(),
        "yarn".to_string(),
        "--skip-git-init".to_string(),
        "--skip-install".to_string(),
    ];
    if !data.android_package_name.is_empty() {
        args.push("--package-name".to_string());
        args.push(data.android_package_name.clone());
    }
    args
}

/// Creates native folders for the mobile package `name` under `packages_dir`.
///
/// # Returns
/// * `NativeOutcome::Initialized` when the CLI succeeded
/// * `NativeOutcome::Fallback` when it was disabled, failed or timed out, after
///   restoring any pre-existing package directory
///
/// # Errors
/// Only failures to take or restore the snapshot are returned as errors.
pub fn initialize_native(
    packages_dir: &Path,
    name: &str,
    data: &TemplateData,
    mode: NativeMode,
) -> Result<NativeOutcome> {
    if mode == NativeMode::TemplateOnly {
        return Ok(NativeOutcome::Fallback {
            warning: format!(
                "Native toolchain disabled; '{}' was generated without android/ios folders.",
                name
            ),
        });
    }

    fs::create_dir_all(packages_dir).map_err(|e| Error::file(packages_dir, e))?;
    let package_dir = packages_dir.join(name);
    let snapshot = Snapshot::take(&package_dir)?;

    info!("Initializing React Native project '{}'...", name);
    let args = init_args(name, data);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let reason = match run_command("npx", &args, packages_dir, NATIVE_INIT_TIMEOUT) {
        Ok(CommandStatus::Success) => None,
        Ok(CommandStatus::Failed(code)) => Some(format!("the CLI exited with {:?}", code)),
        Ok(CommandStatus::TimedOut) => Some(format!(
            "the CLI timed out after {}s",
            NATIVE_INIT_TIMEOUT.as_secs()
        )),
        Err(e) => Some(e.to_string()),
    };

    match reason {
        None => {
            if let Some(snapshot) = snapshot {
                snapshot.discard()?;
            }
            Ok(NativeOutcome::Initialized)
        }
        Some(reason) => {
            match snapshot {
                Some(snapshot) => snapshot.restore(&package_dir)?,
                None if package_dir.exists() => {
                    fs::remove_dir_all(&package_dir).map_err(|e| Error::file(&package_dir, e))?
                }
                None => {}
            }
            let warning = format!(
                "Native initialization of '{}' failed ({}); continuing with templates only. \
                 Run 'npx @react-native-community/cli init' in packages/{} to add android/ios.",
                name, reason, name
            );
            warn!("{}", warning);
            Ok(NativeOutcome::Fallback { warning })
        }
    }
}

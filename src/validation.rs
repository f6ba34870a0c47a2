//! Input validation that runs before anything is written.

use crate::constants::JAVA_RESERVED_WORDS;
use crate::error::{Error, Result};
use crate::extensions::{validate_extensions, ExtensionConfig};
use regex::Regex;
use std::sync::LazyLock;

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid package name pattern"));

static DOMAIN_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid domain segment pattern"));

static IOS_BUNDLE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").expect("valid bundle id pattern")
});

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const DISPLAY_NAME_MAX: usize = 50;

/// Validates a project or package name.
///
/// Names are 2 to 50 characters of lowercase letters, digits and single
/// hyphens, starting with a letter and not ending with a hyphen.
pub fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(Error::ValidationError(format!(
            "Name '{}' must be between {} and {} characters",
            name, NAME_MIN, NAME_MAX
        )));
    }
    if !PACKAGE_NAME.is_match(name) {
        return Err(Error::ValidationError(format!(
            "Name '{}' must start with a lowercase letter and contain only lowercase letters, digits and hyphens",
            name
        )));
    }
    if name.ends_with('-') || name.contains("--") {
        return Err(Error::ValidationError(format!(
            "Name '{}' must not end with a hyphen or contain consecutive hyphens",
            name
        )));
    }
    Ok(())
}

/// Validates a reverse-DNS organization domain such as `com.acme`.
pub fn validate_org_domain(domain: &str) -> Result<()> {
    let segments: Vec<&str> = domain.split('.').collect();
    if segments.len() < 2 {
        return Err(Error::ValidationError(format!(
            "Organization domain '{}' needs at least two segments, e.g. com.example",
            domain
        )));
    }
    for segment in segments {
        if !DOMAIN_SEGMENT.is_match(segment) {
            return Err(Error::ValidationError(format!(
                "Domain segment '{}' must start with a lowercase letter and contain only lowercase letters, digits and underscores",
                segment
            )));
        }
        if JAVA_RESERVED_WORDS.contains(&segment) {
            return Err(Error::ValidationError(format!(
                "Domain segment '{}' is a reserved Java keyword",
                segment
            )));
        }
    }
    Ok(())
}

pub fn validate_app_display_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::ValidationError("App display name must not be empty".to_string()));
    }
    if name.chars().count() > DISPLAY_NAME_MAX {
        return Err(Error::ValidationError(format!(
            "App display name must be at most {} characters",
            DISPLAY_NAME_MAX
        )));
    }
    Ok(())
}

/// Platform identifiers of the mobile application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentifiers {
    pub ios_bundle_id: String,
    pub android_package_name: String,
}

impl AppIdentifiers {
    /// Derives both identifiers from an organization domain and a project name.
    ///
    /// Hyphens are kept for iOS and removed for Android, where they are not
    /// legal in package names.
    pub fn derive(org_domain: &str, name: &str) -> Self {
        Self {
            ios_bundle_id: format!("{}.{}", org_domain, name),
            android_package_name: format!("{}.{}", org_domain, name.replace('-', "")),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !IOS_BUNDLE_ID.is_match(&self.ios_bundle_id) {
            return Err(Error::ValidationError(format!(
                "Invalid iOS bundle identifier '{}'",
                self.ios_bundle_id
            )));
        }
        validate_org_domain(&self.android_package_name).map_err(|_| {
            Error::ValidationError(format!(
                "Invalid Android package name '{}'",
                self.android_package_name
            ))
        })
    }
}

/// Rejects an extension set with an unsatisfied prerequisite.
pub fn validate_extension_config(config: &ExtensionConfig) -> Result<()> {
    match validate_extensions(config).into_iter().next() {
        Some(missing) => Err(missing.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["ab", "my-app", "app2", "a-b-c"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["a", "My-app", "1app", "app-", "my--app", "my_app", &"a".repeat(51)] {
            assert!(validate_name(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn test_org_domain() {
        assert!(validate_org_domain("com.acme").is_ok());
        assert!(validate_org_domain("io.acme_labs.dev").is_ok());
        assert!(validate_org_domain("acme").is_err());
        assert!(validate_org_domain("com.Acme").is_err());
        assert!(validate_org_domain("com.1acme").is_err());
        assert!(validate_org_domain("com..acme").is_err());
        assert!(validate_org_domain("com.new").is_err());
    }

    #[test]
    fn test_display_name() {
        assert!(validate_app_display_name("My App").is_ok());
        assert!(validate_app_display_name("  ").is_err());
        assert!(validate_app_display_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_identifiers_strip_hyphen_for_android() {
        let ids = AppIdentifiers::derive("com.acme", "my-app");
        assert_eq!(ids.ios_bundle_id, "com.acme.my-app");
        assert_eq!(ids.android_package_name, "com.acme.myapp");
        assert!(ids.validate().is_ok());
    }
}

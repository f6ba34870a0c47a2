use monoforge::ignore::IgnoreRules;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_template_ignore_file() {
    let temp_dir = TempDir::new().unwrap();

    // Without .templateignore only the defaults apply
    let rules = IgnoreRules::for_template(temp_dir.path()).unwrap();
    assert!(rules.is_ignored(".DS_Store"));
    assert!(!rules.is_ignored("scratch.tmp"));

    let mut file = File::create(temp_dir.path().join(".templateignore")).unwrap();
    writeln!(file, "# local files\n*.tmp\n\nfixtures/").unwrap();

    let rules = IgnoreRules::for_template(temp_dir.path()).unwrap();
    assert!(rules.is_ignored("scratch.tmp"));
    assert!(rules.is_ignored("fixtures"));
    assert!(rules.is_ignored("yarn.lock"));
    assert!(!rules.is_ignored("# local files"));
}

#[test]
fn test_exact_names_and_wildcards() {
    let rules = IgnoreRules::with_patterns(["secret.txt", "*.orig"]).unwrap();
    assert!(rules.is_ignored("secret.txt"));
    assert!(rules.is_ignored("App.tsx.orig"));
    assert!(!rules.is_ignored("secret.txt.example"));
    assert!(rules.is_ignored("dist"));
    assert!(rules.is_ignored("package-lock.json"));
}

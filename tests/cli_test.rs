use clap::Parser;
use monoforge::cli::{native_mode, Args, Command};
use monoforge::devcontainer::DevcontainerSetting;
use monoforge::native::NativeMode;
use monoforge::packages::Archetype;
use monoforge::template::DatabaseProvider;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("monoforge")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_init() {
    let parsed = Args::try_parse_from(make_args(&["init", "my-app"])).unwrap();

    assert!(!parsed.verbose);
    assert!(!parsed.debug);
    let Command::Init(init) = parsed.command else {
        panic!("Expected init command");
    };
    assert_eq!(init.name.as_deref(), Some("my-app"));
    assert!(!init.with_api);
    assert!(!init.skip_install);

    let config = init.to_config(false).unwrap();
    assert_eq!(config.project_name, "my-app");
    assert!(config.interactive);
    assert_eq!(config.native_mode, NativeMode::Toolchain);
    assert!(config.extensions.enabled().is_empty());
}

#[test]
fn test_init_extension_flags() {
    let args = make_args(&[
        "init",
        "shop",
        "--with-api",
        "--with-prisma",
        "--with-trpc",
        "--with-graphql",
        "--with-devcontainer",
        "--database",
        "postgresql",
        "--skip-install",
        "--no-interactive",
        "-d",
        "/tmp/work",
        "-v",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    assert!(parsed.verbose);
    let Command::Init(init) = parsed.command else {
        panic!("Expected init command");
    };

    let config = init.to_config(false).unwrap();
    assert!(config.extensions.api && config.extensions.prisma);
    assert!(config.extensions.trpc && config.extensions.graphql);
    assert_eq!(config.extensions.devcontainer, DevcontainerSetting::Toggle(true));
    assert_eq!(config.database_provider, DatabaseProvider::Postgresql);
    assert_eq!(config.directory, Some(PathBuf::from("/tmp/work")));
    assert!(config.skip_install);
    assert!(!config.interactive);
}

#[test]
fn test_skip_native_sources() {
    assert_eq!(native_mode(false, false), NativeMode::Toolchain);
    assert_eq!(native_mode(true, false), NativeMode::TemplateOnly);
    assert_eq!(native_mode(false, true), NativeMode::TemplateOnly);

    let parsed = Args::try_parse_from(make_args(&["init", "my-app"])).unwrap();
    let Command::Init(init) = parsed.command else {
        panic!("Expected init command");
    };
    assert_eq!(init.to_config(true).unwrap().native_mode, NativeMode::TemplateOnly);
}

#[test]
fn test_config_file_with_flag_override() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("monoforge.yml");
    fs::write(
        &path,
        "projectName: from-file\norgDomain: com.acme\nextensions:\n  api: true\n",
    )
    .unwrap();

    let args = make_args(&["init", "from-flag", "--config", path.to_str().unwrap(), "--with-trpc"]);
    let parsed = Args::try_parse_from(args).unwrap();
    let Command::Init(init) = parsed.command else {
        panic!("Expected init command");
    };

    let config = init.to_config(false).unwrap();
    assert_eq!(config.project_name, "from-flag");
    assert_eq!(config.org_domain.as_deref(), Some("com.acme"));
    assert!(config.extensions.api && config.extensions.trpc);
}

#[test]
fn test_add_command() {
    let args = make_args(&[
        "add",
        "admin",
        "--type",
        "web",
        "--with-trpc",
        "--scope",
        "tools",
        "--directory",
        "/tmp/ws",
        "--skip-native",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    let Command::Add(add) = parsed.command else {
        panic!("Expected add command");
    };
    assert_eq!(add.archetype, Archetype::Web);

    let request = add.to_request(false).unwrap();
    assert_eq!(request.name, "admin");
    assert!(request.with_trpc && !request.with_graphql);
    assert_eq!(request.scope.as_deref(), Some("tools"));
    assert_eq!(request.directory, PathBuf::from("/tmp/ws"));
    assert_eq!(request.native_mode, NativeMode::TemplateOnly);
}

#[test]
fn test_create_alias_and_short_type() {
    let parsed =
        Args::try_parse_from(make_args(&["create", "kiosk", "-t", "mobile", "--app-name", "Kiosk"]))
            .unwrap();
    let Command::Add(add) = parsed.command else {
        panic!("Expected add command");
    };
    assert_eq!(add.archetype, Archetype::Mobile);
    assert_eq!(add.app_name.as_deref(), Some("Kiosk"));
}

#[test]
fn test_global_flags_after_subcommand() {
    let parsed = Args::try_parse_from(make_args(&["add", "api", "-t", "api", "--debug"])).unwrap();
    assert!(parsed.debug);
}

#[test]
fn test_invalid_args() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
    assert!(Args::try_parse_from(make_args(&["add", "admin"])).is_err());
    assert!(Args::try_parse_from(make_args(&["add", "admin", "--type", "desktop"])).is_err());
    assert!(Args::try_parse_from(make_args(&["init", "--database", "mysql"])).is_err());
}

//! Fixed tables shared by the generators: dependency versions, ports, timeouts
//! and the file classification lists used by the template processor.

use std::time::Duration;

/// Version of the UI framework packages the generated workspace depends on.
pub const FRAMEWORK_VERSION: &str = "1.2.0";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const PACKAGE_MANAGER: &str = "yarn@4.1.0";

/// Conventional subdirectory that holds workspace members.
pub const PACKAGES_DIR: &str = "packages";
pub const MANIFEST_FILE: &str = "package.json";
pub const DEVCONTAINER_DIR: &str = ".devcontainer";

/// Filename suffix that marks a template file as a dotfile on the destination side.
pub const DOTFILE_SUFFIX: &str = ".dotfile";
pub const TEMPLATE_IGNORE_FILE: &str = ".templateignore";
pub const MOBILE_BACKUP_DIR: &str = ".mobile-backup";

pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);
pub const NATIVE_INIT_TIMEOUT: Duration = Duration::from_secs(600);
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Seconds the devcontainer setup script waits for each service.
pub const SERVICE_WAIT_SECONDS: u32 = 30;

pub const API_PORT: u16 = 3000;
pub const WEB_PORT: u16 = 5173;
pub const METRO_PORT: u16 = 8081;
pub const EXPO_WEB_PORT: u16 = 19006;
pub const POSTGRES_PORT: u16 = 5432;
pub const REDIS_PORT: u16 = 6379;
pub const CHROME_HOST_PORT: u16 = 3100;
pub const CHROME_CONTAINER_PORT: u16 = 3000;

/// Environment variable the CLI reads to force the template-only mobile path.
pub const SKIP_NATIVE_ENV: &str = "MONOFORGE_SKIP_NATIVE";

pub type DependencyTable = &'static [(&'static str, &'static str)];

pub const CORE_DEPENDENCIES: DependencyTable = &[
    ("@idealyst/components", "^1.2.0"),
    ("@idealyst/navigation", "^1.2.0"),
    ("@idealyst/theme", "^1.2.0"),
    ("react-native-unistyles", "^3.0.0"),
];

pub const WEB_DEPENDENCIES: DependencyTable = &[
    ("react", "^19.1.0"),
    ("react-dom", "^19.1.0"),
    ("react-native-web", "^0.21.0"),
    ("react-router-dom", "^6.23.0"),
];

pub const MOBILE_DEPENDENCIES: DependencyTable = &[
    ("react", "19.1.0"),
    ("react-native", "0.83.0"),
    ("react-native-safe-area-context", "^5.4.0"),
    ("react-native-screens", "^4.11.0"),
    ("react-native-svg", "^15.12.0"),
];

pub const TOOLING_DEV_DEPENDENCIES: DependencyTable = &[
    ("@types/jest", "^29.5.0"),
    ("jest", "^29.7.0"),
    ("typescript", "^5.0.0"),
];

pub const API_DEPENDENCIES: DependencyTable = &[
    ("cors", "^2.8.5"),
    ("dotenv", "^16.4.0"),
    ("express", "^4.19.0"),
];

pub const API_DEV_DEPENDENCIES: DependencyTable = &[
    ("@types/cors", "^2.8.17"),
    ("@types/express", "^4.17.21"),
    ("@types/node", "^20.12.0"),
    ("tsx", "^4.7.0"),
    ("typescript", "^5.0.0"),
];

pub const PRISMA_DEPENDENCIES: DependencyTable =
    &[("@prisma/client", "^5.14.0"), ("zod", "^3.23.0")];

pub const PRISMA_DEV_DEPENDENCIES: DependencyTable =
    &[("prisma", "^5.14.0"), ("typescript", "^5.0.0")];

pub const TRPC_SERVER_DEPENDENCIES: DependencyTable = &[
    ("@trpc/server", "^11.0.0"),
    ("superjson", "^2.2.1"),
    ("zod", "^3.23.0"),
];

pub const TRPC_CLIENT_DEPENDENCIES: DependencyTable = &[
    ("@tanstack/react-query", "^5.40.0"),
    ("@trpc/client", "^11.0.0"),
    ("@trpc/react-query", "^11.0.0"),
    ("superjson", "^2.2.1"),
];

pub const GRAPHQL_SERVER_DEPENDENCIES: DependencyTable = &[
    ("@pothos/core", "^3.41.0"),
    ("graphql", "^16.8.0"),
    ("graphql-yoga", "^5.3.0"),
];

pub const GRAPHQL_SERVER_PRISMA_DEPENDENCIES: DependencyTable =
    &[("@pothos/plugin-prisma", "^3.65.0")];

pub const GRAPHQL_CLIENT_DEPENDENCIES: DependencyTable = &[
    ("@tanstack/react-query", "^5.40.0"),
    ("graphql", "^16.8.0"),
    ("graphql-request", "^7.0.0"),
];

pub const ROOT_DEV_DEPENDENCIES: DependencyTable = &[
    ("concurrently", "^8.2.2"),
    ("jest", "^29.7.0"),
    ("typescript", "^5.0.0"),
];

/// Substring that marks dotenv-style files as text regardless of extension.
pub const ENV_MARKER: &str = ".env";

/// Extensions that are never template-processed.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "bmp", "ttf", "otf", "woff", "woff2",
    "eot", "zip", "gz", "tgz", "tar", "7z", "jar", "keystore", "bin", "dat", "pdf", "mp3",
    "mp4", "mov", "wav",
];

/// Compiled bundles whose extension would otherwise look like text.
pub const MINIFIED_SUFFIXES: &[&str] = &[".min.js", ".min.css"];

/// Extensions that are template-processed.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "json", "md", "txt", "yml", "yaml", "toml", "xml",
    "html", "css", "scss", "sh", "conf", "sql", "prisma", "graphql", "gradle", "properties",
    "example", "gitignore", "dockerignore",
];

/// Extensionless filenames that are template-processed.
pub const TEXT_FILENAMES: &[&str] = &["Dockerfile", "LICENSE", "README", "Makefile"];

/// Basename patterns skipped by the tree copier.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".turbo",
    ".cache",
    "coverage",
    ".DS_Store",
    "*.log",
    "yarn.lock",
    "package-lock.json",
    "*.bak",
    "*~",
    "*.swp",
    TEMPLATE_IGNORE_FILE,
];

/// Java keywords that cannot appear as an Android package segment.
pub const JAVA_RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

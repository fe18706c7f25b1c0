//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.speechcore/build.toml` - User-wide defaults
//! - Project: `.speechcore/build.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Environment variables
//! and CLI flags are layered on top by [`crate::builder::BuildContext`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable supplying the build-variant hint.
pub const BUILD_TYPE_ENV: &str = "PYTHON_BUILD_TYPE";

/// Environment variable overriding the binding generator include directory.
pub const BINDINGS_INCLUDE_ENV: &str = "PYBIND11_INCLUDE";

/// Name of the configuration directory (both global and per project).
pub const CONFIG_DIR_NAME: &str = ".speechcore";

/// Name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "build.toml";

/// Build configuration.
///
/// Every field is optional so that layers can be merged; accessors supply
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filesystem layout
    pub paths: PathsConfig,

    /// Build policy
    pub build: BuildConfig,
}

/// Filesystem layout, relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathsConfig {
    /// Root of the prebuilt static library tree (default `lib`)
    pub lib_root: Option<PathBuf>,

    /// Root of the prebuilt runtime DLL tree (default `bin`)
    pub bin_root: Option<PathBuf>,

    /// Package install directory receiving staged DLLs (default `speech_core`)
    pub package_dir: Option<PathBuf>,

    /// Public headers of the native library (default `include`)
    pub include_dir: Option<PathBuf>,

    /// Headers of the binding generator (default `extern/pybind11/include`)
    pub bindings_include: Option<PathBuf>,

    /// Binding source compiled into the extension (default `speech_core/bindings.cpp`)
    pub source: Option<PathBuf>,
}

/// Build policy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// What to do when no prebuilt library is found
    pub on_missing: Option<OnMissing>,

    /// Which variant drives the Windows C runtime flag
    pub crt_source: Option<CrtSource>,

    /// Minimum macOS deployment target
    pub macos_min_version: Option<String>,
}

/// Policy for a failed static library resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMissing {
    /// Stop the build with a diagnostic.
    #[default]
    Abort,
    /// Report, continue with an empty library search path, and let the
    /// native linker fail.
    Defer,
}

/// Source of the build variant used for the Windows C runtime flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrtSource {
    /// Follow the externally supplied hint (`/MTd` iff hint is `debug`).
    #[default]
    Hint,
    /// Follow the variant the resolver actually matched.
    Matched,
}

impl PathsConfig {
    pub fn lib_root(&self) -> PathBuf {
        self.lib_root.clone().unwrap_or_else(|| PathBuf::from("lib"))
    }

    pub fn bin_root(&self) -> PathBuf {
        self.bin_root.clone().unwrap_or_else(|| PathBuf::from("bin"))
    }

    pub fn package_dir(&self) -> PathBuf {
        self.package_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("speech_core"))
    }

    pub fn include_dir(&self) -> PathBuf {
        self.include_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("include"))
    }

    pub fn bindings_include(&self) -> PathBuf {
        self.bindings_include
            .clone()
            .unwrap_or_else(|| PathBuf::from("extern/pybind11/include"))
    }

    pub fn source(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| PathBuf::from("speech_core/bindings.cpp"))
    }
}

impl BuildConfig {
    pub fn on_missing(&self) -> OnMissing {
        self.on_missing.unwrap_or_default()
    }

    pub fn crt_source(&self) -> CrtSource {
        self.crt_source.unwrap_or_default()
    }

    pub fn macos_min_version(&self) -> &str {
        self.macos_min_version.as_deref().unwrap_or("10.15")
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let Config { paths, build } = other;

        merge_opt(&mut self.paths.lib_root, paths.lib_root);
        merge_opt(&mut self.paths.bin_root, paths.bin_root);
        merge_opt(&mut self.paths.package_dir, paths.package_dir);
        merge_opt(&mut self.paths.include_dir, paths.include_dir);
        merge_opt(&mut self.paths.bindings_include, paths.bindings_include);
        merge_opt(&mut self.paths.source, paths.source);

        merge_opt(&mut self.build.on_missing, build.on_missing);
        merge_opt(&mut self.build.crt_source, build.crt_source);
        merge_opt(&mut self.build.macos_min_version, build.macos_min_version);
    }
}

fn merge_opt<T>(slot: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *slot = other;
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`.speechcore/build.toml`)
/// 2. Global config (`~/.speechcore/build.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (`~/.speechcore`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (`~/.speechcore/build.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the project config path (`<root>/.speechcore/build.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

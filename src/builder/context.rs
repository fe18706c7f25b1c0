//! Build context - platform, architecture, variant hint and layout.
//!
//! The context is computed once per process and passed explicitly into the
//! resolver and the flag assembler so both see the same target.

use std::path::{Path, PathBuf};

use crate::core::{Architecture, BuildVariant, Platform};
use crate::util::config::{
    global_config_path, load_config, project_config_path, Config, BINDINGS_INCLUDE_ENV,
    BUILD_TYPE_ENV,
};
use crate::util::fs::normalize_path;

/// Inputs for constructing a [`BuildContext`].
///
/// Raw identifiers left unset are read from the host.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Project root containing `lib/`, `bin/` and the package directory
    pub root: PathBuf,

    /// Raw OS identifier override (e.g. `win32`, `darwin`, `linux`)
    pub platform: Option<String>,

    /// Raw machine identifier override (e.g. `amd64`, `aarch64`)
    pub arch: Option<String>,

    /// Build-variant hint, unvalidated
    pub build_type: Option<String>,

    /// Binding generator include directory override
    pub bindings_include: Option<PathBuf>,

    /// Explicit configuration; loaded from config files when unset
    pub config: Option<Config>,

    /// Global config file to layer under the project one; defaults to
    /// `~/.speechcore/build.toml`
    pub global_config: Option<PathBuf>,
}

impl ContextOptions {
    /// Create options rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ContextOptions {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Create options rooted at `root`, reading the variant hint and the
    /// binding include override from the environment.
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        let mut opts = Self::new(root);
        opts.build_type = std::env::var(BUILD_TYPE_ENV).ok();
        opts.bindings_include = std::env::var_os(BINDINGS_INCLUDE_ENV).map(PathBuf::from);
        opts
    }

    pub fn with_platform(mut self, raw: impl Into<String>) -> Self {
        self.platform = Some(raw.into());
        self
    }

    pub fn with_arch(mut self, raw: impl Into<String>) -> Self {
        self.arch = Some(raw.into());
        self
    }

    pub fn with_build_type(mut self, hint: impl Into<String>) -> Self {
        self.build_type = Some(hint.into());
        self
    }

    pub fn with_bindings_include(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bindings_include = Some(dir.into());
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config = Some(path.into());
        self
    }
}

/// Immutable build configuration shared by every stage.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Target platform
    pub platform: Platform,

    /// Target architecture
    pub arch: Architecture,

    /// Validated build-variant hint, if one was supplied
    pub hint: Option<BuildVariant>,

    /// Absolute project root
    pub root: PathBuf,

    /// Merged configuration
    pub config: Config,
}

impl BuildContext {
    /// Build the context, emitting a warning for every identifier that had
    /// to fall back to a default.
    pub fn from_options(opts: ContextOptions) -> Self {
        let platform = match opts.platform.as_deref() {
            Some(raw) => Platform::identify(raw),
            None => Platform::host(),
        };
        if let Some(ref warning) = platform.warning {
            tracing::warn!("{}", warning);
        }

        let arch = match opts.arch.as_deref() {
            Some(raw) => Architecture::identify(raw),
            None => Architecture::host(),
        };
        if let Some(ref warning) = arch.warning {
            tracing::warn!("{}", warning);
        }

        let hint = BuildVariant::from_hint(opts.build_type.as_deref());

        let root = normalize_path(&opts.root);

        let mut config = opts.config.unwrap_or_else(|| {
            let global = opts.global_config.or_else(global_config_path);
            load_config(global.as_deref(), &project_config_path(&root))
        });
        if let Some(dir) = opts.bindings_include {
            config.paths.bindings_include = Some(dir);
        }

        tracing::debug!(
            "build context: platform={}, arch={}, hint={}",
            platform.value,
            arch.value,
            hint.map(|v| v.as_str()).unwrap_or("none")
        );

        BuildContext {
            platform: platform.value,
            arch: arch.value,
            hint,
            root,
            config,
        }
    }

    fn rooted(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Root of the prebuilt static library tree.
    pub fn lib_root(&self) -> PathBuf {
        self.rooted(&self.config.paths.lib_root())
    }

    /// Directory holding the runtime DLLs for this architecture.
    pub fn dll_source_dir(&self) -> PathBuf {
        self.rooted(&self.config.paths.bin_root())
            .join(self.arch.dll_dir_name())
    }

    /// Package install directory.
    pub fn package_dir(&self) -> PathBuf {
        self.rooted(&self.config.paths.package_dir())
    }

    /// Public header directory of the native library.
    pub fn include_dir(&self) -> PathBuf {
        self.rooted(&self.config.paths.include_dir())
    }

    /// Header directory of the binding generator.
    pub fn bindings_include(&self) -> PathBuf {
        self.rooted(&self.config.paths.bindings_include())
    }

    /// Binding source compiled into the extension.
    pub fn source(&self) -> PathBuf {
        self.rooted(&self.config.paths.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_are_identified() {
        let tmp = TempDir::new().unwrap();
        let ctx = BuildContext::from_options(
            ContextOptions::new(tmp.path())
                .with_platform("win32")
                .with_arch("AMD64")
                .with_build_type("debug")
                .with_config(Config::default()),
        );

        assert_eq!(ctx.platform, Platform::Windows);
        assert_eq!(ctx.arch, Architecture::X86_64);
        assert_eq!(ctx.hint, Some(BuildVariant::Debug));
    }

    #[test]
    fn test_unknown_identifiers_fall_back() {
        let tmp = TempDir::new().unwrap();
        let ctx = BuildContext::from_options(
            ContextOptions::new(tmp.path())
                .with_platform("plan9")
                .with_arch("sparc")
                .with_build_type("fastest")
                .with_config(Config::default()),
        );

        assert_eq!(ctx.platform, Platform::Windows);
        assert_eq!(ctx.arch, Architecture::X86_64);
        assert_eq!(ctx.hint, None);
    }

    #[test]
    fn test_layout_is_rooted() {
        let tmp = TempDir::new().unwrap();
        let ctx = BuildContext::from_options(
            ContextOptions::new(tmp.path())
                .with_platform("windows")
                .with_arch("i686")
                .with_config(Config::default()),
        );

        assert!(ctx.root.is_absolute());
        assert_eq!(ctx.lib_root(), ctx.root.join("lib"));
        assert_eq!(ctx.dll_source_dir(), ctx.root.join("bin").join("x86"));
        assert_eq!(ctx.package_dir(), ctx.root.join("speech_core"));
        assert_eq!(ctx.include_dir(), ctx.root.join("include"));
    }

    #[test]
    fn test_project_config_file_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let cfg_path = project_config_path(tmp.path());
        std::fs::create_dir_all(cfg_path.parent().unwrap()).unwrap();
        std::fs::write(&cfg_path, "[paths]\npackage-dir = \"pkg\"\n").unwrap();

        let ctx = BuildContext::from_options(
            ContextOptions::new(tmp.path())
                .with_global_config(tmp.path().join("home/build.toml"))
                .with_bindings_include("/opt/pybind11/include"),
        );

        assert_eq!(ctx.package_dir(), ctx.root.join("pkg"));
        assert_eq!(ctx.lib_root(), ctx.root.join("lib"));
        assert_eq!(
            ctx.bindings_include(),
            PathBuf::from("/opt/pybind11/include")
        );
    }

    #[test]
    fn test_project_config_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("home/build.toml");
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(
            &global,
            "[paths]\nlib-root = \"global-lib\"\npackage-dir = \"global-pkg\"\n",
        )
        .unwrap();

        let project = tmp.path().join("proj");
        let cfg_path = project_config_path(&project);
        std::fs::create_dir_all(cfg_path.parent().unwrap()).unwrap();
        std::fs::write(&cfg_path, "[paths]\npackage-dir = \"pkg\"\n").unwrap();

        let ctx = BuildContext::from_options(
            ContextOptions::new(&project).with_global_config(&global),
        );

        assert_eq!(ctx.lib_root(), ctx.root.join("global-lib"));
        assert_eq!(ctx.package_dir(), ctx.root.join("pkg"));
    }

    #[test]
    fn test_from_env_reads_hint_and_bindings_include() {
        std::env::set_var(BUILD_TYPE_ENV, "debug");
        std::env::set_var(BINDINGS_INCLUDE_ENV, "/opt/pybind11/include");
        let opts = ContextOptions::from_env("proj");
        std::env::remove_var(BUILD_TYPE_ENV);
        std::env::remove_var(BINDINGS_INCLUDE_ENV);

        assert_eq!(opts.build_type.as_deref(), Some("debug"));
        assert_eq!(
            opts.bindings_include,
            Some(PathBuf::from("/opt/pybind11/include"))
        );
    }
}

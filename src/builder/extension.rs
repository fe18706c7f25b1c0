//! Extension module descriptor.
//!
//! The single build unit handed to the packaging backend: one binding
//! source compiled and linked against the resolved static library.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::flags::Flags;
use crate::builder::resolver::ResolvedLibrary;
use crate::builder::BuildContext;
use crate::core::{Architecture, BuildVariant, Platform};
use crate::util::fs::ensure_dir;

/// Distribution name of the package.
pub const PACKAGE_NAME: &str = "SpeechCore";

/// Dotted name of the extension module inside the package.
pub const MODULE_NAME: &str = "speech_core.SpeechCore";

/// Source language of the binding unit.
pub const LANGUAGE: &str = "c++";

/// Everything a backend needs to compile the extension module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionDescriptor {
    /// Dotted module name
    pub name: String,
    /// Source files compiled into the module
    pub sources: Vec<PathBuf>,
    /// Header search paths
    pub include_dirs: Vec<PathBuf>,
    /// Library search paths
    pub library_dirs: Vec<PathBuf>,
    /// Libraries to link
    pub libraries: Vec<String>,
    /// Extra compiler arguments
    pub extra_compile_args: Vec<String>,
    /// Extra linker arguments
    pub extra_link_args: Vec<String>,
    /// Source language
    pub language: String,
    /// Target the descriptor was assembled for
    pub target: TargetInfo,
}

/// Target information recorded alongside the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetInfo {
    pub platform: Platform,
    pub arch: Architecture,
    /// Validated hint, if any
    pub hint: Option<BuildVariant>,
    /// Library that was resolved, absent when resolution was deferred
    pub library: Option<ResolvedLibrary>,
}

impl ExtensionDescriptor {
    /// Build the descriptor from assembled flags.
    pub fn new(ctx: &BuildContext, flags: Flags, resolved: Option<ResolvedLibrary>) -> Self {
        let Flags {
            compile_args,
            link_args,
            include_dirs,
            library_dirs,
            libraries,
        } = flags;

        ExtensionDescriptor {
            name: MODULE_NAME.to_string(),
            sources: vec![ctx.source()],
            include_dirs,
            library_dirs,
            libraries,
            extra_compile_args: compile_args,
            extra_link_args: link_args,
            language: LANGUAGE.to_string(),
            target: TargetInfo {
                platform: ctx.platform,
                arch: ctx.arch,
                hint: ctx.hint,
                library: resolved,
            },
        }
    }

    /// File name stem of the built module (`SpeechCore`).
    pub fn module_stem(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize extension descriptor")
    }

    /// Write the descriptor as JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write descriptor: {}", path.display()))?;
        tracing::info!("Wrote extension descriptor: {}", path.display());
        Ok(())
    }
}

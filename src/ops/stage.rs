//! Runtime DLL staging and cleanup.
//!
//! On Windows the extension module needs the native library's runtime DLLs
//! next to it. They are copied into the package directory before a source
//! archive is built, so the archive is self-contained, and removed again
//! after a binary package is built, so the source tree is not left holding
//! binaries that belong only inside the wheel.
//!
//! On other platforms both steps are no-ops.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::builder::BuildContext;
use crate::util::fs::{copy_file, ensure_dir, files_with_extension, remove_file};

/// Extension of the runtime shared libraries that travel with the package.
pub const SHARED_LIB_EXTENSION: &str = "dll";

/// Options for staging and cleanup.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    /// Dry run - report, don't touch files
    pub dry_run: bool,
}

impl StageOptions {
    /// Set dry run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Kind of file operation performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageAction {
    Copy,
    Remove,
}

/// One staged or cleaned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedFile {
    pub action: StageAction,
    /// Source path (copies only)
    pub source: Option<PathBuf>,
    /// Path written or removed in the package directory
    pub destination: PathBuf,
}

/// Result of a staging or cleanup step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub files: Vec<StagedFile>,
    pub dry_run: bool,
}

impl StageReport {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Distribution form being built by the packaging backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistKind {
    /// Source archive: DLLs are staged before it is built.
    Sdist,
    /// Binary package: DLLs are cleaned after it is built.
    Wheel,
}

/// Copy runtime DLLs into the package directory.
///
/// A missing DLL directory is logged and yields an empty report.
pub fn stage_shared_libs(ctx: &BuildContext, opts: &StageOptions) -> Result<StageReport> {
    let mut report = StageReport {
        dry_run: opts.dry_run,
        ..Default::default()
    };

    if !ctx.platform.is_windows() {
        tracing::debug!("no runtime DLLs to stage on {}", ctx.platform);
        return Ok(report);
    }

    let src_dir = ctx.dll_source_dir();
    if !src_dir.is_dir() {
        tracing::warn!("DLL directory not found: {}", src_dir.display());
        return Ok(report);
    }

    let dst_dir = ctx.package_dir();
    let sources = files_with_extension(&src_dir, SHARED_LIB_EXTENSION)?;

    if !opts.dry_run && !sources.is_empty() {
        ensure_dir(&dst_dir)?;
    }

    tracing::info!("Copying {} DLL file(s)", sources.len());

    for source in sources {
        let file_name = source
            .file_name()
            .with_context(|| format!("DLL has no file name: {}", source.display()))?;
        let destination = dst_dir.join(file_name);

        if opts.dry_run {
            tracing::info!(
                "[dry-run] Would copy {} -> {}",
                source.display(),
                destination.display()
            );
        } else {
            copy_file(&source, &destination)?;
            tracing::debug!("Copied {} -> {}", source.display(), destination.display());
        }

        report.files.push(StagedFile {
            action: StageAction::Copy,
            source: Some(source),
            destination,
        });
    }

    Ok(report)
}

/// Remove every runtime DLL from the package directory.
pub fn clean_shared_libs(ctx: &BuildContext, opts: &StageOptions) -> Result<StageReport> {
    let mut report = StageReport {
        dry_run: opts.dry_run,
        ..Default::default()
    };

    if !ctx.platform.is_windows() {
        tracing::debug!("no runtime DLLs to clean on {}", ctx.platform);
        return Ok(report);
    }

    let pkg_dir = ctx.package_dir();
    let staged = files_with_extension(&pkg_dir, SHARED_LIB_EXTENSION)?;

    tracing::info!("Cleaning {} DLL file(s)", staged.len());

    for path in staged {
        if opts.dry_run {
            tracing::info!("[dry-run] Would remove {}", path.display());
        } else {
            remove_file(&path)?;
            tracing::debug!("Removed {}", path.display());
        }

        report.files.push(StagedFile {
            action: StageAction::Remove,
            source: None,
            destination: path,
        });
    }

    Ok(report)
}

/// Run a distribution build with staging around it.
///
/// DLLs are staged before a source archive is built. After a binary
/// package is built successfully they are cleaned up; a failed build leaves
/// the package directory untouched so it can be inspected.
pub fn with_dist_lifecycle<T>(
    ctx: &BuildContext,
    kind: DistKind,
    opts: &StageOptions,
    build: impl FnOnce() -> Result<T>,
) -> Result<T> {
    match kind {
        DistKind::Sdist => {
            stage_shared_libs(ctx, opts)?;
            build()
        }
        DistKind::Wheel => {
            let out = build()?;
            clean_shared_libs(ctx, opts)?;
            Ok(out)
        }
    }
}

/// Run an external backend command from `cwd`, failing on non-zero exit.
pub fn run_backend(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    tracing::info!("Running backend: {} {}", program, args.join(" "));

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .with_context(|| format!("failed to run `{}`", program))?;

    if !status.success() {
        bail!("`{}` failed with exit code: {:?}", program, status.code());
    }

    Ok(())
}

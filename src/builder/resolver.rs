//! Static library resolution.
//!
//! Finds the prebuilt `SpeechCore` static library for the target platform
//! and architecture. Candidates are evaluated lazily in a fixed order and
//! the first one present on disk wins:
//!
//! 1. the hinted variant, if a valid hint was given
//! 2. `release`, then `debug`, skipping a variant already tried
//! 3. each known subdirectory within a variant (currently only `static`)
//!
//! A candidate maps to `<lib-root>/<platform>/<arch>/<variant>/<subdir>/<file>`.

use std::path::{Path, PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::builder::BuildContext;
use crate::core::{Architecture, BuildVariant, Platform};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Subdirectories searched within each variant, in order.
pub const SUBDIRECTORIES: &[&str] = &["static"];

/// Logical name of the library passed to the linker.
pub const LIBRARY_NAME: &str = "SpeechCore";

/// One place the static library may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCandidate {
    pub platform: Platform,
    pub arch: Architecture,
    pub variant: BuildVariant,
    pub subdir: &'static str,
}

impl LibraryCandidate {
    /// Directory of this candidate under `lib_root`.
    pub fn dir(&self, lib_root: &Path) -> PathBuf {
        lib_root
            .join(self.platform.as_str())
            .join(self.arch.as_str())
            .join(self.variant.as_str())
            .join(self.subdir)
    }

    /// Expected library file of this candidate under `lib_root`.
    pub fn file(&self, lib_root: &Path) -> PathBuf {
        self.dir(lib_root).join(self.platform.static_lib_filename())
    }
}

/// The library that was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLibrary {
    /// Directory to add to the linker search path
    pub dir: PathBuf,
    /// Full path of the library file, verified to exist
    pub path: PathBuf,
    /// Variant that actually matched
    pub variant: BuildVariant,
}

/// Error during static library resolution.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("could not find SpeechCore static library for platform {platform}, arch {arch}")]
    #[diagnostic(
        code(speechcore::resolve::library_not_found),
        help("Build the native library for this target and place it under lib/<platform>/<arch>/<release|debug>/static/")
    )]
    LibraryNotFound {
        platform: Platform,
        arch: Architecture,
        searched: Vec<PathBuf>,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic carrying the error's code and
    /// help text.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());
        if let Some(code) = MietteDiagnostic::code(self) {
            diag = diag.with_code(code.to_string());
        }

        match self {
            ResolveError::LibraryNotFound {
                platform,
                arch,
                searched,
            } => {
                diag = diag.with_context(format!("platform: {}, arch: {}", platform, arch));
                for path in searched {
                    diag = diag.with_context(format!("searched: {}", path.display()));
                }
            }
        }

        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }
        diag.with_suggestion(suggestions::OVERRIDE_TARGET)
    }
}

/// Variants to try, in order, with duplicates removed.
pub fn variant_order(hint: Option<BuildVariant>) -> Vec<BuildVariant> {
    let mut order = Vec::with_capacity(3);
    for variant in hint.into_iter().chain(BuildVariant::SEARCH_ORDER) {
        if !order.contains(&variant) {
            order.push(variant);
        }
    }
    order
}

/// Ordered candidates for a target. Nothing touches the filesystem here.
pub fn candidates(
    platform: Platform,
    arch: Architecture,
    hint: Option<BuildVariant>,
) -> impl Iterator<Item = LibraryCandidate> {
    variant_order(hint).into_iter().flat_map(move |variant| {
        SUBDIRECTORIES.iter().map(move |&subdir| LibraryCandidate {
            platform,
            arch,
            variant,
            subdir,
        })
    })
}

/// Search `lib_root` for the first existing candidate.
pub fn find_static_lib(
    lib_root: &Path,
    platform: Platform,
    arch: Architecture,
    hint: Option<BuildVariant>,
) -> Result<ResolvedLibrary, ResolveError> {
    let mut searched = Vec::new();

    for candidate in candidates(platform, arch, hint) {
        let path = candidate.file(lib_root);
        tracing::debug!("probing {}", path.display());

        if path.is_file() {
            let resolved = ResolvedLibrary {
                dir: candidate.dir(lib_root),
                path,
                variant: candidate.variant,
            };
            tracing::info!(
                "Found {} library: {}",
                resolved.variant,
                resolved.path.display()
            );
            return Ok(resolved);
        }

        searched.push(path);
    }

    Err(ResolveError::LibraryNotFound {
        platform,
        arch,
        searched,
    })
}

/// Resolve the static library for a build context.
pub fn resolve(ctx: &BuildContext) -> Result<ResolvedLibrary, ResolveError> {
    find_static_lib(&ctx.lib_root(), ctx.platform, ctx.arch, ctx.hint)
}

//! Platform flag assembly.
//!
//! Produces the compile arguments, link arguments, search paths and
//! libraries needed to link the binding module against the resolved static
//! library. The matrix is fixed per platform:
//!
//! | Platform | Compile                                           | Link                          |
//! |----------|---------------------------------------------------|-------------------------------|
//! | windows  | CRT switch, `/std:c++20`, `/EHsc`, Unicode, `/W3` | `User32.lib`, `Ole32.lib`     |
//! | macos    | `-std=c++20`, hidden visibility, min OS version   | CoreFoundation, AppServices   |
//! | linux    | `-std=c++2a`, hidden visibility, `-DLINUX`        | -                             |

use std::path::PathBuf;

use serde::Serialize;

use crate::builder::resolver::{ResolvedLibrary, LIBRARY_NAME};
use crate::builder::BuildContext;
use crate::core::{BuildVariant, Platform};
use crate::util::config::CrtSource;

/// Define signaling that the static variant of the library is linked.
pub const STATIC_DEFINE: &str = "-D__SPEECH_C_STATIC";

/// Static MSVC runtime, release mode.
pub const CRT_RELEASE: &str = "/MT";

/// Static MSVC runtime, debug mode.
pub const CRT_DEBUG: &str = "/MTd";

/// System frameworks linked on macOS.
pub const MACOS_FRAMEWORKS: &[&str] = &["CoreFoundation", "ApplicationServices"];

/// System import libraries linked on Windows.
pub const WINDOWS_SYSTEM_LIBS: &[&str] = &["User32.lib", "Ole32.lib"];

/// Assembled compiler and linker inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    /// Extra compiler arguments, in order
    pub compile_args: Vec<String>,
    /// Extra linker arguments, in order
    pub link_args: Vec<String>,
    /// Header search paths
    pub include_dirs: Vec<PathBuf>,
    /// Library search paths (empty when resolution failed)
    pub library_dirs: Vec<PathBuf>,
    /// Libraries to link, without prefix or extension
    pub libraries: Vec<String>,
}

/// Pick the Windows C runtime switch.
///
/// Under [`CrtSource::Hint`] only a `debug` hint selects the debug runtime,
/// whatever the resolver matched. Under [`CrtSource::Matched`] the matched
/// variant decides, falling back to the hint when nothing was matched.
pub fn crt_flag(
    source: CrtSource,
    hint: Option<BuildVariant>,
    matched: Option<BuildVariant>,
) -> &'static str {
    let variant = match source {
        CrtSource::Hint => hint,
        CrtSource::Matched => matched.or(hint),
    };

    if variant.is_some_and(|v| v.is_debug()) {
        CRT_DEBUG
    } else {
        CRT_RELEASE
    }
}

fn windows_flags(ctx: &BuildContext, matched: Option<BuildVariant>, flags: &mut Flags) {
    let crt = crt_flag(ctx.config.build.crt_source(), ctx.hint, matched);

    flags.compile_args.extend(
        [
            crt,
            "/std:c++20",
            "/EHsc",
            "/D_WIN32",
            "/DUNICODE",
            "/D_UNICODE",
            "/W3",
        ]
        .map(String::from),
    );
    flags
        .link_args
        .extend(WINDOWS_SYSTEM_LIBS.iter().map(|s| s.to_string()));
}

fn macos_flags(ctx: &BuildContext, flags: &mut Flags) {
    flags.compile_args.extend(
        [
            "-std=c++20",
            "-fvisibility=hidden",
            "-Wall",
            "-Wextra",
            "-DMACOS",
            "-D__MACOSX_CORE__",
        ]
        .map(String::from),
    );
    flags.compile_args.push(format!(
        "-mmacosx-version-min={}",
        ctx.config.build.macos_min_version()
    ));

    for framework in MACOS_FRAMEWORKS {
        flags.link_args.push("-framework".to_string());
        flags.link_args.push(framework.to_string());
    }
}

fn linux_flags(flags: &mut Flags) {
    flags.compile_args.extend(
        ["-std=c++2a", "-fvisibility=hidden", "-Wall", "-Wextra", "-DLINUX"].map(String::from),
    );
}

/// Assemble flags for the context's platform.
///
/// `resolved` is `None` when resolution failed and the failure was deferred
/// to the linker; the library search path is then left empty.
pub fn assemble(ctx: &BuildContext, resolved: Option<&ResolvedLibrary>) -> Flags {
    let mut flags = Flags {
        compile_args: vec![STATIC_DEFINE.to_string()],
        include_dirs: vec![ctx.include_dir(), ctx.bindings_include()],
        libraries: vec![LIBRARY_NAME.to_string()],
        ..Default::default()
    };

    if let Some(lib) = resolved {
        flags.library_dirs.push(lib.dir.clone());
    }

    match ctx.platform {
        Platform::Windows => windows_flags(ctx, resolved.map(|r| r.variant), &mut flags),
        Platform::Macos => macos_flags(ctx, &mut flags),
        Platform::Linux => linux_flags(&mut flags),
    }

    tracing::debug!(
        "assembled {} compile args, {} link args for {}",
        flags.compile_args.len(),
        flags.link_args.len(),
        ctx.platform
    );

    flags
}

//! Toolchain detection functions.

use std::path::{Path, PathBuf};

use crate::core::Platform;

use super::{GccToolchain, MsvcToolchain, Toolchain, ToolchainPlatform};

/// Pick the toolchain that would build the extension for `platform`.
///
/// Never fails: when no driver is found on PATH the bare driver name is
/// used, since the command is rendered rather than run.
pub fn detect_toolchain(platform: Platform) -> Box<dyn Toolchain> {
    match platform {
        Platform::Windows => {
            let cl = find_driver(&["cl"]).unwrap_or_else(|| PathBuf::from("cl.exe"));
            Box::new(MsvcToolchain::new(cl))
        }
        Platform::Macos => {
            let cxx = find_driver(&["clang++", "c++"]).unwrap_or_else(|| PathBuf::from("clang++"));
            Box::new(GccToolchain::new(cxx, ToolchainPlatform::AppleClang))
        }
        Platform::Linux => {
            let cxx = find_driver(&["c++", "g++", "clang++"]).unwrap_or_else(|| PathBuf::from("c++"));
            let family = family_from_name(&cxx);
            Box::new(GccToolchain::new(cxx, family))
        }
    }
}

/// `CXX` from the environment, then the first candidate found on PATH.
fn find_driver(candidates: &[&str]) -> Option<PathBuf> {
    if let Ok(cxx) = std::env::var("CXX") {
        if !cxx.trim().is_empty() {
            return Some(PathBuf::from(cxx));
        }
    }

    let found = candidates.iter().find_map(|name| which::which(name).ok());
    if found.is_none() {
        tracing::debug!("no C++ driver found on PATH (tried {})", candidates.join(", "));
    }
    found
}

/// Guess the compiler family from the driver's file name.
fn family_from_name(driver: &Path) -> ToolchainPlatform {
    let name = driver
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if name.contains("clang") {
        ToolchainPlatform::Clang
    } else {
        ToolchainPlatform::Gcc
    }
}

//! Platform and architecture identification.
//!
//! Raw host identifiers (an OS name like `win32` or `darwin`, a machine name
//! like `amd64` or `aarch64`) are mapped onto a small closed vocabulary.
//! Unrecognized values never fail: they fall back to a default and carry a
//! warning for the caller to emit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
}

/// CPU architecture of the prebuilt library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "arm64")]
    Arm64,
}

/// An identified value, plus the warning produced if the raw input was
/// not recognized and a default was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identified<T> {
    pub value: T,
    pub warning: Option<String>,
}

impl<T> Identified<T> {
    fn known(value: T) -> Self {
        Identified {
            value,
            warning: None,
        }
    }

    fn fallback(value: T, warning: String) -> Self {
        Identified {
            value,
            warning: Some(warning),
        }
    }

    /// Whether the raw input was coerced to a default.
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

impl Platform {
    /// Platform used when the OS identifier is not recognized.
    pub const DEFAULT: Platform = Platform::Windows;

    /// Identify a platform from a raw OS identifier.
    ///
    /// Accepts both interpreter-style names (`win32`, `darwin`, `linux`) and
    /// Rust's `std::env::consts::OS` names (`windows`, `macos`, `linux`).
    pub fn identify(raw: &str) -> Identified<Platform> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "win32" | "windows" => Identified::known(Platform::Windows),
            "darwin" | "macos" => Identified::known(Platform::Macos),
            "linux" | "linux2" => Identified::known(Platform::Linux),
            _ => Identified::fallback(
                Self::DEFAULT,
                format!(
                    "unknown platform `{}`, defaulting to {}",
                    raw,
                    Self::DEFAULT
                ),
            ),
        }
    }

    /// Identify the host platform.
    pub fn host() -> Identified<Platform> {
        Self::identify(std::env::consts::OS)
    }

    /// Directory name used under `lib/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }

    /// File name of the prebuilt static library on this platform.
    pub fn static_lib_filename(&self) -> &'static str {
        match self {
            Platform::Windows => "SpeechCore.lib",
            Platform::Macos | Platform::Linux => "libSpeechCore.a",
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == Platform::Windows
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Architecture {
    /// Architecture used when the machine identifier is not recognized.
    pub const DEFAULT: Architecture = Architecture::X86_64;

    /// Identify an architecture from a raw machine identifier.
    ///
    /// `x86` is accepted alongside `i386`/`i686` because Rust's
    /// `std::env::consts::ARCH` reports 32-bit Intel that way.
    pub fn identify(raw: &str) -> Identified<Architecture> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "x86_64" | "amd64" => Identified::known(Architecture::X86_64),
            "i386" | "i686" | "x86" => Identified::known(Architecture::X86),
            "arm64" | "aarch64" => Identified::known(Architecture::Arm64),
            _ => Identified::fallback(
                Self::DEFAULT,
                format!(
                    "unrecognized architecture `{}`, defaulting to {}",
                    normalized,
                    Self::DEFAULT
                ),
            ),
        }
    }

    /// Identify the host architecture.
    pub fn host() -> Identified<Architecture> {
        Self::identify(std::env::consts::ARCH)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Name of the `bin/` subdirectory holding runtime DLLs.
    ///
    /// Keyed on whether the architecture name mentions 64 bits.
    pub fn dll_dir_name(&self) -> &'static str {
        if self.as_str().contains("64") {
            "x64"
        } else {
            "x86"
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

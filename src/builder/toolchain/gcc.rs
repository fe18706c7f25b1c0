//! GCC/Clang toolchain implementation.

use std::path::{Path, PathBuf};

use crate::builder::extension::ExtensionDescriptor;

use super::{CommandSpec, Toolchain, ToolchainPlatform};

/// GCC/Clang toolchain (Unix-like systems).
#[derive(Debug, Clone)]
pub struct GccToolchain {
    /// Path to the C++ compiler driver
    pub cxx: PathBuf,
    /// Compiler family (gcc, clang, apple-clang)
    pub family: ToolchainPlatform,
}

impl GccToolchain {
    /// Create a new GCC-style toolchain.
    pub fn new(cxx: PathBuf, family: ToolchainPlatform) -> Self {
        GccToolchain { cxx, family }
    }
}

impl Toolchain for GccToolchain {
    fn platform(&self) -> ToolchainPlatform {
        self.family
    }

    fn extension_command(&self, desc: &ExtensionDescriptor, output: &Path) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cxx);

        // Loadable module. Apple drivers want a bundle with the host
        // interpreter's symbols resolved at load time.
        if self.family == ToolchainPlatform::AppleClang {
            cmd = cmd.args(["-bundle", "-undefined", "dynamic_lookup"]);
        } else {
            cmd = cmd.args(["-shared", "-fPIC"]);
        }

        for dir in &desc.include_dirs {
            cmd = cmd.arg(format!("-I{}", dir.display()));
        }

        cmd = cmd.args(desc.extra_compile_args.iter().cloned());

        for source in &desc.sources {
            cmd = cmd.arg(source.display().to_string());
        }

        cmd = cmd.arg("-o");
        cmd = cmd.arg(output.display().to_string());

        for dir in &desc.library_dirs {
            cmd = cmd.arg(format!("-L{}", dir.display()));
        }

        for lib in &desc.libraries {
            cmd = cmd.arg(format!("-l{}", lib));
        }

        cmd = cmd.args(desc.extra_link_args.iter().cloned());

        cmd
    }

    fn module_extension(&self) -> &str {
        "so"
    }
}

//! MSVC toolchain implementation.

use std::path::{Path, PathBuf};

use crate::builder::extension::ExtensionDescriptor;

use super::{CommandSpec, Toolchain, ToolchainPlatform};

/// MSVC toolchain (Windows).
#[derive(Debug, Clone)]
pub struct MsvcToolchain {
    /// Path to cl.exe (compiler and linker driver)
    pub cl: PathBuf,
}

impl MsvcToolchain {
    /// Create a new MSVC toolchain.
    pub fn new(cl: PathBuf) -> Self {
        MsvcToolchain { cl }
    }
}

impl Toolchain for MsvcToolchain {
    fn platform(&self) -> ToolchainPlatform {
        ToolchainPlatform::Msvc
    }

    fn extension_command(&self, desc: &ExtensionDescriptor, output: &Path) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cl);

        // Quiet logo, build a DLL, force C++
        cmd = cmd.args(["/nologo", "/LD", "/TP"]);

        for dir in &desc.include_dirs {
            cmd = cmd.arg(format!("/I{}", dir.display()));
        }

        // Extra compile args carry the CRT switch
        cmd = cmd.args(desc.extra_compile_args.iter().cloned());

        for source in &desc.sources {
            cmd = cmd.arg(source.display().to_string());
        }

        cmd = cmd.arg(format!("/Fe{}", output.display()));

        // Everything after /link goes to link.exe
        cmd = cmd.arg("/link");

        for dir in &desc.library_dirs {
            cmd = cmd.arg(format!("/LIBPATH:{}", dir.display()));
        }

        for lib in &desc.libraries {
            cmd = cmd.arg(format!("{}.lib", lib));
        }

        cmd = cmd.args(desc.extra_link_args.iter().cloned());

        cmd
    }

    fn module_extension(&self) -> &str {
        "pyd"
    }
}

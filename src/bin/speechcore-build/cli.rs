//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use speechcore_build::builder::{BuildContext, ContextOptions};
use speechcore_build::ops::DistKind;

/// speechcore-build - resolve the prebuilt SpeechCore library and assemble
/// extension build flags
#[derive(Parser)]
#[command(name = "speechcore-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Target selection shared by every command.
#[derive(Args)]
pub struct TargetArgs {
    /// Project root containing lib/, bin/ and the package directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Raw OS identifier to build for (defaults to the host)
    #[arg(long, global = true)]
    pub platform: Option<String>,

    /// Raw machine identifier to build for (defaults to the host)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    /// Build variant hint (release or debug)
    #[arg(long, global = true, env = "PYTHON_BUILD_TYPE")]
    pub build_type: Option<String>,

    /// Binding generator include directory
    #[arg(long, global = true, env = "PYBIND11_INCLUDE")]
    pub bindings_include: Option<PathBuf>,
}

impl TargetArgs {
    /// Build the one-shot context for this invocation.
    pub fn context(&self) -> BuildContext {
        let mut opts = ContextOptions::new(&self.root);
        opts.platform = self.platform.clone();
        opts.arch = self.arch.clone();
        opts.build_type = self.build_type.clone();
        opts.bindings_include = self.bindings_include.clone();
        BuildContext::from_options(opts)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the detected platform, architecture and variant hint
    Detect,

    /// Locate the prebuilt static library
    Resolve,

    /// Show compile/link flags for the extension module
    Flags(FlagsArgs),

    /// Emit the extension descriptor as JSON
    Describe(DescribeArgs),

    /// Show the compiler command a backend would run
    Command,

    /// Copy runtime DLLs into the package (before building a source archive)
    Stage(StageArgs),

    /// Remove runtime DLLs from the package (after building a binary package)
    Clean(StageArgs),

    /// Run a packaging backend command with staging around it
    Dist(DistArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// Whether the command goes through the `build.on-missing` policy.
    pub fn honors_on_missing(&self) -> bool {
        matches!(
            self,
            Commands::Flags(_) | Commands::Describe(_) | Commands::Command
        )
    }
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Show compile flags only
    #[arg(long)]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct StageArgs {
    /// Show what would change without touching files
    #[arg(long)]
    pub dry_run: bool,
}

/// Distribution form built by the backend command.
#[derive(Clone, Copy, ValueEnum)]
pub enum DistKindArg {
    Sdist,
    Wheel,
}

impl From<DistKindArg> for DistKind {
    fn from(kind: DistKindArg) -> Self {
        match kind {
            DistKindArg::Sdist => DistKind::Sdist,
            DistKindArg::Wheel => DistKind::Wheel,
        }
    }
}

#[derive(Args)]
pub struct DistArgs {
    /// Distribution form the backend builds
    #[arg(value_enum)]
    pub kind: DistKindArg,

    /// Show staging changes and the backend command without running either
    #[arg(long)]
    pub dry_run: bool,

    /// Backend command and its arguments, after `--`
    #[arg(last = true, required = true)]
    pub backend: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

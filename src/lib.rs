//! speechcore-build - prebuilt library resolver for the SpeechCore extension
//!
//! This crate locates the platform-specific SpeechCore static library,
//! assembles the compiler and linker flags for the host-language binding
//! module, and stages runtime DLLs around distribution builds.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use builder::{BuildContext, ContextOptions, ExtensionDescriptor, ResolvedLibrary};
pub use core::{Architecture, BuildVariant, Platform};
pub use ops::configure;

//! Build description: context, library resolution, flags and the
//! extension descriptor.

pub mod context;
pub mod extension;
pub mod flags;
pub mod resolver;
pub mod toolchain;

pub use context::{BuildContext, ContextOptions};
pub use extension::ExtensionDescriptor;
pub use flags::Flags;
pub use resolver::{ResolveError, ResolvedLibrary};

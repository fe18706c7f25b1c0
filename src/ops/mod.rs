//! High-level operations invoked by the CLI and the packaging backend.

pub mod configure;
pub mod stage;

pub use configure::{configure, resolve_with_policy};
pub use stage::{clean_shared_libs, stage_shared_libs, with_dist_lifecycle, DistKind, StageOptions};

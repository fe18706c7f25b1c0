//! Core target vocabulary: platforms, architectures and build variants.

pub mod platform;
pub mod variant;

pub use platform::{Architecture, Identified, Platform};
pub use variant::BuildVariant;

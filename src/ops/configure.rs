//! Configure operation.
//!
//! Runs the whole build-description pipeline once: resolve the static
//! library, assemble flags, and produce the extension descriptor. What
//! happens on a failed resolution depends on `build.on-missing`.

use crate::builder::extension::ExtensionDescriptor;
use crate::builder::resolver::{self, ResolveError, ResolvedLibrary};
use crate::builder::{flags, BuildContext};
use crate::util::config::OnMissing;

/// Resolve the library according to the configured failure policy.
///
/// Returns `Ok(None)` when the library is missing and the failure is
/// deferred to the native linker.
pub fn resolve_with_policy(ctx: &BuildContext) -> Result<Option<ResolvedLibrary>, ResolveError> {
    match resolver::resolve(ctx) {
        Ok(lib) => Ok(Some(lib)),
        Err(err) => match ctx.config.build.on_missing() {
            OnMissing::Abort => Err(err),
            OnMissing::Defer => {
                tracing::error!("{}", err);
                tracing::warn!(
                    "continuing without a library search path; the linker will report the missing library"
                );
                Ok(None)
            }
        },
    }
}

/// Build the extension descriptor for a context.
pub fn configure(ctx: &BuildContext) -> Result<ExtensionDescriptor, ResolveError> {
    let resolved = resolve_with_policy(ctx)?;
    let flags = flags::assemble(ctx, resolved.as_ref());
    Ok(ExtensionDescriptor::new(ctx, flags, resolved))
}

//! `speechcore-build resolve` command
//!
//! Always fails on a missing library, whatever `build.on-missing` says.

use anyhow::Result;

use crate::cli::TargetArgs;
use speechcore_build::builder::resolver;

pub fn execute(target: &TargetArgs) -> Result<()> {
    let ctx = target.context();

    let lib = resolver::resolve(&ctx)?;

    println!("directory: {}", lib.dir.display());
    println!("path: {}", lib.path.display());
    println!("variant: {}", lib.variant);

    Ok(())
}

//! `speechcore-build command` command

use anyhow::Result;

use crate::cli::TargetArgs;
use speechcore_build::builder::toolchain::detect_toolchain;
use speechcore_build::ops::configure;

pub fn execute(target: &TargetArgs) -> Result<()> {
    let ctx = target.context();
    let desc = configure(&ctx)?;

    let toolchain = detect_toolchain(ctx.platform);
    let output = ctx.package_dir().join(format!(
        "{}.{}",
        desc.module_stem(),
        toolchain.module_extension()
    ));

    tracing::debug!("toolchain: {}", toolchain.platform().as_str());
    println!("{}", toolchain.extension_command(&desc, &output));

    Ok(())
}

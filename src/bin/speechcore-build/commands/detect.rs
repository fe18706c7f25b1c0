//! `speechcore-build detect` command

use anyhow::Result;

use crate::cli::TargetArgs;

pub fn execute(target: &TargetArgs) -> Result<()> {
    let ctx = target.context();

    println!("platform: {}", ctx.platform);
    println!("arch: {}", ctx.arch);
    println!(
        "hint: {}",
        ctx.hint.map(|v| v.as_str()).unwrap_or("none")
    );

    Ok(())
}

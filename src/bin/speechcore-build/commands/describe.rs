//! `speechcore-build describe` command

use anyhow::Result;

use crate::cli::{DescribeArgs, TargetArgs};
use speechcore_build::ops::configure;

pub fn execute(target: &TargetArgs, args: DescribeArgs) -> Result<()> {
    let ctx = target.context();
    let desc = configure(&ctx)?;

    match args.output {
        Some(path) => desc.write_json(&path)?,
        None => println!("{}", desc.to_json()?),
    }

    Ok(())
}

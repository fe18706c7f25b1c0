//! `speechcore-build clean` command

use anyhow::Result;

use crate::cli::{StageArgs, TargetArgs};
use crate::commands::print_report;
use speechcore_build::ops::{clean_shared_libs, StageOptions};

pub fn execute(target: &TargetArgs, args: StageArgs) -> Result<()> {
    let ctx = target.context();
    let opts = StageOptions::default().with_dry_run(args.dry_run);

    let report = clean_shared_libs(&ctx, &opts)?;
    print_report(&report);

    Ok(())
}

//! `speechcore-build dist` command
//!
//! Wraps a packaging backend invocation, e.g.
//! `speechcore-build dist wheel -- python -m build --wheel`.

use anyhow::{Context, Result};

use crate::cli::{DistArgs, TargetArgs};
use speechcore_build::ops::stage::run_backend;
use speechcore_build::ops::{with_dist_lifecycle, StageOptions};

pub fn execute(target: &TargetArgs, args: DistArgs) -> Result<()> {
    let ctx = target.context();
    let opts = StageOptions::default().with_dry_run(args.dry_run);

    let (program, rest) = args
        .backend
        .split_first()
        .context("no backend command given after `--`")?;

    with_dist_lifecycle(&ctx, args.kind.into(), &opts, || {
        if args.dry_run {
            tracing::info!(
                "[dry-run] Would run backend: {} {}",
                program,
                rest.join(" ")
            );
            return Ok(());
        }
        run_backend(program, rest, &ctx.root)
    })
}

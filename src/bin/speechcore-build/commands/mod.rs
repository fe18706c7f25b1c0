//! Command implementations

pub mod clean;
pub mod command;
pub mod completions;
pub mod describe;
pub mod detect;
pub mod dist;
pub mod flags;
pub mod resolve;
pub mod stage;

use speechcore_build::ops::stage::{StageAction, StageReport};

/// Print one status line per staged or cleaned file.
pub(crate) fn print_report(report: &StageReport) {
    for file in &report.files {
        let verb = match (file.action, report.dry_run) {
            (StageAction::Copy, false) => "Copied",
            (StageAction::Copy, true) => "Would copy",
            (StageAction::Remove, false) => "Removed",
            (StageAction::Remove, true) => "Would remove",
        };
        eprintln!("{:>12} {}", verb, file.destination.display());
    }
}

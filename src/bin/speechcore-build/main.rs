//! speechcore-build CLI - prebuilt library resolver for the SpeechCore extension

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use speechcore_build::builder::ResolveError;
use speechcore_build::util::diagnostic::{self, suggestions};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();
    let deferrable = cli.command.honors_on_missing();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<ResolveError>() {
            Some(err) => {
                let mut diag = err.to_diagnostic();
                if deferrable {
                    diag = diag.with_suggestion(suggestions::DEFER_MISSING);
                }
                diagnostic::emit(&diag, color);
            }
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("speechcore_build=debug")
    } else {
        EnvFilter::new("speechcore_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    let target = &cli.target;

    // Execute command
    match cli.command {
        Commands::Detect => commands::detect::execute(target),
        Commands::Resolve => commands::resolve::execute(target),
        Commands::Flags(args) => commands::flags::execute(target, args),
        Commands::Describe(args) => commands::describe::execute(target, args),
        Commands::Command => commands::command::execute(target),
        Commands::Stage(args) => commands::stage::execute(target, args),
        Commands::Clean(args) => commands::clean::execute(target, args),
        Commands::Dist(args) => commands::dist::execute(target, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

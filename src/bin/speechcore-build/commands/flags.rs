//! `speechcore-build flags` command

use anyhow::Result;

use crate::cli::{FlagsArgs, TargetArgs};
use speechcore_build::core::Platform;
use speechcore_build::ops::configure;

pub fn execute(target: &TargetArgs, args: FlagsArgs) -> Result<()> {
    let ctx = target.context();
    let desc = configure(&ctx)?;

    let msvc = ctx.platform == Platform::Windows;

    // Print compile flags
    if !args.link {
        println!("# Compile flags for `{}`:", desc.name);

        for dir in &desc.include_dirs {
            if msvc {
                println!("  /I{}", dir.display());
            } else {
                println!("  -I{}", dir.display());
            }
        }

        for flag in &desc.extra_compile_args {
            println!("  {}", flag);
        }
    }

    if !args.compile && !args.link {
        println!();
    }

    // Print link flags
    if !args.compile {
        println!("# Link flags for `{}`:", desc.name);

        for dir in &desc.library_dirs {
            if msvc {
                println!("  /LIBPATH:{}", dir.display());
            } else {
                println!("  -L{}", dir.display());
            }
        }

        for lib in &desc.libraries {
            if msvc {
                println!("  {}.lib", lib);
            } else {
                println!("  -l{}", lib);
            }
        }

        for flag in &desc.extra_link_args {
            println!("  {}", flag);
        }
    }

    Ok(())
}

//! ygen CLI - generate YAML files from templates via interactive questions
//!
//! This is the main entry point for the ygen command-line interface.

mod cli;
mod commands;
mod generator;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

/// Exit code for a user-interrupted run (128 + SIGINT)
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Ctrl-C sets a flag checked at question boundaries and before writes
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    // Run command
    let result = match cli.command {
        Commands::Generate(args) => {
            commands::generate::run(args, cli.config.as_deref(), cancel)
        }
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()),
        Commands::Version(args) => commands::version::run(args),
    };

    if let Err(error) = result {
        if is_cancelled(&error) {
            output::error("Operation cancelled by user");
            std::process::exit(EXIT_CANCELLED);
        }
        return Err(error);
    }
    Ok(())
}

fn is_cancelled(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ygen_core::Error>(),
            Some(ygen_core::Error::Cancelled)
        )
    })
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Warnings (e.g. the legacy template-name heuristic) stay
            // visible by default; -v/-vv for more detail
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

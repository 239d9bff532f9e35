//! # SalesDesk Entry Point
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Initialize tracing (logging to stderr)
//! 3. Build the tokio runtime
//! 4. Run the subcommand
//! 5. Map any `AppError` to the process exit status

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use salesdesk_lib::{init_tracing, run, Cli};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    match runtime.block_on(run(cli)) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            Ok(ExitCode::from(e.code.exit_code()))
        }
    }
}

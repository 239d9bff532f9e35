//! # SalesDesk CLI Library
//!
//! The order editor as a terminal application. `main.rs` only parses the
//! command line and maps the outcome to an exit status; everything else is
//! here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! salesdesk_lib/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── command.rs  ◄─── Session command parser
//! │   └── session.rs  ◄─── Edit session (draft + reference data)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── list.rs     ◄─── Order listing
//! │   ├── order.rs    ◄─── new / edit session loop
//! │   ├── print.rs    ◄─── Printable invoice
//! │   └── config.rs   ◄─── Effective configuration
//! ├── notify.rs       ◄─── Status notices on stderr
//! └── error.rs        ◄─── AppError and exit codes
//! ```
//!
//! ## Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  ──► session commands (set 1 code X1, save, ...)                 │
//! │  stdout ──► listings, rows, invoices (safe to pipe)                     │
//! │  stderr ──► notices ("Order Saved Successfully!") and logs              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use salesdesk_client::{ClientConfig, HttpOrderStore};

use error::AppError;
use notify::StderrNotifier;

/// SalesDesk sales order editor.
#[derive(Debug, Parser)]
#[command(name = "salesdesk", version, about)]
pub struct Cli {
    /// Order store base URL (overrides config file and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List stored orders
    List,

    /// Create an order; session commands are read from stdin
    New,

    /// Edit a stored order; session commands are read from stdin
    Edit {
        /// Order id as shown by `list`
        id: String,
    },

    /// Print the invoice of a stored order
    Print {
        /// Order id as shown by `list`
        id: String,
    },

    /// Show the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=salesdesk_client=trace` - Request level detail
/// - Default: warnings, plus info from the CLI itself
///
/// Logs go to stderr; stdout carries command output only.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,salesdesk_lib=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the client configuration for this invocation.
///
/// File and environment first, then `--api-url` on top.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, AppError> {
    let mut config = ClientConfig::load(cli.config.clone())?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }
    Ok(config)
}

/// Runs one invocation against the configured order store.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli)?;
    let mut notifier = StderrNotifier;
    let mut out = std::io::stdout().lock();

    let store = HttpOrderStore::new(&config)?;
    info!(base_url = %store.base_url(), command = ?cli.command, "SalesDesk starting");

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let end = match cli.command {
        Command::List => {
            return commands::list::list_orders(&store, &mut out, &mut notifier).await;
        }
        Command::Print { id } => {
            return commands::print::print_order(&store, &id, &mut out, &mut notifier).await;
        }
        Command::Config { save } => {
            return commands::config::show_config(&config, save, cli.config, &mut out, &mut notifier);
        }
        Command::New => {
            let today = chrono::Local::now().date_naive();
            commands::order::new_order(&store, today, input, &mut out, &mut notifier).await?
        }
        Command::Edit { id } => {
            commands::order::edit_order(&store, &id, input, &mut out, &mut notifier).await?
        }
    };

    commands::order::finish_session(&store, end, &mut out, &mut notifier).await
}

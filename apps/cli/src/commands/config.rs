//! # Config Command
//!
//! Shows the effective client configuration and optionally writes it to the
//! config file, so a one-off `--api-url` can be made permanent.

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use salesdesk_client::{ClientConfig, ConfigError};

use crate::error::AppError;
use crate::notify::Notify;

/// Writes `config` as TOML to `out`; with `save`, also stores it at `path`
/// (or the platform config file when `path` is `None`).
///
/// ## Output
/// ```text
/// [api]
/// base_url = "http://localhost:5011/api"
/// timeout_secs = 0
/// ```
pub fn show_config<W, N>(
    config: &ClientConfig,
    save: bool,
    path: Option<PathBuf>,
    out: &mut W,
    notifier: &mut N,
) -> Result<(), AppError>
where
    W: Write,
    N: Notify,
{
    debug!(save, "show_config command");

    let text = toml::to_string_pretty(config).map_err(ConfigError::from)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;

    if save {
        let written = config.save(path)?;
        notifier.info(&format!("Config saved to {}", written.display()));
    }
    Ok(())
}

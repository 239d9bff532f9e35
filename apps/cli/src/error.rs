//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in SalesDesk                              │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, AppError>                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Store Error? ──── ClientError::Status{404..} ──┐                      │
//! │         │                                       │                      │
//! │         ▼                                       ▼                      │
//! │  Input Error? ──── CoreError::LineOutOfRange ── AppError ──► notice    │
//! │         │                                       {code, message}        │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────────────► output    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inside an edit session an `AppError` is reported and the session goes
//! on. At the top level it becomes the process exit status.

use salesdesk_client::{ClientError, ConfigError};
use salesdesk_core::CoreError;

/// Error returned from CLI commands.
///
/// `main` prints `message` and exits with `code.exit_code()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Stored order does not exist (404)
    NotFound,

    /// Bad command or argument typed by the user
    ValidationError,

    /// Order store unreachable or timed out
    NetworkError,

    /// Order store answered with an error status or a bad body
    StoreError,

    /// Client configuration is unusable
    ConfigError,

    /// Local I/O failure (stdin/stdout)
    Internal,
}

impl ErrorCode {
    /// Process exit status for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::NetworkError | ErrorCode::StoreError => 5,
            ErrorCode::Internal => 1,
        }
    }
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts order store errors to app errors.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Config(e) => AppError::from(e),
            ClientError::ConnectionFailed(e) => {
                tracing::error!("Order store unreachable: {}", e);
                AppError::new(ErrorCode::NetworkError, "Order store is unreachable")
            }
            ClientError::Timeout(e) => {
                tracing::error!("Order store timed out: {}", e);
                AppError::new(ErrorCode::NetworkError, "Order store did not respond in time")
            }
            ClientError::Status {
                method,
                url,
                status,
                body,
            } => {
                // Only a missing order is "not found"; a 404 elsewhere means a wrong base URL
                if status == 404 {
                    if let Some(id) = order_id(&url) {
                        return AppError::not_found("Order", id);
                    }
                }
                tracing::error!(%method, %url, status, body = %body, "Order store rejected request");
                AppError::new(
                    ErrorCode::StoreError,
                    format!("Order store returned status {}", status),
                )
            }
            ClientError::DeserializationFailed(e) => {
                tracing::error!("Unexpected response from order store: {}", e);
                AppError::new(ErrorCode::StoreError, "Unexpected response from order store")
            }
            ClientError::Request(e) => {
                tracing::error!("Order store request failed: {}", e);
                AppError::new(ErrorCode::NetworkError, "Order store request failed")
            }
        }
    }
}

/// The id in a `.../salesorder/{id}` URL, if that is what `url` addresses.
fn order_id(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let id = segments.next().filter(|id| !id.is_empty())?;
    match segments.next() {
        Some("salesorder") => Some(id),
        _ => None,
    }
}

/// Converts configuration errors to app errors.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineOutOfRange { index, len } => AppError::validation(format!(
                "Row {} does not exist (order has {} rows)",
                index + 1,
                len
            )),
            other => AppError::validation(other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

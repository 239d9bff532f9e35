//! # Client Error Types
//!
//! Error types for order store calls and client configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │  (ConfigError)  │  │                 │  │                         │ │
//! │  │  InvalidUrl     │  │  Connection     │  │  Status (non-2xx)       │ │
//! │  │  LoadFailed     │  │  Timeout        │  │  DeserializationFailed  │ │
//! │  │  SaveFailed     │  │  Request        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried automatically. The caller reports the failure and
//! abandons the operation; [`ClientError::is_retryable`] only tells a user
//! whether trying again by hand is worthwhile.

use thiserror::Error;

/// Result type alias for order store operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading, validating or saving [`ClientConfig`].
///
/// [`ClientConfig`]: crate::config::ClientConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The config file exists but could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// The config file could not be written.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Error type covering every way an order store call can fail.
///
/// ## When This Occurs
/// - the store is unreachable or slow (`ConnectionFailed`, `Timeout`)
/// - the store answered with a non-2xx status (`Status`)
/// - the body was not the JSON we expected (`DeserializationFailed`)
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the order store.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The order store did not answer in time.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other failure while building or sending a request.
    #[error("Request failed: {0}")]
    Request(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The order store answered with a non-success status.
    #[error("{method} {url} returned {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_connect() {
            ClientError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ClientError::DeserializationFailed(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DeserializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(ConfigError::InvalidUrl(err.to_string()))
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if trying the same call again might succeed.
    ///
    /// ## Retryable Errors
    /// - Connection failures and timeouts
    /// - 5xx responses
    ///
    /// ## Non-Retryable Errors
    /// - Configuration errors
    /// - 4xx responses
    /// - Malformed bodies
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ConnectionFailed(_) | ClientError::Timeout(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(self, ClientError::Config(_))
    }

    /// Returns true for a 404 from the store.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The HTTP status, if the store answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! # Error Types
//!
//! Domain-specific error types for salesdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salesdesk-core errors (this file)                                     │
//! │  └── CoreError        - Draft editing errors                           │
//! │                                                                         │
//! │  salesdesk-client errors (separate crate)                              │
//! │  ├── ClientError      - Order store request failures                   │
//! │  └── ConfigError      - Configuration load/validate failures           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: CoreError / ClientError → AppError → notification               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The pricing engine is total over its input domain:
//! - Malformed numeric input is coerced to `0`
//! - A catalog item or client that cannot be found yields blank values
//!
//! Only structural misuse of a draft (a row that does not exist, a field
//! name that does not exist) is reported.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while editing an [`OrderDraft`](crate::order::OrderDraft).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A line index outside the current line list.
    ///
    /// ## When This Occurs
    /// - `set 5 quantity 2` on an order with three lines
    /// - `remove 0` (rows are 1-based at the text boundary)
    #[error("Line {index} does not exist (order has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// An order line field name that is not recognised.
    #[error("Unknown line field: {0}")]
    UnknownLineField(String),

    /// A header field name that is not recognised.
    #[error("Unknown header field: {0}")]
    UnknownHeaderField(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

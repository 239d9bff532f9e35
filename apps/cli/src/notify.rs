//! # User Notifications
//!
//! Short, non-blocking status messages ("Order Saved Successfully!",
//! "Failed to load data") shown next to the normal output.
//!
//! Notices go to stderr so stdout stays clean for listings and invoices
//! that may be piped to a file or printer.

use std::fmt;

use tracing::{error, info};

// Messages users see. Kept in one place so tests and commands agree.
pub const LOAD_FAILED: &str = "Failed to load data";
pub const ORDERS_LOAD_FAILED: &str = "Failed to load orders.";
pub const ORDER_LOADED: &str = "Order loaded!";
pub const ORDER_SAVED: &str = "Order Saved Successfully!";
pub const ORDER_UPDATED: &str = "Order Updated Successfully!";
pub const SAVE_FAILED: &str = "Failed to save order.";
pub const SAVE_RETRY_HINT: &str = "The order store may be busy; enter save to try again.";
pub const INVOICE_PRINTED: &str = "Invoice printed successfully!";

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NoticeLevel::Success => "✔",
            NoticeLevel::Error => "✖",
            NoticeLevel::Info => "•",
        };
        write!(f, "{} {}", marker, self.message)
    }
}

/// Destination for notices.
pub trait Notify {
    fn notify(&mut self, notice: Notice);

    fn success(&mut self, message: &str) {
        self.notify(Notice::success(message));
    }

    fn error(&mut self, message: &str) {
        self.notify(Notice::error(message));
    }

    fn info(&mut self, message: &str) {
        self.notify(Notice::info(message));
    }
}

/// Prints notices on stderr and mirrors them into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notify for StderrNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!(message = %notice.message, "Notice"),
            _ => info!(message = %notice.message, "Notice"),
        }
        eprintln!("{}", notice);
    }
}

/// Keeps notices in memory instead of printing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl RecordingNotifier {
    /// Messages in the order they were raised.
    pub fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

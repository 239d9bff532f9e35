//! # Session State
//!
//! State owned by an edit session, plus the commands that drive it.

mod command;
mod session;

pub use command::{EditCommand, HELP};
pub use session::{Applied, EditSession, SaveKind};

//! # CLI Commands Module
//!
//! One module per subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── list.rs     ◄─── Home listing of stored orders
//! ├── order.rs    ◄─── new / edit sessions
//! ├── print.rs    ◄─── Printable invoice
//! └── config.rs   ◄─── Effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  salesdesk edit 15                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn edit_order(                                                   │
//! │      store: &S,            ◄── HttpOrderStore (or MemoryOrderStore)     │
//! │      id: &str,             ◄── From the command line                    │
//! │      input: R,             ◄── stdin, one session command per line      │
//! │      out: &mut W,          ◄── stdout                                   │
//! │      notifier: &mut N,     ◄── stderr notices                           │
//! │  ) -> Result<SessionEnd, AppError>                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command is generic over its store and streams so tests drive it
//! with an in-memory store and byte buffers.

pub mod config;
pub mod list;
pub mod order;
pub mod print;

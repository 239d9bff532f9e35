//! # salesdesk-client: Remote Order Store Client for SalesDesk
//!
//! This crate provides the network side of SalesDesk: loading clients, the
//! item catalog and stored orders, and saving new or edited orders.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Store Access                               │
//! │                                                                         │
//! │   Edit session start                                                   │
//! │   ──────────────────                                                   │
//! │   load_form_data ──┬──► GET /items    ──┐                              │
//! │    (try_join!)     └──► GET /clients  ──┴──► FormData                  │
//! │                                                                         │
//! │   then, when editing ──► GET /salesorder/{id} ──► SalesOrder           │
//! │                                                                         │
//! │   Save                                                                 │
//! │   ────                                                                 │
//! │   new order      ──► POST /salesorder       (OrderPayload)             │
//! │   existing order ──► PUT  /salesorder/{id}  (OrderPayload + id)        │
//! │                                                                         │
//! │   Failures are returned once, never retried.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - API base URL and timeout (TOML + env)
//! - [`error`] - Client and config error types
//! - [`store`] - `OrderStore` trait and `HttpOrderStore`
//! - [`memory`] - `MemoryOrderStore` for offline use and tests

pub mod config;
pub mod error;
pub mod memory;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConfigError};
pub use memory::MemoryOrderStore;
pub use store::{load_form_data, FormData, HttpOrderStore, OrderStore};

//! # salesdesk-core: Pure Order Logic for SalesDesk
//!
//! This crate holds the order-editing engine of SalesDesk: line pricing,
//! order totals, catalog and customer lookups, and submission shaping. All
//! of it is pure and synchronous.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    salesdesk (CLI)                              │   │
//! │  │    list ──► new / edit session ──► save ──► print              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ salesdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   order   │  │  payload  │  │   │
//! │  │   │ OrderLine │  │update_line│  │OrderDraft │  │  shaping  │  │   │
//! │  │   │ Client... │  │  totals   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               salesdesk-client (Order Store)                    │   │
//! │  │              HTTP/JSON calls, configuration                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (OrderLine, CatalogItem, Client, etc.)
//! - [`coerce`] - Parse-or-zero numeric coercion for raw input
//! - [`pricing`] - Line recalculation, catalog lookup, order totals
//! - [`customer`] - Client selection
//! - [`payload`] - Create/update request bodies
//! - [`order`] - The draft being edited
//! - [`invoice`] - Printable invoice and order listing
//! - [`money`] - Two-decimal presentation of amounts
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, nothing shared
//! 2. **No I/O**: the order store lives in `salesdesk-client`
//! 3. **Forgiving Input**: bad numbers become 0, missing matches become blanks
//! 4. **Round Late**: amounts stay `f64` until they are displayed
//!
//! ## Example Usage
//!
//! ```rust
//! use salesdesk_core::{CatalogItem, LineField, OrderLine};
//! use salesdesk_core::pricing::{compute_totals, update_line};
//!
//! let catalog = vec![CatalogItem::new("X1", "Widget", 10.0)];
//!
//! let line = update_line(&OrderLine::blank(), LineField::ItemCode, "X1", &catalog);
//! let line = update_line(&line, LineField::Quantity, "3", &catalog);
//! let line = update_line(&line, LineField::TaxRatePercent, "10", &catalog);
//!
//! let totals = compute_totals(&[line]);
//! assert_eq!(totals.total_excl, 30.0);
//! assert_eq!(totals.total_tax, 3.0);
//! assert_eq!(totals.total_incl, 33.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coerce;
pub mod customer;
pub mod error;
pub mod invoice;
pub mod money;
pub mod order;
pub mod payload;
pub mod pricing;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use salesdesk_core::OrderDraft` instead of
// `use salesdesk_core::order::OrderDraft`

pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::OrderDraft;
pub use payload::{OrderItemPayload, OrderPayload};
pub use types::*;

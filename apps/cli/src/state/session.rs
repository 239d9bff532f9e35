//! # Edit Session State
//!
//! Everything one order-editing session owns: the draft, the reference data
//! it was opened with, and the id of the stored order (if any).
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Edit Session Lifecycle                               │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │ Loading  │────►│ Editing  │────►│  Saving  │────►│  Closed  │       │
//! │  │ (items,  │     │          │     │ POST/PUT │     │ (back to │       │
//! │  │ clients, │     │          │◄────│  failed  │     │  list)   │       │
//! │  │ order)   │     │          │     └──────────┘     └──────────┘       │
//! │  └──────────┘     └──────────┘                                         │
//! │                   add / set / remove                                    │
//! │                   customer / header                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is owned by a single command loop; nothing is shared, so
//! there is no locking here.

use chrono::NaiveDate;
use tracing::{debug, info};

use salesdesk_client::{load_form_data, ClientResult, FormData, OrderStore};
use salesdesk_core::{CatalogItem, Client, OrderDraft, OrderLine, OrderPayload};

use crate::error::AppError;
use crate::state::command::EditCommand;

/// How a successful save went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// `POST /salesorder`
    Created,
    /// `PUT /salesorder/{id}`
    Updated,
}

/// Result of applying an editing command.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A row was added or changed; carries its 0-based index and new value.
    Line(usize, OrderLine),
    /// A row was removed.
    Removed(usize, OrderLine),
    /// Customer or header changed.
    Order,
}

/// State of one edit session.
#[derive(Debug, Clone)]
pub struct EditSession {
    draft: OrderDraft,
    catalog: Vec<CatalogItem>,
    clients: Vec<Client>,
    order_id: Option<String>,
}

impl EditSession {
    /// A session for a brand new order.
    pub fn new(form: FormData, today: NaiveDate) -> Self {
        EditSession {
            draft: OrderDraft::new(today),
            catalog: form.catalog,
            clients: form.clients,
            order_id: None,
        }
    }

    /// A session editing an existing draft of order `order_id`.
    pub fn for_order(form: FormData, order_id: impl Into<String>, draft: OrderDraft) -> Self {
        EditSession {
            draft,
            catalog: form.catalog,
            clients: form.clients,
            order_id: Some(order_id.into()),
        }
    }

    /// Loads reference data and starts a new order.
    pub async fn start_new<S>(store: &S, today: NaiveDate) -> ClientResult<Self>
    where
        S: OrderStore + ?Sized,
    {
        let form = load_form_data(store).await?;
        info!("New order session started");
        Ok(Self::new(form, today))
    }

    /// Loads reference data, then the stored order `id`.
    pub async fn open<S>(store: &S, id: &str) -> ClientResult<Self>
    where
        S: OrderStore + ?Sized,
    {
        let form = load_form_data(store).await?;
        let order = store.get_order(id).await?;
        info!(order_id = %id, lines = order.order_items.len(), "Order loaded for editing");
        Ok(Self::for_order(form, id, OrderDraft::from_order(&order)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// True when editing a stored order rather than creating one.
    pub fn is_editing(&self) -> bool {
        self.order_id.is_some()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Applies an editing command to the draft.
    ///
    /// ## Errors
    /// - `ValidationError` for a row that does not exist
    /// - `ValidationError` for commands that do not edit the order
    pub fn apply(&mut self, command: &EditCommand) -> Result<Applied, AppError> {
        match command {
            EditCommand::Add => {
                let index = self.draft.add_line();
                debug!(row = index + 1, "Row added");
                Ok(Applied::Line(index, self.draft.lines()[index].clone()))
            }
            EditCommand::Set { row, field, value } => {
                let line = self
                    .draft
                    .edit_line(*row, *field, value, &self.catalog)?
                    .clone();
                Ok(Applied::Line(*row, line))
            }
            EditCommand::Remove { row } => {
                let removed = self.draft.remove_line(*row)?;
                debug!(row = row + 1, "Row removed");
                Ok(Applied::Removed(*row, removed))
            }
            EditCommand::Customer { client_id } => {
                self.draft.select_customer(client_id, &self.clients);
                Ok(Applied::Order)
            }
            EditCommand::Header { field, value } => {
                self.draft.set_header(*field, value);
                Ok(Applied::Order)
            }
            other => Err(AppError::validation(format!(
                "{:?} does not change the order",
                other
            ))),
        }
    }

    /// The body that `save` would send.
    pub fn payload(&self) -> OrderPayload {
        self.draft.payload(self.order_id())
    }

    /// Creates or updates the order in the store.
    pub async fn save<S>(&self, store: &S) -> ClientResult<SaveKind>
    where
        S: OrderStore + ?Sized,
    {
        let payload = self.payload();
        match self.order_id() {
            Some(id) => {
                store.update_order(id, &payload).await?;
                info!(order_id = %id, "Order updated");
                Ok(SaveKind::Updated)
            }
            None => {
                store.create_order(&payload).await?;
                info!(invoice_no = %payload.invoice_no, "Order created");
                Ok(SaveKind::Created)
            }
        }
    }
}

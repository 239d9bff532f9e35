//! # Order Draft
//!
//! The order currently being edited: header, customer, lines and totals.
//!
//! ## Ownership
//! A draft is owned by exactly one edit session. Every operation takes
//! `&mut self`, so there is no shared mutable state and no locking; the
//! session hands the draft to the pricing engine and gets it back updated.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  User Action              Draft Method             State Change         │
//! │  ───────────              ────────────             ────────────         │
//! │                                                                         │
//! │  Add Item ──────────────► add_line() ────────────► lines.push(blank)   │
//! │                                                                         │
//! │  Edit a cell ───────────► edit_line() ───────────► lines[i] = update   │
//! │                                                                         │
//! │  Remove row ────────────► remove_line() ─────────► lines.remove(i)     │
//! │                                                                         │
//! │  Pick customer ─────────► select_customer() ─────► customer = lookup   │
//! │                                                                         │
//! │  Edit header ───────────► set_header() ──────────► header.field = v    │
//! │                                                                         │
//! │  NOTE: every line change recomputes totals before returning.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::customer::resolve_customer;
use crate::error::{CoreError, CoreResult};
use crate::payload::{to_submission_payload, OrderPayload};
use crate::pricing::{compute_totals, update_line};
use crate::types::{
    normalize_invoice_date, CatalogItem, Client, CustomerData, HeaderData, HeaderField, LineField,
    OrderLine, OrderTotals, SalesOrder,
};

/// The order being edited.
///
/// ## Invariants
/// - `totals` always equals [`compute_totals`] over `lines`
/// - a new draft has exactly one blank line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    header: HeaderData,
    customer: CustomerData,
    lines: Vec<OrderLine>,
    totals: OrderTotals,
}

impl OrderDraft {
    /// Creates a new order dated `today` with one blank line.
    pub fn new(today: NaiveDate) -> Self {
        let lines = vec![OrderLine::blank()];
        let totals = compute_totals(&lines);
        OrderDraft {
            header: HeaderData::new(today),
            customer: CustomerData::blank(),
            lines,
            totals,
        }
    }

    /// Opens a stored order for editing.
    ///
    /// ## Behavior
    /// - the invoice date is reduced to `YYYY-MM-DD`
    /// - `customer_id` starts empty (the stored order only has the name)
    /// - every line is recalculated so stale stored amounts cannot leak
    pub fn from_order(order: &SalesOrder) -> Self {
        let lines: Vec<OrderLine> = order
            .order_items
            .iter()
            .cloned()
            .map(|mut line| {
                line.recalculate();
                line
            })
            .collect();
        let totals = compute_totals(&lines);

        OrderDraft {
            header: HeaderData {
                invoice_no: order.invoice_no.clone(),
                invoice_date: normalize_invoice_date(&order.invoice_date),
                reference_no: order.reference_no.clone(),
            },
            customer: CustomerData {
                customer_id: String::new(),
                customer_name: order.customer_name.clone(),
                address1: order.address1.clone(),
                address2: order.address2.clone(),
                state: order.state.clone(),
                post_code: order.post_code.clone(),
            },
            lines,
            totals,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn header(&self) -> &HeaderData {
        &self.header
    }

    pub fn customer(&self) -> &CustomerData {
        &self.customer
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Number of lines, including blank ones.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(OrderLine::blank());
        self.refresh_totals();
        self.lines.len() - 1
    }

    /// Applies one field edit to the line at `index` (0-based).
    ///
    /// ## Returns
    /// - `Ok(&OrderLine)` with the recalculated line
    /// - `Err(CoreError::LineOutOfRange)` if the line does not exist
    pub fn edit_line(
        &mut self,
        index: usize,
        field: LineField,
        value: &str,
        catalog: &[CatalogItem],
    ) -> CoreResult<&OrderLine> {
        let len = self.lines.len();
        let current = self
            .lines
            .get(index)
            .ok_or(CoreError::LineOutOfRange { index, len })?;

        let updated = update_line(current, field, value, catalog);
        self.lines[index] = updated;
        self.refresh_totals();
        Ok(&self.lines[index])
    }

    /// Removes and returns the line at `index` (0-based).
    pub fn remove_line(&mut self, index: usize) -> CoreResult<OrderLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }

        let removed = self.lines.remove(index);
        self.refresh_totals();
        Ok(removed)
    }

    // =========================================================================
    // Header & Customer
    // =========================================================================

    /// Replaces the customer block with the client matching `client_id`
    /// (blank if none matches).
    pub fn select_customer(&mut self, client_id: &str, clients: &[Client]) -> &CustomerData {
        self.customer = resolve_customer(client_id, clients);
        &self.customer
    }

    /// Sets one header field verbatim.
    pub fn set_header(&mut self, field: HeaderField, value: &str) {
        let value = value.to_string();
        match field {
            HeaderField::InvoiceNo => self.header.invoice_no = value,
            HeaderField::InvoiceDate => self.header.invoice_date = value,
            HeaderField::ReferenceNo => self.header.reference_no = value,
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Shapes the draft for `POST` (no id) or `PUT` (with id).
    pub fn payload(&self, order_id: Option<&str>) -> OrderPayload {
        let payload = to_submission_payload(&self.header, &self.customer, &self.lines);
        match order_id {
            Some(id) => payload.with_id(id),
            None => payload,
        }
    }

    fn refresh_totals(&mut self) {
        self.totals = compute_totals(&self.lines);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("X1", "Widget", 5.0),
            CatalogItem::new("X2", "Gadget", 7.5),
        ]
    }

    fn clients() -> Vec<Client> {
        vec![Client {
            id: "3".to_string(),
            customer_name: "Acme".to_string(),
            address1: Some("1 Main St".to_string()),
            address2: None,
            state: None,
            post_code: Some("3000".to_string()),
        }]
    }

    fn assert_totals_consistent(draft: &OrderDraft) {
        assert_eq!(*draft.totals(), compute_totals(draft.lines()));
    }

    #[test]
    fn test_new_draft_has_one_blank_line() {
        let draft = OrderDraft::new(today());
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.lines()[0], OrderLine::blank());
        assert_eq!(draft.header().invoice_date, "2024-05-01");
        assert_eq!(*draft.totals(), OrderTotals::default());
    }

    #[test]
    fn test_edit_line_updates_totals() {
        let mut draft = OrderDraft::new(today());
        draft.edit_line(0, LineField::ItemCode, "X1", &catalog()).unwrap();
        draft.edit_line(0, LineField::Quantity, "3", &catalog()).unwrap();
        draft.edit_line(0, LineField::TaxRatePercent, "10", &catalog()).unwrap();

        assert_eq!(draft.totals().total_excl, 15.0);
        assert!((draft.totals().total_incl - 16.5).abs() < 1e-9);
        assert_totals_consistent(&draft);
    }

    #[test]
    fn test_add_and_remove_lines_keep_totals_consistent() {
        let mut draft = OrderDraft::new(today());
        draft.edit_line(0, LineField::ItemCode, "X1", &catalog()).unwrap();

        let second = draft.add_line();
        assert_eq!(second, 1);
        draft.edit_line(second, LineField::ItemCode, "X2", &catalog()).unwrap();
        assert_eq!(draft.totals().total_excl, 12.5);
        assert_totals_consistent(&draft);

        let removed = draft.remove_line(0).unwrap();
        assert_eq!(removed.item_code, "X1");
        assert_eq!(draft.totals().total_excl, 7.5);
        assert_totals_consistent(&draft);

        draft.remove_line(0).unwrap();
        assert_eq!(draft.line_count(), 0);
        assert_eq!(*draft.totals(), OrderTotals::default());
    }

    #[test]
    fn test_out_of_range_lines() {
        let mut draft = OrderDraft::new(today());
        assert_eq!(
            draft.edit_line(3, LineField::Quantity, "1", &[]).unwrap_err(),
            CoreError::LineOutOfRange { index: 3, len: 1 }
        );
        assert_eq!(
            draft.remove_line(1).unwrap_err(),
            CoreError::LineOutOfRange { index: 1, len: 1 }
        );
        assert_eq!(draft.line_count(), 1);
    }

    #[test]
    fn test_select_customer_and_clear() {
        let mut draft = OrderDraft::new(today());
        draft.select_customer("3", &clients());
        assert_eq!(draft.customer().customer_name, "Acme");
        assert_eq!(draft.customer().address2, "");

        draft.select_customer("", &clients());
        assert_eq!(*draft.customer(), CustomerData::blank());
    }

    #[test]
    fn test_set_header() {
        let mut draft = OrderDraft::new(today());
        draft.set_header(HeaderField::InvoiceNo, "INV-9");
        draft.set_header(HeaderField::ReferenceNo, "PO-1");
        draft.set_header(HeaderField::InvoiceDate, "2024-06-30");
        assert_eq!(draft.header().invoice_no, "INV-9");
        assert_eq!(draft.header().reference_no, "PO-1");
        assert_eq!(draft.header().invoice_date, "2024-06-30");
    }

    #[test]
    fn test_from_order_recalculates_stale_amounts() {
        let order: SalesOrder = serde_json::from_str(
            r#"{
                "invoiceNo": "INV-1",
                "invoiceDate": "2024-02-03T00:00:00",
                "referenceNo": "R",
                "customerName": "Acme",
                "address1": "1 Main St",
                "orderItems": [
                    {"itemCode": "X1", "description": "Widget", "quantity": 2, "price": 5, "tax": 10,
                     "exclAmount": 999, "taxAmount": 999, "inclAmount": 999}
                ]
            }"#,
        )
        .unwrap();

        let draft = OrderDraft::from_order(&order);
        assert_eq!(draft.header().invoice_date, "2024-02-03");
        assert_eq!(draft.customer().customer_id, "");
        assert_eq!(draft.customer().customer_name, "Acme");
        assert_eq!(draft.lines()[0].excl_amount, 10.0);
        assert_eq!(draft.lines()[0].incl_amount, 11.0);
        assert_eq!(draft.totals().total_incl, 11.0);
    }

    #[test]
    fn test_payload_with_and_without_id() {
        let mut draft = OrderDraft::new(today());
        draft.select_customer("3", &clients());

        assert!(draft.payload(None).id.is_none());
        let update = draft.payload(Some("12"));
        assert_eq!(update.id.as_deref(), Some("12"));
        assert_eq!(update.customer_name, "Acme");
        assert_eq!(update.order_items.len(), 1);
    }
}

//! # Order Submission Shaping
//!
//! Builds the body of `POST /salesorder` and `PUT /salesorder/{id}`.
//!
//! ## What Goes Over the Wire
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HeaderData ──────────┐                                                │
//! │                       │                                                 │
//! │  CustomerData ────────┼──► OrderPayload                                │
//! │   (minus customerId)  │     invoiceNo, invoiceDate, referenceNo,       │
//! │                       │     customerName, address1, address2,          │
//! │  OrderLine × n ───────┘     state, postCode,                           │
//! │   (editable fields only)    orderItems: [OrderItemPayload]             │
//! │                                                                         │
//! │  NEVER SENT: excl/tax/incl amounts, customerId                         │
//! │  The store recomputes amounts; the client id is only a lookup key.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coerce::truncate_quantity;
use crate::types::{CustomerData, HeaderData, OrderLine};

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItemPayload {
    pub item_code: String,
    pub description: String,
    pub note: String,
    /// Whole units; fractional quantities are truncated toward zero.
    pub quantity: i64,
    pub price: f64,
    pub tax: f64,
}

impl From<&OrderLine> for OrderItemPayload {
    fn from(line: &OrderLine) -> Self {
        OrderItemPayload {
            item_code: line.item_code.clone(),
            description: line.description.clone(),
            note: line.note.clone(),
            quantity: truncate_quantity(line.quantity),
            price: finite_or_zero(line.unit_price),
            tax: finite_or_zero(line.tax_rate_percent),
        }
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderPayload {
    /// Present only on updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,

    pub invoice_no: String,
    pub invoice_date: String,
    pub reference_no: String,

    pub customer_name: String,
    pub address1: String,
    pub address2: String,
    pub state: String,
    pub post_code: String,

    pub order_items: Vec<OrderItemPayload>,
}

impl OrderPayload {
    /// Attaches the order id for `PUT /salesorder/{id}`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Flattens header, customer and lines into a submission payload.
///
/// ## Example
/// ```rust
/// use salesdesk_core::{CustomerData, HeaderData, OrderLine};
/// use salesdesk_core::payload::to_submission_payload;
///
/// let header = HeaderData::default();
/// let customer = CustomerData { customer_id: "7".into(), ..CustomerData::default() };
/// let payload = to_submission_payload(&header, &customer, &[OrderLine::blank()]);
///
/// let json = serde_json::to_value(&payload).unwrap();
/// assert!(json.get("customerId").is_none());
/// assert!(json["orderItems"][0].get("exclAmount").is_none());
/// assert_eq!(json["orderItems"][0]["quantity"], 1);
/// ```
pub fn to_submission_payload(
    header: &HeaderData,
    customer: &CustomerData,
    lines: &[OrderLine],
) -> OrderPayload {
    OrderPayload {
        id: None,
        invoice_no: header.invoice_no.clone(),
        invoice_date: header.invoice_date.clone(),
        reference_no: header.reference_no.clone(),
        customer_name: customer.customer_name.clone(),
        address1: customer.address1.clone(),
        address2: customer.address2.clone(),
        state: customer.state.clone(),
        post_code: customer.post_code.clone(),
        order_items: lines.iter().map(OrderItemPayload::from).collect(),
    }
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

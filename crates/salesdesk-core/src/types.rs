//! # Domain Types
//!
//! Core domain types used throughout SalesDesk.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Reference data (read from the order store)                            │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  CatalogItem    │   │     Client      │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  item_code      │   │  id             │                             │
//! │  │  description    │   │  customer_name  │                             │
//! │  │  unit_price     │   │  address...     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Order being edited                                                    │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   HeaderData    │   │  CustomerData   │   │   OrderLine     │ × n   │
//! │  │  invoice_no     │   │  customer_id    │   │  quantity       │       │
//! │  │  invoice_date   │   │  customer_name  │   │  unit_price     │       │
//! │  │  reference_no   │   │  address...     │   │  tax_rate_pct   │       │
//! │  └─────────────────┘   └─────────────────┘   │  excl/tax/incl  │       │
//! │                                              └────────┬────────┘       │
//! │                                                       ▼                 │
//! │                                              ┌─────────────────┐       │
//! │                                              │  OrderTotals    │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  Stored orders                                                         │
//! │  OrderSummary (listing row)     SalesOrder (full order)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Every type serializes in camelCase to match the order store. Two line
//! fields have short wire names: `unit_price` is `price` and
//! `tax_rate_percent` is `tax`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::coerce::{lenient_number, optional_id, string_or_empty};
use crate::error::CoreError;

/// Date format used for invoice dates everywhere in the model.
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable product from `GET /items`.
///
/// Both `item_code` and `description` are unique within the catalog, so
/// either one identifies the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "optional_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub item_code: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,

    /// Default unit price applied when the item is selected on a line.
    #[serde(rename = "price", default, deserialize_with = "lenient_number")]
    pub unit_price: f64,
}

impl CatalogItem {
    /// Creates a catalog item without a store id (tests, seed data).
    pub fn new(item_code: impl Into<String>, description: impl Into<String>, unit_price: f64) -> Self {
        CatalogItem {
            id: None,
            item_code: item_code.into(),
            description: description.into(),
            unit_price,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer from `GET /clients`.
///
/// Address fields are optional on the store side; [`resolve_customer`]
/// turns missing ones into empty strings.
///
/// [`resolve_customer`]: crate::customer::resolve_customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    /// Store identifier, held as text (the store sends numbers).
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub customer_name: String,

    #[serde(default)]
    pub address1: Option<String>,

    #[serde(default)]
    pub address2: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub post_code: Option<String>,
}

// =============================================================================
// Order Line
// =============================================================================

/// One product / quantity / price / tax row of an order.
///
/// ## Invariant
/// After every recalculation:
/// - `excl_amount = quantity × unit_price`
/// - `tax_amount  = excl_amount × tax_rate_percent / 100`
/// - `incl_amount = excl_amount + tax_amount`
///
/// The three amounts are derived and never edited directly; see
/// [`OrderLine::recalculate`](crate::pricing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub item_code: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,

    /// Free text, never used in calculations.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub note: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: f64,

    #[serde(rename = "price", default, deserialize_with = "lenient_number")]
    pub unit_price: f64,

    #[serde(rename = "tax", default, deserialize_with = "lenient_number")]
    pub tax_rate_percent: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub excl_amount: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub tax_amount: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub incl_amount: f64,
}

impl Default for OrderLine {
    fn default() -> Self {
        OrderLine::blank()
    }
}

/// Editable fields of an [`OrderLine`].
///
/// ## Accepted Names
/// | Field | Names (case-insensitive) |
/// |---|---|
/// | `ItemCode` | `itemCode`, `item_code`, `code` |
/// | `Description` | `description`, `desc` |
/// | `Note` | `note` |
/// | `Quantity` | `quantity`, `qty` |
/// | `UnitPrice` | `price`, `unitPrice`, `unit_price` |
/// | `TaxRatePercent` | `tax`, `taxRatePercent`, `tax_rate_percent` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum LineField {
    ItemCode,
    Description,
    Note,
    Quantity,
    UnitPrice,
    TaxRatePercent,
}

impl LineField {
    /// True for the two fields that trigger a catalog lookup.
    #[inline]
    pub fn is_lookup_key(&self) -> bool {
        matches!(self, LineField::ItemCode | LineField::Description)
    }
}

impl FromStr for LineField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "itemcode" | "item_code" | "code" => Ok(LineField::ItemCode),
            "description" | "desc" => Ok(LineField::Description),
            "note" => Ok(LineField::Note),
            "quantity" | "qty" => Ok(LineField::Quantity),
            "price" | "unitprice" | "unit_price" => Ok(LineField::UnitPrice),
            "tax" | "taxratepercent" | "tax_rate_percent" => Ok(LineField::TaxRatePercent),
            _ => Err(CoreError::UnknownLineField(s.to_string())),
        }
    }
}

impl std::fmt::Display for LineField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LineField::ItemCode => "itemCode",
            LineField::Description => "description",
            LineField::Note => "note",
            LineField::Quantity => "quantity",
            LineField::UnitPrice => "price",
            LineField::TaxRatePercent => "tax",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Order-level sums over the current line set.
///
/// Derived state with no identity of its own: never persisted, always
/// recomputed from the lines by [`compute_totals`](crate::pricing::compute_totals).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub total_excl: f64,
    pub total_tax: f64,
    pub total_incl: f64,
}

// =============================================================================
// Customer Data
// =============================================================================

/// Customer block of the order being edited.
///
/// `customer_id` is only the lookup key of the selected [`Client`]; it is
/// not part of the stored order shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerData {
    pub customer_id: String,
    pub customer_name: String,
    pub address1: String,
    pub address2: String,
    pub state: String,
    pub post_code: String,
}

impl CustomerData {
    /// A fully blank customer block (nothing selected).
    pub fn blank() -> Self {
        CustomerData::default()
    }
}

// =============================================================================
// Header Data
// =============================================================================

/// Order metadata not tied to the customer or the lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HeaderData {
    pub invoice_no: String,

    /// `YYYY-MM-DD`.
    pub invoice_date: String,

    pub reference_no: String,
}

impl HeaderData {
    /// A fresh header dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        HeaderData {
            invoice_no: String::new(),
            invoice_date: today.format(INVOICE_DATE_FORMAT).to_string(),
            reference_no: String::new(),
        }
    }
}

/// Editable fields of [`HeaderData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    InvoiceNo,
    InvoiceDate,
    ReferenceNo,
}

impl FromStr for HeaderField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoiceno" | "invoice_no" | "invoice" => Ok(HeaderField::InvoiceNo),
            "invoicedate" | "invoice_date" | "date" => Ok(HeaderField::InvoiceDate),
            "referenceno" | "reference_no" | "reference" | "ref" => Ok(HeaderField::ReferenceNo),
            _ => Err(CoreError::UnknownHeaderField(s.to_string())),
        }
    }
}

/// Reduces a stored invoice date to `YYYY-MM-DD`.
///
/// The store returns full timestamps (`2024-05-01T00:00:00`, sometimes with
/// an offset). Timestamps with an offset are converted to UTC first.
/// Unrecognised text keeps whatever precedes a `T`.
///
/// ## Example
/// ```rust
/// use salesdesk_core::types::normalize_invoice_date;
///
/// assert_eq!(normalize_invoice_date("2024-05-01T00:00:00"), "2024-05-01");
/// assert_eq!(normalize_invoice_date("2024-05-01T23:30:00-02:00"), "2024-05-02");
/// assert_eq!(normalize_invoice_date("2024-05-01"), "2024-05-01");
/// ```
pub fn normalize_invoice_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).date_naive().format(INVOICE_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().format(INVOICE_DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, INVOICE_DATE_FORMAT) {
        return date.format(INVOICE_DATE_FORMAT).to_string();
    }

    raw.split('T').next().unwrap_or_default().to_string()
}

// =============================================================================
// Stored Orders
// =============================================================================

/// One row of `GET /salesorder` (the home listing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub invoice_no: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub invoice_date: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub customer_name: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub reference_no: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub total_excl: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub total_tax: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub total_incl: f64,
}

/// A full order from `GET /salesorder/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesOrder {
    #[serde(default, deserialize_with = "optional_id", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub invoice_no: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub invoice_date: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub reference_no: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub customer_name: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub address1: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub address2: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub post_code: String,

    #[serde(default)]
    pub order_items: Vec<OrderLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_field_parsing() {
        assert_eq!("itemCode".parse::<LineField>().unwrap(), LineField::ItemCode);
        assert_eq!("CODE".parse::<LineField>().unwrap(), LineField::ItemCode);
        assert_eq!("desc".parse::<LineField>().unwrap(), LineField::Description);
        assert_eq!("qty".parse::<LineField>().unwrap(), LineField::Quantity);
        assert_eq!("unitPrice".parse::<LineField>().unwrap(), LineField::UnitPrice);
        assert_eq!("tax".parse::<LineField>().unwrap(), LineField::TaxRatePercent);
        assert_eq!(
            "colour".parse::<LineField>(),
            Err(CoreError::UnknownLineField("colour".to_string()))
        );
    }

    #[test]
    fn test_line_field_lookup_keys() {
        assert!(LineField::ItemCode.is_lookup_key());
        assert!(LineField::Description.is_lookup_key());
        assert!(!LineField::Quantity.is_lookup_key());
        assert!(!LineField::Note.is_lookup_key());
    }

    #[test]
    fn test_header_field_parsing() {
        assert_eq!("invoiceNo".parse::<HeaderField>().unwrap(), HeaderField::InvoiceNo);
        assert_eq!("date".parse::<HeaderField>().unwrap(), HeaderField::InvoiceDate);
        assert_eq!("ref".parse::<HeaderField>().unwrap(), HeaderField::ReferenceNo);
        assert!("total".parse::<HeaderField>().is_err());
    }

    #[test]
    fn test_header_new_uses_date() {
        let header = HeaderData::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(header.invoice_date, "2024-03-09");
        assert!(header.invoice_no.is_empty());
    }

    #[test]
    fn test_normalize_invoice_date() {
        assert_eq!(normalize_invoice_date("2024-05-01T00:00:00"), "2024-05-01");
        assert_eq!(normalize_invoice_date("2024-05-01T10:15:00.123"), "2024-05-01");
        assert_eq!(normalize_invoice_date("2024-05-01T00:00:00Z"), "2024-05-01");
        assert_eq!(normalize_invoice_date("2024-05-01"), "2024-05-01");
        assert_eq!(normalize_invoice_date("someday"), "someday");
        assert_eq!(normalize_invoice_date(""), "");
    }

    #[test]
    fn test_catalog_item_wire_format() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 3, "itemCode": "X1", "description": "Widget", "price": 5.0}"#)
                .unwrap();
        assert_eq!(item.id.as_deref(), Some("3"));
        assert_eq!(item.item_code, "X1");
        assert_eq!(item.unit_price, 5.0);
    }

    #[test]
    fn test_client_wire_format_with_missing_address() {
        let client: Client =
            serde_json::from_str(r#"{"id": 12, "customerName": "Acme", "address1": null}"#).unwrap();
        assert_eq!(client.id, "12");
        assert_eq!(client.customer_name, "Acme");
        assert!(client.address1.is_none());
        assert!(client.post_code.is_none());
    }

    #[test]
    fn test_order_line_uses_short_wire_names() {
        let json = serde_json::to_value(OrderLine::blank()).unwrap();
        assert!(json.get("price").is_some());
        assert!(json.get("tax").is_some());
        assert!(json.get("unitPrice").is_none());
        assert_eq!(json["quantity"], 1.0);
    }

    #[test]
    fn test_sales_order_tolerates_loose_types() {
        let order: SalesOrder = serde_json::from_str(
            r#"{
                "id": 9,
                "invoiceNo": "INV-9",
                "invoiceDate": "2024-05-01T00:00:00",
                "referenceNo": null,
                "customerName": "Acme",
                "orderItems": [
                    {"itemCode": "X1", "description": "Widget", "quantity": "2", "price": 5, "tax": "10"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(order.id.as_deref(), Some("9"));
        assert_eq!(order.reference_no, "");
        assert_eq!(order.address1, "");
        assert_eq!(order.order_items[0].quantity, 2.0);
        assert_eq!(order.order_items[0].tax_rate_percent, 10.0);
        assert_eq!(order.order_items[0].note, "");
    }
}

//! # Order Line Pricing Engine
//!
//! Per-line recalculation, catalog resolution and order aggregation.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_line(line, field, "value", catalog)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Copy the line, write the raw value into `field`                    │
//! │     (numeric fields go through parse_or_zero)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. field is itemCode / description?                                   │
//! │       ├── yes → find_catalog_item (code first, then description)      │
//! │       │           ├── match → overwrite code, description, price       │
//! │       │           └── none  → keep the typed text and current price    │
//! │       └── no  → skip                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. recalculate: excl = qty × price                                    │
//! │                  tax  = excl × rate / 100                              │
//! │                  incl = excl + tax                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Return the new line (never fails)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::coerce::parse_or_zero;
use crate::types::{CatalogItem, LineField, OrderLine, OrderTotals};

// =============================================================================
// Line Math
// =============================================================================

impl OrderLine {
    /// A new blank row: quantity 1, every monetary field 0.
    pub fn blank() -> Self {
        OrderLine {
            item_code: String::new(),
            description: String::new(),
            note: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
            tax_rate_percent: 0.0,
            excl_amount: 0.0,
            tax_amount: 0.0,
            incl_amount: 0.0,
        }
    }

    /// Recomputes the three derived amounts from quantity, price and rate.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::OrderLine;
    ///
    /// let mut line = OrderLine::blank();
    /// line.quantity = 3.0;
    /// line.unit_price = 10.0;
    /// line.tax_rate_percent = 10.0;
    /// line.recalculate();
    ///
    /// assert_eq!(line.excl_amount, 30.0);
    /// assert_eq!(line.tax_amount, 3.0);
    /// assert_eq!(line.incl_amount, 33.0);
    /// ```
    pub fn recalculate(&mut self) {
        self.excl_amount = self.quantity * self.unit_price;
        self.tax_amount = self.excl_amount * self.tax_rate_percent / 100.0;
        self.incl_amount = self.excl_amount + self.tax_amount;
    }

    /// Writes a raw text value into one field. Numbers are coerced, text is
    /// stored verbatim. Does not recalculate.
    fn apply_raw(&mut self, field: LineField, value: &str) {
        match field {
            LineField::ItemCode => self.item_code = value.to_string(),
            LineField::Description => self.description = value.to_string(),
            LineField::Note => self.note = value.to_string(),
            LineField::Quantity => self.quantity = parse_or_zero(value),
            LineField::UnitPrice => self.unit_price = parse_or_zero(value),
            LineField::TaxRatePercent => self.tax_rate_percent = parse_or_zero(value),
        }
    }

    /// Copies code, description and default price from a catalog item.
    fn apply_catalog_item(&mut self, item: &CatalogItem) {
        self.item_code = item.item_code.clone();
        self.description = item.description.clone();
        self.unit_price = item.unit_price;
    }
}

// =============================================================================
// Catalog Resolution
// =============================================================================

/// Finds the catalog item a line refers to.
///
/// ## Search Order
/// Two exact-match passes over the catalog, each in catalog order:
/// 1. `item_code`
/// 2. `description`
///
/// The line's code always wins, so a line that already carries a known code
/// keeps that item even when its description is edited. Empty keys never
/// match.
///
/// ## Example
/// ```rust
/// use salesdesk_core::CatalogItem;
/// use salesdesk_core::pricing::find_catalog_item;
///
/// let catalog = vec![
///     CatalogItem::new("X1", "Widget", 5.0),
///     CatalogItem::new("X2", "Gadget", 7.5),
/// ];
///
/// assert_eq!(find_catalog_item(&catalog, "X1", "Gadget").unwrap().item_code, "X1");
/// assert_eq!(find_catalog_item(&catalog, "", "Gadget").unwrap().item_code, "X2");
/// assert!(find_catalog_item(&catalog, "", "").is_none());
/// ```
pub fn find_catalog_item<'a>(
    catalog: &'a [CatalogItem],
    item_code: &str,
    description: &str,
) -> Option<&'a CatalogItem> {
    let by_code = || {
        if item_code.is_empty() {
            None
        } else {
            catalog.iter().find(|i| i.item_code == item_code)
        }
    };
    let by_description = || {
        if description.is_empty() {
            None
        } else {
            catalog.iter().find(|i| i.description == description)
        }
    };

    by_code().or_else(by_description)
}

// =============================================================================
// Line Update
// =============================================================================

/// Applies one edit to a line and returns the recalculated copy.
///
/// ## Behavior
/// - `value` is written into `field`; numeric fields use parse-or-zero
/// - editing `ItemCode` or `Description` resolves the catalog item and, on a
///   match, overwrites code, description and unit price (this replaces any
///   price the user typed earlier)
/// - an unmatched code or description keeps the typed text and the current
///   price, so free-text items are possible
/// - derived amounts are always recomputed
///
/// ## Example
/// ```rust
/// use salesdesk_core::{CatalogItem, LineField, OrderLine};
/// use salesdesk_core::pricing::update_line;
///
/// let catalog = vec![CatalogItem::new("X1", "Widget", 5.0)];
/// let line = update_line(&OrderLine::blank(), LineField::ItemCode, "X1", &catalog);
///
/// assert_eq!(line.description, "Widget");
/// assert_eq!(line.unit_price, 5.0);
/// assert_eq!(line.incl_amount, 5.0);
/// ```
pub fn update_line(
    line: &OrderLine,
    field: LineField,
    value: &str,
    catalog: &[CatalogItem],
) -> OrderLine {
    let mut updated = line.clone();
    updated.apply_raw(field, value);

    if field.is_lookup_key() {
        match find_catalog_item(catalog, &updated.item_code, &updated.description) {
            Some(item) => {
                debug!(item_code = %item.item_code, price = item.unit_price, "Catalog item selected");
                updated.apply_catalog_item(item);
            }
            None => {
                debug!(
                    item_code = %updated.item_code,
                    description = %updated.description,
                    "No catalog match, keeping free-text item"
                );
            }
        }
    }

    updated.recalculate();
    updated
}

// =============================================================================
// Order Aggregation
// =============================================================================

/// Sums the derived amounts of all lines, in list order.
///
/// ## Example
/// ```rust
/// use salesdesk_core::pricing::compute_totals;
///
/// let totals = compute_totals(&[]);
/// assert_eq!(totals.total_excl, 0.0);
/// assert_eq!(totals.total_incl, 0.0);
/// ```
pub fn compute_totals(lines: &[OrderLine]) -> OrderTotals {
    lines.iter().fold(OrderTotals::default(), |mut acc, line| {
        acc.total_excl += line.excl_amount;
        acc.total_tax += line.tax_amount;
        acc.total_incl += line.incl_amount;
        acc
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("X1", "Widget", 5.0),
            CatalogItem::new("X2", "Gadget", 7.5),
            CatalogItem::new("X3", "Sprocket", 12.25),
        ]
    }

    fn assert_line_invariants(line: &OrderLine) {
        assert_eq!(line.excl_amount, line.quantity * line.unit_price);
        assert_eq!(line.tax_amount, line.excl_amount * line.tax_rate_percent / 100.0);
        assert_eq!(line.incl_amount, line.excl_amount + line.tax_amount);
    }

    #[test]
    fn test_blank_line() {
        let line = OrderLine::blank();
        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.unit_price, 0.0);
        assert_eq!(line.tax_rate_percent, 0.0);
        assert_eq!(line.incl_amount, 0.0);
        assert!(line.item_code.is_empty());
    }

    #[test]
    fn test_three_at_ten_with_ten_percent_tax() {
        let line = OrderLine::blank();
        let line = update_line(&line, LineField::Quantity, "3", &[]);
        let line = update_line(&line, LineField::UnitPrice, "10.00", &[]);
        let line = update_line(&line, LineField::TaxRatePercent, "10", &[]);

        assert_eq!(line.excl_amount, 30.0);
        assert!((line.tax_amount - 3.0).abs() < 1e-9);
        assert!((line.incl_amount - 33.0).abs() < 1e-9);
        assert_line_invariants(&line);
    }

    #[test]
    fn test_unparsable_quantity_is_zero() {
        let mut line = OrderLine::blank();
        line.unit_price = 10.0;
        line.tax_rate_percent = 10.0;

        let line = update_line(&line, LineField::Quantity, "abc", &[]);
        assert_eq!(line.quantity, 0.0);
        assert_eq!(line.excl_amount, 0.0);
        assert_eq!(line.tax_amount, 0.0);
        assert_eq!(line.incl_amount, 0.0);
    }

    #[test]
    fn test_select_by_item_code_fills_description_and_price() {
        let mut line = OrderLine::blank();
        line.quantity = 2.0;
        line.tax_rate_percent = 10.0;

        let line = update_line(&line, LineField::ItemCode, "X1", &catalog());
        assert_eq!(line.item_code, "X1");
        assert_eq!(line.description, "Widget");
        assert_eq!(line.unit_price, 5.0);
        assert_eq!(line.excl_amount, 10.0);
        assert_line_invariants(&line);
    }

    #[test]
    fn test_select_by_description_fills_code() {
        let line = update_line(&OrderLine::blank(), LineField::Description, "Sprocket", &catalog());
        assert_eq!(line.item_code, "X3");
        assert_eq!(line.unit_price, 12.25);
        assert_eq!(line.excl_amount, 12.25);
    }

    #[test]
    fn test_catalog_price_overrides_typed_price() {
        let line = update_line(&OrderLine::blank(), LineField::UnitPrice, "99", &catalog());
        assert_eq!(line.unit_price, 99.0);

        let line = update_line(&line, LineField::ItemCode, "X2", &catalog());
        assert_eq!(line.unit_price, 7.5);
    }

    #[test]
    fn test_existing_code_wins_over_edited_description() {
        let line = update_line(&OrderLine::blank(), LineField::ItemCode, "X1", &catalog());
        let line = update_line(&line, LineField::Description, "Gadget", &catalog());
        assert_eq!(line.item_code, "X1");
        assert_eq!(line.description, "Widget");
        assert_eq!(line.unit_price, 5.0);
        assert_line_invariants(&line);
    }

    #[test]
    fn test_unknown_code_falls_back_to_description() {
        let mut line = OrderLine::blank();
        line.item_code = "OLD".to_string();
        let line = update_line(&line, LineField::Description, "Gadget", &catalog());
        assert_eq!(line.item_code, "X2");
        assert_eq!(line.unit_price, 7.5);
    }

    #[test]
    fn test_unmatched_code_keeps_free_text_and_price() {
        let line = update_line(&OrderLine::blank(), LineField::ItemCode, "X1", &catalog());
        let line = update_line(&line, LineField::ItemCode, "CUSTOM", &catalog());

        // Description "Widget" still matches X1 on the second pass
        assert_eq!(line.item_code, "X1");

        let line = update_line(&OrderLine::blank(), LineField::UnitPrice, "4", &catalog());
        let line = update_line(&line, LineField::ItemCode, "CUSTOM", &catalog());
        assert_eq!(line.item_code, "CUSTOM");
        assert_eq!(line.description, "");
        assert_eq!(line.unit_price, 4.0);
        assert_eq!(line.excl_amount, 4.0);
    }

    #[test]
    fn test_empty_keys_never_match() {
        let catalog = vec![CatalogItem::new("", "", 3.0)];
        let line = update_line(&OrderLine::blank(), LineField::ItemCode, "", &catalog);
        assert_eq!(line.unit_price, 0.0);
    }

    #[test]
    fn test_first_match_in_catalog_order() {
        let catalog = vec![
            CatalogItem::new("DUP", "First", 1.0),
            CatalogItem::new("DUP", "Second", 2.0),
        ];
        let line = update_line(&OrderLine::blank(), LineField::ItemCode, "DUP", &catalog);
        assert_eq!(line.description, "First");
    }

    #[test]
    fn test_non_key_fields_do_not_trigger_lookup() {
        let mut line = OrderLine::blank();
        line.item_code = "X1".to_string();
        line.unit_price = 1.0;

        let line = update_line(&line, LineField::Note, "fragile", &catalog());
        assert_eq!(line.note, "fragile");
        assert_eq!(line.unit_price, 1.0);
        assert_eq!(line.description, "");
    }

    #[test]
    fn test_update_does_not_mutate_input() {
        let original = OrderLine::blank();
        let _ = update_line(&original, LineField::Quantity, "5", &[]);
        assert_eq!(original.quantity, 1.0);
    }

    #[test]
    fn test_compute_totals_sums_lines() {
        let a = update_line(&OrderLine::blank(), LineField::ItemCode, "X1", &catalog());
        let a = update_line(&a, LineField::TaxRatePercent, "10", &catalog());
        let b = update_line(&OrderLine::blank(), LineField::ItemCode, "X2", &catalog());
        let b = update_line(&b, LineField::Quantity, "2", &catalog());

        let totals = compute_totals(&[a.clone(), b.clone()]);
        assert_eq!(totals.total_excl, a.excl_amount + b.excl_amount);
        assert_eq!(totals.total_tax, a.tax_amount + b.tax_amount);
        assert_eq!(totals.total_incl, a.incl_amount + b.incl_amount);
        assert_eq!(totals.total_excl, 20.0);
    }

    #[test]
    fn test_compute_totals_empty() {
        assert_eq!(compute_totals(&[]), OrderTotals::default());
    }
}

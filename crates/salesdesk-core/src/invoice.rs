//! # Invoice & Listing Rendering
//!
//! Plain-text renderings of an order (the printable sales invoice) and of
//! the stored order list (the home table).
//!
//! ## Invoice Layout
//! ```text
//! Sales Invoice
//! =============
//! Invoice No:   INV-001
//! Invoice Date: 2024-05-01
//! Reference:    PO-77
//!
//! Customer Details
//! ----------------
//! Acme
//! 1 Main St
//! ...
//!
//! Item Code  Description  Qty  Price  Tax %  Excl   Incl
//! ---------  -----------  ---  -----  -----  -----  -----
//! X1         Widget         3  10.00  10.00  30.00  33.00
//!
//!                                    Total Excl:  30.00
//!                                    Total Tax:    3.00
//!                                    Total Incl:  33.00
//! ```
//!
//! All amounts go through [`Money`] so rounding happens here and only here.

use std::fmt::Write;

use crate::money::Money;
use crate::types::{CustomerData, HeaderData, OrderLine, OrderSummary, OrderTotals};

const INVOICE_TITLE: &str = "Sales Invoice";
const CUSTOMER_TITLE: &str = "Customer Details";
const EMPTY_LIST: &str = "No orders found.";

// =============================================================================
// Text Table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Column-aligned text table, widths sized to the widest cell.
struct TextTable<'a> {
    columns: &'a [(&'a str, Align)],
    rows: Vec<Vec<String>>,
}

impl<'a> TextTable<'a> {
    fn new(columns: &'a [(&'a str, Align)]) -> Self {
        TextTable {
            columns,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (title, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(title.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_into(&self, out: &mut String) {
        let widths = self.widths();

        let titles: Vec<String> = self.columns.iter().map(|(t, _)| t.to_string()).collect();
        let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        write_row(out, &titles, self.columns, &widths);
        write_row(out, &rules, self.columns, &widths);
        for row in &self.rows {
            write_row(out, row, self.columns, &widths);
        }
    }
}

fn write_row(out: &mut String, cells: &[String], columns: &[(&str, Align)], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        // Writing into a String cannot fail
        let _ = match columns.get(i).map(|(_, a)| *a).unwrap_or(Align::Left) {
            Align::Left => write!(line, "{:<width$}", cell),
            Align::Right => write!(line, "{:>width$}", cell),
        };
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn underline(out: &mut String, title: &str, rule: char) {
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat(rule).take(title.chars().count()));
    out.push('\n');
}

/// Quantities print without decimals when whole (`3`, `2.5`).
fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() {
        return "0".to_string();
    }
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Renders the printable sales invoice of one order.
///
/// ## Example
/// ```rust
/// use salesdesk_core::{CustomerData, HeaderData, OrderLine};
/// use salesdesk_core::invoice::render_invoice;
/// use salesdesk_core::pricing::compute_totals;
///
/// let mut line = OrderLine::blank();
/// line.item_code = "X1".into();
/// line.quantity = 3.0;
/// line.unit_price = 10.0;
/// line.tax_rate_percent = 10.0;
/// line.recalculate();
///
/// let lines = vec![line];
/// let text = render_invoice(
///     &HeaderData::default(),
///     &CustomerData::default(),
///     &lines,
///     &compute_totals(&lines),
/// );
///
/// assert!(text.starts_with("Sales Invoice"));
/// assert!(text.contains("Total Incl:  33.00"));
/// ```
pub fn render_invoice(
    header: &HeaderData,
    customer: &CustomerData,
    lines: &[OrderLine],
    totals: &OrderTotals,
) -> String {
    let mut out = String::new();

    underline(&mut out, INVOICE_TITLE, '=');
    let _ = writeln!(out, "Invoice No:   {}", header.invoice_no);
    let _ = writeln!(out, "Invoice Date: {}", header.invoice_date);
    let _ = writeln!(out, "Reference:    {}", header.reference_no);
    out.push('\n');

    underline(&mut out, CUSTOMER_TITLE, '-');
    let _ = writeln!(out, "Name:      {}", customer.customer_name);
    let _ = writeln!(out, "Address 1: {}", customer.address1);
    let _ = writeln!(out, "Address 2: {}", customer.address2);
    let _ = writeln!(out, "State:     {}", customer.state);
    let _ = writeln!(out, "Post Code: {}", customer.post_code);
    out.push('\n');

    const COLUMNS: [(&str, Align); 7] = [
        ("Item Code", Align::Left),
        ("Description", Align::Left),
        ("Qty", Align::Right),
        ("Price", Align::Right),
        ("Tax %", Align::Right),
        ("Excl", Align::Right),
        ("Incl", Align::Right),
    ];
    let mut table = TextTable::new(&COLUMNS);
    for line in lines {
        table.push(vec![
            line.item_code.clone(),
            line.description.clone(),
            format_quantity(line.quantity),
            Money::from_amount(line.unit_price).to_string(),
            Money::from_amount(line.tax_rate_percent).to_string(),
            Money::from_amount(line.excl_amount).to_string(),
            Money::from_amount(line.incl_amount).to_string(),
        ]);
    }
    table.render_into(&mut out);
    out.push('\n');

    let amounts = [
        Money::from_amount(totals.total_excl),
        Money::from_amount(totals.total_tax),
        Money::from_amount(totals.total_incl),
    ];
    let width = amounts.iter().map(|m| m.to_string().len()).max().unwrap_or(4);
    let _ = writeln!(out, "Total Excl:  {:>width$}", amounts[0]);
    let _ = writeln!(out, "Total Tax:   {:>width$}", amounts[1]);
    let _ = writeln!(out, "Total Incl:  {:>width$}", amounts[2]);

    out
}

// =============================================================================
// Order Listing
// =============================================================================

/// Renders the home listing of stored orders.
///
/// An empty list renders a single "No orders found." line.
pub fn render_order_list(orders: &[OrderSummary]) -> String {
    if orders.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }

    const COLUMNS: [(&str, Align); 8] = [
        ("Id", Align::Right),
        ("Invoice No.", Align::Left),
        ("Invoice Date", Align::Left),
        ("Customer Name", Align::Left),
        ("Reference", Align::Left),
        ("Total Excl", Align::Right),
        ("Total Tax", Align::Right),
        ("Total Incl", Align::Right),
    ];
    let mut table = TextTable::new(&COLUMNS);
    for order in orders {
        table.push(vec![
            order.id.clone(),
            order.invoice_no.clone(),
            crate::types::normalize_invoice_date(&order.invoice_date),
            order.customer_name.clone(),
            order.reference_no.clone(),
            Money::from_amount(order.total_excl).to_string(),
            Money::from_amount(order.total_tax).to_string(),
            Money::from_amount(order.total_incl).to_string(),
        ]);
    }

    let mut out = String::new();
    table.render_into(&mut out);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compute_totals;

    fn line(code: &str, desc: &str, qty: f64, price: f64, tax: f64) -> OrderLine {
        let mut line = OrderLine::blank();
        line.item_code = code.to_string();
        line.description = desc.to_string();
        line.quantity = qty;
        line.unit_price = price;
        line.tax_rate_percent = tax;
        line.recalculate();
        line
    }

    fn summary(id: &str, no: &str, incl: f64) -> OrderSummary {
        OrderSummary {
            id: id.to_string(),
            invoice_no: no.to_string(),
            invoice_date: "2024-05-01T00:00:00".to_string(),
            customer_name: "Acme".to_string(),
            reference_no: "PO-1".to_string(),
            total_excl: incl,
            total_tax: 0.0,
            total_incl: incl,
        }
    }

    #[test]
    fn test_invoice_sections() {
        let header = HeaderData {
            invoice_no: "INV-001".to_string(),
            invoice_date: "2024-05-01".to_string(),
            reference_no: "PO-77".to_string(),
        };
        let customer = CustomerData {
            customer_id: "1".to_string(),
            customer_name: "Acme".to_string(),
            address1: "1 Main St".to_string(),
            address2: String::new(),
            state: "VIC".to_string(),
            post_code: "3000".to_string(),
        };
        let lines = vec![line("X1", "Widget", 3.0, 10.0, 10.0)];
        let text = render_invoice(&header, &customer, &lines, &compute_totals(&lines));

        assert!(text.starts_with("Sales Invoice\n=============\n"));
        assert!(text.contains("Invoice No:   INV-001"));
        assert!(text.contains("Invoice Date: 2024-05-01"));
        assert!(text.contains("Reference:    PO-77"));
        assert!(text.contains("Customer Details"));
        assert!(text.contains("Name:      Acme"));
        assert!(text.contains("Post Code: 3000"));
        assert!(text.contains("Item Code  Description  Qty  Price  Tax %   Excl   Incl"));
        assert!(text.contains("X1         Widget         3  10.00  10.00  30.00  33.00"));
        assert!(text.contains("Total Excl:  30.00"));
        assert!(text.contains("Total Tax:    3.00"));
        assert!(text.contains("Total Incl:  33.00"));
    }

    #[test]
    fn test_invoice_rounds_only_for_display() {
        let lines = vec![line("A", "Thing", 3.0, 0.1, 0.0)];
        let totals = compute_totals(&lines);
        assert_ne!(totals.total_excl, 0.3);

        let text = render_invoice(&HeaderData::default(), &CustomerData::default(), &lines, &totals);
        assert!(text.contains("Total Excl:  0.30"));
    }

    #[test]
    fn test_invoice_without_lines_still_has_table_header() {
        let text = render_invoice(
            &HeaderData::default(),
            &CustomerData::default(),
            &[],
            &OrderTotals::default(),
        );
        assert!(text.contains("Item Code"));
        assert!(text.contains("Total Incl:  0.00"));
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(-1.0), "-1");
        assert_eq!(format_quantity(f64::NAN), "0");
    }

    #[test]
    fn test_order_list() {
        let text = render_order_list(&[summary("1", "INV-1", 33.0), summary("12", "INV-12", 1234.5)]);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains("Invoice No."));
        assert!(rows[0].ends_with("Total Incl"));
        assert!(rows[2].contains("2024-05-01"));
        assert!(rows[2].ends_with("     33.00"));
        assert!(rows[3].ends_with("   1234.50"));
    }

    #[test]
    fn test_empty_order_list() {
        assert_eq!(render_order_list(&[]), "No orders found.\n");
    }
}

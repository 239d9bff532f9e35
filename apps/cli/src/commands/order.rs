//! # Order Editing Commands
//!
//! `salesdesk new` and `salesdesk edit <id>`: open an edit session and feed
//! it one command per input line until the order is saved or the input ends.
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read line ──► parse EditCommand ──┬── edit  ──► session.apply()       │
//! │      ▲                             │             print changed row     │
//! │      │                             ├── view  ──► show/items/clients    │
//! │      │                             ├── print ──► invoice (stored only) │
//! │      │                             ├── save  ──► POST / PUT            │
//! │      │                             │      ├── ok   ──► close session   │
//! │      │                             │      └── fail ──► notice, go on   │
//! │      │                             └── quit  ──► close session         │
//! │      │                                                                 │
//! │      └──────────── bad input: notice, go on ◄──────────────────────────│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use salesdesk_client::OrderStore;
use salesdesk_core::{Money, OrderDraft, OrderLine};

use crate::commands::list::list_orders;
use crate::commands::print::write_invoice;
use crate::error::AppError;
use crate::notify::{
    Notify, LOAD_FAILED, ORDER_LOADED, ORDER_SAVED, ORDER_UPDATED, SAVE_FAILED, SAVE_RETRY_HINT,
};
use crate::state::{Applied, EditCommand, EditSession, SaveKind, HELP};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The order was stored.
    Saved(SaveKind),
    /// The user quit without saving.
    Quit,
    /// Input ran out without a save.
    EndOfInput,
}

/// Opens a session for a new order and runs it.
pub async fn new_order<S, R, W, N>(
    store: &S,
    today: NaiveDate,
    input: R,
    out: &mut W,
    notifier: &mut N,
) -> Result<SessionEnd, AppError>
where
    S: OrderStore + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
    N: Notify,
{
    let session = match EditSession::start_new(store, today).await {
        Ok(session) => session,
        Err(e) => {
            notifier.error(LOAD_FAILED);
            return Err(e.into());
        }
    };
    run_session(store, session, input, out, notifier).await
}

/// Opens a session for stored order `id` and runs it.
pub async fn edit_order<S, R, W, N>(
    store: &S,
    id: &str,
    input: R,
    out: &mut W,
    notifier: &mut N,
) -> Result<SessionEnd, AppError>
where
    S: OrderStore + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
    N: Notify,
{
    let session = match EditSession::open(store, id).await {
        Ok(session) => session,
        Err(e) => {
            notifier.error(LOAD_FAILED);
            return Err(e.into());
        }
    };
    notifier.success(ORDER_LOADED);
    run_session(store, session, input, out, notifier).await
}

/// Drives an open session from `input` until it ends.
///
/// Blank lines and lines starting with `#` are skipped, so command files
/// can be commented.
pub async fn run_session<S, R, W, N>(
    store: &S,
    mut session: EditSession,
    input: R,
    out: &mut W,
    notifier: &mut N,
) -> Result<SessionEnd, AppError>
where
    S: OrderStore + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
    N: Notify,
{
    write_draft(out, session.draft())?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match line.parse::<EditCommand>() {
            Ok(command) => command,
            Err(e) => {
                notifier.error(&e.message);
                continue;
            }
        };
        debug!(?command, "Session command");

        match command {
            EditCommand::Show => write_draft(out, session.draft())?,
            EditCommand::Items => write_catalog(out, &session)?,
            EditCommand::Clients => write_clients(out, &session)?,
            EditCommand::Help => writeln!(out, "{}", HELP)?,
            EditCommand::Print => {
                if session.is_editing() {
                    write_invoice(session.draft(), out, notifier)?;
                } else {
                    notifier.error("Save the order before printing it.");
                }
            }
            EditCommand::Save => match session.save(store).await {
                Ok(kind) => {
                    notifier.success(match kind {
                        SaveKind::Created => ORDER_SAVED,
                        SaveKind::Updated => ORDER_UPDATED,
                    });
                    return Ok(SessionEnd::Saved(kind));
                }
                Err(e) => {
                    warn!(error = %e, "Save failed, session stays open");
                    notifier.error(SAVE_FAILED);
                    if e.is_retryable() {
                        notifier.info(SAVE_RETRY_HINT);
                    }
                }
            },
            EditCommand::Quit => {
                info!("Session closed without saving");
                return Ok(SessionEnd::Quit);
            }
            edit => match session.apply(&edit) {
                Ok(Applied::Line(index, line)) => {
                    write_line(out, index, &line)?;
                    write_totals(out, session.draft())?;
                }
                Ok(Applied::Removed(index, _)) => {
                    writeln!(out, "Removed row {}", index + 1)?;
                    write_totals(out, session.draft())?;
                }
                Ok(Applied::Order) => write_order_header(out, session.draft())?,
                Err(e) => notifier.error(&e.message),
            },
        }
    }

    info!("Input ended without saving");
    Ok(SessionEnd::EndOfInput)
}

/// Returns to the order listing once a session has saved.
///
/// The order is already stored at this point, so a listing failure only
/// raises its notice and the invocation still succeeds.
pub async fn finish_session<S, W, N>(
    store: &S,
    end: SessionEnd,
    out: &mut W,
    notifier: &mut N,
) -> Result<(), AppError>
where
    S: OrderStore + ?Sized,
    W: Write,
    N: Notify,
{
    if let SessionEnd::Saved(_) = end {
        if let Err(e) = list_orders(store, out, notifier).await {
            warn!(error = %e, "Listing after save failed");
        }
    }
    Ok(())
}

// =============================================================================
// Views
// =============================================================================

fn write_order_header<W: Write>(out: &mut W, draft: &OrderDraft) -> std::io::Result<()> {
    let header = draft.header();
    let customer = draft.customer();
    writeln!(
        out,
        "Invoice {} dated {} ref {}",
        or_dash(&header.invoice_no),
        or_dash(&header.invoice_date),
        or_dash(&header.reference_no)
    )?;
    writeln!(
        out,
        "Customer {}: {}, {}, {}, {} {}",
        or_dash(&customer.customer_id),
        or_dash(&customer.customer_name),
        customer.address1,
        customer.address2,
        customer.state,
        customer.post_code
    )
}

fn write_line<W: Write>(out: &mut W, index: usize, line: &OrderLine) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>3}  {:<10} {:<24} {:>6} {:>10} {:>6} {:>10} {:>10} {:>10}  {}",
        index + 1,
        line.item_code,
        line.description,
        line.quantity,
        Money::from_amount(line.unit_price),
        Money::from_amount(line.tax_rate_percent),
        Money::from_amount(line.excl_amount),
        Money::from_amount(line.tax_amount),
        Money::from_amount(line.incl_amount),
        line.note
    )
}

fn write_totals<W: Write>(out: &mut W, draft: &OrderDraft) -> std::io::Result<()> {
    let totals = draft.totals();
    writeln!(
        out,
        "Total Excl {}  Total Tax {}  Total Incl {}",
        Money::from_amount(totals.total_excl),
        Money::from_amount(totals.total_tax),
        Money::from_amount(totals.total_incl)
    )
}

/// The whole draft: header, customer, numbered rows and totals.
fn write_draft<W: Write>(out: &mut W, draft: &OrderDraft) -> std::io::Result<()> {
    write_order_header(out, draft)?;
    writeln!(
        out,
        "{:>3}  {:<10} {:<24} {:>6} {:>10} {:>6} {:>10} {:>10} {:>10}  {}",
        "Row", "Item Code", "Description", "Qty", "Price", "Tax %", "Excl", "Tax", "Incl", "Note"
    )?;
    for (index, line) in draft.lines().iter().enumerate() {
        write_line(out, index, line)?;
    }
    write_totals(out, draft)
}

fn write_catalog<W: Write>(out: &mut W, session: &EditSession) -> std::io::Result<()> {
    for item in session.catalog() {
        writeln!(
            out,
            "{:<10} {:<24} {:>10}",
            item.item_code,
            item.description,
            Money::from_amount(item.unit_price)
        )?;
    }
    Ok(())
}

fn write_clients<W: Write>(out: &mut W, session: &EditSession) -> std::io::Result<()> {
    for client in session.clients() {
        writeln!(out, "{:>5}  {}", client.id, client.customer_name)?;
    }
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::{RecordingNotifier, INVOICE_PRINTED, ORDERS_LOAD_FAILED};
    use salesdesk_client::MemoryOrderStore;
    use salesdesk_core::{CatalogItem, Client};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn store() -> MemoryOrderStore {
        MemoryOrderStore::new(
            vec![
                CatalogItem::new("X1", "Widget", 10.0),
                CatalogItem::new("X2", "Gadget", 2.5),
            ],
            vec![Client {
                id: "3".into(),
                customer_name: "Acme".into(),
                address1: Some("1 Main St".into()),
                address2: None,
                state: Some("VIC".into()),
                post_code: Some("3000".into()),
            }],
        )
    }

    async fn run_new(store: &MemoryOrderStore, script: &str) -> (SessionEnd, String, RecordingNotifier) {
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        let end = new_order(store, today(), script.as_bytes(), &mut out, &mut notifier)
            .await
            .unwrap();
        (end, String::from_utf8(out).unwrap(), notifier)
    }

    #[tokio::test]
    async fn test_new_order_script_saves() {
        let store = store();
        let script = "\
# first row from the catalog
set 1 code X1
set 1 qty 3
set 1 tax 10
add
set 2 desc Gadget
customer 3
header invoice INV-100
save
";
        let (end, out, notifier) = run_new(&store, script).await;

        assert_eq!(end, SessionEnd::Saved(SaveKind::Created));
        assert_eq!(notifier.messages(), vec![ORDER_SAVED]);
        assert!(out.contains("Total Excl 32.50  Total Tax 3.00  Total Incl 35.50"));

        let orders = store.orders().await;
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.invoice_no, "INV-100");
        assert_eq!(order.invoice_date, "2024-05-01");
        assert_eq!(order.customer_name, "Acme");
        assert_eq!(order.post_code, "3000");
        assert_eq!(order.order_items.len(), 2);
        assert_eq!(order.order_items[1].item_code, "X2");
        assert_eq!(order.order_items[1].unit_price, 2.5);
    }

    #[tokio::test]
    async fn test_bad_input_is_reported_and_session_continues() {
        let store = store();
        let (end, _, notifier) = run_new(&store, "set 5 qty 2\nfly away\nset 1 qty abc\nquit\n").await;

        assert_eq!(end, SessionEnd::Quit);
        let messages = notifier.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Row 5 does not exist"));
        assert!(messages[1].contains("fly"));
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_without_save() {
        let store = store();
        let (end, out, _) = run_new(&store, "add\nremove 1\n").await;
        assert_eq!(end, SessionEnd::EndOfInput);
        assert!(out.contains("Removed row 1"));
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_print_needs_stored_order() {
        let store = store();
        let (_, out, notifier) = run_new(&store, "print\nquit\n").await;
        assert!(!out.contains("Sales Invoice"));
        assert_eq!(notifier.notices.len(), 1);
        assert_ne!(notifier.messages()[0], INVOICE_PRINTED);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_session_open() {
        let store = store();
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        let session = EditSession::start_new(&store, today()).await.unwrap();

        store.set_failure(Some(500)).await;
        let end = run_session(&store, session, "save\nquit\n".as_bytes(), &mut out, &mut notifier)
            .await
            .unwrap();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(notifier.messages(), vec![SAVE_FAILED, SAVE_RETRY_HINT]);
    }

    #[tokio::test]
    async fn test_rejected_save_has_no_retry_hint() {
        let store = store();
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        let session = EditSession::start_new(&store, today()).await.unwrap();

        store.set_failure(Some(400)).await;
        run_session(&store, session, "save\n".as_bytes(), &mut out, &mut notifier)
            .await
            .unwrap();

        assert_eq!(notifier.messages(), vec![SAVE_FAILED]);
    }

    #[tokio::test]
    async fn test_listing_failure_after_save_still_succeeds() {
        let store = store();
        let (end, _, _) = run_new(&store, "set 1 code X1\nsave\n").await;
        assert_eq!(end, SessionEnd::Saved(SaveKind::Created));

        store.set_failure(Some(503)).await;
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        finish_session(&store, end, &mut out, &mut notifier)
            .await
            .unwrap();

        assert_eq!(notifier.messages(), vec![ORDERS_LOAD_FAILED]);
        assert!(out.is_empty());

        store.set_failure(None).await;
        assert_eq!(store.orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_finish_session_lists_only_after_save() {
        let store = store();
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();

        finish_session(&store, SessionEnd::Quit, &mut out, &mut notifier)
            .await
            .unwrap();
        assert!(out.is_empty());

        finish_session(&store, SessionEnd::Saved(SaveKind::Updated), &mut out, &mut notifier)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No orders found.\n");
        assert!(notifier.notices.is_empty());
    }

    #[tokio::test]
    async fn test_edit_order_updates_and_prints() {
        let store = store();
        run_new(&store, "set 1 code X1\nheader invoice INV-1\nsave\n").await;

        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        let end = edit_order(
            &store,
            "1",
            "set 1 qty 2\nprint\nsave\n".as_bytes(),
            &mut out,
            &mut notifier,
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Saved(SaveKind::Updated));
        assert_eq!(
            notifier.messages(),
            vec![ORDER_LOADED, INVOICE_PRINTED, ORDER_UPDATED]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sales Invoice"));
        assert!(text.contains("Total Incl:  20.00"));

        let orders = store.orders().await;
        assert_eq!(orders[0].order_items[0].quantity, 2.0);
    }

    #[tokio::test]
    async fn test_edit_missing_order() {
        let store = store();
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        let err = edit_order(&store, "99", "".as_bytes(), &mut out, &mut notifier)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(notifier.messages(), vec![LOAD_FAILED]);
    }
}

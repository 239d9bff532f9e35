//! # Print Command
//!
//! Writes the printable invoice of a stored order.

use std::io::Write;

use tracing::debug;

use salesdesk_client::OrderStore;
use salesdesk_core::invoice::render_invoice;
use salesdesk_core::OrderDraft;

use crate::error::AppError;
use crate::notify::{Notify, INVOICE_PRINTED, LOAD_FAILED};

/// Writes the invoice of `draft` to `out` and raises the printed notice.
pub fn write_invoice<W, N>(draft: &OrderDraft, out: &mut W, notifier: &mut N) -> Result<(), AppError>
where
    W: Write,
    N: Notify,
{
    let text = render_invoice(draft.header(), draft.customer(), draft.lines(), draft.totals());
    out.write_all(text.as_bytes())?;
    out.flush()?;
    notifier.success(INVOICE_PRINTED);
    Ok(())
}

/// Loads order `id` and prints its invoice.
///
/// Amounts are recomputed from the stored lines before printing.
pub async fn print_order<S, W, N>(
    store: &S,
    id: &str,
    out: &mut W,
    notifier: &mut N,
) -> Result<(), AppError>
where
    S: OrderStore + ?Sized,
    W: Write,
    N: Notify,
{
    debug!(order_id = %id, "print_order command");

    let order = match store.get_order(id).await {
        Ok(order) => order,
        Err(e) => {
            notifier.error(LOAD_FAILED);
            return Err(e.into());
        }
    };

    write_invoice(&OrderDraft::from_order(&order), out, notifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::RecordingNotifier;
    use salesdesk_client::MemoryOrderStore;
    use salesdesk_core::payload::to_submission_payload;
    use salesdesk_core::{CustomerData, HeaderData, OrderLine};

    #[tokio::test]
    async fn test_prints_stored_order() {
        let store = MemoryOrderStore::new(vec![], vec![]);
        let mut line = OrderLine::blank();
        line.item_code = "X1".into();
        line.quantity = 3.0;
        line.unit_price = 10.0;
        line.tax_rate_percent = 10.0;
        let header = HeaderData {
            invoice_no: "INV-3".into(),
            ..HeaderData::default()
        };
        let id = store
            .insert(&to_submission_payload(&header, &CustomerData::default(), &[line]))
            .await;

        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();
        print_order(&store, &id, &mut out, &mut notifier).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Sales Invoice"));
        assert!(text.contains("INV-3"));
        assert!(text.contains("Total Incl:  33.00"));
        assert_eq!(notifier.messages(), vec![INVOICE_PRINTED]);
    }

    #[tokio::test]
    async fn test_missing_order() {
        let store = MemoryOrderStore::new(vec![], vec![]);
        let mut out = Vec::new();
        let mut notifier = RecordingNotifier::default();

        let err = print_order(&store, "5", &mut out, &mut notifier).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(notifier.messages(), vec![LOAD_FAILED]);
    }
}

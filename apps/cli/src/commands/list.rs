//! # List Command
//!
//! The home screen: every stored order with its totals.

use std::io::Write;

use tracing::debug;

use salesdesk_client::OrderStore;
use salesdesk_core::invoice::render_order_list;

use crate::error::AppError;
use crate::notify::{Notify, ORDERS_LOAD_FAILED};

/// Fetches the stored orders and writes the listing table to `out`.
///
/// ## Output
/// ```text
/// Id  Invoice No.  Invoice Date  Customer Name  Reference  Total Excl  Total Tax  Total Incl
/// --  -----------  ------------  -------------  ---------  ----------  ---------  ----------
///  1  INV-1        2024-05-01    Acme           PO-1            30.00       3.00       33.00
/// ```
pub async fn list_orders<S, W, N>(store: &S, out: &mut W, notifier: &mut N) -> Result<(), AppError>
where
    S: OrderStore + ?Sized,
    W: Write,
    N: Notify,
{
    debug!("list_orders command");

    let orders = match store.list_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            notifier.error(ORDERS_LOAD_FAILED);
            return Err(e.into());
        }
    };

    out.write_all(render_order_list(&orders).as_bytes())?;
    out.flush()?;
    Ok(())
}

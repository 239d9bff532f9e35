//! # In-Memory Order Store
//!
//! An [`OrderStore`] that keeps everything in process memory, for testing
//! code that drives a store without a server.
//!
//! Like the real service it assigns ids on create and recomputes line
//! amounts from quantity, price and tax, so listings show store-side totals.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use salesdesk_core::pricing::compute_totals;
use salesdesk_core::{
    CatalogItem, Client, OrderItemPayload, OrderLine, OrderPayload, OrderSummary, SalesOrder,
};

use crate::error::{ClientError, ClientResult};
use crate::store::OrderStore;

/// Mutable contents of the store.
#[derive(Debug, Default)]
struct Inner {
    catalog: Vec<CatalogItem>,
    clients: Vec<Client>,
    orders: Vec<SalesOrder>,
    next_id: u64,
    /// When set, every call fails with this HTTP status.
    failure: Option<u16>,
}

/// Process-local order store.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    inner: Mutex<Inner>,
}

impl MemoryOrderStore {
    /// Creates a store with reference data and no orders.
    pub fn new(catalog: Vec<CatalogItem>, clients: Vec<Client>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                catalog,
                clients,
                orders: Vec::new(),
                next_id: 1,
                failure: None,
            }),
        }
    }

    /// Makes every subsequent call fail with `status` (or succeed again
    /// with `None`).
    pub async fn set_failure(&self, status: Option<u16>) {
        self.inner.lock().await.failure = status;
    }

    /// Stores an order as if it had been created earlier; returns its id.
    pub async fn insert(&self, payload: &OrderPayload) -> String {
        let mut inner = self.inner.lock().await;
        let id = inner.allocate_id();
        let order = stored_order(Some(id.clone()), payload);
        inner.orders.push(order);
        id
    }

    /// Snapshot of all stored orders, in creation order.
    pub async fn orders(&self) -> Vec<SalesOrder> {
        self.inner.lock().await.orders.clone()
    }
}

impl Inner {
    fn check(&self, method: &str, path: &str) -> ClientResult<()> {
        match self.failure {
            Some(status) => Err(ClientError::Status {
                method: method.to_string(),
                url: path.to_string(),
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id.to_string()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.orders
            .iter()
            .position(|o| o.id.as_deref() == Some(id))
    }
}

fn not_found(method: &str, id: &str) -> ClientError {
    ClientError::Status {
        method: method.to_string(),
        url: format!("/salesorder/{id}"),
        status: 404,
        body: String::new(),
    }
}

fn stored_line(item: &OrderItemPayload) -> OrderLine {
    let mut line = OrderLine {
        item_code: item.item_code.clone(),
        description: item.description.clone(),
        note: item.note.clone(),
        quantity: item.quantity as f64,
        unit_price: item.price,
        tax_rate_percent: item.tax,
        ..OrderLine::blank()
    };
    line.recalculate();
    line
}

fn stored_order(id: Option<String>, payload: &OrderPayload) -> SalesOrder {
    SalesOrder {
        id,
        invoice_no: payload.invoice_no.clone(),
        invoice_date: payload.invoice_date.clone(),
        reference_no: payload.reference_no.clone(),
        customer_name: payload.customer_name.clone(),
        address1: payload.address1.clone(),
        address2: payload.address2.clone(),
        state: payload.state.clone(),
        post_code: payload.post_code.clone(),
        order_items: payload.order_items.iter().map(stored_line).collect(),
    }
}

fn summary(order: &SalesOrder) -> OrderSummary {
    let totals = compute_totals(&order.order_items);
    OrderSummary {
        id: order.id.clone().unwrap_or_default(),
        invoice_no: order.invoice_no.clone(),
        invoice_date: order.invoice_date.clone(),
        customer_name: order.customer_name.clone(),
        reference_no: order.reference_no.clone(),
        total_excl: totals.total_excl,
        total_tax: totals.total_tax,
        total_incl: totals.total_incl,
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list_clients(&self) -> ClientResult<Vec<Client>> {
        let inner = self.inner.lock().await;
        inner.check("GET", "/clients")?;
        Ok(inner.clients.clone())
    }

    async fn list_items(&self) -> ClientResult<Vec<CatalogItem>> {
        let inner = self.inner.lock().await;
        inner.check("GET", "/items")?;
        Ok(inner.catalog.clone())
    }

    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        let inner = self.inner.lock().await;
        inner.check("GET", "/salesorder")?;
        Ok(inner.orders.iter().map(summary).collect())
    }

    async fn get_order(&self, id: &str) -> ClientResult<SalesOrder> {
        let inner = self.inner.lock().await;
        inner.check("GET", &format!("/salesorder/{id}"))?;
        inner
            .position(id)
            .map(|i| inner.orders[i].clone())
            .ok_or_else(|| not_found("GET", id))
    }

    async fn create_order(&self, payload: &OrderPayload) -> ClientResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check("POST", "/salesorder")?;
        let id = inner.allocate_id();
        debug!(order_id = %id, "Stored new order in memory");
        inner.orders.push(stored_order(Some(id), payload));
        Ok(())
    }

    async fn update_order(&self, id: &str, payload: &OrderPayload) -> ClientResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check("PUT", &format!("/salesorder/{id}"))?;
        let index = inner.position(id).ok_or_else(|| not_found("PUT", id))?;
        inner.orders[index] = stored_order(Some(id.to_string()), payload);
        debug!(order_id = %id, "Replaced order in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::load_form_data;
    use salesdesk_core::{CustomerData, HeaderData};
    use salesdesk_core::payload::to_submission_payload;

    fn payload(invoice_no: &str, quantity: f64, price: f64) -> OrderPayload {
        let mut line = OrderLine::blank();
        line.item_code = "X1".into();
        line.quantity = quantity;
        line.unit_price = price;
        line.tax_rate_percent = 10.0;
        line.recalculate();

        let header = HeaderData {
            invoice_no: invoice_no.into(),
            ..HeaderData::default()
        };
        to_submission_payload(&header, &CustomerData::default(), &[line])
    }

    #[tokio::test]
    async fn test_create_then_list_recomputes_totals() {
        let store = MemoryOrderStore::new(vec![], vec![]);
        store.create_order(&payload("INV-1", 3.0, 10.0)).await.unwrap();

        let orders = store.list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "1");
        assert_eq!(orders[0].total_excl, 30.0);
        assert_eq!(orders[0].total_incl, 33.0);
    }

    #[tokio::test]
    async fn test_update_replaces_order() {
        let store = MemoryOrderStore::new(vec![], vec![]);
        let id = store.insert(&payload("INV-1", 1.0, 5.0)).await;

        store
            .update_order(&id, &payload("INV-1b", 2.0, 5.0).with_id(id.clone()))
            .await
            .unwrap();

        let order = store.get_order(&id).await.unwrap();
        assert_eq!(order.invoice_no, "INV-1b");
        assert_eq!(order.order_items[0].excl_amount, 10.0);
        assert_eq!(store.orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_order_is_404() {
        let store = MemoryOrderStore::new(vec![], vec![]);
        assert!(store.get_order("9").await.unwrap_err().is_not_found());
        assert!(store
            .update_order("9", &payload("X", 1.0, 1.0))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let store = MemoryOrderStore::new(vec![CatalogItem::new("X1", "Widget", 5.0)], vec![]);
        store.set_failure(Some(500)).await;
        assert_eq!(load_form_data(&store).await.unwrap_err().status(), Some(500));

        store.set_failure(None).await;
        let data = load_form_data(&store).await.unwrap();
        assert_eq!(data.catalog.len(), 1);
        assert!(data.clients.is_empty());
    }
}

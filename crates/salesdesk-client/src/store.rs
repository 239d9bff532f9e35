//! # Order Store
//!
//! The remote order store, as a trait plus its HTTP/JSON implementation.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method   Path                  Body / Response                         │
//! │  ──────   ────                  ───────────────                         │
//! │  GET      /clients              → [Client]                              │
//! │  GET      /items                → [CatalogItem]                         │
//! │  GET      /salesorder           → [OrderSummary]                        │
//! │  GET      /salesorder/{id}      → SalesOrder                            │
//! │  POST     /salesorder           OrderPayload (no id)                    │
//! │  PUT      /salesorder/{id}      OrderPayload (with id)                  │
//! │                                                                         │
//! │  All paths are relative to the configured base URL.                    │
//! │  Any non-2xx status becomes ClientError::Status.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use salesdesk_core::{CatalogItem, Client, OrderPayload, OrderSummary, SalesOrder};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ConfigError};

// =============================================================================
// Store Trait
// =============================================================================

/// Everything the order editor needs from the order store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// `GET /clients`
    async fn list_clients(&self) -> ClientResult<Vec<Client>>;

    /// `GET /items`
    async fn list_items(&self) -> ClientResult<Vec<CatalogItem>>;

    /// `GET /salesorder`
    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>>;

    /// `GET /salesorder/{id}`
    async fn get_order(&self, id: &str) -> ClientResult<SalesOrder>;

    /// `POST /salesorder`
    async fn create_order(&self, payload: &OrderPayload) -> ClientResult<()>;

    /// `PUT /salesorder/{id}`
    async fn update_order(&self, id: &str, payload: &OrderPayload) -> ClientResult<()>;
}

/// Reference data an edit session needs before it can start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pub catalog: Vec<CatalogItem>,
    pub clients: Vec<Client>,
}

/// Fetches catalog and clients concurrently.
///
/// Fails as a whole if either request fails; no partial data is returned.
pub async fn load_form_data<S>(store: &S) -> ClientResult<FormData>
where
    S: OrderStore + ?Sized,
{
    let (catalog, clients) = tokio::try_join!(store.list_items(), store.list_clients())?;
    debug!(
        items = catalog.len(),
        clients = clients.len(),
        "Form data loaded"
    );
    Ok(FormData { catalog, clients })
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`OrderStore`] backed by the REST order service.
#[derive(Debug, Clone)]
pub struct HttpOrderStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpOrderStore {
    /// Builds a store client from validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let base_url = Url::parse(config.base_url())?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    /// Returns the base URL requests are made against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<(RequestBuilder, Url)> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Calling order store");
        Ok((self.http.request(method, url.clone()), url))
    }

    /// Sends a request and fails on any non-2xx status.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ClientResult<reqwest::Response> {
        let (request, url) = self.request(method.clone(), segments)?;

        let response = build(request).send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "Order store request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%method, %url, status = status.as_u16(), "Order store returned an error");
            return Err(ClientError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let response = self.send(Method::GET, segments, |r| r).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    async fn list_clients(&self) -> ClientResult<Vec<Client>> {
        self.get_json(&["clients"]).await
    }

    async fn list_items(&self) -> ClientResult<Vec<CatalogItem>> {
        self.get_json(&["items"]).await
    }

    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        self.get_json(&["salesorder"]).await
    }

    async fn get_order(&self, id: &str) -> ClientResult<SalesOrder> {
        self.get_json(&["salesorder", id]).await
    }

    async fn create_order(&self, payload: &OrderPayload) -> ClientResult<()> {
        self.send(Method::POST, &["salesorder"], |r| r.json(payload))
            .await?;
        debug!(invoice_no = %payload.invoice_no, "Order created");
        Ok(())
    }

    async fn update_order(&self, id: &str, payload: &OrderPayload) -> ClientResult<()> {
        self.send(Method::PUT, &["salesorder", id], |r| r.json(payload))
            .await?;
        debug!(order_id = %id, "Order updated");
        Ok(())
    }
}

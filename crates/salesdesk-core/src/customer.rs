//! # Customer Resolution
//!
//! Maps a selected client id onto the customer block of an order.

use tracing::debug;

use crate::types::{Client, CustomerData};

/// Resolves a client id against the client list.
///
/// ## Behavior
/// - exact string equality on `Client::id`, first match wins
/// - missing address fields on the client become empty strings
/// - no match (including the empty "nothing selected" id) returns
///   [`CustomerData::blank`]
///
/// Pure and total: never fails.
///
/// ## Example
/// ```rust
/// use salesdesk_core::Client;
/// use salesdesk_core::customer::resolve_customer;
///
/// let clients = vec![Client {
///     id: "7".into(),
///     customer_name: "Acme Pty Ltd".into(),
///     address1: Some("1 Main St".into()),
///     address2: None,
///     state: Some("NSW".into()),
///     post_code: None,
/// }];
///
/// let customer = resolve_customer("7", &clients);
/// assert_eq!(customer.customer_name, "Acme Pty Ltd");
/// assert_eq!(customer.address2, "");
///
/// assert_eq!(resolve_customer("8", &clients).customer_name, "");
/// ```
pub fn resolve_customer(client_id: &str, clients: &[Client]) -> CustomerData {
    let selected = if client_id.is_empty() {
        None
    } else {
        clients.iter().find(|c| c.id == client_id)
    };

    match selected {
        Some(client) => {
            debug!(client_id = %client.id, "Client selected");
            CustomerData {
                customer_id: client.id.clone(),
                customer_name: client.customer_name.clone(),
                address1: client.address1.clone().unwrap_or_default(),
                address2: client.address2.clone().unwrap_or_default(),
                state: client.state.clone().unwrap_or_default(),
                post_code: client.post_code.clone().unwrap_or_default(),
            }
        }
        None => {
            debug!(client_id = %client_id, "No client selected, clearing customer");
            CustomerData::blank()
        }
    }
}

//! Order command handlers.
//!
//! One module per command, each exporting `COMMAND`, `guard` and `handle`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::microsvc::{HandlerError, Service};
use crate::model::InMemoryModelStore;
use crate::orders::{OrderService, OrderView};

pub type Backend = OrderService<InMemoryModelStore>;

pub mod order_cancel;
pub mod order_get;
pub mod order_list;
pub mod order_list_mine;
pub mod order_place;
pub mod order_stats;
pub mod order_update_status;

/// A service with every order command registered.
pub fn service(backend: Backend) -> Service<Backend> {
    crate::register_handlers!(
        Service::new(backend),
        order_place,
        order_list_mine,
        order_get,
        order_cancel,
        order_list,
        order_update_status,
        order_stats,
    )
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(|e| HandlerError::Other(Box::new(e)))
}

/// `{ "message": ..., "order": ... }`
fn order_message(message: &str, order: &OrderView) -> Result<Value, HandlerError> {
    Ok(json!({ "message": message, "order": to_json(order)? }))
}

//! Handler: order.list
//!
//! Admin listing with status, payment status, date range and order number
//! filters.

use serde_json::Value;

use super::{to_json, Backend};
use crate::microsvc::{Context, HandlerError};
use crate::orders::AdminOrdersQuery;

pub const COMMAND: &str = "order.list";

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    let query = ctx.input::<AdminOrdersQuery>()?;
    to_json(&ctx.backend().list_all(&requester, &query)?)
}

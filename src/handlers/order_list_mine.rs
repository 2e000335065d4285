//! Handler: order.list_mine

use serde_json::Value;

use super::{to_json, Backend};
use crate::microsvc::{Context, HandlerError};
use crate::orders::MyOrdersQuery;

pub const COMMAND: &str = "order.list_mine";

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    let query = ctx.input::<MyOrdersQuery>()?;
    to_json(&ctx.backend().list_mine(&requester, &query)?)
}

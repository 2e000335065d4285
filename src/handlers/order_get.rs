//! Handler: order.get

use serde_json::Value;

use super::{to_json, Backend};
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "order.get";

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    let order = ctx.backend().get(ctx.str_field("id")?, &requester)?;
    to_json(&order)
}

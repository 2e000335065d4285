//! Handler: order.cancel

use serde_json::Value;

use super::{order_message, Backend};
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "order.cancel";

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    let order = ctx.backend().cancel(ctx.str_field("id")?, &requester)?;
    order_message("Order cancelled successfully", &order)
}

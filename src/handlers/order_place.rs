//! Handler: order.place

use serde_json::Value;

use super::{order_message, Backend};
use crate::microsvc::{Context, HandlerError};
use crate::orders::PlaceOrder;

pub const COMMAND: &str = "order.place";

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    let input = ctx.input::<PlaceOrder>()?;
    let order = ctx.backend().place(&requester.user_id, &input)?;
    order_message("Order placed successfully", &order)
}

//! Handler: order.update_status

use serde::Deserialize;
use serde_json::Value;

use super::{order_message, Backend};
use crate::microsvc::{Context, HandlerError};
use crate::orders::UpdateOrderStatus;

pub const COMMAND: &str = "order.update_status";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(flatten)]
    pub update: UpdateOrderStatus,
}

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    let input = ctx.input::<Input>()?;
    let order = ctx
        .backend()
        .update_status(&input.id, &requester, &input.update)?;
    order_message("Order updated successfully", &order)
}

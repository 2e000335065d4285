//! Handler: order.stats

use serde_json::Value;

use super::{to_json, Backend};
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "order.stats";

pub fn guard(_ctx: &Context<Backend>) -> bool {
    true
}

pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
    let requester = ctx.requester()?;
    to_json(&ctx.backend().stats(&requester)?)
}

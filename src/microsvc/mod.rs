//! microsvc: convention-based command handler framework.
//!
//! Register command handlers on a `Service`. Each handler receives a
//! `Context<B>` with access to the input payload, session variables and
//! the backend.
//!
//! ## Handler Convention
//!
//! Each handler file follows this convention:
//!
//! ```ignore
//! // src/handlers/order_cancel.rs
//!
//! pub const COMMAND: &str = "order.cancel";
//!
//! pub fn guard(ctx: &Context<Backend>) -> bool {
//!     ctx.str_field("id").is_ok_and(|id| !id.is_empty())
//! }
//!
//! pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
//!     let order = ctx.backend().cancel(ctx.str_field("id")?, &ctx.requester()?)?;
//!     Ok(json!({ "message": "Order cancelled successfully", "order": order }))
//! }
//! ```

mod context;
mod error;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::{Session, USER_ID_HEADER, USER_ROLE_HEADER};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str` the command name
/// - `guard(ctx) -> bool` input validation
/// - `handle(ctx) -> Result<Value, HandlerError>` the handler
///
/// # Example
/// ```ignore
/// let service = storefront::register_handlers!(
///     microsvc::Service::new(backend),
///     handlers::order_place,
///     handlers::order_cancel,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}

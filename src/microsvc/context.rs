//! Context passed to command handlers.
//!
//! Carries the parsed input, session variables, and a reference to the
//! backend. Handlers access everything they need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;
use crate::orders::Requester;

/// The context passed to every command handler.
///
/// Generic over `B` (the backend type) so handlers can reach whatever
/// service the dispatcher was built with.
///
/// ## Example
///
/// ```ignore
/// pub fn handle(ctx: &Context<Backend>) -> Result<Value, HandlerError> {
///     let requester = ctx.requester()?;
///     let input = ctx.input::<PlaceOrder>()?;
///     // ...
/// }
/// ```
pub struct Context<'a, B> {
    /// Raw JSON input from the request.
    input: Value,
    /// Session variables (user ID, role).
    session: Session,
    /// Reference to the backend.
    backend: &'a B,
}

impl<'a, B> Context<'a, B> {
    pub(crate) fn new(input: Value, session: Session, backend: &'a B) -> Self {
        Self {
            input,
            session,
            backend,
        }
    }

    /// Deserialize the input payload into a typed struct. Missing or
    /// malformed fields are reported by name.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        Ok(serde_json::from_value(self.input.clone())?)
    }

    /// Get a string field from the raw input.
    pub fn str_field(&self, field: &str) -> Result<&str, HandlerError> {
        self.input
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::DecodeFailed(format!("missing field `{}`", field)))
    }

    /// The requesting identity. Returns `Unauthorized` if the session has
    /// no user ID.
    pub fn requester(&self) -> Result<Requester, HandlerError> {
        self.session
            .requester()
            .ok_or_else(|| HandlerError::Unauthorized("missing user ID in session".into()))
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        self.backend
    }
}

//! Service: command handler registry and dispatch for microsvc.
//!
//! `Service<B>` holds a backend and a set of named command handlers.
//! Each handler receives a `Context<B>` and returns `Result<Value, HandlerError>`.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::microsvc::{Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(backend)
//!     .command("order.get", |ctx| {
//!         let order_id = ctx.str_field("id")?;
//!         Ok(serde_json::to_value(ctx.backend().get(order_id, &ctx.requester()?)?)?)
//!     });
//!
//! let session = Session::from_map(HashMap::from([("x-user-id".into(), "u1".into())]));
//! let result = service.dispatch("order.get", json!({"id": "o1"}), session);
//! ```

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, error};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type GuardFn<B> = Box<dyn Fn(&Context<B>) -> bool + Send + Sync>;
type HandleFn<B> = Box<dyn Fn(&Context<B>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<B> {
    guard: Option<GuardFn<B>>,
    handle: HandleFn<B>,
}

/// A microservice that routes commands to handler functions.
///
/// Generic over `B`, the backend type. Handlers receive a `Context<B>`
/// and reach the backend via `ctx.backend()`.
pub struct Service<B> {
    backend: B,
    handlers: HashMap<String, CommandHandler<B>>,
}

impl<B: Send + Sync + 'static> Service<B> {
    /// Create a new service around the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<B>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<B>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<B>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    ///
    /// Builds a `Context` from the input and session, looks up the handler,
    /// runs the guard (if any), then calls the handler.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, session, &self.backend);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        debug!(command, "dispatching");
        (handler.handle)(&ctx)
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    ///
    /// This is the single place handler errors become responses: the
    /// error's status code and a `{ "message": ... }` body.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    error!(command = %request.command, error = %e, "command failed");
                }
                CommandResponse {
                    status,
                    body: json!({ "message": e.to_string() }),
                }
            }
        }
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// An inbound command request.
///
/// ```json
/// {
///   "command": "order.cancel",
///   "input": { "id": "8b0c..." },
///   "session_variables": { "x-user-id": "user-42" }
/// }
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandRequest {
    /// Command name.
    pub command: String,
    /// JSON input payload.
    pub input: Value,
    /// Session variables (user ID, role).
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// Response from dispatching a command.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (handler result or error message).
    pub body: Value,
}

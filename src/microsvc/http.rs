//! HTTP transport for microsvc. Maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST   /api/orders`                → `order.place` (201)
//! - `GET    /api/orders/my`             → `order.list_mine`
//! - `GET    /api/orders/stats/summary`  → `order.stats`
//! - `GET    /api/orders/:id`            → `order.get`
//! - `PUT    /api/orders/:id/cancel`     → `order.cancel`
//! - `GET    /api/orders`                → `order.list`
//! - `PUT    /api/orders/:id/status`     → `order.update_status`
//! - `POST   /commands/:command`         → any registered command
//! - `GET    /health`                    → `{ "ok": true, "commands": [...] }`
//!
//! Request headers become session variables, so `x-user-id` and
//! `x-user-role` carry the caller's identity.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::service::{CommandRequest, Service};
use crate::orders::{AdminOrdersQuery, MyOrdersQuery};

type Shared<B> = State<Arc<Service<B>>>;

/// Build an axum `Router` that dispatches requests via the given service.
pub fn router<B: Send + Sync + 'static>(service: Arc<Service<B>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/commands/:command", post(command_handler))
        .route("/api/orders", post(place_order).get(list_orders))
        .route("/api/orders/my", get(my_orders))
        .route("/api/orders/stats/summary", get(order_stats))
        .route("/api/orders/:id", get(get_order))
        .route("/api/orders/:id/cancel", put(cancel_order))
        .route("/api/orders/:id/status", put(update_order_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:5000"`).
pub async fn serve<B: Send + Sync + 'static>(
    service: Arc<Service<B>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
    }
}

/// `GET /health` returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<B: Send + Sync + 'static>(State(service): Shared<B>) -> impl IntoResponse {
    let mut commands: Vec<&str> = service.commands();
    commands.sort_unstable();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /commands/:command` dispatches with JSON body and headers as session.
async fn command_handler<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    Path(command): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(input)) => dispatch(&service, &command, input, &headers, StatusCode::OK),
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

async fn place_order<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(input)) => dispatch(&service, "order.place", input, &headers, StatusCode::CREATED),
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

async fn my_orders<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    headers: HeaderMap,
    query: Result<Query<MyOrdersQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => dispatch_with(&service, "order.list_mine", &query, &headers),
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

async fn list_orders<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    headers: HeaderMap,
    query: Result<Query<AdminOrdersQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => dispatch_with(&service, "order.list", &query, &headers),
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

async fn order_stats<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    headers: HeaderMap,
) -> Response {
    dispatch(&service, "order.stats", json!({}), &headers, StatusCode::OK)
}

async fn get_order<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    dispatch(&service, "order.get", json!({ "id": id }), &headers, StatusCode::OK)
}

async fn cancel_order<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    dispatch(&service, "order.cancel", json!({ "id": id }), &headers, StatusCode::OK)
}

async fn update_order_status<B: Send + Sync + 'static>(
    State(service): Shared<B>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let mut input = match body {
        Ok(Json(Value::Object(fields))) => fields,
        Ok(Json(_)) => return bad_request("expected a JSON object".into()),
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    input.insert("id".to_string(), Value::String(id));
    dispatch(&service, "order.update_status", Value::Object(input), &headers, StatusCode::OK)
}

fn dispatch_with<B: Send + Sync + 'static, T: Serialize>(
    service: &Service<B>,
    command: &str,
    input: &T,
    headers: &HeaderMap,
) -> Response {
    match serde_json::to_value(input) {
        Ok(input) => dispatch(service, command, input, headers, StatusCode::OK),
        Err(e) => bad_request(e.to_string()),
    }
}

fn dispatch<B: Send + Sync + 'static>(
    service: &Service<B>,
    command: &str,
    input: Value,
    headers: &HeaderMap,
    success: StatusCode,
) -> Response {
    let request = CommandRequest {
        command: command.to_string(),
        input,
        session_variables: session_variables(headers),
    };
    let response = service.dispatch_request(&request);
    let status = match response.status {
        200 => success,
        status => StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    };
    (status, Json(response.body)).into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

/// Extract session variables from HTTP headers.
///
/// All headers are lowercased and included as session variables.
fn session_variables(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

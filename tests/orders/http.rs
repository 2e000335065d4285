//! REST transport tests.
//!
//! Starts an axum server on an ephemeral port and exercises it with reqwest.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use storefront::{handlers, microsvc, OrderService};

use crate::support::{self, ALICE, BOB, CASE, HEADPHONES};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let service = Arc::new(handlers::service(OrderService::new(support::store())));
    let app = microsvc::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn as_user(request: RequestBuilder, user_id: &str) -> RequestBuilder {
    request.header("x-user-id", user_id)
}

fn as_admin(request: RequestBuilder) -> RequestBuilder {
    request
        .header("x-user-id", support::ADMIN)
        .header("x-user-role", "admin")
}

fn order_body(lines: &[(&str, u32)]) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|(id, qty)| json!({ "productId": id, "quantity": qty }))
        .collect();
    json!({
        "items": items,
        "shippingAddress": {
            "firstName": "Alice",
            "lastName": "Rao",
            "email": "alice@example.com",
            "phone": "9876543210",
            "street": "12 MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "zipCode": "560001"
        },
        "paymentMethod": "cash_on_delivery"
    })
}

async fn place(client: &Client, base: &str, user_id: &str, lines: &[(&str, u32)]) -> Value {
    let resp = as_user(client.post(format!("{base}/api/orders")), user_id)
        .json(&order_body(lines))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn health_lists_order_commands() {
    let base = start_server().await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    for command in ["order.place", "order.cancel", "order.stats", "order.update_status"] {
        assert!(commands.iter().any(|c| c == command), "missing {command}");
    }
}

#[tokio::test]
async fn place_then_fetch_and_cancel() {
    let base = start_server().await;
    let client = Client::new();

    let placed = place(&client, &base, ALICE, &[(CASE, 2)]).await;
    assert_eq!(placed["message"], "Order placed successfully");
    assert_eq!(placed["order"]["totalAmount"].as_f64(), Some(640.0));
    assert_eq!(placed["order"]["orderStatus"], "pending");
    assert_eq!(placed["order"]["shippingAddress"]["country"], "India");
    let id = placed["order"]["id"].as_str().unwrap().to_string();

    let resp = as_user(client.get(format!("{base}/api/orders/{id}")), ALICE)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["items"][0]["product"]["brand"], "Spigen");
    assert_eq!(order["user"]["firstName"], "Alice");

    let resp = as_user(client.get(format!("{base}/api/orders/{id}")), BOB)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Access denied");

    let resp = as_user(client.put(format!("{base}/api/orders/{id}/cancel")), ALICE)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Order cancelled successfully");
    assert_eq!(body["order"]["orderStatus"], "cancelled");

    let resp = as_user(client.put(format!("{base}/api/orders/{id}/cancel")), ALICE)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn placement_errors_map_to_statuses() {
    let base = start_server().await;
    let client = Client::new();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&order_body(&[(CASE, 1)]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = as_user(client.post(format!("{base}/api/orders")), ALICE)
        .json(&order_body(&[(HEADPHONES, 4)]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Insufficient stock for Headphones. Available: 3");

    let resp = as_user(client.post(format!("{base}/api/orders")), ALICE)
        .json(&order_body(&[("missing", 1)]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = as_user(client.post(format!("{base}/api/orders")), ALICE)
        .json(&json!({ "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("missing field `shippingAddress`"), "{message}");
}

#[tokio::test]
async fn my_orders_and_admin_back_office() {
    let base = start_server().await;
    let client = Client::new();

    let first = place(&client, &base, ALICE, &[(CASE, 1)]).await;
    place(&client, &base, ALICE, &[(CASE, 1)]).await;
    place(&client, &base, BOB, &[(CASE, 1)]).await;

    let page: Value = as_user(client.get(format!("{base}/api/orders/my?page=1&limit=1")), ALICE)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total"], 2);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["currentPage"], 1);
    assert_eq!(page["orders"].as_array().unwrap().len(), 1);

    let resp = as_user(client.get(format!("{base}/api/orders")), ALICE)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let all: Value = as_admin(client.get(format!("{base}/api/orders?status=pending")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["total"], 3);

    let id = first["order"]["id"].as_str().unwrap();
    let resp = as_admin(client.put(format!("{base}/api/orders/{id}/status")))
        .json(&json!({ "orderStatus": "delivered", "paymentStatus": "paid", "trackingNumber": "TRK1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Order updated successfully");
    assert_eq!(body["order"]["orderStatus"], "delivered");
    assert_eq!(body["order"]["trackingNumber"], "TRK1");

    let stats: Value = as_admin(client.get(format!("{base}/api/orders/stats/summary")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalOrders"], 3);
    assert_eq!(stats["pendingOrders"], 2);
    assert_eq!(stats["completedOrders"], 1);
    assert_eq!(stats["monthlyOrders"], 3);
    assert_eq!(stats["monthlyRevenue"].as_f64(), Some(1035.0));
}

#[tokio::test]
async fn bad_query_and_unknown_commands() {
    let base = start_server().await;
    let client = Client::new();

    let resp = as_user(client.get(format!("{base}/api/orders/my?status=lost")), ALICE)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = as_user(client.post(format!("{base}/commands/order.refund")), ALICE)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = as_user(client.post(format!("{base}/commands/order.get")), ALICE)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "decode failed: missing field `id`");
}

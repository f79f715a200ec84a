//! Endpoint requests and replies against a local stub backend.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use trtech_api::{ApiClient, ApiConfig, ApiError, RetryPolicy};
use trtech_commerce::catalog::{Condition, Product, ProductFilter};
use trtech_commerce::checkout::OrderStatus;
use trtech_commerce::contact::ContactForm;
use trtech_commerce::ids::{OrderId, ProductId, RepairId};
use trtech_commerce::repair::RepairStatus;
use trtech_commerce::Money;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    query: Option<String>,
    body: String,
}

impl Seen {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct StubState {
    seen: Arc<Mutex<Vec<Seen>>>,
    status: StatusCode,
    reply: Arc<String>,
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, String) {
    state.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body,
    });
    (state.status, state.reply.to_string())
}

struct Backend {
    client: ApiClient,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn last(&self) -> Seen {
        self.seen().pop().unwrap()
    }
}

/// Serve `reply` with `status` for every request on a loopback port.
async fn backend(status: u16, reply: Value) -> Backend {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        seen: seen.clone(),
        status: StatusCode::from_u16(status).unwrap(),
        reply: Arc::new(reply.to_string()),
    };
    let app = Router::new().fallback(record).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ApiConfig::new(format!("http://{addr}/api"))
        .unwrap()
        .with_retry(RetryPolicy::none());
    Backend {
        client: ApiClient::new(config).unwrap(),
        seen,
    }
}

fn product_json(id: u64, name: &str, price: f64) -> Value {
    json!({ "_id": id.to_string(), "name": name, "price": price, "category": "cables" })
}

#[tokio::test]
async fn test_list_products_sends_category_and_condition() {
    let backend = backend(
        200,
        json!({ "success": true, "data": [product_json(1, "USB-C Cable", 149.0)] }),
    )
    .await;

    let filter = ProductFilter::from_selection("cables", "pre-owned");
    let products = backend.client.list_products(&filter).await.unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.path, "/api/products");
    assert_eq!(seen.query.as_deref(), Some("category=cables&condition=pre-owned"));
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, Money::rand(14900));
}

#[tokio::test]
async fn test_product_search_stays_local() {
    let backend = backend(
        200,
        json!({ "success": true, "data": [
            product_json(1, "USB-C Cable", 149.0),
            product_json(2, "Laptop Battery", 349.0),
        ] }),
    )
    .await;

    let filter = ProductFilter::from_selection("all", "all").with_search("battery");
    let products = backend.client.list_products(&filter).await.unwrap();

    assert_eq!(backend.last().query, None);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Laptop Battery");
}

#[tokio::test]
async fn test_product_paths_by_id() {
    let backend = backend(
        200,
        json!({ "success": true, "data": product_json(7, "SSD", 899.0) }),
    )
    .await;
    let id = ProductId::from(7u64);

    let product = backend.client.get_product(&id).await.unwrap();
    assert_eq!(product.name, "SSD");

    let edited = Product::new(7u64, "SSD 1TB", Money::rand(99900), Condition::New);
    backend.client.update_product(&edited).await.unwrap();
    backend.client.delete_product(&id).await.unwrap();

    let seen = backend.seen();
    let calls: Vec<_> = seen
        .iter()
        .map(|s| (s.method.as_str(), s.path.as_str()))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("GET", "/api/products/7"),
            ("PUT", "/api/products/7"),
            ("DELETE", "/api/products/7"),
        ]
    );
    assert_eq!(seen[1].json()["name"], "SSD 1TB");
    assert_eq!(seen[1].json()["price"], json!(999.0));
}

#[tokio::test]
async fn test_list_orders_status_query() {
    let backend = backend(200, json!({ "success": true, "data": [] })).await;

    let orders = backend
        .client
        .list_orders(Some(OrderStatus::Processing))
        .await
        .unwrap();
    assert!(orders.is_empty());
    assert_eq!(backend.last().query.as_deref(), Some("status=Processing"));

    backend.client.list_orders(None).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.path, "/api/orders");
    assert_eq!(seen.query, None);
}

#[tokio::test]
async fn test_update_order_status_body() {
    let backend = backend(
        200,
        json!({ "success": true, "data": { "_id": "ord000001", "status": "Shipped" } }),
    )
    .await;

    let order = backend
        .client
        .update_order_status(&OrderId::from("ord000001"), OrderStatus::Shipped)
        .await
        .unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, "PUT");
    assert_eq!(seen.path, "/api/orders/ord000001");
    assert_eq!(seen.json(), json!({ "status": "Shipped" }));
    assert_eq!(order.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_delete_missing_order_surfaces_message() {
    let backend = backend(
        404,
        json!({ "success": false, "message": "Order not found" }),
    )
    .await;

    let err = backend
        .client
        .delete_order(&OrderId::from("ord000009"))
        .await
        .unwrap_err();

    assert_eq!(backend.last().method, "DELETE");
    assert!(matches!(
        err,
        ApiError::Http { status: 404, ref message } if message == "Order not found"
    ));
}

#[tokio::test]
async fn test_list_repairs_status_query() {
    let backend = backend(200, json!({ "success": true, "data": [] })).await;

    backend
        .client
        .list_repairs(Some(RepairStatus::InProgress))
        .await
        .unwrap();

    let seen = backend.last();
    assert_eq!(seen.path, "/api/repairs");
    assert_eq!(seen.query.as_deref(), Some("status=In+Progress"));
}

#[tokio::test]
async fn test_update_repair_status_body() {
    let backend = backend(
        200,
        json!({ "success": true, "data": {
            "id": "R2", "customerName": "Piet", "deviceType": "Laptop", "status": "In Progress"
        } }),
    )
    .await;

    let repair = backend
        .client
        .update_repair_status(&RepairId::from("R2"), RepairStatus::InProgress)
        .await
        .unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, "PUT");
    assert_eq!(seen.path, "/api/repairs/R2");
    assert_eq!(seen.json(), json!({ "status": "In Progress" }));
    assert_eq!(repair.status, RepairStatus::InProgress);

    backend.client.delete_repair(&repair.id).await.unwrap();
    assert_eq!(backend.last().method, "DELETE");
    assert_eq!(backend.last().path, "/api/repairs/R2");
}

#[tokio::test]
async fn test_contact_and_health() {
    let backend = backend(
        200,
        json!({ "success": true, "message": "Message sent" }),
    )
    .await;

    let form = ContactForm {
        name: "Piet".into(),
        message: "Do you sell chargers?".into(),
        ..Default::default()
    };
    backend.client.submit_contact(&form).await.unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/api/contact");
    assert_eq!(seen.json()["message"], "Do you sell chargers?");

    let health = backend.client.health().await.unwrap();
    assert_eq!(backend.last().path, "/api/health");
    assert_eq!(health.message.as_deref(), Some("Message sent"));
}

#[tokio::test]
async fn test_rejected_body_on_ok_status() {
    let backend = backend(
        200,
        json!({ "success": false, "message": "Invalid status" }),
    )
    .await;

    let err = backend
        .client
        .update_order_status(&OrderId::from("ord000001"), OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected(ref message) if message == "Invalid status"));
}

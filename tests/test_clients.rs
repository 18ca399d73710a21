use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use nowstay::client::category::CategoryClient;
use nowstay::client::subscription::SubscriptionClient;
use nowstay::client::wallet::WalletClient;
use nowstay::client::{ApiClient, ClientError};
use nowstay::db::category_repository::CategorySource;
use nowstay::error::AppError;

/// Requests seen by the fake API: `(method path, bearer token, body)`.
type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn record(seen: &Seen, call: &str, headers: &HeaderMap, body: Value) {
    seen.lock()
        .unwrap()
        .push((call.to_string(), bearer(headers), body));
}

/// Serve a fake marketplace API on an ephemeral port and return its base URL.
async fn spawn_fake_api(seen: Seen) -> String {
    let app = Router::new()
        .route(
            "/api/subscriptions/admin/create",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                record(&seen, "POST create", &headers, body.clone());
                Json(json!({ "success": true, "plan": body }))
            }),
        )
        .route(
            "/api/subscriptions/admin/all",
            get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                record(&seen, "GET all", &headers, Value::Null);
                Json(json!({ "plans": [{ "_id": "p1", "name": "Gold" }] }))
            }),
        )
        .route(
            "/api/subscriptions/admin/{id}",
            delete(|State(seen): State<Seen>, headers: HeaderMap, Path(id): Path<String>| async move {
                record(&seen, &format!("DELETE {id}"), &headers, Value::Null);
                if id == "missing" {
                    (StatusCode::NOT_FOUND, Json(json!({ "message": "Plan not found" })))
                } else {
                    (StatusCode::OK, Json(json!({ "success": true })))
                }
            })
            .put(
                |State(seen): State<Seen>,
                 headers: HeaderMap,
                 Path(id): Path<String>,
                 Json(body): Json<Value>| async move {
                    record(&seen, &format!("PUT {id}"), &headers, body.clone());
                    Json(json!({ "success": true, "plan": body }))
                },
            ),
        )
        .route(
            "/api/subscriptions/plans",
            get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                record(&seen, "GET plans", &headers, Value::Null);
                Json(json!({ "plans": [{ "_id": "p1", "isActive": true }] }))
            }),
        )
        .route(
            "/api/subscriptions/verify",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                record(&seen, "POST verify", &headers, body);
                Json(json!({ "success": true, "status": "active" }))
            }),
        )
        .route(
            "/api/subscriptions/checkout",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                record(&seen, "POST checkout", &headers, body);
                Json(json!({ "orderId": "order_123", "amount": 49900 }))
            }),
        )
        .route(
            "/api/categories/active",
            get(|| async {
                Json(json!({
                    "success": true,
                    "data": [{
                        "_id": "65f0c0ffee65f0c0ffee65f0",
                        "name": "treehouse",
                        "displayName": "Treehouse",
                        "isActive": true
                    }]
                }))
            }),
        )
        .route(
            "/api/wallet/balance",
            get(|| async { Json(json!({ "success": true, "wallet": { "balance": 1250.5 } })) }),
        )
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

#[tokio::test]
async fn subscription_admin_calls_send_bearer_token() {
    let seen: Seen = Arc::default();
    let base = spawn_fake_api(seen.clone()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap().with_admin_token("secret-token"));

    let created = client
        .create_plan(&json!({ "name": "Gold", "price": 499 }))
        .await
        .unwrap();
    assert_eq!(created["plan"]["name"], "Gold");

    let plans = client.list_plans().await.unwrap();
    assert_eq!(plans["plans"][0]["_id"], "p1");

    client.delete_plan("p1").await.unwrap();

    let seen = seen.lock().unwrap();
    let calls: Vec<&str> = seen.iter().map(|(call, _, _)| call.as_str()).collect();
    assert_eq!(calls, vec!["POST create", "GET all", "DELETE p1"]);
    assert!(seen
        .iter()
        .all(|(_, token, _)| token.as_deref() == Some("secret-token")));
    assert_eq!(seen[0].2["price"], 499);
}

#[tokio::test]
async fn subscription_admin_calls_require_token() {
    let seen: Seen = Arc::default();
    let base = spawn_fake_api(seen.clone()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap());

    let err = client.list_plans().await.unwrap_err();
    assert!(matches!(err, ClientError::MissingAdminToken));
    // Nothing reached the server
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn subscription_errors_carry_status() {
    let seen: Seen = Arc::default();
    let base = spawn_fake_api(seen.clone()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap().with_admin_token("t"));

    let err = client.delete_plan("missing").await.unwrap_err();
    match &err {
        ClientError::Status { status, body } => {
            assert_eq!(*status, 404);
            assert!(body.contains("Plan not found"));
        }
        other => panic!("Expected Status error, got: {:?}", other),
    }
    assert!(matches!(AppError::from(err), AppError::NotFound(_)));
}

#[tokio::test]
async fn partner_checkout_sends_plan_id_without_token() {
    let seen: Seen = Arc::default();
    let base = spawn_fake_api(seen.clone()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap().with_admin_token("t"));

    let order = client.create_order("p1").await.unwrap();
    assert_eq!(order["orderId"], "order_123");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, "POST checkout");
    assert_eq!(seen[0].1, None);
    assert_eq!(seen[0].2, json!({ "planId": "p1" }));
}

#[tokio::test]
async fn category_client_reads_wrapped_payload() {
    let base = spawn_fake_api(Seen::default()).await;
    let client = CategoryClient::new(ApiClient::new(&base).unwrap());

    let categories = client.active_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].display_name, "Treehouse");
}

#[tokio::test]
async fn wallet_balance_is_formatted_in_rupees() {
    let base = spawn_fake_api(Seen::default()).await;
    let client = WalletClient::new(ApiClient::new(&base).unwrap());

    let balance = client.balance().await.unwrap();
    assert_eq!(balance.balance, 1250.5);
    assert_eq!(balance.display(), "₹1,251");
}

#[tokio::test]
async fn unknown_route_maps_to_status_error() {
    let base = spawn_fake_api(Seen::default()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap());

    let err = client.current_subscription().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, .. }));
}

#[tokio::test]
async fn update_plan_sends_put_with_token_and_body() {
    let seen: Seen = Arc::default();
    let base = spawn_fake_api(seen.clone()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap().with_admin_token("secret-token"));
    let plan = json!({ "name": "Gold", "price": 599, "features": ["priority listing"] });

    let updated = client.update_plan("p1", &plan).await.unwrap();
    assert_eq!(updated["plan"], plan);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "PUT p1");
    assert_eq!(seen[0].1.as_deref(), Some("secret-token"));
    assert_eq!(seen[0].2, plan);
}

#[tokio::test]
async fn partner_plan_and_payment_calls_use_session_only() {
    let seen: Seen = Arc::default();
    let base = spawn_fake_api(seen.clone()).await;
    let client = SubscriptionClient::new(ApiClient::new(&base).unwrap().with_admin_token("t"));
    let payment = json!({
        "razorpay_order_id": "order_123",
        "razorpay_payment_id": "pay_456",
        "razorpay_signature": "sig"
    });

    let plans = client.active_plans().await.unwrap();
    assert_eq!(plans["plans"][0]["_id"], "p1");

    let verified = client.verify_payment(&payment).await.unwrap();
    assert_eq!(verified["status"], "active");

    let seen = seen.lock().unwrap();
    let calls: Vec<&str> = seen.iter().map(|(call, _, _)| call.as_str()).collect();
    assert_eq!(calls, vec!["GET plans", "POST verify"]);
    assert!(seen.iter().all(|(_, token, _)| token.is_none()));
    assert_eq!(seen[1].2, payment);
}

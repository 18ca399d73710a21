use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{Access, ApiClient, ClientError};

/// Client for the partner subscription endpoints under `/subscriptions`.
///
/// Admin calls manage the plan catalogue; partner calls read plans, start a
/// checkout and confirm the payment. Plan and payment payloads are opaque JSON.
#[derive(Clone)]
pub struct SubscriptionClient {
    api: ApiClient,
}

impl SubscriptionClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // --- Admin ---

    pub async fn create_plan(&self, plan: &Value) -> Result<Value, ClientError> {
        self.api
            .request(Method::POST, "subscriptions/admin/create", Some(plan), Access::Admin)
            .await
    }

    pub async fn list_plans(&self) -> Result<Value, ClientError> {
        self.api.get("subscriptions/admin/all", Access::Admin).await
    }

    pub async fn update_plan(&self, id: &str, plan: &Value) -> Result<Value, ClientError> {
        self.api
            .request(
                Method::PUT,
                &format!("subscriptions/admin/{id}"),
                Some(plan),
                Access::Admin,
            )
            .await
    }

    pub async fn delete_plan(&self, id: &str) -> Result<Value, ClientError> {
        self.api
            .request::<(), _>(
                Method::DELETE,
                &format!("subscriptions/admin/{id}"),
                None,
                Access::Admin,
            )
            .await
    }

    // --- Partner ---

    /// Plans currently offered to partners.
    pub async fn active_plans(&self) -> Result<Value, ClientError> {
        self.api.get("subscriptions/plans", Access::Session).await
    }

    /// The logged-in partner's subscription, if any.
    pub async fn current_subscription(&self) -> Result<Value, ClientError> {
        self.api.get("subscriptions/current", Access::Session).await
    }

    /// Open a payment order for `plan_id`.
    pub async fn create_order(&self, plan_id: &str) -> Result<Value, ClientError> {
        let body = json!({ "planId": plan_id });
        self.api
            .request(Method::POST, "subscriptions/checkout", Some(&body), Access::Session)
            .await
    }

    /// Forward the payment gateway's confirmation for verification.
    pub async fn verify_payment(&self, payment: &Value) -> Result<Value, ClientError> {
        self.api
            .request(Method::POST, "subscriptions/verify", Some(payment), Access::Session)
            .await
    }
}

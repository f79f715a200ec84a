//! Orders endpoints and the order backend seam used by checkout.

use crate::{ApiClient, ApiError};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::info;
use trtech_commerce::checkout::{NewOrder, Order, OrderStatus};
use trtech_commerce::ids::OrderId;

/// Where checkout records orders.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Persist a new order and return the stored record.
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError>;
}

impl ApiClient {
    /// `GET /orders`, optionally filtered by status.
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default();
        self.get("/orders", &query).await
    }

    /// `GET /orders/:id`.
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{id}"), &[]).await
    }

    /// `POST /orders`.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let created: Order = self.send(Method::POST, "/orders", order).await?;
        info!(order_id = %created.id, items = order.item_count(), "order created");
        Ok(created)
    }

    /// `PUT /orders/:id` with a new status.
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.send(
            Method::PUT,
            &format!("/orders/{id}"),
            &json!({ "status": status }),
        )
        .await
    }

    /// `DELETE /orders/:id`.
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        self.delete(&format!("/orders/{id}")).await
    }
}

#[async_trait]
impl OrderBackend for ApiClient {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        ApiClient::create_order(self, order).await
    }
}

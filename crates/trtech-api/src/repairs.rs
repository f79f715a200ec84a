//! Repairs endpoints.

use crate::{ApiClient, ApiError};
use reqwest::Method;
use serde_json::json;
use trtech_commerce::ids::RepairId;
use trtech_commerce::repair::{Repair, RepairBooking, RepairStatus};

impl ApiClient {
    /// `GET /repairs`, optionally filtered by status.
    pub async fn list_repairs(&self, status: Option<RepairStatus>) -> Result<Vec<Repair>, ApiError> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default();
        self.get("/repairs", &query).await
    }

    /// `GET /repairs/:id`.
    pub async fn get_repair(&self, id: &RepairId) -> Result<Repair, ApiError> {
        self.get(&format!("/repairs/{id}"), &[]).await
    }

    /// `POST /repairs`.
    pub async fn create_repair(&self, booking: &RepairBooking) -> Result<Repair, ApiError> {
        self.send(Method::POST, "/repairs", booking).await
    }

    /// `PUT /repairs/:id` with a new status.
    pub async fn update_repair_status(
        &self,
        id: &RepairId,
        status: RepairStatus,
    ) -> Result<Repair, ApiError> {
        self.send(
            Method::PUT,
            &format!("/repairs/{id}"),
            &json!({ "status": status }),
        )
        .await
    }

    /// `DELETE /repairs/:id`.
    pub async fn delete_repair(&self, id: &RepairId) -> Result<(), ApiError> {
        self.delete(&format!("/repairs/{id}")).await
    }
}

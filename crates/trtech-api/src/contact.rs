//! Contact and health endpoints.

use crate::{ApiClient, ApiError};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trtech_commerce::contact::{ContactForm, ContactMessage};

/// Reply from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    /// `POST /contact`.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        let _: Value = self.send(Method::POST, "/contact", form).await?;
        Ok(())
    }

    /// `GET /contact`, staff only.
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, ApiError> {
        self.get("/contact", &[]).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health", &[]).await
    }
}

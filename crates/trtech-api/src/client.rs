//! HTTP client for the backend.

use crate::config::ApiConfig;
use crate::envelope;
use crate::ApiError;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

/// Client for the TR-Tech REST backend.
///
/// Reads are retried on transient failures according to the configured
/// policy. Writes are sent once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(config.timeout.connect)
            .timeout(config.timeout.total)
            .user_agent(concat!("trtech/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Client configured from `TRTECH_API_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET with retries.
    #[instrument(skip(self, query), level = "debug")]
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.config.url(path);
        self.config
            .retry
            .run(path, |attempt| {
                let request = self.http.get(&url).query(query);
                async move {
                    debug!(attempt, "GET");
                    Self::execute(request).await
                }
            })
            .await
    }

    /// POST, PUT, or PATCH a JSON body.
    pub(crate) async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(%method, path, "sending");
        let request = self
            .http
            .request(method, self.config.url(path))
            .json(body);
        Self::execute(request).await
    }

    /// DELETE a resource.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.config.url(path)).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        envelope::decode_empty(status, &body)
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        envelope::decode(status, &body)
    }
}
